//! Validation command for configuration files.

use crate::cli::common::{
    load_config, CliError, CliResult, ExitCode, ValidationChecks, ValidationMessage,
    ValidationResponse,
};
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::services::{RingLayout, SphereModel};
use clap::Args;
use std::path::PathBuf;

/// Check a configuration for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to the YAML configuration
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let mut checks = ValidationChecks::skipped();
        let mut messages = Vec::new();

        match load_config(&self.config) {
            Ok(config) => {
                checks.config = "passed".to_string();
                check_model(&config, &mut checks, &mut messages);
            }
            Err(e) if e.kind == ExitCode::IoError => return Err(e),
            Err(e) => {
                checks.config = "failed".to_string();
                messages.push(ValidationMessage::error(e.message));
            }
        }

        let response = ValidationResponse {
            valid: !messages.iter().any(|m| !m.is_warning()),
            errors: messages,
            checks,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            println!("\nChecks:");
            println!("  Config:    {}", response.checks.config);
            println!("  Layout:    {}", response.checks.layout);
            println!("  Partition: {}", response.checks.partition);
            println!("  Grid:      {}", response.checks.grid);

            if !response.errors.is_empty() {
                println!("\nIssues:");
                for msg in &response.errors {
                    let prefix = if msg.is_warning() { "  ⚠" } else { "  ✗" };
                    println!("{} {}", prefix, msg.message);
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && response.errors.iter().any(ValidationMessage::is_warning) {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

/// Runs the engine stage by stage, recording the first failure.
fn check_model(
    config: &Config,
    checks: &mut ValidationChecks,
    messages: &mut Vec<ValidationMessage>,
) {
    let with_grid = config.enabled_formats().iter().any(|f| f.needs_grid());
    let input = config.engine_input(with_grid);

    let layout = match RingLayout::build(&input.rings) {
        Ok(layout) => layout,
        Err(e) => {
            checks.layout = "failed".to_string();
            messages.push(ValidationMessage::error(e.to_string()));
            return;
        }
    };

    checks.layout = "passed".to_string();
    let empty: Vec<String> = layout
        .rings()
        .iter()
        .filter(|r| r.is_empty())
        .map(|r| r.index.to_string())
        .collect();
    if !empty.is_empty() {
        checks.layout = "warning".to_string();
        messages.push(ValidationMessage::warning(format!(
            "Rings without LEDs: {}",
            empty.join(", ")
        )));
    }

    let model = match SphereModel::generate(&input) {
        Ok(model) => model,
        Err(e) => {
            checks.partition = "failed".to_string();
            messages.push(ValidationMessage::error(e.to_string()));
            return;
        }
    };

    let stats = model.stats();
    checks.partition = "passed".to_string();
    if stats.min_group == 0 {
        checks.partition = "warning".to_string();
        messages.push(ValidationMessage::warning(
            "At least one port drives no LEDs".to_string(),
        ));
    }

    if let Some(grid) = &model.grid {
        checks.grid = "passed".to_string();
        let collisions = grid.collisions();
        if !collisions.is_empty() {
            checks.grid = "warning".to_string();
            let hidden: usize = collisions.iter().map(|c| c.led_ids.len() - 1).sum();
            messages.push(ValidationMessage::warning(format!(
                "{} xlights3d grid cells hold more than one LED ({} LEDs hidden); grid is {}x{}x{}",
                collisions.len(),
                hidden,
                grid.dimensions.width,
                grid.dimensions.height,
                grid.dimensions.depth
            )));
        }
    }

    if config.enabled_formats().is_empty() {
        messages.push(ValidationMessage::warning(
            "No output formats enabled; generate needs --formats".to_string(),
        ));
    }
}

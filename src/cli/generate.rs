//! Generate command for model files.

use crate::cli::common::{build_model, load_config, CliError, CliResult};
use crate::config::{validate_prefix, DEFAULT_CONFIG_FILE};
use crate::export::{self, Format, OutputFile};
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// Generate model files for lighting-control software
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to the YAML configuration
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output directory for generated files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Formats to generate (defaults to those enabled in the configuration)
    #[arg(short, long, value_enum, value_name = "FORMAT", value_delimiter = ',', num_args = 1..)]
    pub formats: Vec<Format>,

    /// File name prefix (defaults to output.default_prefix)
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(&self.config)?;

        let mut formats = if self.formats.is_empty() {
            config.enabled_formats()
        } else {
            self.formats.clone()
        };
        formats.sort();
        formats.dedup();

        if formats.is_empty() {
            return Err(CliError::validation(
                "No output formats selected. Enable one under output.formats or pass --formats",
            ));
        }

        let prefix = self
            .prefix
            .clone()
            .unwrap_or_else(|| config.output.default_prefix.clone());
        validate_prefix(&prefix).map_err(|e| CliError::validation(e.to_string()))?;

        let with_grid = formats.iter().any(|f| f.needs_grid());
        let model = build_model(&config, with_grid)?;
        let stats = model.stats();
        info!(
            leds = model.led_count(),
            rings = model.layout.ring_count(),
            ports = stats.port_count,
            max_port_load = stats.max_group,
            "Computed layout for {}",
            config.display_name()
        );

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| CliError::io(format!("Failed to create output directory: {e}")))?;

        let rendered: Vec<(Format, anyhow::Result<Vec<OutputFile>>)> = formats
            .par_iter()
            .map(|&format| (format, export::render(format, &model, &config)))
            .collect();

        let mut written = Vec::new();
        for (format, files) in rendered {
            let files = files
                .map_err(|e| CliError::validation(format!("Failed to render {format}: {e:#}")))?;

            for file in files {
                let path = self.output_dir.join(format!("{prefix}{}", file.suffix));
                std::fs::write(&path, &file.contents).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                debug!(bytes = file.contents.len(), "Wrote {}", path.display());
                written.push(path);
            }

            info!("Generated {format} files");
            println!("✓ {} ({})", format.description(), format);
        }

        println!(
            "\n{} LEDs on {} rings across {} ports (largest port: {} LEDs)",
            model.led_count(),
            model.layout.ring_count(),
            stats.port_count,
            stats.max_group
        );
        println!("Output: {}", self.output_dir.display());
        for path in &written {
            if let Some(name) = path.file_name() {
                println!("  {}", name.to_string_lossy());
            }
        }

        Ok(())
    }
}

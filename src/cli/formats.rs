//! Formats command: list supported output formats.

use crate::cli::common::{CliError, CliResult};
use crate::export::Format;
use clap::Args;
use serde::Serialize;

/// List supported output formats
#[derive(Debug, Clone, Args)]
pub struct FormatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FormatInfo {
    name: &'static str,
    description: &'static str,
    files: Vec<&'static str>,
}

impl FormatsArgs {
    /// Execute the formats command
    pub fn execute(&self) -> CliResult<()> {
        let formats: Vec<FormatInfo> = Format::ALL
            .iter()
            .map(|f| FormatInfo {
                name: f.name(),
                description: f.description(),
                files: f.suffixes().to_vec(),
            })
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&formats)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        println!("Available formats:");
        for format in &formats {
            println!("  {:<10} {}", format.name, format.description);
            println!("             files: <prefix>{}", format.files.join(", <prefix>"));
        }

        Ok(())
    }
}

//! Shared types for CLI commands: errors, exit codes and JSON responses.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::services::{EngineError, SphereModel};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid configuration or infeasible layout
    ValidationError = 1,
    /// File could not be read or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process should terminate with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// File system failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Configuration or layout failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Numeric exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        Self::validation(format!("Layout error: {err}"))
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads a configuration file.
///
/// Read failures map to `IoError`, parse and validation failures to
/// `ValidationError`.
pub fn load_config(path: &Path) -> CliResult<Config> {
    Config::load(path).map_err(|e| {
        let unreadable = e.chain().any(|cause| cause.is::<std::io::Error>());
        if unreadable {
            CliError::io(format!("{e:#}"))
        } else {
            CliError::validation(format!("{e:#}"))
        }
    })
}

/// Runs the layout engine for a configuration.
pub fn build_model(config: &Config, with_grid: bool) -> CliResult<SphereModel> {
    Ok(SphereModel::generate(&config.engine_input(with_grid))?)
}

/// One finding reported by `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    /// "error" or "warning"
    pub severity: String,
    /// Human-readable description
    pub message: String,
}

impl ValidationMessage {
    /// Creates an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: "error".to_string(),
            message: message.into(),
        }
    }

    /// Creates a warning message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: "warning".to_string(),
            message: message.into(),
        }
    }

    /// Returns true for warnings.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == "warning"
    }
}

/// Status of each validation stage: "passed", "warning", "failed" or "skipped".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationChecks {
    /// YAML parsing and value checks
    pub config: String,
    /// Ring layout and coordinate mapping
    pub layout: String,
    /// Port partitioning
    pub partition: String,
    /// 3D grid projection
    pub grid: String,
}

impl ValidationChecks {
    /// All stages skipped.
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            config: "skipped".to_string(),
            layout: "skipped".to_string(),
            partition: "skipped".to_string(),
            grid: "skipped".to_string(),
        }
    }
}

/// JSON output of `validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// True when no errors were found
    pub valid: bool,
    /// Errors and warnings
    pub errors: Vec<ValidationMessage>,
    /// Per-stage status
    pub checks: ValidationChecks,
}

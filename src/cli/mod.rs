//! CLI command handlers.
//!
//! Each subcommand is an `Args` struct with an `execute` method returning a
//! `CliResult`; `main` maps errors onto process exit codes.

pub mod common;
pub mod formats;
pub mod generate;
pub mod inspect;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use formats::FormatsArgs;
pub use generate::GenerateArgs;
pub use inspect::InspectArgs;
pub use validate::ValidateArgs;

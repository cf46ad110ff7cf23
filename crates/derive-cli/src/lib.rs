/*
[INPUT]:  Public API exports for derive-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;

// Re-export main types for convenience
pub use cli::Cli;
pub use config::CliConfig;
pub use output::OutputFormat;

//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - human-readable, one row per entry
    #[default]
    Table,
    /// JSON format - structured for scripts and CI steps
    Json,
}

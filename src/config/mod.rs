pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fare-watch")]
#[command(about = "Watches flight fares and reports price changes to Telegram")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "fare-watch.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Run a single pass and exit
    #[arg(long)]
    pub once: bool,
}

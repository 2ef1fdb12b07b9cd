use clap::Parser;
use std::path::PathBuf;

/// All flags are optional; settings themselves come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "toefl-watch")]
#[command(about = "Polls a TOEFL iBT registration page and emails when seats open up")]
pub struct CliArgs {
    /// Dotenv file to load before reading the environment (default: ./.env if present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Run a single check and exit
    #[arg(long)]
    pub once: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

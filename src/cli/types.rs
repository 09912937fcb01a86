use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "context-engine")]
#[command(about = "Context Engine - keeps Xray test cases in step with Jira issues", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (default: .context-engine/config.yaml, local.yaml and env)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh test cases on a fixed interval until stopped
    Run(RunArgs),

    /// Run a single refresh pass and print its report
    Once(OnceArgs),

    /// Show the effective configuration with secrets redacted
    Config,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Issue key to track (repeatable); replaces the configured list
    #[arg(short, long = "issue", value_name = "KEY")]
    pub issues: Vec<String>,

    /// Seconds to sleep between passes
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Stop after this many passes
    #[arg(long, value_name = "N")]
    pub passes: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub struct OnceArgs {
    /// Issue key to process (repeatable); replaces the configured list
    #[arg(short, long = "issue", value_name = "KEY")]
    pub issues: Vec<String>,
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Call-quality evaluation from the command line.
///
/// Scores call records against the YAML rule files, decides whether a
/// supervisor alert is due, and generates coaching insights.
#[derive(Parser, Debug)]
#[command(name = "echoguard", about = "Call-quality scoring, alerting and coaching")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a call record and print the interaction report as JSON.
    Evaluate {
        /// JSON call record to read (stdin when omitted)
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Rules directory override (default: RULES_DIR or data/rules)
        #[arg(long)]
        rules_dir: Option<PathBuf>,

        /// Treat the input as JSON Lines, one call record per line
        #[arg(long)]
        lines: bool,

        /// Order coaching insights by priority, highest first
        #[arg(long)]
        sort_insights: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Load and validate every rule file; exits non-zero on any failure.
    Validate {
        /// Rules directory override (default: RULES_DIR or data/rules)
        #[arg(long)]
        rules_dir: Option<PathBuf>,
    },

    /// Print the resolved configuration.
    Config,
}

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use echoguard_core::config::{load_dotenv, Config};

use crate::cli::{CliArgs, Command};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();
    let config = Config::from_env();
    config.log_summary();

    match args.command {
        Command::Evaluate {
            input,
            rules_dir,
            lines,
            sort_insights,
            pretty,
        } => commands::evaluate(
            &config,
            commands::EvaluateOptions {
                input,
                rules_dir,
                lines,
                sort_insights,
                pretty,
            },
        ),
        Command::Validate { rules_dir } => commands::validate(&config, rules_dir),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.summary())?);
            Ok(())
        }
    }
}

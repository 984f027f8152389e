//! Runbook - Entry Point
//!
//! Binary entry point for the operational knowledge retrieval service.
//! Lives in the `runbook` facade crate to avoid doc output filename collision
//! with the `runbook` library crate (cargo issue #6313).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use runbook_infrastructure::config::{AppConfig, ConfigLoader};
use runbook_server::run_server;

/// Command line interface for the operational knowledge retrieval service
#[derive(Parser, Debug)]
#[command(name = "runbook")]
#[command(about = "Operational knowledge retrieval service for incident response")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Write a sample configuration file to the given path (or --config) and exit
    #[arg(long, value_name = "PATH")]
    pub create_sample_config: Option<Option<PathBuf>>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path_override) = cli.create_sample_config {
        let path = path_override
            .or(cli.config)
            .unwrap_or_else(|| PathBuf::from("runbook.toml"));
        return match ConfigLoader::new().save_to_file(&AppConfig::default(), &path) {
            Ok(()) => {
                println!("wrote sample configuration to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("failed to write sample configuration: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let result = tokio::select! {
        result = run_server(cli.config.as_deref()) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("received interrupt, shutting down");
            return ExitCode::from(130);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

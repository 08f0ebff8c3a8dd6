use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

mod breach;
mod cli;
mod core;
mod crypto;
mod generators;
mod models;
mod wordlist;

use crate::cli::{Args, ConfigurationError};
use crate::core::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let config = Config::load();

    // Logs go to stderr so stdout only carries passwords
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
    config.report_warnings();

    let args = Args::parse();
    log::debug!("Command line args: {:?}", args);

    match cli::execute(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ConfigurationError>() {
            Some(config_error) => {
                eprintln!("ERROR: {}", config_error);
                if let Some(hint) = config_error.hint() {
                    eprintln!("{}", hint);
                }
                ExitCode::from(2)
            }
            None => {
                log::error!("{:#}", e);
                eprintln!("ERROR: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

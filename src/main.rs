use clap::Parser;
use google_drive_upload::cli::{self, actions, Cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli::run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            actions::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

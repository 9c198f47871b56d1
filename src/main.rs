//! Binary entry point

use spa_manager::server::run_server;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // .env values feed Settings::from_env; missing file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run_server().await {
        error!("Server failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

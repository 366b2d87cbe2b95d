//! Binary entry point that wires environment bootstrap, logging and launches
//! the multilingual chat assistant.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use karibu::assistant;

#[tokio::main(flavor = "current_thread")]
/// Bootstraps environment variables and logging, then runs one chat session.
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    assistant::run_chat_assistant().await
}

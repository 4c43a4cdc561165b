//! Servicemap CLI binary.

use anyhow::Result;
use servicemap::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the servicemap CLI.
///
/// Uses tokio's current_thread runtime for simplicity and lower overhead.
/// This is appropriate for CLI applications with sequential I/O-bound operations.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON on stdout stays parseable.
    // Example: RUST_LOG=servicemap=debug,servicemap_graph=trace servicemap warnings
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("servicemap=info,servicemap_graph=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting servicemap CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Servicemap CLI completed successfully");
    Ok(())
}

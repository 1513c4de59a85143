//! depgraph CLI binary.

use anyhow::Result;
use depgraph::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so command output on stdout stays exact.
    // Example: RUST_LOG=depgraph=debug,depgraph_store=trace depgraph list
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("depgraph=info,depgraph_store=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting depgraph CLI");

    let cli = Cli::parse_args();
    cli.execute()?;

    tracing::debug!("depgraph CLI completed successfully");
    Ok(())
}

// ABOUTME: Tracing setup for the postpub CLI
// ABOUTME: Sends log records to stderr so stdout carries only command output

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter directives; `RUST_LOG` replaces them when set
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,postpub=debug"
    } else {
        "warn"
    }
}

pub fn init_tracing(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

use std::io::stderr;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()?;
    Ok(())
}

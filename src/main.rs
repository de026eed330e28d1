//! RouteSketch - Interactive Map Route Sketching
//!
//! Main entry point for the command-line shell.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;

fn main() -> anyhow::Result<()> {
    // T012: Configure tracing subscriber
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RouteSketch v{}", env!("CARGO_PKG_VERSION"));

    app::run()
}

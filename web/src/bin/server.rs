//! Helpdesk server
//!
//! ```bash
//! HELPDESK_PORT=3000 HELPDESK_RULES=enforced cargo run --bin helpdesk-server
//! ```

use helpdesk_web::{server, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,helpdesk_core=debug,helpdesk_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        rules = %config.rules,
        "Configuration loaded"
    );

    server::serve(config, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
        }
    })
    .await
}

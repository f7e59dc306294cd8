//! `admin-gated` — the admin gate server binary.
//!
//! Serves the local-facing auth routes and applies the edge guard to
//! every non-API path. The commerce backend URL comes from the CLI flag
//! or the `COMMERCE_BACKEND_URL` / `BACKEND_URL` environment variables.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use admin_gate::api;
use admin_gate::config::GateConfig;
use admin_gate::gateway::AuthGateway;
use admin_gate::guard::edge_guard;

/// Admin gate server.
#[derive(Parser, Debug)]
#[command(name = "admin-gated", about = "Auth gate for the commerce admin panel")]
struct Cli {
    /// Commerce backend base URL (falls back to COMMERCE_BACKEND_URL).
    #[arg(long = "backend-url")]
    backend_url: Option<String>,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,

    /// Mark cookies Secure (set in production behind TLS).
    #[arg(long = "secure-cookies")]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let backend_url = cli
        .backend_url
        .or_else(GateConfig::backend_url_from_env)
        .ok_or_else(|| {
            anyhow::anyhow!("backend URL required: pass --backend-url or set COMMERCE_BACKEND_URL")
        })?;

    let config = GateConfig {
        backend_url,
        secure_cookies: cli.secure_cookies,
        ..Default::default()
    };
    info!("gating admin access for backend {}", config.backend_url);

    let gateway = Arc::new(AuthGateway::new(config));
    let app = api::build_router(gateway).layer(axum::middleware::from_fn(edge_guard));

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}

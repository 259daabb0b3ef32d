//! Server entrypoint.
//!
//! Set `LOG_FORMAT=json` for JSON log lines; otherwise human-readable.

use std::env;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use vos_gateway::config::Config;
use vos_gateway::{AppState, create_app, spawn_session_sweep};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env for local dev
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(config.clone())?);

    if let Some(every) = config.session_sweep_interval {
        spawn_session_sweep(state.clone(), every);
    }

    let app = create_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Proxying to {}", config.upstream_base_url);
    if config.proxy_requires_session {
        tracing::info!("Proxy routes require a session");
    } else {
        tracing::warn!("Proxy routes are open; PROXY_REQUIRE_SESSION=false");
    }

    axum::serve(listener, app).await?;
    Ok(())
}

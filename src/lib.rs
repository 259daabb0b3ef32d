//! VOS directory gateway.
//!
//! Cookie-session authentication in front of an external users/departments
//! API, plus pass-through proxy routes and address reference data.

pub mod address;
pub mod config;
pub mod error;
pub mod ocsf;
pub mod routes;
pub mod session;
pub mod types;
pub mod upstream;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::address::AddressData;
use crate::config::Config;
use crate::session::SessionStore;
use crate::session::extract::require_session;
use crate::session::memory::InMemoryStore;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Shared application state available to all route handlers.
///
/// Built once at startup; the session store lives exactly as long as the
/// server instance holding this state.
pub struct AppState {
    pub config: Config,
    pub sessions: InMemoryStore,
    pub upstream: UpstreamClient,
    pub address_data: AddressData,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, UpstreamError> {
        let sessions = InMemoryStore::new();
        Self::with_sessions(config, sessions)
    }

    /// Like [`AppState::new`] with a caller-supplied store (tests use a
    /// short TTL).
    pub fn with_sessions(config: Config, sessions: InMemoryStore) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream_base_url, config.upstream_timeout)?;
        let address_data = AddressData::new(config.address_data_dir.clone());
        Ok(Self {
            config,
            sessions,
            upstream,
            address_data,
        })
    }
}

/// Build the Axum router with all middleware and routes.
pub fn create_app(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::COOKIE])
        .allow_credentials(true);

    // Session endpoints are always reachable
    let auth_routes = Router::new()
        .route("/login", post(routes::login::login))
        .route("/logout", post(routes::logout::logout))
        .route(
            "/auth/current-login",
            get(routes::current_login::current_login),
        );

    // Proxy and reference data share one gating policy
    let mut proxy_routes = Router::new()
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route("/users/{id}", put(routes::users::update_user))
        .route("/departments", get(routes::departments::list_departments))
        .route("/provinces", get(routes::address::provinces))
        .route("/cities", get(routes::address::cities))
        .route("/barangays", get(routes::address::barangays));

    if state.config.proxy_requires_session {
        proxy_routes = proxy_routes.route_layer(from_fn_with_state(state.clone(), require_session));
    }

    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api", auth_routes.merge(proxy_routes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drop expired sessions.
///
/// Lookups already ignore expired entries; this only bounds memory held by
/// sessions nobody asks about again.
pub fn spawn_session_sweep(state: Arc<AppState>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let removed = state.sessions.purge_expired();
            if removed > 0 {
                tracing::info!(
                    removed,
                    active = state.sessions.len(),
                    "purged expired sessions"
                );
            }
        }
    })
}

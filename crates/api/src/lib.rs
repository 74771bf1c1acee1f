//! # Kairo API
//!
//! The gateway in front of the scheduling backend. It rewrites `/api/*`
//! requests to the backend unchanged and serves projected timetable views
//! for the portal pages under `/portal`.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration

/// Configuration module for gateway settings
pub mod config;
/// Request handlers for proxied and projected endpoints
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    Router,
};
use eyre::Result;
use kairo_client::{HttpTimetableSource, TimetableSource};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Typed access to the backend for the projected portal views
    pub source: Arc<dyn TimetableSource>,
    /// Client used to forward raw `/api/*` requests
    pub http: reqwest::Client,
    /// Base URL `/api/*` requests are rewritten to
    pub backend_url: String,
}

impl ApiState {
    /// Builds the state for a backend at `backend_url`.
    ///
    /// `timeout` bounds each backend call and should stay below the
    /// gateway's own request timeout.
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let source = HttpTimetableSource::with_client(http.clone(), backend_url);

        Ok(Self {
            backend_url: source.base_url().to_string(),
            source: Arc::new(source),
            http,
        })
    }
}

/// Builds the application router with all routes attached to `state`
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Projected views for the portal pages
        .merge(routes::portal::routes())
        // Rewrite of /api/* to the backend
        .merge(routes::proxy::routes())
        .with_state(state)
}

/// Starts the gateway with the provided configuration
///
/// This function sets up logging, builds the shared state and routes, and
/// serves until the listener fails.
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(&config.backend_url, config.backend_timeout())?);
    info!(
        "Rewriting /api/* to {} ({:?})",
        state.backend_url, config.environment
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        // Add request timeout middleware
        .layer(TimeoutLayer::new(config.request_timeout()));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed = origins
            .iter()
            .filter_map(|origin| match origin.parse::<axum::http::HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect::<Vec<_>>();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
            .allow_origin(allowed);

        app.layer(cors)
    } else {
        app
    };

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

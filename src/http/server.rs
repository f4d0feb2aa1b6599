//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the redirect handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Dispatch every request path to the resolution chain

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::request::{decoded_path, propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::routing::{Action, Chain, Resolver};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: Chain,
}

/// HTTP front end for the resolution chain.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `chain`.
    pub fn new(config: &AppConfig, chain: Chain) -> Self {
        let state = AppState { chain };
        let router = build_router(state, Duration::from_secs(config.timeouts.request_secs));
        Self { router }
    }

    /// The configured router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `stop` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        stop: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::stopped(stop))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/{*path}", any(redirect_handler))
        .route("/", any(redirect_handler))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
}

/// Resolve the request path through the chain.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = decoded_path(request.uri());
    let action = state.chain.resolve(&path);

    match &action {
        Action::Redirect(target) => tracing::debug!(
            request_id = %request_id(&request),
            method = %request.method(),
            path = %path,
            target = %target,
            "Redirecting"
        ),
        Action::Respond(_) => tracing::debug!(
            request_id = %request_id(&request),
            method = %request.method(),
            path = %path,
            "No redirect, default response"
        ),
    }

    action.into_response()
}

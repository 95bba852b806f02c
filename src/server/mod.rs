/// HTTP API for the notary tools.
///
/// A thin routing layer over `Notary`: each endpoint maps one tool to a
/// JSON request/response pair. The server holds no state of its own —
/// the gateway connection is the only shared resource, and operations
/// are logically one-at-a-time per gateway.
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::ledger::xrpl::XrplGateway;
use crate::notary::Notary;

/// Shared application state available to all handlers.
pub struct AppState {
    pub notary: Notary<XrplGateway>,
}

/// Build the Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::tool_routes())
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Start the API server.
pub async fn serve(state: AppState, addr: &str) -> crate::error::Result<()> {
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(crate::error::NotaryError::Io)?;

    tracing::info!("xrpl-notary API listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(crate::error::NotaryError::Io)?;

    Ok(())
}

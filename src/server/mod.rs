//! HTTP server for the salon records and insights.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::api_routes;
pub use state::AppState;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::RecordStore;
use crate::types::Result;

/// Create the Axum application with all routes and middleware.
///
/// Any origin may call the API; requests are traced.
pub fn create_app(store: RecordStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(AppState::new(store)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(store: RecordStore, addr: &str) -> Result<()> {
    let data_file = store.path().display().to_string();
    let app = create_app(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, data_file = %data_file, "salontrack server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

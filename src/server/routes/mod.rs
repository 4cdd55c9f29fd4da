//! API route handlers.

pub mod health;
pub mod insights;
pub mod records;

use std::sync::Arc;

use axum::Router;
use tokio::task::JoinError;

use crate::server::state::AppState;
use crate::services::RecordStore;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET /api/health - Health check
/// - GET, POST /api/staff - List or add staff members
/// - GET, POST /api/services - List or add services
/// - PUT, DELETE /api/services/{id} - Edit or remove a service
/// - GET, POST /api/appointments - List or add appointments
/// - GET /api/clients - Legacy client list
/// - GET /api/categories - Default and in-use service categories
/// - GET /api/insights - Category counts and revenue for a timeframe
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", records::router())
        .nest("/api", insights::router())
        .with_state(state)
}

/// Run a store call on the blocking pool; the store does synchronous file I/O.
pub(crate) async fn blocking<T, F>(state: &Arc<AppState>, f: F) -> Result<T, JoinError>
where
    F: FnOnce(&RecordStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state.store)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_api_routes_health() {
        let temp_dir = TempDir::new().unwrap();
        let state = AppState::new(RecordStore::new(temp_dir.path().join("salonData.json")));
        let app = api_routes(state);

        let resp = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let health: health::HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let temp_dir = TempDir::new().unwrap();
        let state = AppState::new(RecordStore::new(temp_dir.path().join("salonData.json")));
        let resp = api_routes(state)
            .oneshot(Request::builder().uri("/api/payroll").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

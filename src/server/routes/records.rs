//! CRUD endpoints for staff, services, appointments and clients.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;

use super::blocking;
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;
use crate::types::{with_staff_defaults, Collection};

async fn list(state: Arc<AppState>, collection: Collection) -> ApiResult<Json<Vec<Value>>> {
    let records = blocking(&state, move |store| store.list_raw(collection)).await?;
    Ok(Json(records))
}

async fn create(
    state: Arc<AppState>,
    collection: Collection,
    body: Value,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let record = blocking(&state, move |store| store.create(collection, body))
        .await?
        .map_err(|e| ApiError::from_store(collection, e))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/staff
pub async fn list_staff(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Value>>> {
    list(state, Collection::Staff).await
}

/// POST /api/staff - new members default to active, rating 5.0, no completed services.
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    create(state, Collection::Staff, with_staff_defaults(body)).await
}

/// GET /api/services
pub async fn list_services(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Value>>> {
    list(state, Collection::Services).await
}

/// POST /api/services
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    create(state, Collection::Services, body).await
}

/// PUT /api/services/{id} - shallow merge over the stored record.
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let record = blocking(&state, move |store| {
        store.update(Collection::Services, id, body)
    })
    .await?
    .map_err(|e| ApiError::from_store(Collection::Services, e))?;
    Ok(Json(record))
}

/// DELETE /api/services/{id}
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<StatusCode> {
    blocking(&state, move |store| store.delete(Collection::Services, id))
        .await?
        .map_err(|e| ApiError::from_store(Collection::Services, e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Value>>> {
    list(state, Collection::Appointments).await
}

/// POST /api/appointments
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    create(state, Collection::Appointments, body).await
}

/// GET /api/clients - legacy, read-only
pub async fn list_clients(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Value>>> {
    list(state, Collection::Clients).await
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/staff", get(list_staff).post(create_staff))
        .route("/services", get(list_services).post(create_service))
        .route("/services/{id}", put(update_service).delete(delete_service))
        .route(
            "/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route("/clients", get(list_clients))
}

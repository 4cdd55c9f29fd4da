//! Insights and category catalog endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use super::blocking;
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;
use crate::services::{available_categories, InsightsAggregator};
use crate::types::{CategoryFilter, InsightsQuery, InsightsReport, Timeframe};

/// Query parameters for GET /api/insights
#[derive(Debug, Default, Deserialize)]
pub struct InsightsParams {
    #[serde(default)]
    pub timeframe: Timeframe,
    /// `all` or an exact category name
    #[serde(default)]
    pub category: Option<String>,
    /// Reference date `YYYY-MM-DD`; today when absent
    #[serde(default)]
    pub date: Option<String>,
}

impl InsightsParams {
    fn reference_date(&self) -> ApiResult<NaiveDate> {
        match self.date.as_deref() {
            None => Ok(Local::now().date_naive()),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ApiError::BadRequest(format!("invalid date {:?}, expected YYYY-MM-DD", raw))),
        }
    }

    fn query(&self) -> InsightsQuery {
        InsightsQuery {
            timeframe: self.timeframe,
            category: self
                .category
                .clone()
                .map(CategoryFilter::from)
                .unwrap_or_default(),
        }
    }
}

/// GET /api/insights
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightsParams>,
) -> ApiResult<Json<InsightsReport>> {
    let today = params.reference_date()?;
    let query = params.query();

    let snapshot = blocking(&state, |store| store.snapshot()).await?;
    let report = InsightsAggregator::aggregate(
        &snapshot.appointments,
        &snapshot.services,
        &query,
        today,
    );

    tracing::debug!(
        timeframe = query.timeframe.label(),
        category = %query.category,
        rows = report.rows.len(),
        diagnostics = ?report.diagnostics,
        "insights computed"
    );
    Ok(Json(report))
}

/// GET /api/categories
pub async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let listing = blocking(&state, |store| store.services()).await?;
    Ok(Json(available_categories(&listing.records)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/insights", get(get_insights))
        .route("/categories", get(list_categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RecordStore;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn seeded_app() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("salonData.json");
        std::fs::write(
            &path,
            json!({
                "services": [
                    {"id": 1, "name": "Men's Haircut", "category": "Haircuts", "price": 45},
                    {"id": 2, "name": "Balayage", "category": "Color", "price": 180},
                    {"id": 3, "name": "Scalp Treatment", "category": "Treatment", "price": 60}
                ],
                "appointments": [
                    {"id": 1, "service": "men's haircut", "date": "2025-11-08", "price": 45},
                    {"id": 2, "service": "Balayage", "date": "2025-11-20", "price": 180},
                    {"id": 3, "service": "Balayage", "date": "2025-03-02", "price": 175},
                    {"id": 4, "service": "Mystery", "date": "2025-11-09", "price": 30}
                ]
            })
            .to_string(),
        )
        .unwrap();
        let app = Router::new()
            .nest("/api", router())
            .with_state(AppState::new(RecordStore::new(path)));
        (app, temp_dir)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_monthly_insights() {
        let (app, _temp) = seeded_app();
        let (status, report) = get_json(app, "/api/insights?date=2025-11-15").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            report["rows"],
            json!([
                {"name": "Haircuts", "count": 1, "revenue": 45.0},
                {"name": "Color", "count": 1, "revenue": 180.0},
                {"name": "Uncategorized", "count": 1, "revenue": 30.0}
            ])
        );
        assert_eq!(report["diagnostics"]["unmatchedServices"], 1);
    }

    #[tokio::test]
    async fn test_yearly_category_filter() {
        let (app, _temp) = seeded_app();
        let (status, report) =
            get_json(app, "/api/insights?timeframe=yearly&category=Color&date=2025-12-31").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            report["rows"],
            json!([{"name": "Color", "count": 2, "revenue": 355.0}])
        );
    }

    #[tokio::test]
    async fn test_invalid_date_is_bad_request() {
        let (app, _temp) = seeded_app();
        let (status, body) = get_json(app, "/api/insights?date=15/11/2025").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("YYYY-MM-DD"));
    }

    #[tokio::test]
    async fn test_categories_union() {
        let (app, _temp) = seeded_app();
        let (status, categories) = get_json(app, "/api/categories").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            categories,
            json!(["Haircuts", "Color", "Nails", "Styling", "Treatment"])
        );
    }
}

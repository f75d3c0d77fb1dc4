//! Dashboard route definitions

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::core::charts::Figure;
use crate::core::dashboard::{DashboardLayout, DatasetSummary};
use crate::core::PayloadRange;
use crate::utils::error::{DashError, Result};

use super::page;
use super::server::AppState;

pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/layout", get(get_layout))
        .route("/api/charts/pie", get(get_pie_chart))
        .route("/api/charts/scatter", get(get_scatter_chart))
        .route("/api/health", get(get_health))
}

#[derive(Debug, Deserialize)]
pub struct PieQuery {
    pub site: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScatterQuery {
    pub site: Option<String>,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl ScatterQuery {
    /// 只給一端時，另一端沿用滑桿初始值
    fn payload_range(&self, initial: PayloadRange) -> Result<Option<PayloadRange>> {
        match (self.low, self.high) {
            (None, None) => Ok(None),
            (low, high) => PayloadRange::new(
                low.unwrap_or(initial.low),
                high.unwrap_or(initial.high),
            )
            .map(Some),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub dataset: DatasetSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for DashError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.user_friendly_message(),
            }),
        )
            .into_response()
    }
}

/// GET / - Dashboard page
async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(page::render(&state.dashboard.layout())?))
}

/// GET /api/layout - Controls and chart ids
async fn get_layout(State(state): State<AppState>) -> Json<DashboardLayout> {
    Json(state.dashboard.layout())
}

/// GET /api/charts/pie?site= - Success pie chart
async fn get_pie_chart(
    State(state): State<AppState>,
    Query(query): Query<PieQuery>,
) -> Result<Json<Figure>> {
    let figure = state.dashboard.update_pie(query.site.as_deref())?;
    Ok(Json(figure))
}

/// GET /api/charts/scatter?site=&low=&high= - Payload vs success scatter chart
async fn get_scatter_chart(
    State(state): State<AppState>,
    Query(query): Query<ScatterQuery>,
) -> Result<Json<Figure>> {
    let range = query.payload_range(state.dashboard.initial_range())?;
    let figure = state
        .dashboard
        .update_scatter(query.site.as_deref(), range)?;
    Ok(Json(figure))
}

/// GET /api/health - Dataset summary
async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        dataset: state.dashboard.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial() -> PayloadRange {
        PayloadRange {
            low: 0.0,
            high: 9600.0,
        }
    }

    #[test]
    fn test_scatter_query_without_bounds() {
        let query = ScatterQuery {
            site: None,
            low: None,
            high: None,
        };
        assert_eq!(query.payload_range(initial()).unwrap(), None);
    }

    #[test]
    fn test_scatter_query_fills_missing_bound() {
        let query = ScatterQuery {
            site: None,
            low: Some(2000.0),
            high: None,
        };
        assert_eq!(
            query.payload_range(initial()).unwrap(),
            Some(PayloadRange {
                low: 2000.0,
                high: 9600.0
            })
        );
    }

    #[test]
    fn test_scatter_query_rejects_inverted_bounds() {
        let query = ScatterQuery {
            site: None,
            low: Some(8000.0),
            high: Some(1000.0),
        };
        assert!(query.payload_range(initial()).is_err());
    }

    #[test]
    fn test_unknown_site_maps_to_bad_request() {
        let response = DashError::UnknownSite {
            site: "Mars".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = DashError::ServerError {
            message: "boom".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

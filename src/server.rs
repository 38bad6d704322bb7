//! REST API wrapper around the planning pipeline
//!
//! Thin by design: handlers coerce and validate types at the boundary
//! (non-numeric fields are rejected by serde before reaching the core,
//! non-positive area and zero top-N get a 400), then hand the request to the
//! pipeline unchanged. Negative water budgets pass through untouched; the
//! planner documents that tolerance.

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::{Config, PlannerConfig, ServerConfig};
use crate::pipeline::{AnalysisRequest, AnalysisResult, Planner, SoilType, DEFAULT_AREA_ACRES};

/// API server exposing the planner over HTTP
pub struct PlannerApiServer {
    planner: Planner,
    server: ServerConfig,
    defaults: PlannerConfig,
}

impl PlannerApiServer {
    /// Create a new API server with the default pipeline stages
    pub fn new(config: Config) -> Self {
        Self {
            planner: Planner::default(),
            server: config.server,
            defaults: config.planner,
        }
    }

    /// Bind and serve until shutdown
    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        let app = self.build_router();

        info!("Starting planner API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Build the API router
    fn build_router(self) -> Router {
        let shared_state = Arc::new(ApiState {
            planner: self.planner,
            defaults: self.defaults,
        });

        Router::new()
            .route("/api/v1/health", get(health_check))
            .route("/api/v1/analyze", post(analyze))
            .route("/api/v1/soil-types", get(soil_types))
            .layer(CorsLayer::permissive())
            .with_state(shared_state)
    }
}

/// Shared API state
struct ApiState {
    planner: Planner,
    defaults: PlannerConfig,
}

/// JSON error body with an HTTP status
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Static listing of the soil types the classifier can produce
#[derive(Debug, Clone, Serialize)]
pub struct SoilTypesResponse {
    pub soil_types: Vec<&'static str>,
    pub textures: Vec<&'static str>,
    pub default_area: f64,
    pub default_water_budget: f64,
}

impl SoilTypesResponse {
    /// Read directly from the fixed soil-type enum; nothing is computed
    pub fn current() -> Self {
        Self {
            soil_types: SoilType::ALL.iter().map(SoilType::as_str).collect(),
            textures: vec!["fine", "balanced", "coarse"],
            default_area: DEFAULT_AREA_ACRES,
            default_water_budget: 250.0,
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn analyze(
    State(state): State<Arc<ApiState>>,
    Json(mut request): Json<AnalysisRequest>,
) -> std::result::Result<Json<AnalysisResult>, ApiError> {
    if request.area_acres.is_none() {
        request.area_acres = Some(state.defaults.default_area_acres);
    }
    if request.top_n.is_none() {
        request.top_n = Some(state.defaults.default_top_n);
    }
    validate(&request)?;

    Ok(Json(state.planner.analyze_and_suggest(&request)))
}

async fn soil_types() -> Json<SoilTypesResponse> {
    Json(SoilTypesResponse::current())
}

/// Boundary validation. Only shape-level checks live here; domain input like
/// an unknown soil type or a negative water budget is the pipeline's
/// documented tolerance, not an error.
fn validate(request: &AnalysisRequest) -> std::result::Result<(), ApiError> {
    if let Some(area) = request.area_acres {
        if !area.is_finite() || area <= 0.0 {
            warn!("rejecting analyze request with area_acres={area}");
            return Err(ApiError::bad_request("area_acres must be a positive number"));
        }
    }
    if request.top_n == Some(0) {
        return Err(ApiError::bad_request("top_n must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> Arc<ApiState> {
        Arc::new(ApiState {
            planner: Planner::default(),
            defaults: PlannerConfig::default(),
        })
    }

    #[tokio::test]
    async fn analyze_fills_defaults_from_config() {
        let response = analyze(State(test_state()), Json(AnalysisRequest::default()))
            .await
            .expect("empty request should analyze");
        let result = response.0;
        assert_eq!(result.cost.area_acres, 1.0);
        assert_eq!(result.soil.soil_type, SoilType::Loam);
        assert_eq!(result.crops.len(), 3);
    }

    #[tokio::test]
    async fn non_positive_area_is_rejected() {
        let request = AnalysisRequest {
            area_acres: Some(0.0),
            ..Default::default()
        };
        let error = analyze(State(test_state()), Json(request))
            .await
            .err()
            .expect("zero area must be rejected");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn zero_top_n_is_rejected() {
        let request = AnalysisRequest {
            top_n: Some(0),
            ..Default::default()
        };
        let error = analyze(State(test_state()), Json(request))
            .await
            .err()
            .expect("zero top_n must be rejected");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert!(error.message.contains("top_n"));
    }

    #[tokio::test]
    async fn negative_water_budget_passes_through() {
        let request = AnalysisRequest {
            water_budget: Some(-25.0),
            ..Default::default()
        };
        let response = analyze(State(test_state()), Json(request))
            .await
            .expect("negative budgets are tolerated, not rejected");
        assert!(!response.0.irrigation.within_budget);
        assert_eq!(response.0.irrigation.budget, Some(-25.0));
    }

    #[tokio::test]
    async fn soil_types_lists_every_variant() {
        let response = soil_types().await.0;
        assert_eq!(response.soil_types, vec!["loam", "sandy", "clay", "silty"]);
        assert_eq!(response.default_water_budget, 250.0);
    }
}

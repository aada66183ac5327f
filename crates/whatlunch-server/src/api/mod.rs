mod genres;
mod recommend;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use whatlunch_core::{AppConfig, PlacesIndex, Radius, SearchStrategy};
use whatlunch_search::{FlowError, SearchError};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

/// Shared by every request. Each request builds its own short-lived flow
/// over `index`, so no per-user state lives on the server.
pub struct AppState<P> {
    pub index: Arc<P>,
    pub strategy: SearchStrategy,
    pub radius: Radius,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
            strategy: self.strategy,
            radius: self.radius,
        }
    }
}

impl<P> AppState<P> {
    pub fn from_config(index: Arc<P>, config: &AppConfig) -> Self {
        Self {
            index,
            strategy: config.search_strategy,
            radius: config.search_radius,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" | "no_results" | "no_more_candidates" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "validation_error" | "not_ready" => StatusCode::UNPROCESSABLE_ENTITY,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_flow_error(request_id: String, error: &FlowError) -> ApiError {
    let code = match error {
        FlowError::Validation(_) => "validation_error",
        FlowError::NotReady => "not_ready",
        FlowError::Search(SearchError::NotFound { .. }) => "not_found",
        FlowError::Search(SearchError::NoResults { .. }) => "no_results",
        FlowError::Search(SearchError::EmptyCandidates) => "no_more_candidates",
        FlowError::Search(SearchError::ServiceUnavailable(reason)) => {
            tracing::error!(reason = %reason, "places index unavailable");
            "service_unavailable"
        }
    };
    ApiError::new(request_id, code, error.to_string())
}

pub(super) fn map_json_rejection(request_id: String, rejection: &JsonRejection) -> ApiError {
    ApiError::new(request_id, "bad_request", rejection.body_text())
}

/// Request-supplied radius, or `default` when absent.
pub(super) fn resolve_radius(
    request_id: &str,
    radius_m: Option<u32>,
    default: Radius,
) -> Result<Radius, ApiError> {
    match radius_m {
        None => Ok(default),
        Some(m) if (1..=20_000).contains(&m) => Ok(Radius::from_meters(m)),
        Some(m) => Err(ApiError::new(
            request_id,
            "validation_error",
            format!("radius_m must be between 1 and 20000, got {m}"),
        )),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn recommend_router<P: PlacesIndex + 'static>(rate_limit: RateLimitState) -> Router<AppState<P>> {
    Router::new()
        .route("/api/v1/recommend", post(recommend::recommend::<P>))
        .route("/api/v1/reroll", post(recommend::reroll::<P>))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app<P: PlacesIndex + 'static>(
    state: AppState<P>,
    rate_limit: RateLimitState,
) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/genres", get(genres::list_genres));

    Router::new()
        .merge(public_routes)
        .merge(recommend_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

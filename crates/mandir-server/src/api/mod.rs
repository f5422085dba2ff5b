mod photo;
mod temples;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use mandir_places::{PlacesClient, PlacesError, TempleResolver};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

/// Shared handler state. `resolver` is `None` when no provider key is
/// configured; provider-backed routes then answer `missing_api_key`.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Option<Arc<TempleResolver<PlacesClient>>>,
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
#[serde(rename_all = "camelCase")]
struct HealthData {
    status: &'static str,
    has_api_key: bool,
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

    fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Returns the configured resolver or the `missing_api_key` error.
pub(super) fn require_resolver(
    state: &AppState,
    request_id: &str,
) -> Result<Arc<TempleResolver<PlacesClient>>, ApiError> {
    state.resolver.clone().ok_or_else(|| {
        ApiError::new(
            request_id,
            "missing_api_key",
            "Google API key not configured",
        )
    })
}

pub(super) fn map_places_error(request_id: String, error: &PlacesError) -> ApiError {
    match error {
        PlacesError::Upstream { .. } => {
            tracing::error!(error = %error, "places provider returned an error status");
            ApiError::new(request_id, "upstream_error", error.to_string())
        }
        PlacesError::InvalidBaseUrl { .. } => {
            tracing::error!(error = %error, "places client misconfigured");
            ApiError::new(request_id, "internal_error", "places client misconfigured")
        }
        PlacesError::Http(_)
        | PlacesError::UnexpectedStatus { .. }
        | PlacesError::Deserialize { .. } => {
            tracing::error!(error = %error, "places provider request failed");
            ApiError::new(request_id, "upstream_error", "places provider request failed")
        }
    }
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin, error = %e, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn api_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/temples", get(temples::search_temples))
        .route("/api/temples/{place_id}", get(temples::get_temple))
        .route("/api/photo", get(photo::get_photo))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, allowed_origins: &[String], rate_limit: RateLimitState) -> Router {
    Router::new()
        .merge(api_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("SAMEORIGIN"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("cross-origin-resource-policy"),
                    HeaderValue::from_static("cross-origin"),
                ))
                .layer(build_cors(allowed_origins))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            has_api_key: state.resolver.is_some(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

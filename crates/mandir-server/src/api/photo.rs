use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use mandir_places::normalize::PHOTO_MAX_WIDTH;
use mandir_places::PlacesError;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_places_error, require_resolver, ApiError, AppState};

/// Largest width the provider will serve.
const PHOTO_WIDTH_LIMIT: u32 = 1600;

const PHOTO_CACHE_CONTROL: &str = "public, max-age=86400";

#[derive(Debug, Deserialize)]
pub(super) struct PhotoParams {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub maxwidth: Option<String>,
}

/// Streams a provider photo back to the client with a day-long cache header.
pub(super) async fn get_photo(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<PhotoParams>,
) -> Result<Response, ApiError> {
    let resolver = require_resolver(&state, &req_id.0)?;

    let Some(reference) = params.reference.filter(|r| !r.trim().is_empty()) else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "Photo reference required",
        ));
    };
    let max_width = parse_max_width(params.maxwidth.as_deref())
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    match resolver.places().fetch_photo(&reference, max_width).await {
        Ok(photo) => Ok((
            [
                (header::CONTENT_TYPE, photo.content_type),
                (header::CACHE_CONTROL, PHOTO_CACHE_CONTROL.to_owned()),
            ],
            photo.bytes,
        )
            .into_response()),
        Err(PlacesError::UnexpectedStatus { status, .. }) => {
            tracing::warn!(status, "provider refused photo request");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((
                status,
                Json(ApiError::new(
                    req_id.0,
                    "upstream_error",
                    "Failed to fetch photo",
                )),
            )
                .into_response())
        }
        Err(e) => Err(map_places_error(req_id.0, &e)),
    }
}

fn parse_max_width(raw: Option<&str>) -> Result<u32, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(PHOTO_MAX_WIDTH),
        Some(value) => value
            .parse::<u32>()
            .map(|w| w.clamp(1, PHOTO_WIDTH_LIMIT))
            .map_err(|_| format!("maxwidth must be a positive integer, got '{value}'")),
    }
}

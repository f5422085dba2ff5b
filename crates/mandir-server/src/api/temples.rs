use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use mandir_core::{annotate_and_sort, format_distance, Coordinate, DistanceAnnotatedPlace, Place};
use mandir_places::{normalize_place, PlacesError};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_places_error, require_resolver, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub query: Option<String>,
    /// Accepted for client compatibility; searches use a fixed radius.
    #[allow(dead_code)]
    pub radius: Option<String>,
    pub sort: Option<String>,
}

/// A distance-ranked temple with its display label.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RankedTemple {
    #[serde(flatten)]
    pub ranked: DistanceAnnotatedPlace,
    pub distance_label: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum TempleList {
    Ranked(Vec<RankedTemple>),
    Resolved(Vec<Place>),
}

pub(super) async fn search_temples(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<TempleList>>, ApiError> {
    let resolver = require_resolver(&state, &req_id.0)?;

    let origin = parse_origin(params.lat.as_deref(), params.lng.as_deref())
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;
    let rank_from = match params.sort.as_deref().map(str::trim) {
        None | Some("" | "relevance") => None,
        Some("distance") => match origin {
            Some(origin) => Some(origin),
            None => {
                return Err(ApiError::new(
                    req_id.0,
                    "validation_error",
                    "sort=distance requires lat and lng",
                ))
            }
        },
        Some(other) => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                format!("unsupported sort '{other}', expected 'distance' or 'relevance'"),
            ))
        }
    };

    let places = resolver
        .resolve(origin, params.query.as_deref())
        .await
        .map_err(|e| map_places_error(req_id.0.clone(), &e))?;

    let data = match rank_from {
        Some(origin) => TempleList::Ranked(rank(&origin, &places)),
        None => TempleList::Resolved(places),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_temple(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(place_id): Path<String>,
) -> Result<Json<ApiResponse<Place>>, ApiError> {
    let resolver = require_resolver(&state, &req_id.0)?;

    let mut raw = match resolver.places().place_details(&place_id).await {
        Ok(raw) => raw,
        Err(PlacesError::Upstream { status, .. })
            if status == "NOT_FOUND" || status == "INVALID_REQUEST" =>
        {
            return Err(ApiError::new(
                req_id.0,
                "not_found",
                format!("temple {place_id} not found"),
            ));
        }
        Err(e) => return Err(map_places_error(req_id.0, &e)),
    };
    // The details field mask does not include place_id.
    if raw.place_id.is_none() {
        raw.place_id = Some(place_id);
    }

    Ok(Json(ApiResponse {
        data: normalize_place(raw, 0, resolver.photo_base_url()),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Builds an origin from optional query values. Both values must be present
/// for an origin to exist; a lone `lat` or `lng` is ignored.
fn parse_origin(lat: Option<&str>, lng: Option<&str>) -> Result<Option<Coordinate>, String> {
    let (Some(lat), Some(lng)) = (
        lat.map(str::trim).filter(|s| !s.is_empty()),
        lng.map(str::trim).filter(|s| !s.is_empty()),
    ) else {
        return Ok(None);
    };

    let lat: f64 = lat
        .parse()
        .map_err(|_| format!("lat must be a number, got '{lat}'"))?;
    let lng: f64 = lng
        .parse()
        .map_err(|_| format!("lng must be a number, got '{lng}'"))?;

    Coordinate::new(lat, lng).map(Some).map_err(|e| e.to_string())
}

fn rank(origin: &Coordinate, places: &[Place]) -> Vec<RankedTemple> {
    annotate_and_sort(origin, places)
        .into_iter()
        .map(|ranked| RankedTemple {
            distance_label: ranked.distance_km.map(format_distance),
            ranked,
        })
        .collect()
}

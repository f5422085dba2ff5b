//! Normalized temple records as served to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Maximum number of review snippets carried on a [`Place`].
pub const MAX_REVIEWS: usize = 3;

/// A temple in the provider-independent shape served to clients.
///
/// `id` is the provider identifier when present, otherwise a `place_<index>`
/// placeholder that is only unique within one resolution call.
///
/// `is_wishlisted`, `is_visited` and `friend_ratings` belong to the
/// presentation layer. They are always initialized empty here and are never
/// read by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub place_id: Option<String>,
    pub name: String,
    pub hindi_name: String,
    pub short_location: String,
    pub full_address: String,
    /// Best-effort administrative region (state) parsed from the address.
    pub region: String,
    pub deity: String,
    pub religion: String,
    pub photo_url: Option<String>,
    pub description: String,
    pub timings: String,
    pub best_time: String,
    pub dress_code: String,
    pub coordinate: Option<Coordinate>,
    pub rating: f64,
    pub review_count: u64,
    pub open_now: Option<bool>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub google_maps_url: Option<String>,
    pub reviews: Vec<Review>,
    pub is_wishlisted: bool,
    pub is_visited: bool,
    pub friend_ratings: Vec<serde_json::Value>,
}

/// A review snippet attached to a [`Place`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub relative_time: Option<String>,
}

/// A [`Place`] plus its distance from a search origin.
///
/// `distance_km` is `None` when the place has no coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceAnnotatedPlace {
    #[serde(flatten)]
    pub place: Place,
    pub distance_km: Option<f64>,
}

//! Google Places web-service response types.
//!
//! Every response carries a `status` envelope field. `OK` and `ZERO_RESULTS`
//! are the only success values; anything else comes with an optional
//! `error_message`.

use serde::Deserialize;

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Envelope for `nearbysearch` and `textsearch` responses.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl SearchResponse {
    /// `true` for `OK` and `ZERO_RESULTS`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK || self.status == STATUS_ZERO_RESULTS
    }
}

/// Envelope for `details` responses.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<RawPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A single place as returned by the provider. Every field is optional so
/// that partial records still deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlace {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub photos: Vec<RawPhoto>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    /// Google Maps URL for the place (details endpoint only).
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub photo_reference: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub relative_time_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_tolerates_missing_results() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"status":"ZERO_RESULTS"}"#).unwrap();
        assert!(resp.results.is_empty());
        assert!(resp.is_success());
    }

    #[test]
    fn search_response_denied_is_not_success() {
        let resp: SearchResponse = serde_json::from_str(
            r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid.","results":[]}"#,
        )
        .unwrap();
        assert!(!resp.is_success());
        assert_eq!(
            resp.error_message.as_deref(),
            Some("The provided API key is invalid.")
        );
    }

    #[test]
    fn raw_place_deserializes_nearby_result() {
        let raw: RawPlace = serde_json::from_value(serde_json::json!({
            "place_id": "ChIJ123",
            "name": "Shri Kashi Vishwanath Temple",
            "vicinity": "Lahori Tola, Domari, Varanasi",
            "geometry": { "location": { "lat": 25.3109, "lng": 83.0107 } },
            "rating": 4.7,
            "user_ratings_total": 91234,
            "photos": [{ "photo_reference": "AbC-1_2", "width": 4000, "height": 3000 }],
            "opening_hours": { "open_now": true },
            "types": ["hindu_temple", "place_of_worship"]
        }))
        .unwrap();

        assert_eq!(raw.place_id.as_deref(), Some("ChIJ123"));
        assert_eq!(raw.user_ratings_total, Some(91_234));
        assert_eq!(raw.photos[0].photo_reference.as_deref(), Some("AbC-1_2"));
        let loc = raw.geometry.and_then(|g| g.location).unwrap();
        assert!((loc.lat - 25.3109).abs() < f64::EPSILON);
        assert_eq!(raw.opening_hours.and_then(|h| h.open_now), Some(true));
    }
}

//! HTTP client for the Google Places web service.
//!
//! Wraps `reqwest` with API key management, a bounded per-request timeout and
//! typed response deserialization. Search calls return the raw envelope so
//! the caller decides how to treat non-`OK` statuses; details lookups check
//! the status here and surface failures as [`PlacesError::Upstream`].

use std::time::Duration;

use mandir_core::Coordinate;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::types::{DetailsResponse, RawPlace, SearchResponse, STATUS_OK};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Fields requested from the details endpoint.
pub const DETAILS_FIELDS: &str = "name,formatted_address,geometry,rating,user_ratings_total,photos,opening_hours,reviews,website,formatted_phone_number,url";

const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// Photo bytes proxied from the provider.
#[derive(Debug, Clone)]
pub struct Photo {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Client for the Google Places web service.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("mandir/0.1 (temple-discovery)")
            .build()?;

        // Endpoint paths are joined onto the base, which only works when the
        // base ends with exactly one slash.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Keyword search around `origin` (`nearbysearch`).
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body is not a search envelope.
    pub async fn search_nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<SearchResponse, PlacesError> {
        let location = format!("{},{}", origin.lat(), origin.lng());
        let radius = radius_meters.to_string();
        let url = self.build_url(
            "nearbysearch/json",
            &[
                ("location", &location),
                ("radius", &radius),
                ("keyword", keyword),
            ],
        )?;
        self.get_json(url, "nearbysearch").await
    }

    /// Free-text search (`textsearch`).
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::search_nearby`].
    pub async fn search_text(&self, query: &str) -> Result<SearchResponse, PlacesError> {
        let url = self.build_url("textsearch/json", &[("query", query)])?;
        self.get_json(url, "textsearch").await
    }

    /// Fetches full details for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Upstream`] if the provider status is not `OK`.
    /// - [`PlacesError::Http`], [`PlacesError::UnexpectedStatus`] or
    ///   [`PlacesError::Deserialize`] as for searches.
    pub async fn place_details(&self, place_id: &str) -> Result<RawPlace, PlacesError> {
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        )?;
        let envelope: DetailsResponse = self.get_json(url, "details").await?;

        match envelope.result {
            Some(result) if envelope.status == STATUS_OK => Ok(result),
            _ => Err(PlacesError::upstream(
                &envelope.status,
                envelope.error_message.as_deref(),
            )),
        }
    }

    /// Downloads a photo by provider reference.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::UnexpectedStatus`] if the provider answers non-2xx;
    ///   the status is preserved so callers can pass it through.
    /// - [`PlacesError::Http`] on network failure or timeout.
    pub async fn fetch_photo(&self, reference: &str, max_width: u32) -> Result<Photo, PlacesError> {
        let max_width = max_width.to_string();
        let url = self.build_url(
            "photo",
            &[("photoreference", reference), ("maxwidth", &max_width)],
        )?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: response.status().as_u16(),
                endpoint: "photo".to_owned(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_PHOTO_CONTENT_TYPE)
            .to_owned();
        let bytes = response.bytes().await?.to_vec();

        Ok(Photo {
            content_type,
            bytes,
        })
    }

    /// Builds an endpoint URL with percent-encoded query parameters and the
    /// API key appended last.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body.
    ///
    /// `endpoint` labels errors; the full URL is never included because it
    /// carries the API key.
    async fn get_json<T>(&self, url: Url, endpoint: &str) -> Result<T, PlacesError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: response.status().as_u16(),
                endpoint: endpoint.to_owned(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }
}

//! Temple search resolution.
//!
//! Chooses between a multi-keyword proximity fan-out (origin inside the target
//! region) and a single free-text search (no origin, or origin elsewhere),
//! merges and de-duplicates provider results, normalizes them, and drops
//! anything that falls outside the region.

use std::collections::HashSet;
use std::future::Future;

use futures::future::join_all;
use mandir_core::{Coordinate, Place, RegionBounds};

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::normalize::normalize_place;
use crate::types::{RawPlace, SearchResponse, STATUS_OK};

/// Keywords searched around an in-region origin, in tie-break order: when two
/// searches return the same place, the earlier keyword's record is kept.
pub const FAN_OUT_TERMS: [&str; 5] = [
    "temple",
    "mandir",
    "hindu temple",
    "shiva temple",
    "vishnu temple",
];

/// Fixed proximity radius for fan-out searches. Caller-supplied radii are
/// ignored in both modes.
pub const FAN_OUT_RADIUS_METERS: u32 = 100_000;

/// Appended to a caller query in free-text mode.
pub const TEXT_QUERY_SUFFIX: &str = "temple India";

/// Free-text query used when the caller supplied none.
pub const GENERIC_TEXT_QUERY: &str = "famous hindu temples India";

/// The search operations the resolver needs from a places provider.
pub trait PlacesApi: Send + Sync {
    fn search_nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        keyword: &str,
    ) -> impl Future<Output = Result<SearchResponse, PlacesError>> + Send;

    fn search_text(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<SearchResponse, PlacesError>> + Send;
}

impl PlacesApi for PlacesClient {
    async fn search_nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<SearchResponse, PlacesError> {
        PlacesClient::search_nearby(self, origin, radius_meters, keyword).await
    }

    async fn search_text(&self, query: &str) -> Result<SearchResponse, PlacesError> {
        PlacesClient::search_text(self, query).await
    }
}

/// Resolves `(origin, query)` into a region-filtered list of temples.
#[derive(Debug, Clone)]
pub struct TempleResolver<P> {
    places: P,
    region: RegionBounds,
    photo_base_url: String,
}

impl<P: PlacesApi> TempleResolver<P> {
    pub fn new(places: P, region: RegionBounds, photo_base_url: impl Into<String>) -> Self {
        Self {
            places,
            region,
            photo_base_url: photo_base_url.into(),
        }
    }

    pub fn places(&self) -> &P {
        &self.places
    }

    pub fn region(&self) -> &RegionBounds {
        &self.region
    }

    pub fn photo_base_url(&self) -> &str {
        &self.photo_base_url
    }

    /// Runs a temple search.
    ///
    /// An empty or whitespace-only `query` is treated as absent. Results come
    /// back in encounter order (fan-out) or provider order (free-text); no
    /// distance ordering is applied here.
    ///
    /// # Errors
    ///
    /// Only free-text mode can fail: a transport error or a provider status
    /// other than `OK` / `ZERO_RESULTS` is returned to the caller. Fan-out
    /// mode absorbs per-keyword failures and returns whatever succeeded,
    /// possibly nothing.
    pub async fn resolve(
        &self,
        origin: Option<Coordinate>,
        query: Option<&str>,
    ) -> Result<Vec<Place>, PlacesError> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let raw = match origin {
            Some(origin) if self.region.contains(&origin) => {
                tracing::info!(
                    lat = origin.lat(),
                    lng = origin.lng(),
                    "origin inside region, fanning out nearby searches"
                );
                self.fan_out(origin, query).await
            }
            _ => {
                tracing::info!("no usable origin, running free-text search");
                self.free_text(query).await?
            }
        };

        let places: Vec<Place> = raw
            .into_iter()
            .enumerate()
            .map(|(index, item)| normalize_place(item, index, &self.photo_base_url))
            .filter(|place| {
                place
                    .coordinate
                    .as_ref()
                    .is_none_or(|c| self.region.contains(c))
            })
            .collect();

        tracing::info!(count = places.len(), "resolved temples");
        Ok(places)
    }

    /// One nearby search per keyword, issued concurrently. Results are merged
    /// in keyword order (not completion order), so de-duplication always keeps
    /// the earliest keyword's record.
    async fn fan_out(&self, origin: Coordinate, query: Option<&str>) -> Vec<RawPlace> {
        let searches = FAN_OUT_TERMS.iter().map(|&term| {
            let keyword = query.unwrap_or(term);
            async move {
                let outcome = self
                    .places
                    .search_nearby(origin, FAN_OUT_RADIUS_METERS, keyword)
                    .await;
                (term, outcome)
            }
        });
        let outcomes = join_all(searches).await;

        let mut seen: HashSet<String> = HashSet::new();
        let mut merged = Vec::new();
        let mut failed = 0usize;

        for (term, outcome) in outcomes {
            let response = match outcome {
                Ok(response) => response,
                Err(e) => {
                    failed += 1;
                    tracing::warn!(term, error = %e, "nearby search failed");
                    continue;
                }
            };

            if response.status != STATUS_OK {
                if !response.is_success() {
                    failed += 1;
                    tracing::warn!(
                        term,
                        status = %response.status,
                        message = response.error_message.as_deref().unwrap_or(""),
                        "nearby search returned error status"
                    );
                }
                continue;
            }

            for item in response.results {
                // Records without an id cannot be matched, so they are all kept.
                let duplicate = item
                    .place_id
                    .as_ref()
                    .is_some_and(|id| !seen.insert(id.clone()));
                if !duplicate {
                    merged.push(item);
                }
            }
        }

        tracing::info!(
            unique = merged.len(),
            failed_terms = failed,
            "merged nearby search results"
        );
        merged
    }

    async fn free_text(&self, query: Option<&str>) -> Result<Vec<RawPlace>, PlacesError> {
        let text = query.map_or_else(
            || GENERIC_TEXT_QUERY.to_string(),
            |q| format!("{q} {TEXT_QUERY_SUFFIX}"),
        );

        let response = self.places.search_text(&text).await?;
        if !response.is_success() {
            tracing::error!(
                status = %response.status,
                message = response.error_message.as_deref().unwrap_or(""),
                "text search returned error status"
            );
            return Err(PlacesError::upstream(
                &response.status,
                response.error_message.as_deref(),
            ));
        }

        Ok(response.results)
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;

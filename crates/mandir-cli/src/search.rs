//! `search` and `details` command handlers.
//!
//! Both talk to the provider directly through a [`TempleResolver`]; nothing
//! goes through the HTTP service.

use std::fmt::Write as _;

use anyhow::Context;
use mandir_core::{
    annotate_and_sort, format_distance, AppConfig, Coordinate, DistanceAnnotatedPlace, Place,
};
use mandir_places::{normalize_place, PlacesClient, TempleResolver};

fn build_resolver(config: &AppConfig) -> anyhow::Result<TempleResolver<PlacesClient>> {
    let key = config
        .google_places_api_key
        .as_deref()
        .context("GOOGLE_PLACES_API_KEY is required for provider lookups")?;
    let client =
        PlacesClient::with_base_url(key, config.places_timeout_secs, &config.places_base_url)?;
    Ok(TempleResolver::new(
        client,
        config.region,
        config.public_base_url.clone(),
    ))
}

/// Runs a temple search and prints the result.
///
/// With an origin the rows are ranked nearest-first and labelled with a
/// display distance; without one they keep provider order.
///
/// # Errors
///
/// Returns an error if the API key is missing, the origin is not a valid
/// coordinate, or the free-text search fails upstream.
pub(crate) async fn run_search(
    config: &AppConfig,
    origin: Option<(f64, f64)>,
    query: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let origin = origin
        .map(|(lat, lng)| Coordinate::new(lat, lng))
        .transpose()?;
    let resolver = build_resolver(config)?;

    let places = resolver
        .resolve(origin, query)
        .await
        .context("temple search failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&places)?);
        return Ok(());
    }

    if places.is_empty() {
        println!("no temples found");
        return Ok(());
    }
    print!("{}", render_table(origin.as_ref(), &places));
    Ok(())
}

/// Fetches and prints one place's details as JSON.
///
/// # Errors
///
/// Returns an error if the API key is missing or the lookup fails.
pub(crate) async fn run_details(config: &AppConfig, place_id: &str) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let mut raw = resolver
        .places()
        .place_details(place_id)
        .await
        .with_context(|| format!("details lookup for {place_id} failed"))?;
    if raw.place_id.is_none() {
        raw.place_id = Some(place_id.to_owned());
    }

    let place = normalize_place(raw, 0, resolver.photo_base_url());
    println!("{}", serde_json::to_string_pretty(&place)?);
    Ok(())
}

/// One line per place: rank, distance label (or `-`), rating, name and
/// short location.
fn render_table(origin: Option<&Coordinate>, places: &[Place]) -> String {
    let rows = match origin {
        Some(origin) => annotate_and_sort(origin, places),
        None => places
            .iter()
            .cloned()
            .map(|place| DistanceAnnotatedPlace {
                place,
                distance_km: None,
            })
            .collect(),
    };

    let mut out = String::new();
    for (rank, row) in rows.iter().enumerate() {
        let distance = row
            .distance_km
            .map_or_else(|| "-".to_string(), format_distance);
        let _ = writeln!(
            out,
            "{:>3}  {:>7}  {:>3.1}  {}  ({})",
            rank + 1,
            distance,
            row.place.rating,
            row.place.name,
            row.place.short_location
        );
    }
    out
}

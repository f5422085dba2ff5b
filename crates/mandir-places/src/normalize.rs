//! Normalization from raw provider places to [`mandir_core::Place`].
//!
//! Normalization is total: every missing field falls back to a default, so
//! any [`RawPlace`] produces a usable [`Place`].

use mandir_core::place::MAX_REVIEWS;
use mandir_core::{Coordinate, Place, Review};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::{RawPlace, RawReview};

/// Width requested from the photo proxy for list and detail images.
pub const PHOTO_MAX_WIDTH: u32 = 800;

const FALLBACK_NAME: &str = "Unknown Temple";
const FALLBACK_TIMINGS: &str = "Check locally";

/// Characters left unescaped in a photo reference query value, matching
/// what browsers' `encodeURIComponent` leaves alone.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Converts a provider place into a [`Place`].
///
/// `index` is the item's position in its batch and only matters when the
/// provider omitted `place_id`: the id then falls back to `place_<index>`.
/// `photo_base_url` is the externally reachable base of this service; photo
/// links point at its `/api/photo` proxy.
#[must_use]
pub fn normalize_place(raw: RawPlace, index: usize, photo_base_url: &str) -> Place {
    let photo_url = raw
        .photos
        .first()
        .and_then(|p| p.photo_reference.as_deref())
        .map(|reference| photo_proxy_url(photo_base_url, reference));

    let vicinity = non_empty(raw.vicinity.as_deref());
    let full_address = non_empty(raw.formatted_address.as_deref())
        .or(vicinity)
        .unwrap_or_default()
        .to_string();
    let short_location = vicinity.map_or_else(|| leading_segments(&full_address), str::to_string);
    let region = extract_region(&full_address);

    let coordinate = raw
        .geometry
        .and_then(|g| g.location)
        .and_then(|loc| match Coordinate::new(loc.lat, loc.lng) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::debug!(error = %e, "dropping out-of-range provider coordinate");
                None
            }
        });

    let (open_now, timings) = match raw.opening_hours {
        Some(hours) => (
            hours.open_now,
            hours
                .weekday_text
                .into_iter()
                .next()
                .unwrap_or_else(|| FALLBACK_TIMINGS.to_string()),
        ),
        None => (None, FALLBACK_TIMINGS.to_string()),
    };

    let reviews = raw
        .reviews
        .into_iter()
        .take(MAX_REVIEWS)
        .map(normalize_review)
        .collect();

    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string());

    Place {
        id: raw
            .place_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("place_{index}")),
        place_id: raw.place_id,
        name,
        hindi_name: String::new(),
        short_location,
        full_address,
        region,
        deity: "Various".to_string(),
        religion: "Hinduism".to_string(),
        photo_url,
        description: String::new(),
        timings,
        best_time: "Year round".to_string(),
        dress_code: "Modest clothing".to_string(),
        coordinate,
        rating: raw.rating.unwrap_or(0.0),
        review_count: raw.user_ratings_total.unwrap_or(0),
        open_now,
        website: raw.website,
        phone: raw.formatted_phone_number,
        google_maps_url: raw.url,
        reviews,
        is_wishlisted: false,
        is_visited: false,
        friend_ratings: Vec::new(),
    }
}

fn normalize_review(review: RawReview) -> Review {
    Review {
        author: review.author_name,
        rating: review.rating,
        text: review.text,
        relative_time: review.relative_time_description,
    }
}

/// Builds the photo-proxy link for a provider photo reference.
#[must_use]
pub fn photo_proxy_url(base_url: &str, reference: &str) -> String {
    format!(
        "{}/api/photo?ref={}&maxwidth={PHOTO_MAX_WIDTH}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(reference, QUERY_VALUE)
    )
}

/// Second-to-last comma-separated segment of an address with digits
/// (postal codes) removed, e.g. `"..., Varanasi, Uttar Pradesh 221001, India"`
/// gives `"Uttar Pradesh"`. Empty when the address has fewer than two segments.
#[must_use]
pub fn extract_region(address: &str) -> String {
    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() < 2 {
        return String::new();
    }
    parts[parts.len() - 2]
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect::<String>()
        .trim()
        .to_string()
}

/// First two comma-separated segments of an address, rejoined.
fn leading_segments(address: &str) -> String {
    address
        .split(',')
        .take(2)
        .collect::<Vec<_>>()
        .join(",")
        .trim()
        .to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

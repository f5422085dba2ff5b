use super::*;
use crate::types::{Geometry, LatLng, OpeningHours, RawPhoto};

const BASE: &str = "http://localhost:3001";

fn make_review(author: &str) -> RawReview {
    RawReview {
        author_name: Some(author.to_owned()),
        rating: Some(5.0),
        text: Some("Peaceful darshan.".to_owned()),
        relative_time_description: Some("a month ago".to_owned()),
    }
}

fn make_raw_place() -> RawPlace {
    RawPlace {
        place_id: Some("ChIJkashi".to_owned()),
        name: Some("Shri Kashi Vishwanath Temple".to_owned()),
        vicinity: Some("Lahori Tola, Domari, Varanasi".to_owned()),
        formatted_address: Some(
            "Lahori Tola, Domari, Varanasi, Uttar Pradesh 221001, India".to_owned(),
        ),
        geometry: Some(Geometry {
            location: Some(LatLng {
                lat: 25.3109,
                lng: 83.0107,
            }),
        }),
        rating: Some(4.7),
        user_ratings_total: Some(91_234),
        photos: vec![RawPhoto {
            photo_reference: Some("AbC/1+2=".to_owned()),
            width: Some(4000),
            height: Some(3000),
        }],
        opening_hours: Some(OpeningHours {
            open_now: Some(true),
            weekday_text: vec!["Monday: 3:00 AM – 11:00 PM".to_owned()],
        }),
        website: Some("https://shrikashivishwanath.org".to_owned()),
        formatted_phone_number: Some("0542 239 2629".to_owned()),
        url: Some("https://maps.google.com/?cid=1".to_owned()),
        reviews: vec![
            make_review("a"),
            make_review("b"),
            make_review("c"),
            make_review("d"),
        ],
    }
}

// -----------------------------------------------------------------------
// normalize_place
// -----------------------------------------------------------------------

#[test]
fn normalize_place_uses_provider_id() {
    let place = normalize_place(make_raw_place(), 7, BASE);
    assert_eq!(place.id, "ChIJkashi");
    assert_eq!(place.place_id.as_deref(), Some("ChIJkashi"));
}

#[test]
fn normalize_place_falls_back_to_index_id() {
    let raw = RawPlace {
        place_id: None,
        ..make_raw_place()
    };
    let place = normalize_place(raw, 4, BASE);
    assert_eq!(place.id, "place_4");
    assert!(place.place_id.is_none());
}

#[test]
fn normalize_place_copies_scalar_fields() {
    let place = normalize_place(make_raw_place(), 0, BASE);
    assert_eq!(place.name, "Shri Kashi Vishwanath Temple");
    assert!((place.rating - 4.7).abs() < f64::EPSILON);
    assert_eq!(place.review_count, 91_234);
    assert_eq!(place.open_now, Some(true));
    assert_eq!(place.timings, "Monday: 3:00 AM – 11:00 PM");
    assert_eq!(place.phone.as_deref(), Some("0542 239 2629"));
    assert_eq!(
        place.google_maps_url.as_deref(),
        Some("https://maps.google.com/?cid=1")
    );
    let c = place.coordinate.expect("coordinate");
    assert!((c.lat() - 25.3109).abs() < f64::EPSILON);
    assert!((c.lng() - 83.0107).abs() < f64::EPSILON);
}

#[test]
fn normalize_place_derives_address_fields() {
    let place = normalize_place(make_raw_place(), 0, BASE);
    assert_eq!(place.short_location, "Lahori Tola, Domari, Varanasi");
    assert_eq!(
        place.full_address,
        "Lahori Tola, Domari, Varanasi, Uttar Pradesh 221001, India"
    );
    assert_eq!(place.region, "Uttar Pradesh");
}

#[test]
fn normalize_place_short_location_from_address_without_vicinity() {
    let raw = RawPlace {
        vicinity: None,
        ..make_raw_place()
    };
    let place = normalize_place(raw, 0, BASE);
    assert_eq!(place.short_location, "Lahori Tola, Domari");
}

#[test]
fn normalize_place_full_address_falls_back_to_vicinity() {
    let raw = RawPlace {
        formatted_address: Some(String::new()),
        vicinity: Some("Sector 8, Gandhinagar".to_owned()),
        ..make_raw_place()
    };
    let place = normalize_place(raw, 0, BASE);
    assert_eq!(place.full_address, "Sector 8, Gandhinagar");
    assert_eq!(place.region, "Sector");
}

#[test]
fn normalize_place_builds_encoded_photo_url() {
    let place = normalize_place(make_raw_place(), 0, "https://api.mandir.app/");
    assert_eq!(
        place.photo_url.as_deref(),
        Some("https://api.mandir.app/api/photo?ref=AbC%2F1%2B2%3D&maxwidth=800")
    );
}

#[test]
fn normalize_place_keeps_at_most_three_reviews() {
    let place = normalize_place(make_raw_place(), 0, BASE);
    assert_eq!(place.reviews.len(), 3);
    assert_eq!(place.reviews[0].author.as_deref(), Some("a"));
    assert_eq!(place.reviews[2].author.as_deref(), Some("c"));
    assert_eq!(place.reviews[0].relative_time.as_deref(), Some("a month ago"));
}

#[test]
fn normalize_place_initializes_client_state_empty() {
    let place = normalize_place(make_raw_place(), 0, BASE);
    assert!(!place.is_wishlisted);
    assert!(!place.is_visited);
    assert!(place.friend_ratings.is_empty());
}

#[test]
fn normalize_place_minimal_record_gets_defaults() {
    let raw = RawPlace {
        place_id: Some("only-id".to_owned()),
        name: Some("Tiny Shrine".to_owned()),
        ..RawPlace::default()
    };
    let place = normalize_place(raw, 0, BASE);
    assert_eq!(place.id, "only-id");
    assert_eq!(place.name, "Tiny Shrine");
    assert_eq!(place.region, "");
    assert_eq!(place.full_address, "");
    assert_eq!(place.short_location, "");
    assert!(place.coordinate.is_none());
    assert!(place.rating.abs() < f64::EPSILON);
    assert_eq!(place.review_count, 0);
    assert!(place.reviews.is_empty());
    assert!(place.photo_url.is_none());
    assert!(place.open_now.is_none());
    assert_eq!(place.timings, "Check locally");
}

#[test]
fn normalize_place_empty_record_gets_fallback_name() {
    let place = normalize_place(RawPlace::default(), 2, BASE);
    assert_eq!(place.id, "place_2");
    assert_eq!(place.name, "Unknown Temple");
}

#[test]
fn normalize_place_drops_out_of_range_coordinate() {
    let raw = RawPlace {
        geometry: Some(Geometry {
            location: Some(LatLng {
                lat: 125.0,
                lng: 83.0,
            }),
        }),
        ..make_raw_place()
    };
    let place = normalize_place(raw, 0, BASE);
    assert!(place.coordinate.is_none());
}

#[test]
fn normalize_place_opening_hours_without_weekday_text() {
    let raw = RawPlace {
        opening_hours: Some(OpeningHours {
            open_now: Some(false),
            weekday_text: Vec::new(),
        }),
        ..make_raw_place()
    };
    let place = normalize_place(raw, 0, BASE);
    assert_eq!(place.open_now, Some(false));
    assert_eq!(place.timings, "Check locally");
}

// -----------------------------------------------------------------------
// extract_region
// -----------------------------------------------------------------------

#[test]
fn extract_region_strips_postal_code() {
    assert_eq!(
        extract_region("Akshardham Setu, New Delhi, Delhi 110092, India"),
        "Delhi"
    );
}

#[test]
fn extract_region_single_segment_is_empty() {
    assert_eq!(extract_region("Varanasi"), "");
    assert_eq!(extract_region(""), "");
}

#[test]
fn extract_region_two_segments_uses_first() {
    assert_eq!(extract_region("Tamil Nadu 600004, India"), "Tamil Nadu");
}

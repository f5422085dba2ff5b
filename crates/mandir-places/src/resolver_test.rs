use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::*;
use crate::types::{Geometry, LatLng};

#[derive(Clone)]
enum Outcome {
    Results(Vec<RawPlace>),
    Status(&'static str),
    Fail,
}

/// In-memory provider keyed by keyword, recording every call it receives.
#[derive(Default)]
struct FakePlaces {
    nearby: HashMap<&'static str, Outcome>,
    delays_ms: HashMap<&'static str, u64>,
    text: Option<Outcome>,
    nearby_calls: Mutex<Vec<String>>,
    text_calls: Mutex<Vec<String>>,
}

impl FakePlaces {
    fn with_nearby(mut self, keyword: &'static str, outcome: Outcome) -> Self {
        self.nearby.insert(keyword, outcome);
        self
    }

    fn with_delay(mut self, keyword: &'static str, ms: u64) -> Self {
        self.delays_ms.insert(keyword, ms);
        self
    }

    fn with_text(mut self, outcome: Outcome) -> Self {
        self.text = Some(outcome);
        self
    }
}

fn respond(outcome: Option<&Outcome>, endpoint: &str) -> Result<SearchResponse, PlacesError> {
    match outcome {
        Some(Outcome::Results(results)) => Ok(SearchResponse {
            status: "OK".to_owned(),
            results: results.clone(),
            error_message: None,
        }),
        Some(Outcome::Status(status)) => Ok(SearchResponse {
            status: (*status).to_owned(),
            results: Vec::new(),
            error_message: Some("You have exceeded your daily request quota.".to_owned()),
        }),
        Some(Outcome::Fail) => Err(PlacesError::UnexpectedStatus {
            status: 503,
            endpoint: endpoint.to_owned(),
        }),
        None => Ok(SearchResponse {
            status: "ZERO_RESULTS".to_owned(),
            results: Vec::new(),
            error_message: None,
        }),
    }
}

impl PlacesApi for FakePlaces {
    async fn search_nearby(
        &self,
        _origin: Coordinate,
        _radius_meters: u32,
        keyword: &str,
    ) -> Result<SearchResponse, PlacesError> {
        self.nearby_calls
            .lock()
            .unwrap()
            .push(keyword.to_owned());
        if let Some(ms) = self.delays_ms.get(keyword) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        respond(self.nearby.get(keyword), "nearbysearch")
    }

    async fn search_text(&self, query: &str) -> Result<SearchResponse, PlacesError> {
        self.text_calls.lock().unwrap().push(query.to_owned());
        respond(self.text.as_ref(), "textsearch")
    }
}

fn raw(id: &str, name: &str, at: Option<(f64, f64)>) -> RawPlace {
    RawPlace {
        place_id: Some(id.to_owned()),
        name: Some(name.to_owned()),
        geometry: at.map(|(lat, lng)| Geometry {
            location: Some(LatLng { lat, lng }),
        }),
        ..RawPlace::default()
    }
}

fn delhi() -> Coordinate {
    Coordinate::new(28.6139, 77.209).unwrap()
}

fn london() -> Coordinate {
    Coordinate::new(51.5074, -0.1278).unwrap()
}

fn resolver(fake: FakePlaces) -> TempleResolver<FakePlaces> {
    TempleResolver::new(fake, RegionBounds::india(), "http://localhost:3001")
}

fn ids(places: &[Place]) -> Vec<&str> {
    places.iter().map(|p| p.id.as_str()).collect()
}

// -----------------------------------------------------------------------
// fan-out mode
// -----------------------------------------------------------------------

#[tokio::test]
async fn fan_out_searches_every_term_around_origin() {
    let resolver = resolver(FakePlaces::default());
    let places = resolver.resolve(Some(delhi()), None).await.unwrap();

    assert!(places.is_empty());
    let calls = resolver.places().nearby_calls.lock().unwrap().clone();
    assert_eq!(calls, FAN_OUT_TERMS);
    assert!(resolver.places().text_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fan_out_uses_query_as_keyword_for_every_term() {
    let resolver = resolver(FakePlaces::default());
    resolver.resolve(Some(delhi()), Some("kali")).await.unwrap();

    let calls = resolver.places().nearby_calls.lock().unwrap().clone();
    assert_eq!(calls, vec!["kali"; FAN_OUT_TERMS.len()]);
}

#[tokio::test]
async fn fan_out_keeps_first_term_record_for_duplicate_ids() {
    let fake = FakePlaces::default()
        .with_nearby(
            "temple",
            Outcome::Results(vec![
                raw("X", "From temple", Some((28.61, 77.21))),
                raw("Y", "Only temple", Some((28.62, 77.22))),
            ]),
        )
        .with_nearby(
            "mandir",
            Outcome::Results(vec![
                raw("X", "From mandir", Some((28.61, 77.21))),
                raw("Z", "Only mandir", Some((28.63, 77.23))),
            ]),
        );
    let places = resolver(fake).resolve(Some(delhi()), None).await.unwrap();

    assert_eq!(ids(&places), ["X", "Y", "Z"]);
    assert_eq!(places[0].name, "From temple");
}

#[tokio::test]
async fn fan_out_tie_break_ignores_completion_order() {
    // The first term answers last; its record must still win.
    let fake = FakePlaces::default()
        .with_nearby(
            "temple",
            Outcome::Results(vec![raw("X", "From temple", Some((28.61, 77.21)))]),
        )
        .with_delay("temple", 50)
        .with_nearby(
            "vishnu temple",
            Outcome::Results(vec![raw("X", "From vishnu temple", Some((28.61, 77.21)))]),
        );
    let places = resolver(fake).resolve(Some(delhi()), None).await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "From temple");
}

#[tokio::test]
async fn fan_out_filters_places_outside_region() {
    let fake = FakePlaces::default().with_nearby(
        "temple",
        Outcome::Results(vec![
            raw("inside", "Himalayan shrine", Some((35.0, 80.0))),
            raw("angkor", "Angkor Wat", Some((13.4, 103.8))),
            raw("unknown", "No geometry", None),
        ]),
    );
    let places = resolver(fake).resolve(Some(delhi()), None).await.unwrap();

    assert_eq!(ids(&places), ["inside", "unknown"]);
}

#[tokio::test]
async fn fan_out_tolerates_partial_failure() {
    let fake = FakePlaces::default()
        .with_nearby("temple", Outcome::Fail)
        .with_nearby("mandir", Outcome::Status("OVER_QUERY_LIMIT"))
        .with_nearby(
            "hindu temple",
            Outcome::Results(vec![raw("A", "A", Some((28.5, 77.1)))]),
        )
        .with_nearby(
            "shiva temple",
            Outcome::Results(vec![raw("B", "B", Some((28.7, 77.3)))]),
        )
        .with_nearby(
            "vishnu temple",
            Outcome::Results(vec![raw("C", "C", Some((28.4, 77.0)))]),
        );
    let places = resolver(fake).resolve(Some(delhi()), None).await.unwrap();

    assert_eq!(ids(&places), ["A", "B", "C"]);
}

#[tokio::test]
async fn fan_out_all_failures_yield_empty_list() {
    let mut fake = FakePlaces::default();
    for term in FAN_OUT_TERMS {
        fake = fake.with_nearby(term, Outcome::Fail);
    }
    let result = resolver(fake).resolve(Some(delhi()), None).await;

    let places = result.expect("all-failed fan-out is not an error");
    assert!(places.is_empty());
}

#[tokio::test]
async fn fan_out_assigns_synthetic_ids_by_merged_position() {
    let nameless = |name: &str| RawPlace {
        name: Some(name.to_owned()),
        ..RawPlace::default()
    };
    let fake = FakePlaces::default()
        .with_nearby(
            "temple",
            Outcome::Results(vec![raw("K", "Keyed", Some((28.6, 77.2))), nameless("first")]),
        )
        .with_nearby("mandir", Outcome::Results(vec![nameless("second")]));
    let places = resolver(fake).resolve(Some(delhi()), None).await.unwrap();

    assert_eq!(ids(&places), ["K", "place_1", "place_2"]);
}

// -----------------------------------------------------------------------
// free-text mode
// -----------------------------------------------------------------------

#[tokio::test]
async fn free_text_generic_query_without_origin() {
    let resolver = resolver(FakePlaces::default().with_text(Outcome::Results(vec![])));
    resolver.resolve(None, None).await.unwrap();

    let calls = resolver.places().text_calls.lock().unwrap().clone();
    assert_eq!(calls, ["famous hindu temples India"]);
    assert!(resolver.places().nearby_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn free_text_appends_suffix_for_origin_outside_region() {
    let resolver = resolver(FakePlaces::default().with_text(Outcome::Results(vec![])));
    resolver.resolve(Some(london()), Some("shiva")).await.unwrap();

    let calls = resolver.places().text_calls.lock().unwrap().clone();
    assert_eq!(calls, ["shiva temple India"]);
    assert!(resolver.places().nearby_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn free_text_treats_blank_query_as_absent() {
    let resolver = resolver(FakePlaces::default().with_text(Outcome::Results(vec![])));
    resolver.resolve(None, Some("   ")).await.unwrap();

    let calls = resolver.places().text_calls.lock().unwrap().clone();
    assert_eq!(calls, ["famous hindu temples India"]);
}

#[tokio::test]
async fn free_text_preserves_provider_order_and_filters_region() {
    let fake = FakePlaces::default().with_text(Outcome::Results(vec![
        raw("meenakshi", "Meenakshi Amman", Some((9.9195, 78.1193))),
        raw("angkor", "Angkor Wat", Some((13.4125, 103.867))),
        raw("somnath", "Somnath", Some((20.888, 70.4013))),
    ]));
    let places = resolver(fake).resolve(None, None).await.unwrap();

    assert_eq!(ids(&places), ["meenakshi", "somnath"]);
}

#[tokio::test]
async fn free_text_zero_results_is_empty_success() {
    let fake = FakePlaces::default().with_text(Outcome::Status("ZERO_RESULTS"));
    let places = resolver(fake).resolve(None, Some("xyz")).await.unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn free_text_error_status_is_upstream_error() {
    let fake = FakePlaces::default().with_text(Outcome::Status("OVER_QUERY_LIMIT"));
    let err = resolver(fake).resolve(None, None).await.unwrap_err();

    match err {
        PlacesError::Upstream { status, message } => {
            assert_eq!(status, "OVER_QUERY_LIMIT");
            assert_eq!(message, "You have exceeded your daily request quota.");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn free_text_transport_failure_propagates() {
    let fake = FakePlaces::default().with_text(Outcome::Fail);
    let err = resolver(fake).resolve(None, None).await.unwrap_err();
    assert!(matches!(err, PlacesError::UnexpectedStatus { status: 503, .. }));
}

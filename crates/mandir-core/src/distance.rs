//! Distance annotation, proximity ranking and display labels.

use std::cmp::Ordering;

use crate::geo::{great_circle_distance_km, Coordinate};
use crate::place::{DistanceAnnotatedPlace, Place};

/// Annotates each place with its distance from `origin` and orders the result
/// nearest-first.
///
/// Places without a coordinate get `distance_km = None` and sort after every
/// measured place. The sort is stable, so places with equal keys (including
/// all unmeasured ones) keep their input order. The input is left untouched.
#[must_use]
pub fn annotate_and_sort(origin: &Coordinate, places: &[Place]) -> Vec<DistanceAnnotatedPlace> {
    let mut annotated: Vec<DistanceAnnotatedPlace> = places
        .iter()
        .map(|place| DistanceAnnotatedPlace {
            distance_km: place
                .coordinate
                .as_ref()
                .map(|c| great_circle_distance_km(origin, c)),
            place: place.clone(),
        })
        .collect();

    annotated.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    annotated
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Renders a distance for display.
///
/// - under 1 km: whole metres, e.g. `"999m"`
/// - 1 km up to 10 km: one decimal, e.g. `"1.0km"`, `"10.0km"` for 9.99
/// - 10 km and above: whole kilometres, e.g. `"10km"`
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0}m", (km * 1000.0).round())
    } else if km < 10.0 {
        format!("{}km", one_decimal(km))
    } else {
        format!("{:.0}km", km.round())
    }
}

/// Formats with one decimal place, rounding exact binary ties (x.25, x.75)
/// upward rather than to even.
#[allow(clippy::float_cmp)]
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    let is_exact_tie = quarters.fract() == 0.0 && quarters % 2.0 == 1.0;
    if is_exact_tie {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}

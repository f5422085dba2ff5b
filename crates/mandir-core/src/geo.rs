//! Coordinates, the target-region bounding box, and great-circle distance.
//!
//! A [`Coordinate`] can only be built through [`Coordinate::new`] (or serde,
//! which goes through the same check), so every function that takes one can
//! assume it is in range.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct UncheckedCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<UncheckedCoordinate> for Coordinate {
    type Error = CoreError;

    fn try_from(raw: UncheckedCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite values and anything outside
    /// lat ∈ [-90, 90], lng ∈ [-180, 180].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] when either component is out
    /// of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
        if lat_ok && lng_ok {
            Ok(Self { lat, lng })
        } else {
            Err(CoreError::InvalidCoordinate { lat, lng })
        }
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Haversine distance between two coordinates in kilometres.
///
/// Symmetric, zero for identical points, and stable for antipodal points
/// (the intermediate term is clamped so rounding can never push it past 1).
#[must_use]
pub fn great_circle_distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Inclusive latitude/longitude bounding box describing the target region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl RegionBounds {
    /// Builds a bounding box from four scalar bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRegionBounds`] if a bound is out of range
    /// or a minimum exceeds its maximum.
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Result<Self, CoreError> {
        let corner_min = Coordinate::new(min_lat, min_lng)
            .map_err(|e| CoreError::InvalidRegionBounds(e.to_string()))?;
        let corner_max = Coordinate::new(max_lat, max_lng)
            .map_err(|e| CoreError::InvalidRegionBounds(e.to_string()))?;

        if corner_min.lat > corner_max.lat {
            return Err(CoreError::InvalidRegionBounds(format!(
                "min_lat {min_lat} is greater than max_lat {max_lat}"
            )));
        }
        if corner_min.lng > corner_max.lng {
            return Err(CoreError::InvalidRegionBounds(format!(
                "min_lng {min_lng} is greater than max_lng {max_lng}"
            )));
        }

        Ok(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// India, expanded slightly: lat 6–37, lng 67–98.
    #[must_use]
    pub const fn india() -> Self {
        Self {
            min_lat: 6.0,
            max_lat: 37.0,
            min_lng: 67.0,
            max_lng: 98.0,
        }
    }

    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        let inside = point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng;
        tracing::debug!(lat = point.lat, lng = point.lng, inside, "region check");
        inside
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::india()
    }
}

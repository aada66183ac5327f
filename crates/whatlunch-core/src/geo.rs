//! Coordinates, resolved locations, search radii and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default search radius: one kilometre.
pub const DEFAULT_RADIUS_M: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parses a coordinate from the string-typed `y`/`x` fields places
    /// indexes return. Returns `None` when either side is not a finite number.
    #[must_use]
    pub fn parse(lat: &str, lng: &str) -> Option<Self> {
        let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        let lng = lng.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self { lat, lng })
    }
}

/// A geocoded origin: coordinates plus the address shown back to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl Location {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Search radius in meters.
///
/// Displays in kilometres (`1000` → `1km`, `1500` → `1.5km`) since that is
/// how it appears in user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radius(u32);

impl Radius {
    #[must_use]
    pub const fn from_meters(meters: u32) -> Self {
        Self(meters)
    }

    #[must_use]
    pub const fn meters(self) -> u32 {
        self.0
    }

    /// Whether a distance (in meters) falls inside this radius. Inclusive.
    #[must_use]
    pub const fn contains(self, distance_m: u32) -> bool {
        distance_m <= self.0
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_M)
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let km = f64::from(self.0) / 1_000.0;
        write!(f, "{km}km")
    }
}

/// Great-circle distance between two coordinates in whole meters.
///
/// Haversine with a spherical Earth of radius 6,371 km, rounded to the
/// nearest meter.
#[must_use]
pub fn distance_m(a: Coordinate, b: Coordinate) -> u32 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    // Rounding can push `h` just past 1 for near-antipodal points.
    let h = ((d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    // Half the Earth's circumference is ~20,015 km, far inside u32 range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let meters = (EARTH_RADIUS_M * c).round() as u32;
    meters
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point on the map, written `"lat, lng"` in forms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parses a `"lat, lng"` pair.
    ///
    /// Returns `None` unless the input holds exactly two finite numbers, neither of which is
    /// zero. A zero coordinate is what an unset form field used to yield, so it is never
    /// treated as a real position.
    pub fn parse(input: &str) -> Option<Self> {
        let (latitude, longitude) = input.split_once(',')?;

        let latitude = parse_coordinate(latitude)?;
        let longitude = parse_coordinate(longitude)?;

        Some(Self::new(latitude, longitude))
    }
}

fn parse_coordinate(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;

    (value.is_finite() && value != 0.0).then_some(value)
}

impl fmt::Display for GeoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

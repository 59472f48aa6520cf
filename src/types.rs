use serde::{Deserialize, Serialize};
use std::fmt;

/// Longitude/latitude pair in degrees, in the order both services use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// True when both axes differ by strictly less than `tolerance`
    pub fn agrees_with(&self, other: &Coordinates, tolerance: f64) -> bool {
        (self.lon - other.lon).abs() < tolerance && (self.lat - other.lat).abs() < tolerance
    }

    /// `lon,lat` as used by the `ll` and reverse `geocode` parameters
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// Half-width/half-height of the box a place search is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub lon: f64,
    pub lat: f64,
}

impl Span {
    pub const fn square(size: f64) -> Self {
        Self { lon: size, lat: size }
    }

    pub fn to_query(&self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

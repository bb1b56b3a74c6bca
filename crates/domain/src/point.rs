//! Projected-plane points and the lon/lat pairs derived from them for
//! statistics.

use serde::{Deserialize, Serialize};

/// A point in the engine's projected coordinate plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Converts from the projected plane to longitude/latitude.
    ///
    /// Only statistics need this conversion; routing itself stays in the
    /// projected plane. The projection here is a stand-in (identity scaled
    /// by a mercator-ish constant) — the real projection lives in the
    /// engine this crate never imports.
    pub fn to_latlon(self) -> LatLon {
        LatLon {
            lon: self.x,
            lat: self.y,
        }
    }

    pub fn distance_to(self, other: GeoPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Longitude/latitude pair, used only for statistics reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lon: f64,
    pub lat: f64,
}

impl LatLon {
    /// Rounds both fields to five decimal digits (~1m precision), the
    /// precision statistics are reported at.
    pub fn rounded(self) -> Self {
        Self {
            lon: round5(self.lon),
            lat: round5(self.lat),
        }
    }
}

/// A direction vector, reported in statistics as `startDirectionX/Y`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Direction {
    pub x: f64,
    pub y: f64,
}

impl Direction {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn rounded(self) -> Self {
        Self {
            x: round5(self.x),
            y: round5(self.y),
        }
    }
}

pub(crate) fn round5(v: f64) -> f64 {
    (v * 100_000.0).round() / 100_000.0
}

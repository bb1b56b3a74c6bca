//! The statistics record emitted after every request, success or failure.

use std::collections::BTreeMap;

use crate::point::{Direction, GeoPoint};
use crate::result_code::ResultCode;

/// Stable statistics payload keys (spec §6).
pub mod keys {
    pub const NAME: &str = "name";
    pub const START_LON: &str = "startLon";
    pub const START_LAT: &str = "startLat";
    pub const START_DIRECTION_X: &str = "startDirectionX";
    pub const START_DIRECTION_Y: &str = "startDirectionY";
    pub const FINAL_LON: &str = "finalLon";
    pub const FINAL_LAT: &str = "finalLat";
    pub const RESULT: &str = "result";
    pub const ELAPSED: &str = "elapsed";
    pub const DISTANCE: &str = "distance";
    pub const EXCEPTION: &str = "exception";
}

/// A key/value record dispatched to the statistics sink. A `BTreeMap` keeps
/// key order deterministic for tests and log output without that ordering
/// being load-bearing for correctness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRecord(BTreeMap<String, String>);

impl StatsRecord {
    fn geometry(
        router_name: &str,
        start: GeoPoint,
        finish: GeoPoint,
        direction: Direction,
    ) -> Self {
        let mut record = BTreeMap::new();
        let start_ll = start.to_latlon().rounded();
        let finish_ll = finish.to_latlon().rounded();
        let dir = direction.rounded();
        record.insert(keys::NAME.into(), router_name.to_string());
        record.insert(keys::START_LON.into(), start_ll.lon.to_string());
        record.insert(keys::START_LAT.into(), start_ll.lat.to_string());
        record.insert(keys::START_DIRECTION_X.into(), dir.x.to_string());
        record.insert(keys::START_DIRECTION_Y.into(), dir.y.to_string());
        record.insert(keys::FINAL_LON.into(), finish_ll.lon.to_string());
        record.insert(keys::FINAL_LAT.into(), finish_ll.lat.to_string());
        Self(record)
    }

    /// Completed request: `result`, `elapsed`, and `distance` (only when the
    /// code is `NoError`).
    pub fn completed(
        router_name: &str,
        start: GeoPoint,
        finish: GeoPoint,
        direction: Direction,
        code: ResultCode,
        elapsed_secs: f64,
        distance_m: Option<f64>,
    ) -> Self {
        let mut record = Self::geometry(router_name, start, finish, direction);
        record
            .0
            .insert(keys::RESULT.into(), code.as_str().to_string());
        record
            .0
            .insert(keys::ELAPSED.into(), elapsed_secs.to_string());
        if code == ResultCode::NoError {
            if let Some(distance) = distance_m {
                record.0.insert(keys::DISTANCE.into(), distance.to_string());
            }
        }
        record
    }

    /// Engine raised an exception: only `exception` is reported, alongside
    /// the request geometry.
    pub fn exception(
        router_name: &str,
        start: GeoPoint,
        finish: GeoPoint,
        direction: Direction,
        message: &str,
    ) -> Self {
        let mut record = Self::geometry(router_name, start, finish, direction);
        record
            .0
            .insert(keys::EXCEPTION.into(), message.to_string());
        record
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_error_includes_distance() {
        let rec = StatsRecord::completed(
            "demo",
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            Direction::new(0.0, 1.0),
            ResultCode::NoError,
            1.5,
            Some(42.0),
        );
        assert_eq!(rec.get(keys::DISTANCE), Some("42"));
        assert_eq!(rec.get(keys::RESULT), Some("NoError"));
    }

    #[test]
    fn non_no_error_omits_distance() {
        let rec = StatsRecord::completed(
            "demo",
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            Direction::new(0.0, 1.0),
            ResultCode::RouteNotFound,
            0.2,
            Some(42.0),
        );
        assert!(!rec.contains_key(keys::DISTANCE));
    }

    #[test]
    fn exception_record_has_only_exception_and_geometry() {
        let rec = StatsRecord::exception(
            "demo",
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            Direction::new(0.0, 1.0),
            "bad mwm",
        );
        assert_eq!(rec.get(keys::EXCEPTION), Some("bad mwm"));
        assert!(!rec.contains_key(keys::RESULT));
        assert!(!rec.contains_key(keys::DISTANCE));
    }
}

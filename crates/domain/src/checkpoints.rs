//! Ordered waypoints for a single route request.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::point::GeoPoint;

/// An ordered sequence of waypoints: a start, zero or more intermediate
/// points, and a finish. Immutable once built — the "at least a start and a
/// finish" invariant is structural rather than checked at every use site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoints {
    start: GeoPoint,
    intermediate: Vec<GeoPoint>,
    finish: GeoPoint,
}

impl Checkpoints {
    pub fn new(start: GeoPoint, intermediate: Vec<GeoPoint>, finish: GeoPoint) -> Self {
        Self {
            start,
            intermediate,
            finish,
        }
    }

    pub fn direct(start: GeoPoint, finish: GeoPoint) -> Self {
        Self::new(start, Vec::new(), finish)
    }

    /// Builds checkpoints from a flat, ordered list of waypoints, validating
    /// that there are at least a start and a finish. Use this at the edges
    /// where points arrive as a single collection (e.g. a request parsed
    /// from the wire) rather than already split into start/intermediate/
    /// finish.
    pub fn try_from_points(points: Vec<GeoPoint>) -> Result<Self, DomainError> {
        if points.len() < 2 {
            return Err(DomainError::NotEnoughCheckpoints);
        }
        let mut points = points;
        let finish = points.pop().expect("len checked above");
        let start = points.remove(0);
        Ok(Self::new(start, points, finish))
    }

    pub fn start(&self) -> GeoPoint {
        self.start
    }

    pub fn finish(&self) -> GeoPoint {
        self.finish
    }

    pub fn intermediate(&self) -> &[GeoPoint] {
        &self.intermediate
    }

    /// All points in order: start, intermediates, finish.
    pub fn all(&self) -> Vec<GeoPoint> {
        let mut points = Vec::with_capacity(self.intermediate.len() + 2);
        points.push(self.start);
        points.extend_from_slice(&self.intermediate);
        points.push(self.finish);
        points
    }

    /// Sum of straight-line segment lengths. The real engine would compute
    /// this over road geometry; this is the demo/test stand-in used by the
    /// fake engine and the runner's synthetic one.
    pub fn straight_line_distance(&self) -> f64 {
        self.all().windows(2).map(|w| w[0].distance_to(w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_route_has_no_intermediate_points() {
        let cp = Checkpoints::direct(GeoPoint::new(0.0, 0.0), GeoPoint::new(3.0, 4.0));
        assert!(cp.intermediate().is_empty());
        assert_eq!(cp.straight_line_distance(), 5.0);
    }

    #[test]
    fn all_preserves_order() {
        let mid = GeoPoint::new(1.0, 1.0);
        let cp = Checkpoints::new(GeoPoint::new(0.0, 0.0), vec![mid], GeoPoint::new(2.0, 2.0));
        assert_eq!(cp.all(), vec![GeoPoint::new(0.0, 0.0), mid, GeoPoint::new(2.0, 2.0)]);
    }

    #[test]
    fn try_from_points_rejects_fewer_than_two() {
        assert_eq!(
            Checkpoints::try_from_points(vec![GeoPoint::new(0.0, 0.0)]),
            Err(DomainError::NotEnoughCheckpoints)
        );
        assert_eq!(Checkpoints::try_from_points(vec![]), Err(DomainError::NotEnoughCheckpoints));
    }

    #[test]
    fn try_from_points_splits_start_intermediate_finish() {
        let mid = GeoPoint::new(1.0, 1.0);
        let cp = Checkpoints::try_from_points(vec![GeoPoint::new(0.0, 0.0), mid, GeoPoint::new(2.0, 2.0)])
            .expect("three points is enough");
        assert_eq!(cp.start(), GeoPoint::new(0.0, 0.0));
        assert_eq!(cp.intermediate(), &[mid]);
        assert_eq!(cp.finish(), GeoPoint::new(2.0, 2.0));
    }

    #[test]
    fn round_trips_through_json() {
        let cp = Checkpoints::new(GeoPoint::new(0.0, 0.0), vec![GeoPoint::new(1.0, 1.0)], GeoPoint::new(2.0, 2.0));
        let json = serde_json::to_string(&cp).expect("serializes");
        let back: Checkpoints = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(cp, back);
    }
}

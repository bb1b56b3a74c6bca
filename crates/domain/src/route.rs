//! The route artifact handed from the worker to the UI thread.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonically increasing route identifier, assigned by the dispatcher.
/// Unlike the other domain ids in this codebase's lineage this is not a
/// `Uuid` — the spec requires strict, observable ordering, which a random id
/// cannot provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteId(u64);

impl RouteId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque routing result, tagged with the engine that produced it and its
/// dispatcher-assigned id. The dispatcher never inspects the geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub router_name: String,
    pub distance_m: f64,
}

impl Route {
    pub fn new(id: RouteId, router_name: impl Into<String>, distance_m: f64) -> Self {
        Self {
            id,
            router_name: router_name.into(),
            distance_m,
        }
    }

    /// An empty route used when the worker must call `on_ready` without a
    /// real computation having succeeded (the exception path).
    pub fn empty(id: RouteId, router_name: impl Into<String>) -> Self {
        Self::new(id, router_name, 0.0)
    }
}

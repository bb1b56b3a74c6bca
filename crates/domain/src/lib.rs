//! Domain types for the routing dispatcher: checkpoints, geographic points,
//! routes, result codes, and the statistics record they are summarized into.
//!
//! This crate has no async runtime and no I/O — it is the vocabulary shared
//! by `navdispatch-core` and anything that drives it.

pub mod checkpoints;
pub mod error;
pub mod point;
pub mod result_code;
pub mod route;
pub mod stats;

pub use checkpoints::Checkpoints;
pub use error::DomainError;
pub use point::{Direction, GeoPoint, LatLon};
pub use result_code::ResultCode;
pub use route::{Route, RouteId};
pub use stats::StatsRecord;

//! The closed set of outcomes a route computation can end in.

use serde::{Deserialize, Serialize};

/// Outcome of a route computation, as reported by the engine (or
/// synthesized by the worker on an exception or a need-more-maps upgrade).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    NoError,
    Cancelled,
    StartPointNotFound,
    EndPointNotFound,
    IntermediatePointNotFound,
    PointsInDifferentMwm,
    RouteNotFound,
    RouteFileNotExist,
    NeedMoreMaps,
    NoCurrentPosition,
    InconsistentMwmAndRoute,
    InternalError,
    FileTooOld,
    TransitRouteNotFoundNoNetwork,
    TransitRouteNotFoundTooLongPedestrian,
    RouteNotFoundRedressRouteError,
}

impl ResultCode {
    /// Stable name used both in statistics payloads and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultCode::NoError => "NoError",
            ResultCode::Cancelled => "Cancelled",
            ResultCode::StartPointNotFound => "StartPointNotFound",
            ResultCode::EndPointNotFound => "EndPointNotFound",
            ResultCode::IntermediatePointNotFound => "IntermediatePointNotFound",
            ResultCode::PointsInDifferentMwm => "PointsInDifferentMWM",
            ResultCode::RouteNotFound => "RouteNotFound",
            ResultCode::RouteFileNotExist => "RouteFileNotExist",
            ResultCode::NeedMoreMaps => "NeedMoreMaps",
            ResultCode::NoCurrentPosition => "NoCurrentPosition",
            ResultCode::InconsistentMwmAndRoute => "InconsistentMWMandRoute",
            ResultCode::InternalError => "InternalError",
            ResultCode::FileTooOld => "FileTooOld",
            ResultCode::TransitRouteNotFoundNoNetwork => "TransitRouteNotFoundNoNetwork",
            ResultCode::TransitRouteNotFoundTooLongPedestrian => {
                "TransitRouteNotFoundTooLongPedestrian"
            }
            ResultCode::RouteNotFoundRedressRouteError => "RouteNotFoundRedressRouteError",
        }
    }

    /// `NoError`/`Cancelled` are expected outcomes and log at info; every
    /// other code is a warning worth an operator's attention.
    pub fn log_level(&self) -> tracing::Level {
        match self {
            ResultCode::NoError | ResultCode::Cancelled => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, ResultCode::NoError)
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_error_and_cancelled_log_at_info() {
        assert_eq!(ResultCode::NoError.log_level(), tracing::Level::INFO);
        assert_eq!(ResultCode::Cancelled.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn everything_else_logs_at_warn() {
        assert_eq!(ResultCode::RouteNotFound.log_level(), tracing::Level::WARN);
        assert_eq!(ResultCode::InternalError.log_level(), tracing::Level::WARN);
    }
}

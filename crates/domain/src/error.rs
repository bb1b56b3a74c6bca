//! Unified error type for the domain layer.

use thiserror::Error;

/// Errors raised constructing domain values directly (not engine failures —
/// those are `EngineError` in `navdispatch-core`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Fewer than two checkpoints were supplied.
    #[error("a route needs at least a start and a finish point")]
    NotEnoughCheckpoints,
}

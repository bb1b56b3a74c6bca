//! Top-level error type for configuration and wiring failures (not engine
//! or dispatcher runtime errors — those live in `navdispatch-core`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SharedError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
}

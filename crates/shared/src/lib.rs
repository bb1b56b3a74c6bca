//! Cross-cutting concerns shared between the dispatcher core and its
//! composition root: configuration and the top-level error type.

pub mod config;
pub mod error;

pub use config::DispatcherConfig;
pub use error::SharedError;

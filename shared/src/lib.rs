//! Shared building blocks for the scoreboard service
//!
//! Holds the pieces every part of the service agrees on: component-aware
//! logging, the shared error type and the opaque message handle that is
//! persisted between restarts.

pub mod types;
pub mod errors;
pub mod logging;

pub use types::*;
pub use errors::*;

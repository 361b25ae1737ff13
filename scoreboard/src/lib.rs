//! Scoreboard library for publishing a ranked player board to a chat channel
//!
//! Each refresh cycle fetches the player sheet, scores and ranks every
//! player, splits the board into size-bounded messages and reconciles
//! those messages with the ones already posted, preferring edits over
//! delete-and-recreate.

pub mod config;
pub mod core;
pub mod error;
pub mod scoreboard;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::ScoreboardConfig;
pub use core::{DisplayUnit, PublishedState, RawRow, ReconcileReport};
pub use error::{ScoreboardError, ScoreboardResult};
pub use scoreboard::Scoreboard;
pub use traits::{ChannelSink, HandleStore, RowSource};

// Generated mocks, for downstream tests
pub use traits::{MockChannelSink, MockHandleStore, MockRowSource};

//! Scoreboard core
//!
//! The synchronous pipeline from raw rows to display units, plus the
//! reconciler that applies the result to the channel.

pub mod format;
pub mod normalize;
pub mod partition;
pub mod ranking;
pub mod reconcile;
pub mod scoring;
pub mod state;

pub use normalize::{normalize_rows, Category, PlayerRecord, RawRow, UnlockSet};
pub use partition::{partition, DisplayField, DisplayUnit, UnitKind};
pub use ranking::{rank, RankedRecord};
pub use reconcile::{reconcile, ReconcileReport};
pub use scoring::score;
pub use state::PublishedState;

use crate::config::ScoreboardConfig;

/// Run the pure stages: normalize, score, rank and partition
pub fn build_board(rows: &[RawRow], config: &ScoreboardConfig) -> Vec<DisplayUnit> {
    let records = normalize_rows(rows, &config.columns, &config.weights);
    let ranked = rank(records);
    partition(&ranked, config)
}

//! Ranking of scored player records

use super::normalize::PlayerRecord;

/// Player record with its 1-based position on the board
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecord {
    pub rank: usize,
    pub record: PlayerRecord,
}

/// Sort descending by score and assign ranks
///
/// The sort is stable, so players with identical scores keep their input
/// order. Ranks for exact ties are only as stable as the row order the
/// data source returns.
pub fn rank(mut records: Vec<PlayerRecord>) -> Vec<RankedRecord> {
    records.sort_by(|a, b| b.score.total_cmp(&a.score));
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| RankedRecord { rank: index + 1, record })
        .collect()
}

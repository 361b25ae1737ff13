//! Weighted score calculation

use crate::config::ScoreWeights;

/// Weighted score of one player
///
/// Linear in every input: active unlock counts are multiplied by their
/// category weight and currency counts one to one.
pub fn score(
    active_count_a: usize,
    active_count_b: usize,
    active_count_c: usize,
    currency: f64,
    weights: &ScoreWeights,
) -> f64 {
    active_count_a as f64 * weights.category_a
        + active_count_b as f64 * weights.category_b
        + active_count_c as f64 * weights.category_c
        + currency
}

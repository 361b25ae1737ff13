//! Test fixtures and data for scoreboard tests
//!
//! Rows follow the production column layout: B player, C currency,
//! F/G/H the three unlock lists.

use scoreboard::RawRow;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// One sheet row in production column order
    pub fn row(name: &str, currency: &str, a: &str, b: &str, c: &str) -> RawRow {
        RawRow::new(["2024-01-01", name, currency, "", "", a, b, c])
    }

    /// Three players whose scores are 100,600 / 20,000 / 55,500
    pub fn three_players() -> Vec<RawRow> {
        vec![
            Self::row("player1", "100", "first_win:1|crypt_clear:1", "", "bronze:1"),
            Self::row("player2", "5000", "", "boss_a:1|boss_b:2|boss_c:1", ""),
            Self::row("player3", "0", "first_win:1", "boss_a:1", "silver:1"),
        ]
    }

    /// `count` players with distinct, strictly decreasing scores
    pub fn players(count: usize) -> Vec<RawRow> {
        (0..count)
            .map(|i| {
                Self::row(
                    &format!("P{:04}", i + 1),
                    &(1_000_000 - i * 7).to_string(),
                    "",
                    "",
                    "",
                )
            })
            .collect()
    }

    /// Rows that exercise every lenient parsing path
    pub fn malformed_rows() -> Vec<RawRow> {
        vec![
            Self::row("", "100", "a:1", "", ""),
            Self::row("   ", "100", "a:1", "", ""),
            Self::row("NoCurrency", "lots", "a:x|b|:1|c:1", "d:-2", "e:"),
            RawRow::new(["x", "Short"]),
            RawRow::new(Vec::<String>::new()),
            Self::row("Weird", "1e3", "||||", "k:NaN", "z:0.5"),
        ]
    }
}

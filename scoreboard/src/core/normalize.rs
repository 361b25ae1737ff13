//! Row normalization
//!
//! Turns raw sheet cells into typed player records. Malformed numbers and
//! unlock tokens never fail the pipeline; they fall back to zero or are
//! ignored.

use crate::config::{ColumnLayout, ScoreWeights};
use crate::core::scoring::score;

/// One of the three independent unlock categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::A, Category::B, Category::C];

    pub fn index(self) -> usize {
        match self {
            Category::A => 0,
            Category::B => 1,
            Category::C => 2,
        }
    }
}

/// Ordered sequence of cell strings from one sheet row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow(pub Vec<String>);

impl RawRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(cells.into_iter().map(Into::into).collect())
    }

    /// Cell at `index`, or an empty string past the end of the row
    pub fn cell(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Unlock name to recorded value, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnlockSet {
    entries: Vec<(String, f64)>,
}

impl UnlockSet {
    /// Parse a pipe separated list of `key:value` tokens
    pub fn parse(cell: &str) -> Self {
        let mut set = Self::default();
        for token in cell.split('|') {
            // Keys are taken verbatim, so `:1` and ` a:1` are unlocks of their own
            let Some((key, value)) = token.split_once(':') else {
                continue;
            };
            set.insert(key, parse_number(value));
        }
        set
    }

    /// Insert or overwrite, keeping the position of the first occurrence
    pub fn insert(&mut self, key: &str, value: f64) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of unlocks whose value is above zero
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| *v > 0.0).count()
    }

    /// Raw names of active unlocks, in order
    pub fn active_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, v)| *v > 0.0)
            .map(|(k, _)| k.as_str())
    }
}

/// Typed per-player record derived from one row
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub currency: f64,
    pub categories: [UnlockSet; 3],
    pub active_counts: [usize; 3],
    pub total_unlocks: usize,
    pub score: f64,
}

impl PlayerRecord {
    /// Normalize one row; `None` when the name cell is blank
    pub fn from_row(row: &RawRow, columns: &ColumnLayout, weights: &ScoreWeights) -> Option<Self> {
        let name = row.cell(columns.player).trim();
        if name.is_empty() {
            return None;
        }

        let currency = parse_number(row.cell(columns.currency));
        let categories = Category::ALL.map(|c| UnlockSet::parse(row.cell(columns.for_category(c))));
        let active_counts = [
            categories[0].active_count(),
            categories[1].active_count(),
            categories[2].active_count(),
        ];

        Some(Self {
            name: name.to_string(),
            currency,
            total_unlocks: active_counts.iter().sum(),
            score: score(active_counts[0], active_counts[1], active_counts[2], currency, weights),
            categories,
            active_counts,
        })
    }

    pub fn unlocks(&self, category: Category) -> &UnlockSet {
        &self.categories[category.index()]
    }

    pub fn active_count(&self, category: Category) -> usize {
        self.active_counts[category.index()]
    }
}

/// Normalize every row, dropping the ones without a player name
pub fn normalize_rows(
    rows: &[RawRow],
    columns: &ColumnLayout,
    weights: &ScoreWeights,
) -> Vec<PlayerRecord> {
    rows.iter()
        .filter_map(|row| PlayerRecord::from_row(row, columns, weights))
        .collect()
}

/// Lenient number parse: surrounding whitespace is ignored and anything
/// unparsable or non-finite becomes zero
pub fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Display form of an unlock name: underscores become spaces, then title case
pub fn format_unlock_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_is_letter = false;
    for c in raw.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

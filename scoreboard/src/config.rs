//! Scoreboard configuration
//!
//! All values are read once at process start and stay fixed for the life of
//! the process. `ScoreboardConfig::default()` carries the production values.

use std::time::Duration;

use crate::core::Category;
use crate::error::{ScoreboardError, ScoreboardResult};

/// Per-category scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub category_a: f64,
    pub category_b: f64,
    pub category_c: f64,
}

impl ScoreWeights {
    pub fn for_category(&self, category: Category) -> f64 {
        match category {
            Category::A => self.category_a,
            Category::B => self.category_b,
            Category::C => self.category_c,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            category_a: 50_000.0,
            category_b: 5_000.0,
            category_c: 500.0,
        }
    }
}

/// Zero-based cell offsets of the columns the normalizer reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub player: usize,
    pub currency: usize,
    pub category_a: usize,
    pub category_b: usize,
    pub category_c: usize,
}

impl ColumnLayout {
    pub fn for_category(&self, category: Category) -> usize {
        match category {
            Category::A => self.category_a,
            Category::B => self.category_b,
            Category::C => self.category_c,
        }
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        // B, C, F, G, H
        Self {
            player: 1,
            currency: 2,
            category_a: 5,
            category_b: 6,
            category_c: 7,
        }
    }
}

/// How one unlock category is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLabel {
    pub name: String,
    pub short: String,
    pub icon: String,
}

impl CategoryLabel {
    fn new(name: &str, short: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            short: short.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Layout limits and labels used by the display partitioner
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Maximum characters in one packed block of text
    pub char_budget: usize,
    /// Number of ranks shown in the detailed top section
    pub top_size: usize,
    /// Last rank of the condensed mid section
    pub mid_end_rank: usize,
    /// Ranks per low band after the mid section
    pub band_size: usize,
    /// Unlock names listed per category before "+N more"
    pub max_names_shown: usize,
    pub board_title: String,
    pub currency_label: String,
    pub currency_short: String,
    /// Labels for categories A, B and C in that order
    pub categories: [CategoryLabel; 3],
}

impl DisplayConfig {
    pub fn label(&self, category: Category) -> &CategoryLabel {
        &self.categories[category.index()]
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            char_budget: 950,
            top_size: 10,
            mid_end_rank: 50,
            band_size: 50,
            max_names_shown: 8,
            board_title: "Player Records".to_string(),
            currency_label: "Essence".to_string(),
            currency_short: "Ess".to_string(),
            categories: [
                CategoryLabel::new("Achievements", "Ach", "🏆"),
                CategoryLabel::new("Crypt Buffs", "Buffs", "🗝️"),
                CategoryLabel::new("Tickets", "Tix", "🎟️"),
            ],
        }
    }
}

/// Complete configuration for the scoreboard pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardConfig {
    pub weights: ScoreWeights,
    pub columns: ColumnLayout,
    pub display: DisplayConfig,
    pub refresh_interval: Duration,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            columns: ColumnLayout::default(),
            display: DisplayConfig::default(),
            refresh_interval: Duration::from_secs(300),
        }
    }
}

impl ScoreboardConfig {
    /// Smallest budget that still fits a truncation marker and a short line
    pub const MIN_CHAR_BUDGET: usize = 16;

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Check the limits the partitioner and scheduler rely on
    pub fn validate(&self) -> ScoreboardResult<()> {
        let display = &self.display;
        if display.char_budget < Self::MIN_CHAR_BUDGET {
            return Err(ScoreboardError::config(format!(
                "char_budget must be at least {}, got {}",
                Self::MIN_CHAR_BUDGET,
                display.char_budget
            )));
        }
        if display.top_size == 0 {
            return Err(ScoreboardError::config("top_size must be at least 1"));
        }
        if display.mid_end_rank < display.top_size {
            return Err(ScoreboardError::config(format!(
                "mid_end_rank ({}) must not be below top_size ({})",
                display.mid_end_rank, display.top_size
            )));
        }
        if display.band_size == 0 {
            return Err(ScoreboardError::config("band_size must be at least 1"));
        }
        if self.refresh_interval < Duration::from_secs(1) {
            return Err(ScoreboardError::config("refresh_interval must be at least one second"));
        }
        for (name, weight) in [
            ("weights.category_a", self.weights.category_a),
            ("weights.category_b", self.weights.category_b),
            ("weights.category_c", self.weights.category_c),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoreboardError::config(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }
}

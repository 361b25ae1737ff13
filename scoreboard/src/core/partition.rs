//! Display partitioning
//!
//! Splits a ranked board into the ordered sequence of display units that
//! become chat messages: one detailed unit for the top ranks, condensed
//! units for the mid section and one group of condensed units per low band.
//! Output is a pure function of the ranked input and the configuration.

use crate::config::ScoreboardConfig;
use crate::core::format::{condensed_entry, detailed_entry, rank_marker, scoring_legend, truncate};
use crate::core::ranking::RankedRecord;

/// Longest field name a unit carries
pub const FIELD_NAME_LIMIT: usize = 256;

/// Field name used for packed condensed lines
pub const RANKINGS_FIELD: &str = "Rankings";

/// Section a display unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Placeholder when there are no players at all
    Empty,
    DetailedTop,
    CondensedMid,
    CondensedLow,
}

impl UnitKind {
    /// Accent color of the section
    pub fn color(self) -> u32 {
        match self {
            UnitKind::Empty => 0xFF9800,
            UnitKind::DetailedTop => 0xFFD700,
            UnitKind::CondensedMid => 0xC0C0C0,
            UnitKind::CondensedLow => 0xCD7F32,
        }
    }
}

/// Named block of text inside a display unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
    pub name: String,
    pub value: String,
}

/// One renderable message worth of board content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUnit {
    pub kind: UnitKind,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<DisplayField>,
}

impl DisplayUnit {
    /// Flattened text of the unit, title first
    pub fn text(&self) -> String {
        let mut parts = vec![self.title.clone()];
        if let Some(description) = &self.description {
            parts.push(description.clone());
        }
        for field in &self.fields {
            parts.push(format!("{}\n{}", field.name, field.value));
        }
        parts.join("\n")
    }

    fn packed(kind: UnitKind, title: String, lines: Vec<String>) -> Self {
        Self {
            kind,
            title,
            description: None,
            fields: vec![DisplayField {
                name: RANKINGS_FIELD.to_string(),
                value: lines.join("\n"),
            }],
        }
    }
}

/// Greedily pack lines into groups whose text fits `budget` characters
///
/// Every line costs its length plus one separator. A group is closed as
/// soon as the next line would push it past the budget; lines are never
/// split, and a line longer than the budget is truncated first.
pub fn pack_lines(lines: Vec<String>, budget: usize) -> Vec<Vec<String>> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut length = 0;

    for line in lines {
        let line = truncate(&line, budget.saturating_sub(1));
        let cost = line.chars().count() + 1;
        if !current.is_empty() && length + cost > budget {
            chunks.push(std::mem::take(&mut current));
            length = 0;
        }
        current.push(line);
        length += cost;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Build the full ordered unit sequence for one cycle
pub fn partition(ranked: &[RankedRecord], config: &ScoreboardConfig) -> Vec<DisplayUnit> {
    let display = &config.display;
    let title_prefix = format!("📊 {}", display.board_title);

    if ranked.is_empty() {
        return vec![DisplayUnit {
            kind: UnitKind::Empty,
            title: title_prefix,
            description: Some("No player data available.".to_string()),
            fields: Vec::new(),
        }];
    }

    let top_end = display.top_size.min(ranked.len());
    let mid_end = display.mid_end_rank.min(ranked.len());
    let (top, rest) = ranked.split_at(top_end);
    let (mid, low) = rest.split_at(mid_end.saturating_sub(top_end));

    let mut units = vec![top_unit(top, config, &title_prefix)];

    if !mid.is_empty() {
        let header = format!(
            "{title_prefix} — Ranks {}-{}",
            display.top_size + 1,
            display.mid_end_rank
        );
        units.extend(condensed_units(mid, config, UnitKind::CondensedMid, &header));
    }

    for band in low.chunks(display.band_size.max(1)) {
        let (Some(first), Some(last)) = (band.first(), band.last()) else {
            continue;
        };
        let header = format!("{title_prefix} — Ranks {}-{}", first.rank, last.rank);
        units.extend(condensed_units(band, config, UnitKind::CondensedLow, &header));
    }

    units
}

fn top_unit(top: &[RankedRecord], config: &ScoreboardConfig, title_prefix: &str) -> DisplayUnit {
    let display = &config.display;
    let fields = top
        .iter()
        .map(|entry| DisplayField {
            name: truncate(
                &format!("{} {}", rank_marker(entry.rank), entry.record.name),
                FIELD_NAME_LIMIT,
            ),
            value: truncate(&detailed_entry(entry, display), display.char_budget),
        })
        .collect();

    DisplayUnit {
        kind: UnitKind::DetailedTop,
        title: format!("{title_prefix} — Top {}", display.top_size),
        description: Some(scoring_legend(
            display,
            &config.weights,
            config.refresh_interval.as_secs(),
        )),
        fields,
    }
}

fn condensed_units(
    entries: &[RankedRecord],
    config: &ScoreboardConfig,
    kind: UnitKind,
    header: &str,
) -> Vec<DisplayUnit> {
    let lines = entries
        .iter()
        .map(|entry| condensed_entry(entry, &config.display))
        .collect();

    pack_lines(lines, config.display.char_budget)
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            let title = if index == 0 {
                header.to_string()
            } else {
                format!("{header} (part {})", index + 1)
            };
            DisplayUnit::packed(kind, title, chunk)
        })
        .collect()
}

//! Text formatting for board entries

use crate::config::{DisplayConfig, ScoreWeights};
use crate::core::normalize::{format_unlock_name, Category, UnlockSet};
use crate::core::ranking::RankedRecord;

/// Cut `text` to at most `limit` characters, marking the cut with "..."
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Round to a whole number and group thousands with commas
pub fn format_number(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}

/// Currency amount rounded to a whole number, without grouping
pub fn format_amount(value: f64) -> String {
    format!("{value:.0}")
}

/// Medal for the podium, `N.` for everyone else
pub fn rank_marker(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("{n}."),
    }
}

/// `Label: count — a, b, c` with an overflow count past `max_show` names
pub fn describe_unlocks(label: &str, unlocks: &UnlockSet, max_show: usize) -> String {
    let names: Vec<String> = unlocks.active_names().map(format_unlock_name).collect();
    let count = names.len();
    if count == 0 {
        return format!("{label}: 0");
    }
    if count <= max_show {
        return format!("{label}: {count} — {}", names.join(", "));
    }
    format!(
        "{label}: {count} — {}, +{} more",
        names[..max_show].join(", "),
        count - max_show
    )
}

/// Multi-line block used in the detailed top section
pub fn detailed_entry(entry: &RankedRecord, display: &DisplayConfig) -> String {
    let record = &entry.record;
    let mut lines = vec![format!(
        "**Score: {}** ({} {} | {} Unlocks)",
        format_number(record.score),
        format_amount(record.currency),
        display.currency_label,
        record.total_unlocks
    )];
    for category in Category::ALL {
        let label = display.label(category);
        lines.push(format!(
            "{} {}",
            label.icon,
            describe_unlocks(&label.name, record.unlocks(category), display.max_names_shown)
        ));
    }
    lines.join("\n")
}

/// Single line used in the condensed sections
pub fn condensed_entry(entry: &RankedRecord, display: &DisplayConfig) -> String {
    let record = &entry.record;
    let counts: Vec<String> = Category::ALL
        .iter()
        .map(|&c| format!("{} {}", record.active_count(c), display.label(c).short))
        .collect();
    format!(
        "{}. **{}** — Score: {} ({} | {} {})",
        entry.rank,
        record.name,
        format_number(record.score),
        counts.join(" | "),
        format_amount(record.currency),
        display.currency_short
    )
}

/// Header explaining the scoring formula and refresh cadence
pub fn scoring_legend(
    display: &DisplayConfig,
    weights: &ScoreWeights,
    refresh_secs: u64,
) -> String {
    let terms: Vec<String> = Category::ALL
        .iter()
        .map(|&c| {
            let weight = format_number(weights.for_category(c));
            format!("{} (×{weight})", display.label(c).name)
        })
        .collect();
    let cadence = if refresh_secs >= 60 {
        format!("{} min", refresh_secs / 60)
    } else {
        format!("{refresh_secs} s")
    };
    format!(
        "Ranked by weighted score: {} + {}\nRefreshes every {cadence}",
        terms.join(" + "),
        display.currency_label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnLayout;
    use crate::core::normalize::{PlayerRecord, RawRow};

    fn ranked(rank: usize, cells: [&str; 8]) -> RankedRecord {
        let row = RawRow::new(cells);
        let record =
            PlayerRecord::from_row(&row, &ColumnLayout::default(), &ScoreWeights::default())
                .unwrap();
        RankedRecord { rank, record }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("this is too long", 10), "this is...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(100_600.0), "100,600");
        assert_eq!(format_number(1_234_567.4), "1,234,567");
        assert_eq!(format_number(-12_345.0), "-12,345");
    }

    #[test]
    fn test_currency_is_not_grouped() {
        assert_eq!(format_amount(1_234_567.4), "1234567");
        assert_eq!(format_amount(0.0), "0");

        let entry = ranked(2, ["", "Cy", "25000", "", "", "", "", ""]);
        let text = detailed_entry(&entry, &DisplayConfig::default());
        assert!(text.starts_with("**Score: 25,000** (25000 Essence | 0 Unlocks)"), "{text}");
    }

    #[test]
    fn test_rank_marker() {
        assert_eq!(rank_marker(1), "🥇");
        assert_eq!(rank_marker(3), "🥉");
        assert_eq!(rank_marker(4), "4.");
    }

    #[test]
    fn test_describe_unlocks_overflow() {
        let set = UnlockSet::parse("a:1|b:1|c:1|d:0");
        assert_eq!(describe_unlocks("Tickets", &set, 8), "Tickets: 3 — A, B, C");
        assert_eq!(describe_unlocks("Tickets", &set, 2), "Tickets: 3 — A, B, +1 more");
        assert_eq!(describe_unlocks("Tickets", &UnlockSet::default(), 8), "Tickets: 0");
    }

    #[test]
    fn test_detailed_entry() {
        let entry = ranked(1, ["", "Ann", "100", "", "", "first_win:1|crypt_run:2", "", "gold:1"]);
        let text = detailed_entry(&entry, &DisplayConfig::default());
        assert_eq!(
            text,
            "**Score: 100,600** (100 Essence | 3 Unlocks)\n\
             🏆 Achievements: 2 — First Win, Crypt Run\n\
             🗝️ Crypt Buffs: 0\n\
             🎟️ Tickets: 1 — Gold"
        );
    }

    #[test]
    fn test_condensed_entry() {
        let entry = ranked(12, ["", "Bo", "5000", "", "", "", "a:1|b:1|c:1", ""]);
        assert_eq!(
            condensed_entry(&entry, &DisplayConfig::default()),
            "12. **Bo** — Score: 20,000 (0 Ach | 3 Buffs | 0 Tix | 5000 Ess)"
        );
    }

    #[test]
    fn test_scoring_legend() {
        let legend = scoring_legend(&DisplayConfig::default(), &ScoreWeights::default(), 300);
        assert_eq!(
            legend,
            "Ranked by weighted score: Achievements (×50,000) + Crypt Buffs (×5,000) + Tickets (×500) + Essence\n\
             Refreshes every 5 min"
        );
    }
}

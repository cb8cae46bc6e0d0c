//! Formatted category breakdowns.

use serde::{Deserialize, Serialize};

use hearth_core::{CategorySummary, UNCLASSIFIED};

/// One line of a category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryLine {
    pub category: String,
    pub total_cents: i64,
    pub count: usize,
}

/// Breakdown lines sorted by descending total; ties break alphabetically
/// and the unclassified bucket always sorts last.
pub fn category_breakdown(summary: &CategorySummary) -> Vec<CategoryLine> {
    let mut lines: Vec<CategoryLine> = summary
        .by_category
        .iter()
        .map(|(category, totals)| CategoryLine {
            category: category.clone(),
            total_cents: totals.total_cents,
            count: totals.count,
        })
        .collect();

    lines.sort_by(|a, b| {
        let a_unclassified = a.category == UNCLASSIFIED;
        let b_unclassified = b.category == UNCLASSIFIED;
        a_unclassified
            .cmp(&b_unclassified)
            .then(b.total_cents.cmp(&a.total_cents))
            .then(a.category.cmp(&b.category))
    });

    lines
}

/// Format cents as a plain decimal amount: 1234 → "12.34".
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

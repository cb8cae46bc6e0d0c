//! Monthly statement views grouped by billing month.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hearth_core::EnrichedPurchase;

/// One month's statement: real charges plus projected installments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStatement {
    /// First day of the statement month
    pub month: NaiveDate,
    pub entries: Vec<EnrichedPurchase>,
    /// Total of real entries, in cents
    pub charged_cents: i64,
    /// Total of projection entries, in cents, kept apart from charges
    pub projected_cents: i64,
    pub deferred_count: usize,
}

fn statement_from(month: NaiveDate, entries: Vec<EnrichedPurchase>) -> MonthlyStatement {
    let charged_cents = entries
        .iter()
        .filter(|e| !e.is_projection)
        .map(|e| e.record.amount_cents)
        .sum();
    let projected_cents = entries
        .iter()
        .filter(|e| e.is_projection)
        .map(|e| e.record.amount_cents)
        .sum();
    let deferred_count = entries.iter().filter(|e| e.is_deferred).count();

    MonthlyStatement {
        month,
        entries,
        charged_cents,
        projected_cents,
        deferred_count,
    }
}

/// Group enriched purchases into per-month statements, months ascending.
/// Entry order within a month follows the enricher's output order.
pub fn build_statements(entries: Vec<EnrichedPurchase>) -> Vec<MonthlyStatement> {
    let mut by_month: BTreeMap<NaiveDate, Vec<EnrichedPurchase>> = BTreeMap::new();
    for entry in entries {
        by_month.entry(entry.billing_month).or_default().push(entry);
    }

    by_month
        .into_iter()
        .map(|(month, entries)| statement_from(month, entries))
        .collect()
}

/// The statement for a single month; empty when nothing lands there.
pub fn statement_for_month(entries: &[EnrichedPurchase], month: NaiveDate) -> MonthlyStatement {
    let selected: Vec<EnrichedPurchase> = entries
        .iter()
        .filter(|e| e.billing_month == month)
        .cloned()
        .collect();
    statement_from(month, selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hearth_core::PurchaseRecord;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn entry(id: &str, month: NaiveDate, amount_cents: i64, is_projection: bool) -> EnrichedPurchase {
        EnrichedPurchase {
            record: PurchaseRecord::new(
                id,
                "item",
                amount_cents,
                d(2026, 3, 4),
                "house-1",
                "ana",
                Utc.with_ymd_and_hms(2026, 3, 4, 9, 0, 0).unwrap(),
            ),
            billing_month: month,
            is_projection,
            is_deferred: false,
            deferred_message: None,
        }
    }

    #[test]
    fn test_groups_by_month_ascending() {
        let entries = vec![
            entry("p-2", d(2026, 4, 1), 500, false),
            entry("p-1", d(2026, 3, 1), 1_000, false),
            entry("p-1#proj2", d(2026, 4, 1), 1_000, true),
        ];

        let statements = build_statements(entries);
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].month, d(2026, 3, 1));
        assert_eq!(statements[1].month, d(2026, 4, 1));
        assert_eq!(statements[1].entries.len(), 2);
    }

    #[test]
    fn test_charged_and_projected_totals_stay_apart() {
        let entries = vec![
            entry("p-1", d(2026, 3, 1), 1_000, false),
            entry("p-2#proj2", d(2026, 3, 1), 700, true),
        ];

        let statements = build_statements(entries);
        assert_eq!(statements[0].charged_cents, 1_000);
        assert_eq!(statements[0].projected_cents, 700);
    }

    #[test]
    fn test_preserves_entry_order_within_month() {
        let entries = vec![
            entry("p-1", d(2026, 3, 1), 100, false),
            entry("p-1#proj2", d(2026, 3, 1), 100, true),
            entry("p-2", d(2026, 3, 1), 200, false),
        ];

        let statements = build_statements(entries);
        let ids: Vec<_> = statements[0]
            .entries
            .iter()
            .map(|e| e.record.id.as_str())
            .collect();
        assert_eq!(ids, ["p-1", "p-1#proj2", "p-2"]);
    }

    #[test]
    fn test_statement_for_month_empty() {
        let entries = vec![entry("p-1", d(2026, 3, 1), 100, false)];
        let statement = statement_for_month(&entries, d(2026, 7, 1));
        assert!(statement.entries.is_empty());
        assert_eq!(statement.charged_cents, 0);
        assert_eq!(statement.projected_cents, 0);
    }

    #[test]
    fn test_counts_deferred_entries() {
        let mut deferred = entry("p-1", d(2026, 4, 1), 100, false);
        deferred.is_deferred = true;
        deferred.deferred_message = Some("moved".to_string());

        let statements = build_statements(vec![deferred, entry("p-2", d(2026, 4, 1), 50, false)]);
        assert_eq!(statements[0].deferred_count, 1);
    }
}

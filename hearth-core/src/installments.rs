//! Installment markers and projection of not-yet-due installments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::add_months;
use crate::purchase::{EnrichedPurchase, PurchaseRecord};

/// Parsed "current/total" installment marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallmentMarker {
    pub current: u32,
    pub total: u32,
}

impl InstallmentMarker {
    /// Parse a strict `<current>/<total>` marker: ASCII digits on both
    /// sides of a single slash, both positive.
    ///
    /// Anything else (including overflowing numbers) is simply not an
    /// installment marker, never an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let (current, total) = raw.split_once('/')?;
        if current.is_empty() || total.is_empty() {
            return None;
        }
        if !current.bytes().all(|b| b.is_ascii_digit()) || !total.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let current: u32 = current.parse().ok()?;
        let total: u32 = total.parse().ok()?;
        if current == 0 || total == 0 {
            return None;
        }

        Some(Self { current, total })
    }

    /// Number of installments still to come. Zero for the final
    /// installment and for markers past their total.
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.current)
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.current, self.total)
    }
}

/// Synthetic id for the `installment`-th occurrence of `parent_id`.
///
/// `#` never appears in storage-assigned ids, so projected ids cannot
/// collide with real rows and are recognizable at a glance.
pub fn projection_id(parent_id: &str, installment: u32) -> String {
    format!("{parent_id}#proj{installment}")
}

/// Project the remaining installments of `record` as synthetic statement
/// entries, one per month after `base_billing_month`.
///
/// Projections are anchored to the *billing* month of the known
/// occurrence, not its purchase date: installment `current + n` lands
/// exactly `n` calendar months after the base, so a changed closing day
/// moves the anchor but never the spacing. Deferral is a property of the
/// real occurrence only and is never derived for projections.
///
/// Empty when the marker is absent, malformed, or already final.
pub fn project_installments(
    record: &PurchaseRecord,
    base_billing_month: NaiveDate,
) -> Vec<EnrichedPurchase> {
    let marker = match record
        .installments
        .as_deref()
        .and_then(InstallmentMarker::parse)
    {
        Some(m) if m.remaining() > 0 => m,
        _ => return Vec::new(),
    };

    (marker.current + 1..=marker.total)
        .map(|installment| {
            let next = InstallmentMarker {
                current: installment,
                total: marker.total,
            };
            let mut projected = record.clone();
            projected.id = projection_id(&record.id, installment);
            projected.installments = Some(next.label());

            EnrichedPurchase {
                record: projected,
                billing_month: add_months(base_billing_month, installment - marker.current),
                is_projection: true,
                is_deferred: false,
                deferred_message: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn purchase(marker: Option<&str>) -> PurchaseRecord {
        let mut p = PurchaseRecord::new(
            "p-42",
            "Washing machine",
            120_000,
            d(2026, 3, 9),
            "house-1",
            "ana",
            Utc.with_ymd_and_hms(2026, 3, 9, 14, 0, 0).unwrap(),
        );
        if let Some(m) = marker {
            p = p.with_installments(m);
        }
        p
    }

    #[test]
    fn test_parse_valid_markers() {
        assert_eq!(
            InstallmentMarker::parse("2/6"),
            Some(InstallmentMarker { current: 2, total: 6 })
        );
        assert_eq!(
            InstallmentMarker::parse("10/12"),
            Some(InstallmentMarker { current: 10, total: 12 })
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in [
            "abc", "1/", "/6", "1//6", "1/6/2", " 1/6", "1/6 ", "-1/6", "+1/6", "0/6", "6/0",
            "1.5/6", "",
        ] {
            assert_eq!(InstallmentMarker::parse(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(InstallmentMarker::parse("99999999999/6"), None);
    }

    #[test]
    fn test_projects_each_remaining_installment() {
        let p = purchase(Some("2/6"));
        let out = project_installments(&p, d(2026, 3, 1));

        assert_eq!(out.len(), 4);
        let labels: Vec<_> = out
            .iter()
            .map(|e| e.record.installments.clone().unwrap())
            .collect();
        assert_eq!(labels, ["3/6", "4/6", "5/6", "6/6"]);
        let months: Vec<_> = out.iter().map(|e| e.billing_month).collect();
        assert_eq!(
            months,
            [d(2026, 4, 1), d(2026, 5, 1), d(2026, 6, 1), d(2026, 7, 1)]
        );
        assert!(out.iter().all(|e| e.is_projection));
        assert!(out.iter().all(|e| !e.is_deferred));
        assert!(out.iter().all(|e| e.deferred_message.is_none()));
    }

    #[test]
    fn test_projection_ids_are_deterministic() {
        let p = purchase(Some("1/3"));
        let first = project_installments(&p, d(2026, 3, 1));
        let second = project_installments(&p, d(2026, 3, 1));
        assert_eq!(first, second);
        assert_eq!(first[0].record.id, "p-42#proj2");
        assert_eq!(first[1].record.id, "p-42#proj3");
    }

    #[test]
    fn test_anchored_to_billing_month_not_purchase_date() {
        // Purchase happened March 9 but was billed to April; projections
        // follow April, not March.
        let p = purchase(Some("1/3"));
        let out = project_installments(&p, d(2026, 4, 1));
        assert_eq!(out[0].billing_month, d(2026, 5, 1));
        assert_eq!(out[1].billing_month, d(2026, 6, 1));
    }

    #[test]
    fn test_final_and_invalid_markers_project_nothing() {
        for marker in [Some("6/6"), Some("7/6"), Some("0/6"), Some("abc"), None] {
            let p = purchase(marker);
            assert!(
                project_installments(&p, d(2026, 3, 1)).is_empty(),
                "{marker:?} should not project"
            );
        }
    }

    #[test]
    fn test_copies_source_fields() {
        let p = purchase(Some("1/2"))
            .with_category("appliances")
            .with_card("card-9");
        let out = project_installments(&p, d(2026, 3, 1));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record.description, "Washing machine");
        assert_eq!(out[0].record.amount_cents, 120_000);
        assert_eq!(out[0].record.category.as_deref(), Some("appliances"));
        assert_eq!(out[0].record.card_id.as_deref(), Some("card-9"));
        assert_eq!(out[0].record.house_id, "house-1");
    }
}

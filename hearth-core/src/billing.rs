//! Statement cycle attribution: which monthly statement a purchase lands on.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Outcome of attributing a purchase date to a statement month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingCycle {
    /// First day of the statement month
    pub billing_month: NaiveDate,
    /// True when the purchase fell after the closing day
    pub is_deferred: bool,
}

/// First day of `date`'s month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Exact month-field increment with the day pinned to 1.
///
/// Billing months are always first-of-month, so there is no day-of-month
/// overflow to clamp and no drift from unequal month lengths.
pub fn add_months(month: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = i64::from(month.year()) * 12 + i64::from(month.month0()) + i64::from(months);
    let year = zero_based.div_euclid(12);
    let month0 = zero_based.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year as i32, month0 + 1, 1).unwrap_or(month)
}

/// Attribute a purchase to its statement month.
///
/// Standard credit-statement semantics: a purchase made after the monthly
/// cut-off appears on the *next* statement, not the current one. December
/// purchases past the cut-off roll into January of the following year.
///
/// `closing_day` must already be resolved to a value in `[1, 28]`
/// (see [`crate::card::effective_closing_day`]).
pub fn resolve_billing_cycle(purchase_date: NaiveDate, closing_day: u32) -> BillingCycle {
    if purchase_date.day() > closing_day {
        BillingCycle {
            billing_month: add_months(month_start(purchase_date), 1),
            is_deferred: true,
        }
    } else {
        BillingCycle {
            billing_month: month_start(purchase_date),
            is_deferred: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_on_closing_day_stays_in_month() {
        let cycle = resolve_billing_cycle(d(2026, 3, 20), 20);
        assert_eq!(cycle.billing_month, d(2026, 3, 1));
        assert!(!cycle.is_deferred);
    }

    #[test]
    fn test_after_closing_day_defers_to_next_month() {
        let cycle = resolve_billing_cycle(d(2026, 3, 21), 20);
        assert_eq!(cycle.billing_month, d(2026, 4, 1));
        assert!(cycle.is_deferred);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let cycle = resolve_billing_cycle(d(2025, 12, 25), 20);
        assert_eq!(cycle.billing_month, d(2026, 1, 1));
        assert!(cycle.is_deferred);
    }

    #[test]
    fn test_first_of_month_never_defers() {
        let cycle = resolve_billing_cycle(d(2026, 7, 1), 1);
        assert_eq!(cycle.billing_month, d(2026, 7, 1));
        assert!(!cycle.is_deferred);
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(d(2026, 3, 17)), d(2026, 3, 1));
        assert_eq!(month_start(d(2026, 3, 1)), d(2026, 3, 1));
    }

    #[test]
    fn test_add_months_identity() {
        assert_eq!(add_months(d(2026, 3, 1), 0), d(2026, 3, 1));
    }

    #[test]
    fn test_add_months_rolls_year() {
        assert_eq!(add_months(d(2025, 11, 1), 3), d(2026, 2, 1));
        assert_eq!(add_months(d(2025, 12, 1), 1), d(2026, 1, 1));
    }

    #[test]
    fn test_add_months_pins_day_to_one() {
        // A January 31 anchor must not clamp into "Feb 28"-style drift.
        assert_eq!(add_months(d(2026, 1, 31), 1), d(2026, 2, 1));
        assert_eq!(add_months(d(2026, 1, 31), 13), d(2027, 2, 1));
    }
}

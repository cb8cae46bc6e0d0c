//! Category totals over raw or enriched purchase collections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::purchase::{EnrichedPurchase, PurchaseRecord};

/// Bucket label for records with no usable category.
pub const UNCLASSIFIED: &str = "unclassified";

/// Anything with an amount and an optional category label.
///
/// Both raw records and enriched statement entries implement this, so the
/// same reducer serves stored and projected views.
pub trait Categorized {
    fn amount_cents(&self) -> i64;
    fn category(&self) -> Option<&str>;
}

impl Categorized for PurchaseRecord {
    fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Categorized for EnrichedPurchase {
    fn amount_cents(&self) -> i64 {
        self.record.amount_cents
    }

    fn category(&self) -> Option<&str> {
        self.record.category.as_deref()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTotals {
    pub total_cents: i64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub total_cents: i64,
    pub count: usize,
    pub by_category: HashMap<String, CategoryTotals>,
}

/// Fold records into per-category totals plus a grand total.
///
/// Blank or missing categories land in the [`UNCLASSIFIED`] bucket.
/// Integer cents keep the fold exact and order-independent.
pub fn summarize_by_category<'a, T, I>(records: I) -> CategorySummary
where
    T: Categorized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut summary = CategorySummary::default();

    for record in records {
        let label = match record.category().map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => c.to_string(),
            None => UNCLASSIFIED.to_string(),
        };

        let bucket = summary.by_category.entry(label).or_default();
        bucket.total_cents += record.amount_cents();
        bucket.count += 1;

        summary.total_cents += record.amount_cents();
        summary.count += 1;
    }

    summary
}

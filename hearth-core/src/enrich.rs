//! Statement enrichment: billing attribution plus installment projections.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::billing::{BillingCycle, resolve_billing_cycle};
use crate::card::{CardBillingPolicy, effective_closing_day};
use crate::installments::project_installments;
use crate::purchase::{EnrichedPurchase, PurchaseRecord};

fn deferred_message(closing_day: u32, billing_month: NaiveDate) -> String {
    format!(
        "Purchased after the day-{closing_day} statement close; billed to {}.",
        billing_month.format("%B %Y")
    )
}

/// Enrich raw purchases into an ordered statement-entry collection.
///
/// Each record yields its real entry immediately followed by its
/// projections; relative order across source records is preserved. A
/// billing month persisted by storage is authoritative and is never
/// re-derived, and such entries are never flagged deferred. No single
/// record can fail the pass: malformed markers degrade to "no
/// projections", unknown or invalid card policies degrade to the default
/// closing day.
pub fn enrich_purchases(
    records: &[PurchaseRecord],
    policies: &HashMap<String, CardBillingPolicy>,
) -> Vec<EnrichedPurchase> {
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        let policy = record.card_id.as_deref().and_then(|id| policies.get(id));
        let closing_day = effective_closing_day(policy);

        let cycle = match record.stored_billing_month {
            Some(month) => BillingCycle {
                billing_month: month,
                is_deferred: false,
            },
            None => resolve_billing_cycle(record.purchase_date, closing_day),
        };

        out.push(EnrichedPurchase {
            record: record.clone(),
            billing_month: cycle.billing_month,
            is_projection: false,
            is_deferred: cycle.is_deferred,
            deferred_message: cycle
                .is_deferred
                .then(|| deferred_message(closing_day, cycle.billing_month)),
        });

        // Projections anchor on the billing month resolved above, whether
        // it came from storage or from the cycle rule.
        out.extend(project_installments(record, cycle.billing_month));
    }

    out
}

//! hearth-core: data model and the billing-cycle / installment engine.
//!
//! Everything here is a pure, synchronous function of its inputs: no I/O,
//! no clock reads, no shared state. Callers fetch purchases and card
//! policies however they like, enrich once both are in hand, and feed the
//! result to the aggregator or a report layer.

pub mod aggregate;
pub mod billing;
pub mod card;
pub mod enrich;
pub mod installments;
pub mod purchase;

pub use aggregate::{
    Categorized, CategorySummary, CategoryTotals, UNCLASSIFIED, summarize_by_category,
};
pub use billing::{BillingCycle, add_months, month_start, resolve_billing_cycle};
pub use card::{CardBillingPolicy, DEFAULT_CLOSING_DAY, effective_closing_day};
pub use enrich::enrich_purchases;
pub use installments::{InstallmentMarker, project_installments, projection_id};
pub use purchase::{EnrichedPurchase, PurchaseRecord};

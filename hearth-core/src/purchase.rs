//! Purchase records and their enriched statement view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One charge as stored by the tracker, scoped to a house.
///
/// Read-only input to the engine; storage owns these rows. Amounts are
/// minor units (cents) so summation stays exact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseRecord {
    /// Storage-assigned unique id
    pub id: String,
    /// Human-readable description
    pub description: String,
    /// Positive amount in cents
    pub amount_cents: i64,
    /// Calendar date the charge occurred
    pub purchase_date: NaiveDate,
    /// Optional category label; blank folds into "unclassified"
    pub category: Option<String>,
    /// Optional "current/total" installment marker
    pub installments: Option<String>,
    /// Card the purchase was made on, when known
    pub card_id: Option<String>,
    /// Billing month already assigned by storage (first of month).
    /// Authoritative when present; the engine never re-derives it.
    pub stored_billing_month: Option<NaiveDate>,
    /// Owning house
    pub house_id: String,
    /// Member who recorded the purchase
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseRecord {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount_cents: i64,
        purchase_date: NaiveDate,
        house_id: impl Into<String>,
        created_by: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount_cents,
            purchase_date,
            category: None,
            installments: None,
            card_id: None,
            stored_billing_month: None,
            house_id: house_id.into(),
            created_by: created_by.into(),
            created_at,
            updated_at: created_at,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_installments(mut self, marker: impl Into<String>) -> Self {
        self.installments = Some(marker.into());
        self
    }

    pub fn with_card(mut self, card_id: impl Into<String>) -> Self {
        self.card_id = Some(card_id.into());
        self
    }

    pub fn with_stored_billing_month(mut self, month: NaiveDate) -> Self {
        self.stored_billing_month = Some(month);
        self
    }
}

/// A purchase as it appears on a statement: the stored record plus billing
/// attribution, or a synthetic projection of a not-yet-due installment.
///
/// Ephemeral: recomputed on every enrichment pass, never written back.
/// Projections carry synthetic ids that do not resolve in storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedPurchase {
    #[serde(flatten)]
    pub record: PurchaseRecord,
    /// First day of the statement month this occurrence lands on
    pub billing_month: NaiveDate,
    /// True for synthetic future installments
    pub is_projection: bool,
    /// True when the real purchase fell after its card's closing day
    pub is_deferred: bool,
    /// User-facing note, present iff `is_deferred`
    pub deferred_message: Option<String>,
}

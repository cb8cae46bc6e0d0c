//! hearth-ingest: CSV export ingestion for purchases and cards.
//!
//! Boundary validation lives here: non-numeric amounts and non-parseable
//! dates are collaborator-layer errors, reported with row context before
//! anything reaches the engine.

pub mod amount;
pub mod cards;
pub mod purchases;

pub use amount::parse_amount_cents;
pub use cards::{parse_cards_csv, parse_cards_reader};
pub use purchases::{parse_purchases_csv, parse_purchases_reader};

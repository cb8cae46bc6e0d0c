//! hearth-report: statement and summary views over enriched purchases.
//!
//! Consumes engine output; adds no billing semantics of its own.
//! Projection entries are previews: they are grouped and totalled
//! separately and must never be written back anywhere.

pub mod breakdown;
pub mod statement;

pub use breakdown::{CategoryLine, category_breakdown, format_cents};
pub use statement::{MonthlyStatement, build_statements, statement_for_month};

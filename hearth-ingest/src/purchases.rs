//! Parse purchase-export CSVs into purchase records.
//!
//! Expected header:
//! id,description,amount,date,category,installments,card_id,billing_month,house_id,created_by,created_at,updated_at
//!
//! Blank optional columns become `None`. Amounts are decimal strings
//! converted to cents; dates are `YYYY-MM-DD`; provenance timestamps are
//! RFC 3339.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};

use hearth_core::PurchaseRecord;

use crate::amount::parse_amount_cents;

const HEADER: [&str; 12] = [
    "id",
    "description",
    "amount",
    "date",
    "category",
    "installments",
    "card_id",
    "billing_month",
    "house_id",
    "created_by",
    "created_at",
    "updated_at",
];

fn field<'r>(record: &'r csv::StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("").trim()
}

fn optional(record: &csv::StringRecord, idx: usize) -> Option<String> {
    let value = field(record, idx);
    (!value.is_empty()).then(|| value.to_string())
}

fn required(record: &csv::StringRecord, idx: usize, line: usize) -> Result<String> {
    let value = field(record, idx);
    if value.is_empty() {
        bail!("line {line}: missing required column '{}'", HEADER[idx]);
    }
    Ok(value.to_string())
}

fn parse_date(raw: &str, column: &str, line: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("line {line}: invalid {column} '{raw}'"))
}

fn parse_timestamp(raw: &str, column: &str, line: usize) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("line {line}: invalid {column} '{raw}'"))?;
    Ok(parsed.with_timezone(&Utc))
}

/// Parse a purchase export from any reader. Blank rows are skipped; any
/// malformed amount, date, or timestamp fails the whole parse with its
/// line number.
pub fn parse_purchases_reader(reader: impl Read) -> Result<Vec<PurchaseRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().context("reading purchase export header")?;
    let headers: Vec<&str> = headers.iter().map(str::trim).collect();
    if headers != HEADER {
        bail!("unexpected purchase export header: {}", headers.join(","));
    }

    let mut purchases = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2; // header is line 1
        let record = result.with_context(|| format!("line {line}: reading row"))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let raw_amount = required(&record, 2, line)?;
        let amount_cents = parse_amount_cents(&raw_amount)
            .with_context(|| format!("line {line}: invalid amount '{raw_amount}'"))?;
        if amount_cents <= 0 {
            bail!("line {line}: amount must be positive, got '{raw_amount}'");
        }

        let purchase_date = parse_date(&required(&record, 3, line)?, "date", line)?;
        let stored_billing_month = match optional(&record, 7) {
            Some(raw) => Some(parse_date(&raw, "billing_month", line)?),
            None => None,
        };

        let mut purchase = PurchaseRecord::new(
            required(&record, 0, line)?,
            required(&record, 1, line)?,
            amount_cents,
            purchase_date,
            required(&record, 8, line)?,
            required(&record, 9, line)?,
            parse_timestamp(&required(&record, 10, line)?, "created_at", line)?,
        );
        purchase.updated_at = parse_timestamp(&required(&record, 11, line)?, "updated_at", line)?;
        purchase.category = optional(&record, 4);
        purchase.installments = optional(&record, 5);
        purchase.card_id = optional(&record, 6);
        purchase.stored_billing_month = stored_billing_month;

        purchases.push(purchase);
    }

    Ok(purchases)
}

/// Parse a purchase export file.
pub fn parse_purchases_csv(path: impl AsRef<Path>) -> Result<Vec<PurchaseRecord>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_purchases_reader(file)
        .with_context(|| format!("parsing {}", path.as_ref().display()))
}

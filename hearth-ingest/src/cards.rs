//! Parse card-export CSVs into a card-id → billing-policy lookup.
//!
//! Expected header: id,closing_day
//!
//! Closing days are carried as entered; blank or non-numeric values parse
//! to "unset" and resolve to the engine default at use. A card row is
//! never rejected for a bad closing day.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use hearth_core::CardBillingPolicy;

/// Parse a card export from any reader. Later rows win on duplicate ids.
pub fn parse_cards_reader(reader: impl Read) -> Result<HashMap<String, CardBillingPolicy>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().context("reading card export header")?;
    let headers: Vec<&str> = headers.iter().map(str::trim).collect();
    if headers != ["id", "closing_day"] {
        bail!("unexpected card export header: {}", headers.join(","));
    }

    let mut policies = HashMap::new();
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let record = result.with_context(|| format!("line {line}: reading row"))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let id = record.get(0).unwrap_or("").trim();
        if id.is_empty() {
            bail!("line {line}: missing card id");
        }

        let closing_day = record
            .get(1)
            .map(str::trim)
            .and_then(|raw| raw.parse::<i64>().ok());

        let policy = match closing_day {
            Some(day) => CardBillingPolicy::new(day),
            None => CardBillingPolicy::default(),
        };
        policies.insert(id.to_string(), policy);
    }

    Ok(policies)
}

/// Parse a card export file.
pub fn parse_cards_csv(path: impl AsRef<Path>) -> Result<HashMap<String, CardBillingPolicy>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_cards_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

//! Strict decimal-amount validation and conversion to minor units.

use regex::Regex;

/// Parse a plain decimal amount ("12", "12.3", "12.34") into cents.
///
/// Returns `None` for anything else: currency symbols, thousands
/// separators, more than two fraction digits, or overflow. Sign is
/// accepted so callers can decide their own positivity rule.
pub fn parse_amount_cents(raw: &str) -> Option<i64> {
    let re = Regex::new(r"^(?P<sign>-)?(?P<whole>\d+)(?:\.(?P<frac>\d{1,2}))?$").ok()?;
    let caps = re.captures(raw.trim())?;

    let whole: i64 = caps["whole"].parse().ok()?;
    let frac: i64 = match caps.name("frac") {
        Some(m) => {
            let parsed: i64 = m.as_str().parse().ok()?;
            if m.as_str().len() == 1 { parsed * 10 } else { parsed }
        }
        None => 0,
    };

    let cents = whole.checked_mul(100)?.checked_add(frac)?;
    Some(if caps.name("sign").is_some() { -cents } else { cents })
}

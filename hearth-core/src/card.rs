//! Card billing policy: statement closing-day semantics.

use serde::{Deserialize, Serialize};

/// Closing day used when a card has none configured or the configured
/// value is out of range.
pub const DEFAULT_CLOSING_DAY: u32 = 20;

/// Per-card statement policy.
///
/// The closing day is carried exactly as the user entered it; values
/// outside `[1, 28]` degrade to [`DEFAULT_CLOSING_DAY`] at use instead of
/// being rejected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardBillingPolicy {
    pub closing_day: Option<i64>,
}

impl CardBillingPolicy {
    pub fn new(closing_day: i64) -> Self {
        Self {
            closing_day: Some(closing_day),
        }
    }

    /// Closing day actually used for statement attribution.
    pub fn effective_closing_day(&self) -> u32 {
        match self.closing_day {
            Some(day) if (1..=28).contains(&day) => day as u32,
            _ => DEFAULT_CLOSING_DAY,
        }
    }
}

/// Closing day for an optional policy lookup result.
pub fn effective_closing_day(policy: Option<&CardBillingPolicy>) -> u32 {
    policy.map_or(DEFAULT_CLOSING_DAY, CardBillingPolicy::effective_closing_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_closing_day_passes_through() {
        assert_eq!(CardBillingPolicy::new(1).effective_closing_day(), 1);
        assert_eq!(CardBillingPolicy::new(10).effective_closing_day(), 10);
        assert_eq!(CardBillingPolicy::new(28).effective_closing_day(), 28);
    }

    #[test]
    fn test_out_of_range_falls_back_to_default() {
        assert_eq!(CardBillingPolicy::new(0).effective_closing_day(), 20);
        assert_eq!(CardBillingPolicy::new(29).effective_closing_day(), 20);
        assert_eq!(CardBillingPolicy::new(-5).effective_closing_day(), 20);
        assert_eq!(CardBillingPolicy::default().effective_closing_day(), 20);
    }

    #[test]
    fn test_missing_policy_uses_default() {
        assert_eq!(effective_closing_day(None), DEFAULT_CLOSING_DAY);
        let p = CardBillingPolicy::new(5);
        assert_eq!(effective_closing_day(Some(&p)), 5);
    }
}

//! Exchange rate lookup abstractions

use crate::core::currency::CurrencyCode;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Rates quoted against a single base currency, keyed by target code.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: CurrencyCode,
    pub rates: HashMap<String, f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RateTable {
    pub fn new(base: CurrencyCode, rates: HashMap<String, f64>) -> Self {
        RateTable {
            base,
            rates,
            updated_at: None,
        }
    }

    /// Returns the rate for `target` if it is usable for a conversion.
    pub fn rate_for(&self, target: &CurrencyCode) -> Option<f64> {
        self.rates
            .get(target.as_str())
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, f64)]) -> RateTable {
        let rates = entries.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        RateTable::new("USD".parse().unwrap(), rates)
    }

    #[test]
    fn test_rate_for_present_target() {
        let t = table(&[("EUR", 0.92), ("INR", 83.1)]);
        assert_eq!(t.rate_for(&"EUR".parse().unwrap()), Some(0.92));
    }

    #[test]
    fn test_rate_for_missing_or_unusable_target() {
        let t = table(&[("EUR", 0.0), ("GBP", -1.0), ("JPY", f64::NAN)]);
        assert_eq!(t.rate_for(&"EUR".parse().unwrap()), None);
        assert_eq!(t.rate_for(&"GBP".parse().unwrap()), None);
        assert_eq!(t.rate_for(&"JPY".parse().unwrap()), None);
        assert_eq!(t.rate_for(&"INR".parse().unwrap()), None);
    }
}

//! Catalog of supported currencies

use anyhow::anyhow;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

const fn currency(code: &'static str, name: &'static str) -> Currency {
    Currency { code, name }
}

/// Every currency the converter offers, in display order.
pub static CATALOG: [Currency; 40] = [
    currency("USD", "USA Dollar"),
    currency("AED", "United Arab Emirates Dirham"),
    currency("AFN", "Afghan Afghani"),
    currency("ALL", "Albanian Lek"),
    currency("AMD", "Armenian Dram"),
    currency("ANG", "Netherlands Antillean Gulden"),
    currency("AOA", "Angolan Kwanza"),
    currency("ARS", "Argentine Peso"),
    currency("AUD", "Australian Dollar"),
    currency("AZN", "Azerbaijani Manat"),
    currency("BDT", "Bangladeshi Taka"),
    currency("BHD", "Bahraini Dinar"),
    currency("CAD", "Canadian Dollar"),
    currency("CHF", "Swiss Franc"),
    currency("CNY", "Chinese Yuan"),
    currency("DKK", "Danish Krone"),
    currency("EGP", "Egyptian Pound"),
    currency("ETB", "Ethiopian Birr"),
    currency("EUR", "Euro"),
    currency("GBP", "British Pound Sterling"),
    currency("HKD", "Hong Kong Dollar"),
    currency("INR", "Indian Rupee"),
    currency("JPY", "Japanese Yen"),
    currency("KES", "Kenyan Shilling"),
    currency("KRW", "South Korean Won"),
    currency("MXN", "Mexican Peso"),
    currency("MYR", "Malaysian Ringgit"),
    currency("NGN", "Nigerian Naira"),
    currency("NOK", "Norwegian Krone"),
    currency("NZD", "New Zealand Dollar"),
    currency("PKR", "Pakistani Rupee"),
    currency("QAR", "Qatari Rial"),
    currency("RUB", "Russian Ruble"),
    currency("SAR", "Saudi Riyal"),
    currency("SEK", "Swedish Krona"),
    currency("SGD", "Singapore Dollar"),
    currency("THB", "Thai Baht"),
    currency("TRY", "Turkish Lira"),
    currency("UAH", "Ukrainian Hryvnia"),
    currency("ZAR", "South African Rand"),
];

pub const DEFAULT_CURRENCY: &str = "USD";

/// Finds a catalog entry by its exact (upper case) code.
pub fn lookup(code: &str) -> Option<&'static Currency> {
    CATALOG.iter().find(|c| c.code == code)
}

/// A three-letter code known to be present in [`CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyCode(&'static Currency);

impl CurrencyCode {
    pub fn as_str(&self) -> &'static str {
        self.0.code
    }

    pub fn currency(&self) -> &'static Currency {
        self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        CurrencyCode(&CATALOG[0])
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.code)
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        lookup(&code)
            .map(CurrencyCode)
            .ok_or_else(|| anyhow!("Unsupported currency code: {}", s))
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.code)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_codes_are_unique_and_well_formed() {
        let codes: HashSet<_> = CATALOG.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), CATALOG.len());
        for c in CATALOG.iter() {
            assert_eq!(c.code.len(), 3);
            assert!(c.code.chars().all(|ch| ch.is_ascii_uppercase()));
            assert!(!c.name.is_empty());
        }
        assert_eq!(CATALOG[0].code, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let code: CurrencyCode = " eur ".parse().unwrap();
        assert_eq!(code.as_str(), "EUR");
        assert_eq!(code.currency().name, "Euro");
        assert_eq!(code.currency().to_string(), "Euro (EUR)");
    }

    #[test]
    fn test_parse_rejects_unknown_code() {
        let err = "XYZ".parse::<CurrencyCode>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported currency code: XYZ");
        assert!("".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_default_is_usd() {
        assert_eq!(CurrencyCode::default().as_str(), "USD");
    }

    #[test]
    fn test_yaml_accepts_plain_code() {
        let code: CurrencyCode = serde_yaml::from_str("inr").unwrap();
        assert_eq!(code.as_str(), "INR");
        assert!(serde_yaml::from_str::<CurrencyCode>("ZZZ").is_err());
    }
}

//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod form;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use currency::{CATALOG, Currency, CurrencyCode};
pub use error::FormError;
pub use form::{ConversionRequest, ConversionResult, ConverterForm, FormState};
pub use rates::{RateProvider, RateTable};

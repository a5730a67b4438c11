//! Errors surfaced to the user by the converter form

use thiserror::Error;

pub const INVALID_AMOUNT: &str = "Please enter a valid amount.";
pub const SAME_CURRENCY: &str = "From and To currency cannot be the same.";
pub const RATE_NOT_AVAILABLE: &str = "Conversion rate not available.";

/// Why a submission did not produce a result.
///
/// Both kinds carry only the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Rejected before any request was made.
    #[error("{0}")]
    Validation(String),
    /// The rate lookup failed or did not contain the target currency.
    #[error("{0}")]
    Lookup(String),
}

impl FormError {
    pub fn message(&self) -> &str {
        match self {
            FormError::Validation(msg) | FormError::Lookup(msg) => msg,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FormError::Validation(_))
    }
}

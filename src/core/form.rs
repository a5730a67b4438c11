//! State and behaviour of the currency converter form.
//!
//! The form keeps the user's current inputs next to the outcome of the last
//! completed submission. Submissions hold the state lock only while recording
//! inputs and while applying the outcome, so several may be awaiting the rate
//! provider at once; whichever completes last decides what is shown.

use crate::core::currency::CurrencyCode;
use crate::core::error::{FormError, INVALID_AMOUNT, RATE_NOT_AVAILABLE, SAME_CURRENCY};
use crate::core::rates::RateProvider;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

pub const SUBMIT_LABEL: &str = "Convert";
pub const BUSY_LABEL: &str = "Converting...";

/// A validated conversion the form is about to look up.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn parse(
        source: CurrencyCode,
        target: CurrencyCode,
        amount_text: &str,
    ) -> Result<Self, FormError> {
        let amount = amount_text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| FormError::Validation(INVALID_AMOUNT.to_string()))?;

        if source == target {
            return Err(FormError::Validation(SAME_CURRENCY.to_string()));
        }

        Ok(ConversionRequest {
            source,
            target,
            amount,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub rate: f64,
    pub converted_amount: f64,
    /// When the provider last refreshed the rate, if it said.
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub amount_text: String,
    pub result: Option<ConversionResult>,
    pub error: Option<String>,
    pub in_flight: usize,
}

impl FormState {
    fn new(default_currency: CurrencyCode) -> Self {
        FormState {
            source: default_currency,
            target: default_currency,
            amount_text: String::new(),
            result: None,
            error: None,
            in_flight: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// The result to show, if any. An error always hides it.
    pub fn visible_result(&self) -> Option<&ConversionResult> {
        match self.error {
            Some(_) => None,
            None => self.result.as_ref(),
        }
    }

    fn fail(&mut self, err: &FormError) {
        self.error = Some(err.message().to_string());
        self.result = None;
    }

    fn succeed(&mut self, result: ConversionResult) {
        self.result = Some(result);
        self.error = None;
    }
}

pub struct ConverterForm {
    provider: Arc<dyn RateProvider>,
    default_currency: CurrencyCode,
    state: Mutex<FormState>,
}

impl ConverterForm {
    pub fn new(provider: Arc<dyn RateProvider>, default_currency: CurrencyCode) -> Self {
        ConverterForm {
            provider,
            default_currency,
            state: Mutex::new(FormState::new(default_currency)),
        }
    }

    pub async fn snapshot(&self) -> FormState {
        self.state.lock().await.clone()
    }

    pub async fn set_source(&self, source: CurrencyCode) {
        self.state.lock().await.source = source;
    }

    pub async fn set_target(&self, target: CurrencyCode) {
        self.state.lock().await.target = target;
    }

    /// Validates the inputs, looks up the rate once and records the outcome.
    #[instrument(name = "ConverterSubmit", skip(self), fields(source = %source, target = %target))]
    pub async fn submit(
        &self,
        source: CurrencyCode,
        target: CurrencyCode,
        amount_text: &str,
    ) -> Result<ConversionResult, FormError> {
        let request = {
            let mut state = self.state.lock().await;
            state.source = source;
            state.target = target;
            state.amount_text = amount_text.to_string();

            match ConversionRequest::parse(source, target, amount_text) {
                Ok(request) => {
                    state.in_flight += 1;
                    request
                }
                Err(e) => {
                    debug!(error = %e, "Rejected submission");
                    state.fail(&e);
                    return Err(e);
                }
            }
        };

        let outcome = self.lookup(&request).await;

        let mut state = self.state.lock().await;
        state.in_flight = state.in_flight.saturating_sub(1);
        match &outcome {
            Ok(result) => state.succeed(result.clone()),
            Err(e) => state.fail(e),
        }
        outcome
    }

    async fn lookup(&self, request: &ConversionRequest) -> Result<ConversionResult, FormError> {
        let table = self
            .provider
            .latest_rates(&request.source)
            .await
            .map_err(|e| {
                warn!(error = %e, "Rate lookup failed");
                FormError::Lookup(e.to_string())
            })?;

        let rate = table.rate_for(&request.target).ok_or_else(|| {
            warn!(target_code = %request.target, "Target missing from rate table");
            FormError::Lookup(RATE_NOT_AVAILABLE.to_string())
        })?;

        let result = ConversionResult {
            source: request.source,
            target: request.target,
            rate,
            converted_amount: rate * request.amount,
            as_of: table.updated_at,
        };
        debug!(?result, "Conversion complete");
        Ok(result)
    }

    /// Resets inputs to the default currency and drops any result or error.
    ///
    /// Submissions still awaiting the provider are not cancelled.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        let in_flight = state.in_flight;
        *state = FormState::new(self.default_currency);
        state.in_flight = in_flight;
    }
}

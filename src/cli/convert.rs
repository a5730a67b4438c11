use super::ui;
use crate::core::currency::CurrencyCode;
use crate::core::error::FormError;
use crate::core::form::{ConversionResult, ConverterForm, FormState};
use anyhow::Result;
use indicatif::ProgressBar;
use std::time::Duration;

const BUSY_POLL: Duration = Duration::from_millis(50);

/// Renders what the form currently shows: the error if there is one,
/// otherwise the last result, otherwise nothing.
pub fn render_state(state: &FormState) -> String {
    if let Some(error) = &state.error {
        return ui::style_text(error, ui::StyleType::Error);
    }

    let Some(result) = state.visible_result() else {
        return String::new();
    };

    let mut output = format!(
        "{} {}",
        ui::style_text("Converted Amount:", ui::StyleType::Label),
        ui::style_text(
            &format!("{:.2} {}", result.converted_amount, result.target),
            ui::StyleType::Value
        )
    );
    output.push_str(&format!(
        "\n{}",
        ui::style_text(
            &format!("1 {} = {:.4} {}", result.source, result.rate, result.target),
            ui::StyleType::Subtle
        )
    ));
    if let Some(as_of) = result.as_of {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("Rates as of {}", as_of.format("%Y-%m-%d %H:%M UTC")),
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

/// Submits through the form, showing a spinner labelled from the form's
/// state for as long as it reports itself busy.
///
/// Returns the outcome and the label the spinner showed, if it appeared.
pub async fn submit_with_progress(
    form: &ConverterForm,
    source: CurrencyCode,
    target: CurrencyCode,
    amount_text: &str,
) -> (Result<ConversionResult, FormError>, Option<&'static str>) {
    let submit = form.submit(source, target, amount_text);
    tokio::pin!(submit);

    let mut spinner: Option<(ProgressBar, &'static str)> = None;
    let outcome = loop {
        tokio::select! {
            outcome = &mut submit => break outcome,
            _ = tokio::time::sleep(BUSY_POLL) => {
                let state = form.snapshot().await;
                if spinner.is_none() && state.is_busy() {
                    let label = state.submit_label();
                    spinner = Some((ui::new_spinner(label), label));
                }
            }
        }
    };

    let label = spinner.map(|(pb, label)| {
        pb.finish_and_clear();
        label
    });
    (outcome, label)
}

/// Submits a single conversion and returns the rendered outcome.
pub async fn run(
    form: &ConverterForm,
    source: CurrencyCode,
    target: CurrencyCode,
    amount_text: &str,
) -> Result<String> {
    let (outcome, _) = submit_with_progress(form, source, target, amount_text).await;
    outcome?;
    Ok(render_state(&form.snapshot().await))
}

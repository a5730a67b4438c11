use super::convert::{render_state, submit_with_progress};
use super::ui;
use crate::core::currency::CurrencyCode;
use crate::core::form::ConverterForm;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

enum Input<T> {
    Value(T),
    Clear,
    Quit,
}

/// Reads one answer. Empty input keeps `current`; `clear` and `quit` are
/// accepted at every prompt.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: &str,
) -> Result<Input<String>> {
    if current.is_empty() {
        write!(output, "{label}: ")?;
    } else {
        write!(output, "{label} [{current}]: ")?;
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Input::Quit);
    }

    let answer = line.trim();
    Ok(match answer.to_lowercase().as_str() {
        "quit" | "exit" => Input::Quit,
        "clear" => Input::Clear,
        "" => Input::Value(current.to_string()),
        _ => Input::Value(answer.to_string()),
    })
}

fn prompt_currency<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: CurrencyCode,
) -> Result<Input<CurrencyCode>> {
    loop {
        match prompt(input, output, label, current.as_str())? {
            Input::Value(text) => match text.parse::<CurrencyCode>() {
                Ok(code) => return Ok(Input::Value(code)),
                Err(e) => writeln!(
                    output,
                    "{}",
                    ui::style_text(&e.to_string(), ui::StyleType::Error)
                )?,
            },
            Input::Clear => return Ok(Input::Clear),
            Input::Quit => return Ok(Input::Quit),
        }
    }
}

/// Runs the form until the user quits or input ends.
pub async fn run<R: BufRead, W: Write>(
    form: &ConverterForm,
    mut input: R,
    mut output: W,
) -> Result<()> {
    writeln!(
        output,
        "{}\n{}",
        ui::style_text("Currency Converter", ui::StyleType::Title),
        ui::style_text(
            "Type `clear` to reset the form or `quit` to leave.",
            ui::StyleType::Subtle
        )
    )?;

    loop {
        let state = form.snapshot().await;

        let source = match prompt_currency(&mut input, &mut output, "From", state.source)? {
            Input::Value(code) => code,
            Input::Clear => {
                form.clear().await;
                continue;
            }
            Input::Quit => break,
        };
        form.set_source(source).await;

        let target = match prompt_currency(&mut input, &mut output, "To", state.target)? {
            Input::Value(code) => code,
            Input::Clear => {
                form.clear().await;
                continue;
            }
            Input::Quit => break,
        };
        form.set_target(target).await;

        let amount_text = match prompt(&mut input, &mut output, "Amount", &state.amount_text)? {
            Input::Value(text) => text,
            Input::Clear => {
                form.clear().await;
                continue;
            }
            Input::Quit => break,
        };

        let (outcome, _) = submit_with_progress(form, source, target, &amount_text).await;
        if let Err(e) = outcome {
            debug!(error = %e, "Submission did not produce a result");
        }

        writeln!(output, "{}\n", render_state(&form.snapshot().await))?;
    }

    Ok(())
}

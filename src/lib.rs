pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::currency::CurrencyCode;
use crate::core::form::ConverterForm;
use crate::providers::ExchangeRateApiProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// One conversion; missing currencies fall back to the configured default.
    Convert {
        from: Option<String>,
        to: Option<String>,
        amount: String,
    },
    Form,
    Currencies,
}

fn build_form(config: &AppConfig) -> ConverterForm {
    let provider = ExchangeRateApiProvider::from_config(&config.provider);
    ConverterForm::new(Arc::new(provider), config.default_currency)
}

fn parse_code(code: Option<&str>, default: CurrencyCode) -> Result<CurrencyCode> {
    code.map_or(Ok(default), str::parse)
}

/// Runs one conversion with `config` and returns the rendered outcome.
pub async fn convert(
    config: &AppConfig,
    from: Option<&str>,
    to: Option<&str>,
    amount: &str,
) -> Result<String> {
    let source = parse_code(from, config.default_currency)?;
    let target = parse_code(to, config.default_currency)?;
    let form = build_form(config);
    cli::convert::run(&form, source, target, amount).await
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = %config.provider.base_url(),
        keyed = config.provider.api_key().is_some(),
        default_currency = %config.default_currency,
        "Loaded config"
    );

    match command {
        AppCommand::Currencies => {
            cli::currencies::run();
            Ok(())
        }
        AppCommand::Convert { from, to, amount } => {
            let output = convert(&config, from.as_deref(), to.as_deref(), &amount).await?;
            println!("{output}");
            Ok(())
        }
        AppCommand::Form => {
            let form = build_form(&config);
            let stdin = std::io::stdin();
            cli::interactive::run(&form, stdin.lock(), std::io::stdout()).await
        }
    }
}

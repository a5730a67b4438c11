use curconv::core::config::AppConfig;
use std::fs;
use tempfile::NamedTempFile;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(base: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/test-key/latest/{base}");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn rates_response(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_string(body.to_string())
    }
}

fn write_config(base_url: &str) -> NamedTempFile {
    let config_file = NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
        provider:
          base_url: {base_url}
          api_key: "test-key"
        default_currency: "USD"
    "#
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    config_file
}

fn convert(from: Option<&str>, to: &str, amount: &str) -> curconv::AppCommand {
    curconv::AppCommand::Convert {
        from: from.map(str::to_string),
        to: Some(to.to_string()),
        amount: amount.to_string(),
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_with_mock() {
    let mock_server = test_utils::create_mock_server(
        "USD",
        test_utils::rates_response(
            r#"{"result": "success", "base_code": "USD", "conversion_rates": {"EUR": 0.92}}"#,
        ),
    )
    .await;
    let config_file = write_config(&mock_server.uri());
    let config = AppConfig::load_from_path(config_file.path()).unwrap();

    let output = curconv::convert(&config, Some("usd"), Some("eur"), "100")
        .await
        .expect("Convert failed");
    assert_eq!(
        console::strip_ansi_codes(&output),
        "Converted Amount: 92.00 EUR\n1 USD = 0.9200 EUR"
    );

    let result = curconv::run_command(
        convert(Some("usd"), "eur", "100"),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_uses_default_source_currency() {
    let mock_server = test_utils::create_mock_server(
        "USD",
        test_utils::rates_response(r#"{"conversion_rates": {"INR": 83.0}}"#),
    )
    .await;
    let config_file = write_config(&mock_server.uri());
    let config = AppConfig::load_from_path(config_file.path()).unwrap();

    let output = curconv::convert(&config, None, Some("INR"), "2.5")
        .await
        .expect("Convert failed");
    assert_eq!(
        console::strip_ansi_codes(&output),
        "Converted Amount: 207.50 INR\n1 USD = 83.0000 INR"
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_reports_missing_rate() {
    let mock_server = test_utils::create_mock_server(
        "USD",
        test_utils::rates_response(r#"{"conversion_rates": {"GBP": 0.79}}"#),
    )
    .await;
    let config_file = write_config(&mock_server.uri());

    let err = curconv::run_command(
        convert(Some("USD"), "EUR", "100"),
        Some(config_file.path().to_str().unwrap()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Conversion rate not available.");
}

#[test_log::test(tokio::test)]
async fn test_convert_reports_server_error() {
    let mock_server =
        test_utils::create_mock_server("USD", wiremock::ResponseTemplate::new(503)).await;
    let config_file = write_config(&mock_server.uri());

    let err = curconv::run_command(
        convert(Some("USD"), "EUR", "100"),
        Some(config_file.path().to_str().unwrap()),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to load exchange rates: HTTP 503 Service Unavailable"
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_validation_skips_network() {
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::any())
        .respond_with(wiremock::ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let config_file = write_config(&mock_server.uri());
    let config_path = config_file.path().to_str().unwrap();

    let err = curconv::run_command(convert(Some("USD"), "EUR", "-3"), Some(config_path))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Please enter a valid amount.");

    let err = curconv::run_command(convert(Some("EUR"), "eur", "3"), Some(config_path))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "From and To currency cannot be the same.");
}

#[test_log::test(tokio::test)]
async fn test_unknown_currency_code_is_rejected() {
    let config_file = write_config("http://127.0.0.1:1");

    let err = curconv::run_command(
        convert(Some("USD"), "ABC", "1"),
        Some(config_file.path().to_str().unwrap()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Unsupported currency code: ABC");
}

#[test_log::test(tokio::test)]
async fn test_list_currencies() {
    let config_file = write_config("http://127.0.0.1:1");

    let result = curconv::run_command(
        curconv::AppCommand::Currencies,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");

    let err = curconv::run_command(
        curconv::AppCommand::Currencies,
        Some(missing.to_str().unwrap()),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

mod api;
mod config;
mod identity;

use crate::api::{ApiClient, ApiError, ResultRow, HUNTING_QUERY};
use crate::config::Config;
use crate::identity::IdentityError;
use std::io::{self, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum Error {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("unable to print results: {0}")]
    Output(#[from] io::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Diagnostics go to stderr, leaving stdout for result rows.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::default();
    match run(&config, &mut io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Authenticate, run our hunting query, and print every returned row.
/// Rows are only printed once the full response has been received.
async fn run<W: Write>(config: &Config, out: &mut W) -> Result<(), Error> {
    let client = reqwest::Client::new();
    let access_token = identity::acquire_token_for_client(&client, config).await?;

    let api_client = ApiClient::new(client, access_token, config)?;
    let response = api_client.run_query(HUNTING_QUERY).await?;

    print_rows(response.rows(), out)?;
    Ok(())
}

/// Writes each row as-is, one compact JSON object per line.
fn print_rows<W: Write>(rows: &[ResultRow], out: &mut W) -> io::Result<()> {
    for row in rows {
        serde_json::to_writer(&mut *out, row)?;
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_token(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/tenant-abc/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn prints_rows_in_order() {
        let rows: Vec<ResultRow> = serde_json::from_value(json!([
            { "Timestamp": "t1" },
            { "Timestamp": "t2" }
        ]))
        .unwrap();

        let mut out = Vec::new();
        print_rows(&rows, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"Timestamp\":\"t1\"}\n{\"Timestamp\":\"t2\"}\n"
        );
    }

    #[test]
    fn prints_nothing_for_no_rows() {
        let mut out = Vec::new();
        print_rows(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn run_prints_returned_rows() {
        let server = MockServer::start().await;
        mount_token(&server, json!({ "access_token": "token-abc" })).await;
        Mock::given(method("POST"))
            .and(path("/api/advancedhunting/run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Results": [
                    { "Timestamp": "t1", "FileName": "cmd.exe" },
                    { "Timestamp": "t2", "FileName": "net.exe" }
                ]
            })))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        run(&Config::for_mock_server(&server.uri()), &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(
            lines,
            [
                r#"{"Timestamp":"t1","FileName":"cmd.exe"}"#,
                r#"{"Timestamp":"t2","FileName":"net.exe"}"#
            ]
        );
    }

    #[tokio::test]
    async fn run_without_results_prints_nothing() {
        let server = MockServer::start().await;
        mount_token(&server, json!({ "access_token": "token-abc" })).await;
        Mock::given(method("POST"))
            .and(path("/api/advancedhunting/run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        run(&Config::for_mock_server(&server.uri()), &mut out)
            .await
            .unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn missing_token_stops_before_query() {
        let server = MockServer::start().await;
        mount_token(
            &server,
            json!({ "error": "unauthorized_client", "error_description": "AADSTS700016" }),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/api/advancedhunting/run"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = run(&Config::for_mock_server(&server.uri()), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Identity(IdentityError::MissingToken(_))));
        assert!(err.to_string().contains("unauthorized_client"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn failed_query_prints_nothing() {
        let server = MockServer::start().await;
        mount_token(&server, json!({ "access_token": "token-abc" })).await;
        Mock::given(method("POST"))
            .and(path("/api/advancedhunting/run"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = run(&Config::for_mock_server(&server.uri()), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Status { .. })));
        assert!(out.is_empty());
    }
}

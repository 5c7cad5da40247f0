use super::hunting::{HuntingRequest, HuntingResponse};
use crate::{config::Config, identity::AccessToken};
use reqwest::{header, StatusCode};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// A client for the Defender API, bound to a single access token.
#[derive(Debug)]
pub struct ApiClient {
    /// The underlying HTTP client, shared with token acquisition.
    client: reqwest::Client,
    /// The access token presented on every request.
    access_token: AccessToken,
    /// Where hunting queries are submitted.
    hunting_endpoint: Url,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API endpoint: {0}")]
    Url(#[from] url::ParseError),
    #[error("API request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("hunting query failed with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unable to parse hunting response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiClient {
    /// Creates a new API client around the given access token.
    pub fn new(
        client: reqwest::Client,
        access_token: AccessToken,
        config: &Config,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            client,
            access_token,
            hunting_endpoint: config.hunting_endpoint()?,
        })
    }

    /// Runs an advanced hunting query, returning its parsed response.
    /// Any non-success status is an error; nothing partial is returned.
    pub async fn run_query(&self, query: &str) -> Result<HuntingResponse, ApiError> {
        let posted_contents = serde_json::to_string(&HuntingRequest { query })?;
        info!(endpoint = %self.hunting_endpoint, "submitting hunting query");

        let result = self
            .client
            .post(self.hunting_endpoint.clone())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.access_token.secret()),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .body(posted_contents)
            .send()
            .await?;

        let status = result.status();
        let response_text = result.text().await?;
        debug!(%status, body = %response_text, "hunting endpoint responded");

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: response_text,
            });
        }

        let response: HuntingResponse = serde_json::from_str(&response_text)?;
        info!(rows = response.rows().len(), "hunting query completed");
        Ok(response)
    }
}

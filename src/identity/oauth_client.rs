use super::{AccessToken, IdentityError};
use crate::config::Config;
use serde_json::Value;
use tracing::{debug, info};

/// Obtain an access token via the OAuth2 client credentials grant.
///
/// Entra ID reports a refused grant within the response body
/// (`error`, `error_description`) alongside a 4xx status.
/// As such, we parse the body regardless of status, and only care
/// whether an `access_token` is present.
pub async fn acquire_token_for_client(
    client: &reqwest::Client,
    config: &Config,
) -> Result<AccessToken, IdentityError> {
    let endpoint = config.token_endpoint()?;
    info!(tenant = %config.tenant_id, client = %config.client_id, "requesting access token");

    let result = client
        .post(endpoint)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("scope", config.scope.as_str()),
        ])
        .send()
        .await?;

    let status = result.status();
    let response_text = result.text().await?;
    debug!(%status, "token endpoint responded");

    let body: Value = serde_json::from_str(&response_text)?;
    match body.get("access_token").and_then(Value::as_str) {
        Some(access_token) => {
            info!("obtained access token");
            Ok(AccessToken::new(access_token.to_string()))
        }
        None => Err(IdentityError::MissingToken(response_text.trim().to_string())),
    }
}

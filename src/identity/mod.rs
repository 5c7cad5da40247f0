mod oauth_client;

pub use oauth_client::acquire_token_for_client;

use thiserror::Error;

/// Possible error types while obtaining a token from Entra ID.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid token endpoint: {0}")]
    Url(#[from] url::ParseError),
    #[error("token request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("unable to parse token response: {0}")]
    Parse(#[from] serde_json::Error),
    /// The identity provider answered, but without an access token.
    /// Holds the full response content, which carries `error` and
    /// `error_description` when the grant was refused.
    #[error("Failed to get token: {0}")]
    MissingToken(String),
}

/// A bearer token for the Defender API.
///
/// It lives for the duration of a single run and is never stored.
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token, for use within an `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

use url::Url;

/// The Entra ID tenant our application is registered within.
const TENANT_ID: &str = "your-tenant-id";

/// The application (client) ID of our app registration.
const CLIENT_ID: &str = "your-client-id";

/// The client secret issued for our app registration.
const CLIENT_SECRET: &str = "your-client-secret";

/// Authority host for all token requests.
const AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// The `.default` scope grants whichever application permissions
/// have been consented to for the Defender API.
const SCOPE: &str = "https://api.security.microsoft.com/.default";

/// Base URL of the Microsoft Defender API.
const API_BASE: &str = "https://api.security.microsoft.com";

/// Credentials and endpoints for a single run.
#[derive(Clone)]
pub struct Config {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub authority_host: String,
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tenant_id: TENANT_ID.to_string(),
            client_id: CLIENT_ID.to_string(),
            client_secret: CLIENT_SECRET.to_string(),
            scope: SCOPE.to_string(),
            authority_host: AUTHORITY_HOST.to_string(),
            api_base: API_BASE.to_string(),
        }
    }
}

impl Config {
    /// The OAuth2 v2.0 token endpoint for our tenant.
    pub fn token_endpoint(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.authority_host)?
            .join(&format!("{}/oauth2/v2.0/token", self.tenant_id))
    }

    /// The advanced hunting endpoint.
    pub fn hunting_endpoint(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.api_base)?.join("api/advancedhunting/run")
    }
}

#[cfg(test)]
impl Config {
    /// Points both the authority and the API at a local mock server.
    pub fn for_mock_server(uri: &str) -> Self {
        Self {
            tenant_id: "tenant-abc".to_string(),
            client_id: "client-abc".to_string(),
            client_secret: "secret-abc".to_string(),
            authority_host: uri.to_string(),
            api_base: uri.to_string(),
            ..Self::default()
        }
    }
}

// The secret stays out of any debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("authority_host", &self.authority_host)
            .field("api_base", &self.api_base)
            .finish()
    }
}

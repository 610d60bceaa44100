//! Gateway configuration.

use std::time::Duration;

/// Google OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Base URL for Google Sheets API v4.
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Timeout applied to every token endpoint call.
pub const DEFAULT_TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

/// OAuth2 client registration used for code exchange and refresh grants.
///
/// Every field is optional so the server can start without credentials;
/// calls that need a missing value fail with a configuration error.
#[derive(Debug, Clone, Default)]
pub struct OAuthClientConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

/// Server-held credentials for the specific-user endpoints.
#[derive(Debug, Clone, Default)]
pub struct SpecificUserConfig {
    pub client_id: Option<String>,
    pub refresh_token: Option<String>,
}

/// Complete configuration passed to the token exchanger and client factory.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub oauth: OAuthClientConfig,
    pub specific_user: SpecificUserConfig,
    pub token_url: String,
    pub sheets_api_base: String,
    pub token_timeout: Duration,
    /// Sheets API calls are unbounded unless this is set.
    pub sheets_timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(oauth: OAuthClientConfig) -> Self {
        Self {
            oauth,
            specific_user: SpecificUserConfig::default(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            sheets_api_base: DEFAULT_SHEETS_API_BASE.to_string(),
            token_timeout: DEFAULT_TOKEN_TIMEOUT,
            sheets_timeout: None,
        }
    }

    #[must_use]
    pub fn with_specific_user(mut self, specific_user: SpecificUserConfig) -> Self {
        self.specific_user = specific_user;
        self
    }

    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    #[must_use]
    pub fn with_sheets_api_base(mut self, base: impl Into<String>) -> Self {
        self.sheets_api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_token_timeout(mut self, timeout: Duration) -> Self {
        self.token_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_sheets_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.sheets_timeout = timeout;
        self
    }
}

/// Returns a short, log-safe prefix of a credential.
pub fn redact(value: &str) -> String {
    let prefix: String = value.chars().take(10).collect();
    format!("{}...", prefix)
}

/// Treats empty strings as unset.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

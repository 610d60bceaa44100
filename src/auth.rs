//! OAuth2 token exchange against the Google token endpoint.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use tracing::{error, info, warn};

use crate::config::{non_empty, redact, GatewayConfig, OAuthClientConfig, SpecificUserConfig};
use crate::error::{GatewayError, Result};
use crate::models::TokenBundle;

/// Exchanges authorization codes and refresh tokens for access tokens.
///
/// Tokens are never cached: every call performs one round trip to the token
/// endpoint, bounded by the configured timeout. No retries.
#[derive(Clone)]
pub struct TokenExchanger {
    oauth: Arc<OAuthClientConfig>,
    specific_user: Arc<SpecificUserConfig>,
    token_url: String,
    client: Client,
}

impl TokenExchanger {
    /// Create a new exchanger from the gateway configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.token_timeout).build()?;
        Ok(Self {
            oauth: Arc::new(config.oauth.clone()),
            specific_user: Arc::new(config.specific_user.clone()),
            token_url: config.token_url.clone(),
            client,
        })
    }

    /// Exchange an authorization code for a token bundle.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenBundle> {
        info!(code = %redact(code), "exchanging authorization code for tokens");
        let (client_id, client_secret) = self.client_credentials(self.oauth.client_id.as_ref())?;
        let redirect_uri = non_empty(&self.oauth.redirect_uri)
            .ok_or_else(|| GatewayError::configuration("redirect URI is not configured"))?;

        let params = [
            ("code", code),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        self.request_tokens(&params, "code exchange").await
    }

    /// Mint an access token from a caller-supplied refresh token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        info!(
            refresh_token = %redact(refresh_token),
            "refreshing access token"
        );
        let (client_id, client_secret) = self.client_credentials(self.oauth.client_id.as_ref())?;
        self.refresh_grant(client_id, client_secret, refresh_token, "token refresh")
            .await
    }

    /// Mint an access token for the server-configured specific user.
    pub async fn specific_user_access_token(&self) -> Result<String> {
        info!("refreshing access token for the configured specific user");
        let (client_id, client_secret) =
            self.client_credentials(self.specific_user.client_id.as_ref())?;
        let refresh_token = non_empty(&self.specific_user.refresh_token).ok_or_else(|| {
            GatewayError::configuration("specific user refresh token is not configured")
        })?;
        self.refresh_grant(client_id, client_secret, refresh_token, "specific user token refresh")
            .await
    }

    async fn refresh_grant(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
        what: &str,
    ) -> Result<String> {
        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let bundle = self.request_tokens(&params, what).await?;
        info!(expires_in = ?bundle.expires_in, "{} succeeded", what);
        bundle
            .access_token()
            .map(str::to_string)
            .ok_or(GatewayError::MissingAccessToken)
    }

    /// Resolve the client id and the shared client secret, or fail with a
    /// configuration error.
    fn client_credentials<'a>(
        &'a self,
        client_id: Option<&'a String>,
    ) -> Result<(&'a str, &'a str)> {
        let client_secret = non_empty(&self.oauth.client_secret).ok_or_else(|| {
            error!("client secret is not configured");
            GatewayError::configuration("client secret is not configured")
        })?;
        let client_id = client_id
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                error!("client id is not configured");
                GatewayError::configuration("client id is not configured")
            })?;
        Ok((client_id, client_secret))
    }

    /// POST the form to the token endpoint and decode the bundle.
    async fn request_tokens(&self, params: &[(&str, &str)], what: &str) -> Result<TokenBundle> {
        let started = Instant::now();

        let response = self
            .client
            .post(&self.token_url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(elapsed = ?started.elapsed(), "timeout during {}", what);
                } else {
                    error!(elapsed = ?started.elapsed(), "{} request failed: {}", what, e);
                }
                GatewayError::TokenTransport(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(GatewayError::TokenTransport)?;

        if !status.is_success() {
            error!(
                status = status.as_u16(),
                elapsed = ?started.elapsed(),
                "{} rejected: {}",
                what,
                body
            );
            if body.contains("invalid_grant") {
                warn!(
                    "{} failed with invalid_grant; the refresh token may be expired or revoked",
                    what
                );
            }
            return Err(GatewayError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let bundle: TokenBundle = serde_json::from_str(&body)?;
        if bundle.access_token().is_none() {
            error!(elapsed = ?started.elapsed(), "{} response missing access_token", what);
            return Err(GatewayError::MissingAccessToken);
        }

        info!(elapsed = ?started.elapsed(), "{} completed", what);
        Ok(bundle)
    }
}

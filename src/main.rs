//! sheets_gateway server - Expose Google Sheets operations over HTTP.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use sheets_gateway::config::{redact, DEFAULT_SHEETS_API_BASE, DEFAULT_TOKEN_URL};
use sheets_gateway::logging::{init_tracing, LogFormat};
use sheets_gateway::{router, AppState, GatewayConfig, OAuthClientConfig, SpecificUserConfig};

/// HTTP gateway for the Google Sheets API.
#[derive(Parser)]
#[command(name = "sheets_gateway")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// OAuth2 client id used for code exchange and refresh grants.
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    client_id: Option<String>,

    /// OAuth2 client secret.
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Redirect URI registered for the authorization code flow.
    #[arg(long, env = "GOOGLE_REDIRECT_URI")]
    redirect_uri: Option<String>,

    /// Client id for the server-held specific user.
    #[arg(long, env = "SPECIFIC_GOOGLE_CLIENT_ID")]
    specific_client_id: Option<String>,

    /// Refresh token for the server-held specific user.
    #[arg(long, env = "SPECIFIC_GOOGLE_REFRESH_TOKEN", hide_env_values = true)]
    specific_refresh_token: Option<String>,

    /// OAuth2 token endpoint.
    #[arg(long, env = "GOOGLE_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    token_url: String,

    /// Sheets API base URL.
    #[arg(long, env = "SHEETS_API_BASE", default_value = DEFAULT_SHEETS_API_BASE)]
    sheets_api_base: String,

    /// Timeout for token endpoint calls, in seconds.
    #[arg(long, env = "TOKEN_TIMEOUT_SECS", default_value_t = 30)]
    token_timeout_secs: u64,

    /// Timeout for Sheets API calls, in seconds. Unbounded when unset.
    #[arg(long, env = "SHEETS_TIMEOUT_SECS")]
    sheets_timeout_secs: Option<u64>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn gateway_config(&self) -> GatewayConfig {
        let oauth = OAuthClientConfig {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_uri: self.redirect_uri.clone(),
        };
        let specific_user = SpecificUserConfig {
            client_id: self.specific_client_id.clone(),
            refresh_token: self.specific_refresh_token.clone(),
        };

        GatewayConfig::new(oauth)
            .with_specific_user(specific_user)
            .with_token_url(self.token_url.clone())
            .with_sheets_api_base(self.sheets_api_base.clone())
            .with_token_timeout(Duration::from_secs(self.token_timeout_secs))
            .with_sheets_timeout(self.sheets_timeout_secs.map(Duration::from_secs))
    }
}

fn describe(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(redact)
        .unwrap_or_else(|| "<not set>".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(cli.log_format, level).context("Failed to initialize logging")?;

    let config = cli.gateway_config();
    let state = AppState::new(&config).context("Failed to build HTTP clients")?;

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", cli.host, cli.port))?;
    let addr = listener
        .local_addr()
        .context("Failed to read listen address")?;

    info!(
        %addr,
        client_id = %describe(&config.oauth.client_id),
        specific_client_id = %describe(&config.specific_user.client_id),
        "starting sheets gateway"
    );

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}

//! Error types for the sheets_gateway crate.

use std::fmt;

use thiserror::Error;

/// Broad classification of a [`GatewayError`], used to pick the HTTP status
/// and the `error` label of the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required secret or credential is missing from the deployment.
    Configuration,
    /// The caller sent a request that is missing fields or fails a builder precondition.
    ClientInput,
    /// Timeout or network failure while talking to the token endpoint.
    UpstreamTransport,
    /// The Sheets API or the token endpoint answered with an error.
    UpstreamApi,
    /// Anything else.
    Unhandled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::ClientInput => "client_input",
            Self::UpstreamTransport => "upstream_transport",
            Self::UpstreamApi => "upstream_api",
            Self::Unhandled => "unhandled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while serving a gateway request.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing one or more required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{0}")]
    Validation(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Token endpoint request failed: {0}")]
    TokenTransport(#[source] reqwest::Error),

    #[error("Access token not found in token endpoint response")]
    MissingAccessToken,

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GatewayError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::MissingFields(_) | Self::Validation(_) | Self::UnknownOperation(_) => {
                ErrorKind::ClientInput
            }
            Self::TokenTransport(_) => ErrorKind::UpstreamTransport,
            Self::MissingAccessToken | Self::ApiError { .. } => ErrorKind::UpstreamApi,
            Self::HttpError(_) | Self::JsonError(_) => ErrorKind::Unhandled,
        }
    }

    /// HTTP status to report to the caller.
    ///
    /// Upstream API errors mirror the upstream status when it is a valid
    /// error status, otherwise 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Configuration(_) => 500,
            Self::MissingFields(_) | Self::Validation(_) => 400,
            Self::UnknownOperation(_) => 404,
            Self::TokenTransport(_) => 503,
            Self::MissingAccessToken => 500,
            Self::ApiError { status, .. } if (400..600).contains(status) => *status,
            Self::ApiError { .. } => 500,
            Self::HttpError(_) | Self::JsonError(_) => 500,
        }
    }

    /// Short label placed in the `error` field of the response envelope.
    pub fn label(&self) -> String {
        match self {
            Self::Configuration(_) => "Configuration error".to_string(),
            Self::MissingFields(_) | Self::UnknownOperation(_) => self.to_string(),
            Self::Validation(_) => "Validation error".to_string(),
            Self::TokenTransport(_) => "Communication error with token provider".to_string(),
            Self::MissingAccessToken => "Token provider error".to_string(),
            Self::ApiError { .. } => "Google API Error".to_string(),
            Self::HttpError(_) | Self::JsonError(_) => "An unexpected error occurred".to_string(),
        }
    }

    /// Diagnostic payload placed in the `details` field, if any.
    ///
    /// Upstream bodies are returned as JSON when they parse, otherwise as text.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::MissingFields(_) | Self::UnknownOperation(_) => None,
            Self::ApiError { message, .. } => Some(
                serde_json::from_str(message)
                    .unwrap_or_else(|_| serde_json::Value::String(message.clone())),
            ),
            Self::Validation(message) => Some(serde_json::Value::String(message.clone())),
            other => Some(serde_json::Value::String(other.to_string())),
        }
    }
}

/// Result type alias for GatewayError.
pub type Result<T> = std::result::Result<T, GatewayError>;

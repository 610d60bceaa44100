//! sheets_gateway - An HTTP gateway in front of the Google Sheets API.
//!
//! This library provides functionality to:
//! - Exchange OAuth2 authorization codes and refresh tokens for access tokens
//! - Read, write, append and clear cell values
//! - Submit any of the supported `batchUpdate` operations from a JSON body
//!
//! # Example
//!
//! ```no_run
//! use sheets_gateway::{router, AppState, GatewayConfig, OAuthClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GatewayConfig::new(OAuthClientConfig {
//!         client_id: Some("client-id".to_string()),
//!         client_secret: Some("client-secret".to_string()),
//!         redirect_uri: None,
//!     });
//!     let app = router(AppState::new(&config)?);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod operations;
pub mod requests;
pub mod server;
pub mod url_parser;

// Re-exports for convenience
pub use auth::TokenExchanger;
pub use client::{SheetsClient, SheetsClientFactory};
pub use config::{GatewayConfig, OAuthClientConfig, SpecificUserConfig};
pub use error::{ErrorKind, GatewayError, Result};
pub use models::{ApiResponse, TokenBundle};
pub use operations::{find_operation, operations, OperationDescriptor};
pub use requests::Request;
pub use server::{router, AppState};
pub use url_parser::normalize_spreadsheet_id;

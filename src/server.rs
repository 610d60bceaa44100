//! HTTP surface: routes, body binding and the response envelope.
//!
//! Every `/sheets/*` endpoint runs through [`handle`]: check required fields,
//! parse typed parameters (and build the batch request, if any), then mint an
//! access token and make exactly one Sheets API call. Nothing touches the
//! network until the body has been fully validated.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, MethodRouter};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::auth::TokenExchanger;
use crate::client::{SheetsClient, SheetsClientFactory};
use crate::config::GatewayConfig;
use crate::error::{ErrorKind, GatewayError, Result};
use crate::models::{
    ApiResponse, AppendValuesBody, BatchClearValuesBody, BatchClearValuesByDataFilterBody,
    BatchGetValuesBody, BatchUpdateValuesBody, BatchUpdateValuesByDataFilterBody,
    CallbackResponse, ClearValuesBody, GetValuesBody, MetadataBody, RawBatchUpdateBody,
    UpdateValuesBody,
};
use crate::operations::{find_operation, OperationDescriptor, COMMON_REQUIRED_FIELDS};
use crate::requests::{JsonObject, Request};
use crate::url_parser::normalize_spreadsheet_id;

/// Shared, immutable state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    exchanger: TokenExchanger,
    sheets: SheetsClientFactory,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        Ok(Self {
            exchanger: TokenExchanger::new(config)?,
            sheets: SheetsClientFactory::new(config)?,
        })
    }
}

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/auth/callback", get(auth_callback))
        .route("/sheets/values/get", endpoint(Endpoint::GetValues))
        .route("/sheets/values/batchGet", endpoint(Endpoint::BatchGetValues))
        .route("/sheets/values/update", endpoint(Endpoint::UpdateValues))
        .route(
            "/sheets/values/batchUpdate",
            endpoint(Endpoint::BatchUpdateValues),
        )
        .route(
            "/sheets/values/batchUpdateByDataFilter",
            endpoint(Endpoint::BatchUpdateValuesByDataFilter),
        )
        .route("/sheets/values/append", endpoint(Endpoint::AppendValues))
        .route("/sheets/values/clear", endpoint(Endpoint::ClearValues))
        .route(
            "/sheets/values/batchClear",
            endpoint(Endpoint::BatchClearValues),
        )
        .route(
            "/sheets/values/batchClearByDataFilter",
            endpoint(Endpoint::BatchClearValuesByDataFilter),
        )
        .route("/sheets/metadata/get", endpoint(Endpoint::GetMetadata))
        .route("/sheets/batchUpdate", endpoint(Endpoint::RawBatchUpdate))
        .route(
            "/sheets/specific/metadata/get",
            endpoint(Endpoint::SpecificUserMetadata),
        )
        .route("/sheets/op/{operation}", post(run_operation))
        .with_state(state)
}

fn endpoint(endpoint: Endpoint) -> MethodRouter<AppState> {
    post(move |State(state): State<AppState>, body: Bytes| async move {
        handle(&state, endpoint, &body).await
    })
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Google Sheets gateway is running. Use the /sheets endpoints to interact with the API."
    }))
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

async fn auth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let started = Instant::now();
    info!("auth callback received");

    if let Some(oauth_error) = params.error {
        let description = params
            .error_description
            .unwrap_or_else(|| "No description provided.".to_string());
        error!(error = %oauth_error, description = %description, "OAuth error received");
        let body = ApiResponse::failure(
            "OAuth Error",
            Some(Value::String(format!("{}: {}", oauth_error, description))),
        );
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        error!("authorization code not found in callback");
        let body = ApiResponse::failure("Authorization code missing", None);
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    match state.exchanger.exchange_code(&code).await {
        Ok(tokens) => {
            info!(elapsed = ?started.elapsed(), "tokens exchanged");
            Json(CallbackResponse {
                success: true,
                message: "Authorization successful. Tokens obtained.".to_string(),
                tokens,
            })
            .into_response()
        }
        Err(err) => error_response("auth_callback", started, err),
    }
}

async fn run_operation(
    State(state): State<AppState>,
    Path(operation): Path<String>,
    body: Bytes,
) -> Response {
    match find_operation(&operation) {
        Some(descriptor) => handle(&state, Endpoint::Operation(descriptor), &body).await,
        None => error_response(
            "sheets_op",
            Instant::now(),
            GatewayError::UnknownOperation(operation),
        ),
    }
}

/// Whose credentials an endpoint acts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Credentials {
    /// The refresh token in the request body.
    Caller,
    /// The server-configured specific user.
    SpecificUser,
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    GetValues,
    BatchGetValues,
    UpdateValues,
    BatchUpdateValues,
    BatchUpdateValuesByDataFilter,
    AppendValues,
    ClearValues,
    BatchClearValues,
    BatchClearValuesByDataFilter,
    GetMetadata,
    RawBatchUpdate,
    SpecificUserMetadata,
    Operation(&'static OperationDescriptor),
}

impl Endpoint {
    fn name(&self) -> &'static str {
        match self {
            Self::GetValues => "sheets_get_values",
            Self::BatchGetValues => "sheets_batch_get_values",
            Self::UpdateValues => "sheets_update_values",
            Self::BatchUpdateValues => "sheets_batch_update_values",
            Self::BatchUpdateValuesByDataFilter => "sheets_batch_update_values_by_data_filter",
            Self::AppendValues => "sheets_append_values",
            Self::ClearValues => "sheets_clear_values",
            Self::BatchClearValues => "sheets_batch_clear_values",
            Self::BatchClearValuesByDataFilter => "sheets_batch_clear_values_by_data_filter",
            Self::GetMetadata => "sheets_get_metadata",
            Self::RawBatchUpdate => "sheets_batch_update_requests",
            Self::SpecificUserMetadata => "sheets_specific_user_get_metadata",
            Self::Operation(descriptor) => descriptor.name,
        }
    }

    fn credentials(&self) -> Credentials {
        match self {
            Self::SpecificUserMetadata => Credentials::SpecificUser,
            _ => Credentials::Caller,
        }
    }

    fn required_fields(&self) -> Vec<&'static str> {
        let own: &[&'static str] = match self {
            Self::GetValues | Self::ClearValues => &["range_name"],
            Self::BatchGetValues | Self::BatchClearValues => &["ranges_list"],
            Self::UpdateValues | Self::AppendValues => &["range_name", "values_data"],
            Self::BatchUpdateValues => &["data_list"],
            Self::BatchUpdateValuesByDataFilter => &["data_filter_value_range_list"],
            Self::BatchClearValuesByDataFilter => &["data_filters_list"],
            Self::GetMetadata => &[],
            Self::RawBatchUpdate => &["requests_list"],
            Self::SpecificUserMetadata => return vec!["spreadsheet_id"],
            Self::Operation(descriptor) => return descriptor.required_request_fields(),
        };
        COMMON_REQUIRED_FIELDS
            .iter()
            .chain(own)
            .copied()
            .collect()
    }

    fn success_message(&self) -> String {
        let message = match self {
            Self::GetValues => "Values retrieved successfully.",
            Self::BatchGetValues => "Values batch retrieved successfully.",
            Self::UpdateValues => "Values updated successfully.",
            Self::BatchUpdateValues => "Values batch updated successfully.",
            Self::BatchUpdateValuesByDataFilter => {
                "Values batch updated by data filter successfully."
            }
            Self::AppendValues => "Values appended successfully.",
            Self::ClearValues => "Values cleared successfully.",
            Self::BatchClearValues => "Values batch cleared successfully.",
            Self::BatchClearValuesByDataFilter => {
                "Values batch cleared by data filter successfully."
            }
            Self::GetMetadata => "Spreadsheet metadata retrieved successfully.",
            Self::RawBatchUpdate => "Batch update requests processed successfully.",
            Self::SpecificUserMetadata => {
                "Spreadsheet metadata retrieved successfully using specific user credentials."
            }
            Self::Operation(descriptor) => return descriptor.success_message(),
        };
        message.to_string()
    }

    /// Parse the body into the call to make. Performs no I/O.
    fn prepare(&self, body: JsonObject) -> Result<Call> {
        let call = match self {
            Self::GetValues => Call::GetValues(typed(body)?),
            Self::BatchGetValues => Call::BatchGetValues(typed(body)?),
            Self::UpdateValues => Call::UpdateValues(typed(body)?),
            Self::BatchUpdateValues => Call::BatchUpdateValues(typed(body)?),
            Self::BatchUpdateValuesByDataFilter => {
                Call::BatchUpdateValuesByDataFilter(typed(body)?)
            }
            Self::AppendValues => Call::AppendValues(typed(body)?),
            Self::ClearValues => Call::ClearValues(typed(body)?),
            Self::BatchClearValues => Call::BatchClearValues(typed(body)?),
            Self::BatchClearValuesByDataFilter => Call::BatchClearValuesByDataFilter(typed(body)?),
            Self::GetMetadata | Self::SpecificUserMetadata => Call::Metadata(typed(body)?),
            Self::RawBatchUpdate => Call::RawBatchUpdate(typed(body)?),
            Self::Operation(descriptor) => {
                let spreadsheet_id = string_field(&body, "spreadsheet_id")?.to_string();
                let request = descriptor.build(descriptor.bind_arguments(&body))?;
                Call::Batch {
                    spreadsheet_id,
                    requests: vec![request],
                }
            }
        };
        Ok(call)
    }
}

/// A fully validated Sheets API call.
enum Call {
    GetValues(GetValuesBody),
    BatchGetValues(BatchGetValuesBody),
    UpdateValues(UpdateValuesBody),
    BatchUpdateValues(BatchUpdateValuesBody),
    BatchUpdateValuesByDataFilter(BatchUpdateValuesByDataFilterBody),
    AppendValues(AppendValuesBody),
    ClearValues(ClearValuesBody),
    BatchClearValues(BatchClearValuesBody),
    BatchClearValuesByDataFilter(BatchClearValuesByDataFilterBody),
    Metadata(MetadataBody),
    RawBatchUpdate(RawBatchUpdateBody),
    Batch {
        spreadsheet_id: String,
        requests: Vec<Request>,
    },
}

impl Call {
    async fn execute(self, client: &SheetsClient) -> Result<Value> {
        match self {
            Self::GetValues(b) => {
                client
                    .get_values(&b.spreadsheet_id, &b.range_name, &b.read)
                    .await
            }
            Self::BatchGetValues(b) => {
                client
                    .batch_get_values(&b.spreadsheet_id, &b.ranges_list, &b.read)
                    .await
            }
            Self::UpdateValues(b) => {
                client
                    .update_values(
                        &b.spreadsheet_id,
                        &b.range_name,
                        &b.values_data,
                        &b.value_input_option,
                    )
                    .await
            }
            Self::BatchUpdateValues(b) => {
                client
                    .batch_update_values(&b.spreadsheet_id, &b.data_list, &b.value_input_option)
                    .await
            }
            Self::BatchUpdateValuesByDataFilter(b) => {
                client
                    .batch_update_values_by_data_filter(
                        &b.spreadsheet_id,
                        &b.data_filter_value_range_list,
                        &b.value_input_option,
                        &b.response,
                    )
                    .await
            }
            Self::AppendValues(b) => {
                client
                    .append_values(
                        &b.spreadsheet_id,
                        &b.range_name,
                        &b.values_data,
                        &b.value_input_option,
                        &b.insert_data_option,
                        &b.response,
                    )
                    .await
            }
            Self::ClearValues(b) => client.clear_values(&b.spreadsheet_id, &b.range_name).await,
            Self::BatchClearValues(b) => {
                client
                    .batch_clear_values(&b.spreadsheet_id, &b.ranges_list)
                    .await
            }
            Self::BatchClearValuesByDataFilter(b) => {
                client
                    .batch_clear_values_by_data_filter(&b.spreadsheet_id, &b.data_filters_list)
                    .await
            }
            Self::Metadata(b) => {
                client
                    .get_spreadsheet_metadata(&b.spreadsheet_id, &b.fields, b.include_grid_data)
                    .await
            }
            Self::RawBatchUpdate(b) => {
                client
                    .batch_update(&b.spreadsheet_id, &b.requests_list)
                    .await
            }
            Self::Batch {
                spreadsheet_id,
                requests,
            } => client.batch_update(&spreadsheet_id, &requests).await,
        }
    }
}

async fn handle(state: &AppState, endpoint: Endpoint, body: &[u8]) -> Response {
    let started = Instant::now();
    let name = endpoint.name();
    info!(endpoint = name, "request received");

    match execute(state, endpoint, body).await {
        Ok(details) => {
            let message = endpoint.success_message();
            info!(endpoint = name, elapsed = ?started.elapsed(), "{}", message);
            (StatusCode::OK, Json(ApiResponse::ok(message, details))).into_response()
        }
        Err(err) => error_response(name, started, err),
    }
}

async fn execute(state: &AppState, endpoint: Endpoint, body: &[u8]) -> Result<Value> {
    let name = endpoint.name();
    let mut body = json_object(body);
    debug!(endpoint = name, body = ?loggable(&body), "request body");

    let missing = missing_fields(&body, &endpoint.required_fields());
    if !missing.is_empty() {
        let provided: Vec<&str> = body.keys().map(String::as_str).collect();
        warn!(endpoint = name, ?missing, ?provided, "missing required fields");
        return Err(GatewayError::MissingFields(missing));
    }

    if let Some(Value::String(id)) = body.get_mut("spreadsheet_id") {
        *id = normalize_spreadsheet_id(id);
    }

    let access = match endpoint.credentials() {
        Credentials::Caller => Some(string_field(&body, "refresh_token")?.to_string()),
        Credentials::SpecificUser => None,
    };
    let call = endpoint.prepare(body)?;

    let step = Instant::now();
    let access_token = match access {
        Some(refresh_token) => state.exchanger.refresh_access_token(&refresh_token).await?,
        None => state.exchanger.specific_user_access_token().await?,
    };
    info!(endpoint = name, elapsed = ?step.elapsed(), "access token acquired");

    let client = state.sheets.build_client(&access_token)?;

    let step = Instant::now();
    let details = call.execute(&client).await?;
    info!(endpoint = name, elapsed = ?step.elapsed(), "sheets call completed");
    Ok(details)
}

fn error_response(endpoint: &str, started: Instant, err: GatewayError) -> Response {
    let elapsed = started.elapsed();
    match err.kind() {
        ErrorKind::ClientInput => {
            warn!(endpoint, kind = %err.kind(), ?elapsed, "request rejected: {}", err)
        }
        kind => error!(endpoint, %kind, ?elapsed, "request failed: {}", err),
    }

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ApiResponse::failure(err.label(), err.details());
    (status, Json(body)).into_response()
}

/// A missing, malformed or non-object body binds as `{}`.
fn json_object(body: &[u8]) -> JsonObject {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    }
}

/// The body without the caller's refresh token.
fn loggable(body: &JsonObject) -> JsonObject {
    let mut body = body.clone();
    body.remove("refresh_token");
    body
}

fn missing_fields(body: &JsonObject, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| !body.contains_key(**field))
        .map(|field| field.to_string())
        .collect()
}

fn string_field<'a>(body: &'a JsonObject, field: &str) -> Result<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::validation(format!("'{}' must be a string.", field)))
}

fn typed<T: DeserializeOwned>(body: JsonObject) -> Result<T> {
    serde_json::from_value(Value::Object(body))
        .map_err(|e| GatewayError::validation(format!("Invalid request parameters: {}", e)))
}

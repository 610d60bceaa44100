//! Data models for token responses, Sheets API errors, request bodies and the
//! response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OAuth2 token endpoint response.
///
/// Every field is optional on the wire; the token exchanger rejects bundles
/// without a non-empty `access_token`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenBundle {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

impl TokenBundle {
    /// The access token, if present and non-empty.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Google API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response envelope returned by every gateway endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, details: Value) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            details: Some(details),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            success: false,
            message: None,
            details,
            error: Some(error.into()),
        }
    }
}

/// Successful `/auth/callback` response: the envelope plus the token bundle.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub tokens: TokenBundle,
}

fn default_major_dimension() -> String {
    "ROWS".to_string()
}

fn default_value_render_option() -> String {
    "FORMATTED_VALUE".to_string()
}

fn default_date_time_render_option() -> String {
    "SERIAL_NUMBER".to_string()
}

fn default_value_input_option() -> String {
    "USER_ENTERED".to_string()
}

fn default_insert_data_option() -> String {
    "INSERT_ROWS".to_string()
}

fn default_metadata_fields() -> String {
    "properties,sheets.properties".to_string()
}

/// Rendering options for value reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadOptions {
    #[serde(default = "default_major_dimension")]
    pub major_dimension: String,
    #[serde(default = "default_value_render_option")]
    pub value_render_option: String,
    #[serde(default = "default_date_time_render_option")]
    pub date_time_render_option: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            major_dimension: default_major_dimension(),
            value_render_option: default_value_render_option(),
            date_time_render_option: default_date_time_render_option(),
        }
    }
}

/// Options controlling what a write echoes back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseOptions {
    #[serde(default)]
    pub include_values_in_response: bool,
    #[serde(default = "default_value_render_option")]
    pub response_value_render_option: String,
    #[serde(default = "default_date_time_render_option")]
    pub response_date_time_render_option: String,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            include_values_in_response: false,
            response_value_render_option: default_value_render_option(),
            response_date_time_render_option: default_date_time_render_option(),
        }
    }
}

/// Body of `POST /sheets/values/get`.
#[derive(Debug, Deserialize)]
pub struct GetValuesBody {
    pub spreadsheet_id: String,
    pub range_name: String,
    #[serde(flatten)]
    pub read: ReadOptions,
}

/// Body of `POST /sheets/values/batchGet`.
#[derive(Debug, Deserialize)]
pub struct BatchGetValuesBody {
    pub spreadsheet_id: String,
    pub ranges_list: Vec<String>,
    #[serde(flatten)]
    pub read: ReadOptions,
}

/// Body of `POST /sheets/values/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateValuesBody {
    pub spreadsheet_id: String,
    pub range_name: String,
    pub values_data: Vec<Vec<Value>>,
    #[serde(default = "default_value_input_option")]
    pub value_input_option: String,
}

/// Body of `POST /sheets/values/batchUpdate`.
///
/// `data_list` holds `ValueRange` objects such as
/// `{"range": "A1", "values": [["Hello"]]}`.
#[derive(Debug, Deserialize)]
pub struct BatchUpdateValuesBody {
    pub spreadsheet_id: String,
    pub data_list: Vec<Value>,
    #[serde(default = "default_value_input_option")]
    pub value_input_option: String,
}

/// Body of `POST /sheets/values/batchUpdateByDataFilter`.
#[derive(Debug, Deserialize)]
pub struct BatchUpdateValuesByDataFilterBody {
    pub spreadsheet_id: String,
    pub data_filter_value_range_list: Vec<Value>,
    #[serde(default = "default_value_input_option")]
    pub value_input_option: String,
    #[serde(flatten)]
    pub response: ResponseOptions,
}

/// Body of `POST /sheets/values/append`.
#[derive(Debug, Deserialize)]
pub struct AppendValuesBody {
    pub spreadsheet_id: String,
    pub range_name: String,
    pub values_data: Vec<Vec<Value>>,
    #[serde(default = "default_value_input_option")]
    pub value_input_option: String,
    #[serde(default = "default_insert_data_option")]
    pub insert_data_option: String,
    #[serde(flatten)]
    pub response: ResponseOptions,
}

/// Body of `POST /sheets/values/clear`.
#[derive(Debug, Deserialize)]
pub struct ClearValuesBody {
    pub spreadsheet_id: String,
    pub range_name: String,
}

/// Body of `POST /sheets/values/batchClear`.
#[derive(Debug, Deserialize)]
pub struct BatchClearValuesBody {
    pub spreadsheet_id: String,
    pub ranges_list: Vec<String>,
}

/// Body of `POST /sheets/values/batchClearByDataFilter`.
#[derive(Debug, Deserialize)]
pub struct BatchClearValuesByDataFilterBody {
    pub spreadsheet_id: String,
    pub data_filters_list: Vec<Value>,
}

/// Body of the metadata endpoints.
#[derive(Debug, Deserialize)]
pub struct MetadataBody {
    pub spreadsheet_id: String,
    #[serde(default = "default_metadata_fields")]
    pub fields: String,
    #[serde(default)]
    pub include_grid_data: bool,
}

/// Body of `POST /sheets/batchUpdate`: raw request objects passed through.
#[derive(Debug, Deserialize)]
pub struct RawBatchUpdateBody {
    pub spreadsheet_id: String,
    pub requests_list: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_bundle_deserialize() {
        let json = r#"{
            "access_token": "ya29.token",
            "expires_in": 3599,
            "scope": "https://www.googleapis.com/auth/spreadsheets",
            "token_type": "Bearer"
        }"#;

        let bundle: TokenBundle = serde_json::from_str(json).unwrap();
        assert_eq!(bundle.access_token(), Some("ya29.token"));
        assert_eq!(bundle.expires_in, Some(3599));
        assert!(bundle.refresh_token.is_none());
    }

    #[test]
    fn test_token_bundle_empty_access_token() {
        let bundle: TokenBundle = serde_json::from_str(r#"{"access_token": ""}"#).unwrap();
        assert_eq!(bundle.access_token(), None);
    }

    #[test]
    fn test_envelope_skips_empty_fields() {
        let value = serde_json::to_value(ApiResponse::failure("boom", None)).unwrap();
        assert_eq!(value, json!({"success": false, "error": "boom"}));

        let value = serde_json::to_value(ApiResponse::ok("done", json!({"a": 1}))).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "message": "done", "details": {"a": 1}})
        );
    }

    #[test]
    fn test_callback_response_flattens_tokens() {
        let response = CallbackResponse {
            success: true,
            message: "ok".to_string(),
            tokens: TokenBundle {
                access_token: Some("a".into()),
                refresh_token: Some("r".into()),
                ..Default::default()
            },
        };
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["access_token"], "a");
        assert_eq!(value["refresh_token"], "r");
        assert_eq!(value["id_token"], Value::Null);
    }

    #[test]
    fn test_get_values_body_defaults() {
        let body: GetValuesBody = serde_json::from_value(json!({
            "spreadsheet_id": "S1",
            "range_name": "Sheet1!A1:B2",
            "refresh_token": "ignored"
        }))
        .unwrap();
        assert_eq!(body.read, ReadOptions::default());
    }

    #[test]
    fn test_append_body_overrides() {
        let body: AppendValuesBody = serde_json::from_value(json!({
            "spreadsheet_id": "S1",
            "range_name": "A1",
            "values_data": [["x", 1]],
            "insert_data_option": "OVERWRITE",
            "include_values_in_response": true
        }))
        .unwrap();
        assert_eq!(body.value_input_option, "USER_ENTERED");
        assert_eq!(body.insert_data_option, "OVERWRITE");
        assert!(body.response.include_values_in_response);
        assert_eq!(body.response.response_value_render_option, "FORMATTED_VALUE");
    }

    #[test]
    fn test_metadata_body_defaults() {
        let body: MetadataBody = serde_json::from_value(json!({"spreadsheet_id": "S1"})).unwrap();
        assert_eq!(body.fields, "properties,sheets.properties");
        assert!(!body.include_grid_data);
    }

    #[test]
    fn test_api_error_response_deserialize() {
        let body = r#"{"error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.code, 404);
        assert_eq!(parsed.error.status.as_deref(), Some("NOT_FOUND"));
    }
}

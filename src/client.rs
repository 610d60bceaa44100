//! Google Sheets API client: batch dispatch and `values.*` wrappers.

use std::time::Instant;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::models::{ApiErrorResponse, ReadOptions, ResponseOptions};

/// Builds [`SheetsClient`]s bound to a per-request access token.
///
/// Holds one pooled HTTP client shared by every request.
#[derive(Clone)]
pub struct SheetsClientFactory {
    api_base: String,
    http: Client,
}

impl SheetsClientFactory {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.sheets_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            api_base: config.sheets_api_base.clone(),
            http: builder.build()?,
        })
    }

    /// Wrap an access token into a client.
    ///
    /// Fails with a configuration error when the token is empty.
    pub fn build_client(&self, access_token: &str) -> Result<SheetsClient> {
        if access_token.trim().is_empty() {
            error!("cannot build sheets client: access token is missing");
            return Err(GatewayError::configuration(
                "access token is required to build the sheets client",
            ));
        }
        debug!("sheets client built");
        Ok(SheetsClient {
            api_base: self.api_base.clone(),
            access_token: access_token.to_string(),
            http: self.http.clone(),
        })
    }
}

/// Client for one spreadsheet API session.
pub struct SheetsClient {
    api_base: String,
    access_token: String,
    http: Client,
}

#[derive(Serialize)]
struct BatchEnvelope<'a, T: Serialize> {
    requests: &'a [T],
}

impl SheetsClient {
    fn spreadsheet_url(&self, spreadsheet_id: &str) -> String {
        format!(
            "{}/spreadsheets/{}",
            self.api_base,
            urlencoding::encode(spreadsheet_id)
        )
    }

    fn values_url(&self, spreadsheet_id: &str, suffix: &str) -> String {
        format!("{}/values{}", self.spreadsheet_url(spreadsheet_id), suffix)
    }

    fn range_url(&self, spreadsheet_id: &str, range: &str, action: &str) -> String {
        self.values_url(
            spreadsheet_id,
            &format!("/{}{}", urlencoding::encode(range), action),
        )
    }

    /// Submit `requests` as one atomic `spreadsheets.batchUpdate` call.
    ///
    /// An empty slice is a no-op: nothing is sent and a short message is
    /// returned instead of the upstream response.
    pub async fn batch_update<T: Serialize>(
        &self,
        spreadsheet_id: &str,
        requests: &[T],
    ) -> Result<Value> {
        if requests.is_empty() {
            warn!(spreadsheet_id, "batch update called with no requests");
            return Ok(json!({"message": "No requests provided for batch update."}));
        }

        info!(
            spreadsheet_id,
            count = requests.len(),
            "performing batch update"
        );
        let body = BatchEnvelope { requests };
        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(body = %serde_json::to_string(&body)?, "batch update request body");
        }

        let url = format!("{}:batchUpdate", self.spreadsheet_url(spreadsheet_id));
        self.execute(self.http.post(url).json(&body), "batch update")
            .await
    }

    /// `spreadsheets.values.get`
    pub async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        options: &ReadOptions,
    ) -> Result<Value> {
        info!(spreadsheet_id, range, "getting values");
        let request = self
            .http
            .get(self.range_url(spreadsheet_id, range, ""))
            .query(&read_query(options));
        self.execute(request, "get values").await
    }

    /// `spreadsheets.values.batchGet`
    pub async fn batch_get_values(
        &self,
        spreadsheet_id: &str,
        ranges: &[String],
        options: &ReadOptions,
    ) -> Result<Value> {
        info!(spreadsheet_id, ?ranges, "batch getting values");
        let ranges: Vec<(&str, &str)> = ranges.iter().map(|r| ("ranges", r.as_str())).collect();
        let request = self
            .http
            .get(self.values_url(spreadsheet_id, ":batchGet"))
            .query(&ranges)
            .query(&read_query(options));
        self.execute(request, "batch get values").await
    }

    /// `spreadsheets.values.update`
    pub async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<Value>],
        value_input_option: &str,
    ) -> Result<Value> {
        info!(spreadsheet_id, range, value_input_option, "updating values");
        let request = self
            .http
            .put(self.range_url(spreadsheet_id, range, ""))
            .query(&[("valueInputOption", value_input_option)])
            .json(&json!({ "values": values }));
        self.execute(request, "update values").await
    }

    /// `spreadsheets.values.batchUpdate`
    pub async fn batch_update_values(
        &self,
        spreadsheet_id: &str,
        data: &[Value],
        value_input_option: &str,
    ) -> Result<Value> {
        info!(
            spreadsheet_id,
            value_input_option,
            batches = data.len(),
            "batch updating values"
        );
        let body = json!({
            "valueInputOption": value_input_option,
            "data": data,
        });
        let request = self
            .http
            .post(self.values_url(spreadsheet_id, ":batchUpdate"))
            .json(&body);
        self.execute(request, "batch update values").await
    }

    /// `spreadsheets.values.batchUpdateByDataFilter`
    pub async fn batch_update_values_by_data_filter(
        &self,
        spreadsheet_id: &str,
        data: &[Value],
        value_input_option: &str,
        response: &ResponseOptions,
    ) -> Result<Value> {
        info!(spreadsheet_id, "batch updating values by data filter");
        let body = json!({
            "valueInputOption": value_input_option,
            "data": data,
            "includeValuesInResponse": response.include_values_in_response,
            "responseValueRenderOption": response.response_value_render_option,
            "responseDateTimeRenderOption": response.response_date_time_render_option,
        });
        let request = self
            .http
            .post(self.values_url(spreadsheet_id, ":batchUpdateByDataFilter"))
            .json(&body);
        self.execute(request, "batch update values by data filter")
            .await
    }

    /// `spreadsheets.values.append`
    pub async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<Value>],
        value_input_option: &str,
        insert_data_option: &str,
        response: &ResponseOptions,
    ) -> Result<Value> {
        info!(
            spreadsheet_id,
            range,
            value_input_option,
            rows = values.len(),
            "appending values"
        );
        let include = response.include_values_in_response.to_string();
        let request = self
            .http
            .post(self.range_url(spreadsheet_id, range, ":append"))
            .query(&[
                ("valueInputOption", value_input_option),
                ("insertDataOption", insert_data_option),
                ("includeValuesInResponse", include.as_str()),
                (
                    "responseValueRenderOption",
                    response.response_value_render_option.as_str(),
                ),
                (
                    "responseDateTimeRenderOption",
                    response.response_date_time_render_option.as_str(),
                ),
            ])
            .json(&json!({ "values": values }));
        self.execute(request, "append values").await
    }

    /// `spreadsheets.values.clear`
    pub async fn clear_values(&self, spreadsheet_id: &str, range: &str) -> Result<Value> {
        info!(spreadsheet_id, range, "clearing values");
        let request = self
            .http
            .post(self.range_url(spreadsheet_id, range, ":clear"))
            .json(&json!({}));
        self.execute(request, "clear values").await
    }

    /// `spreadsheets.values.batchClear`
    pub async fn batch_clear_values(
        &self,
        spreadsheet_id: &str,
        ranges: &[String],
    ) -> Result<Value> {
        info!(spreadsheet_id, ?ranges, "batch clearing values");
        let request = self
            .http
            .post(self.values_url(spreadsheet_id, ":batchClear"))
            .json(&json!({ "ranges": ranges }));
        self.execute(request, "batch clear values").await
    }

    /// `spreadsheets.values.batchClearByDataFilter`
    pub async fn batch_clear_values_by_data_filter(
        &self,
        spreadsheet_id: &str,
        data_filters: &[Value],
    ) -> Result<Value> {
        info!(spreadsheet_id, "batch clearing values by data filter");
        let request = self
            .http
            .post(self.values_url(spreadsheet_id, ":batchClearByDataFilter"))
            .json(&json!({ "dataFilters": data_filters }));
        self.execute(request, "batch clear values by data filter")
            .await
    }

    /// `spreadsheets.get`
    pub async fn get_spreadsheet_metadata(
        &self,
        spreadsheet_id: &str,
        fields: &str,
        include_grid_data: bool,
    ) -> Result<Value> {
        info!(
            spreadsheet_id,
            fields, include_grid_data, "getting spreadsheet metadata"
        );
        let include = include_grid_data.to_string();
        let request = self
            .http
            .get(self.spreadsheet_url(spreadsheet_id))
            .query(&[("fields", fields), ("includeGridData", include.as_str())]);
        self.execute(request, "get metadata").await
    }

    /// Send an authenticated request and decode the JSON response.
    ///
    /// Non-2xx responses become [`GatewayError::ApiError`] carrying the
    /// upstream status and the raw body.
    async fn execute(&self, request: RequestBuilder, what: &str) -> Result<Value> {
        let started = Instant::now();
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                error!(elapsed = ?started.elapsed(), "{} request failed: {}", what, e);
                GatewayError::HttpError(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => error!(
                    status = api_error.error.code,
                    elapsed = ?started.elapsed(),
                    "{} failed: {}",
                    what,
                    api_error.error.message
                ),
                Err(_) => error!(
                    status = status.as_u16(),
                    elapsed = ?started.elapsed(),
                    "{} failed: {}",
                    what,
                    body
                ),
            }
            return Err(GatewayError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        info!(elapsed = ?started.elapsed(), "{} succeeded", what);
        if body.trim().is_empty() {
            return Ok(json!({}));
        }
        let value: Value = serde_json::from_str(&body)?;
        debug!(result = %value, "{} result", what);
        Ok(value)
    }
}

fn read_query(options: &ReadOptions) -> [(&'static str, &str); 3] {
    [
        ("majorDimension", options.major_dimension.as_str()),
        ("valueRenderOption", options.value_render_option.as_str()),
        ("dateTimeRenderOption", options.date_time_render_option.as_str()),
    ]
}

//! Google Sheets v4 REST client.
//!
//! Talks to `sheets.googleapis.com` with a bearer access token. Obtaining the
//! token (service account, OAuth consent, `gcloud auth print-access-token`)
//! is left to the caller.

use std::env;
use std::fmt;

use gsheet_object_core::RawTable;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::client::{SheetMetadata, SheetProperties, SheetsClient};
use crate::error::{Result, SheetError};

pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
/// Environment variable holding the bearer token.
pub const ACCESS_TOKEN_VAR: &str = "GOOGLE_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("Invalid request URL: {0}")]
    Url(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
struct Sheet {
    properties: SheetResourceProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetResourceProperties {
    title: String,
    #[serde(default)]
    grid_properties: GridProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    #[serde(default)]
    row_count: usize,
    #[serde(default)]
    column_count: usize,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Sheets API client authenticated with a bearer token.
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    token: String,
    base_url: String,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("token", &if self.token.is_empty() { "<none>" } else { "<redacted>" })
            .finish()
    }
}

impl RestClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            token: token.into(),
            base_url: SHEETS_API_URL.to_string(),
        }
    }

    /// Read the token from `GOOGLE_ACCESS_TOKEN`.
    ///
    /// A missing token is reported by `authorize`, not here.
    pub fn from_env() -> Self {
        Self::new(env::var(ACCESS_TOKEN_VAR).unwrap_or_default())
    }

    /// Point the client at another endpoint, e.g. a local emulator.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reuse an existing `reqwest` client (proxies, timeouts, pools).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// `<base>/<spreadsheet id>/<segments...>` with each segment escaped.
    fn url(&self, spreadsheet_id: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SheetError::transport(RestClientError::Url(e.to_string())))?;
        url.path_segments_mut()
            .map_err(|_| {
                SheetError::transport(RestClientError::Url(format!(
                    "{} cannot be a base URL",
                    self.base_url
                )))
            })?
            .pop_if_empty()
            .push(spreadsheet_id)
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(SheetError::transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);

        tracing::debug!(status = status.as_u16(), %message, "sheets request failed");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SheetError::Authentication(message))
            }
            _ => Err(SheetError::transport(RestClientError::Status {
                status: status.as_u16(),
                message,
            })),
        }
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn into_table(range: ValueRange) -> RawTable {
    range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect()
}

impl SheetsClient for RestClient {
    async fn authorize(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(SheetError::Authentication(format!(
                "no access token; set {}",
                ACCESS_TOKEN_VAR
            )));
        }
        Ok(())
    }

    async fn get_sheet_metadata(&self, spreadsheet_id: &str) -> Result<SheetMetadata> {
        let mut url = self.url(spreadsheet_id, &[])?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties");

        let spreadsheet: Spreadsheet = self
            .send(self.http.get(url))
            .await?
            .json()
            .await
            .map_err(SheetError::transport)?;

        let sheets = spreadsheet
            .sheets
            .into_iter()
            .map(|s| {
                let grid = s.properties.grid_properties;
                SheetProperties::new(s.properties.title, grid.column_count, grid.row_count)
            })
            .collect();
        Ok(SheetMetadata { sheets })
    }

    async fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<RawTable> {
        let mut url = self.url(spreadsheet_id, &["values", range])?;
        url.query_pairs_mut().append_pair("majorDimension", "ROWS");

        let values: ValueRange = self
            .send(self.http.get(url))
            .await?
            .json()
            .await
            .map_err(SheetError::transport)?;
        Ok(into_table(values))
    }

    async fn append_row(&self, spreadsheet_id: &str, range: &str, values: Vec<String>) -> Result<()> {
        let mut url = self.url(spreadsheet_id, &["values", &format!("{}:append", range)])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = json!({ "majorDimension": "ROWS", "values": [values] });
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    async fn write_cell(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<()> {
        let mut url = self.url(spreadsheet_id, &["values", range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = json!({ "range": range, "majorDimension": "ROWS", "values": values });
        self.send(self.http.put(url).json(&body)).await?;
        Ok(())
    }

    async fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<()> {
        let url = self.url(spreadsheet_id, &["values", &format!("{}:clear", range)])?;
        self.send(self.http.post(url).json(&json!({}))).await?;
        Ok(())
    }
}

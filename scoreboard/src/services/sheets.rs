//! Google Sheets row source
//!
//! Reads the player sheet through the Sheets v4 `values.get` endpoint and
//! hands back every row below the header as plain strings.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use shared::{component_debug, Component};

use crate::core::RawRow;
use crate::error::{ScoreboardError, ScoreboardResult};
use crate::traits::RowSource;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// Credential used for the Sheets API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetsAuth {
    /// API key, sent as the `key` query parameter (sheet must be readable by link)
    ApiKey(String),
    /// OAuth access token, sent as a bearer token
    BearerToken(String),
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Real row source backed by the Sheets REST API
pub struct SheetsRowSource {
    client: Client,
    base_url: String,
    sheet_id: String,
    range: String,
    auth: SheetsAuth,
    header_rows: usize,
}

impl SheetsRowSource {
    /// Create a source for `sheet_id`, reading `range` (e.g. `Sheet1`)
    pub fn new(
        sheet_id: impl Into<String>,
        range: impl Into<String>,
        auth: SheetsAuth,
        timeout: Duration,
    ) -> ScoreboardResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            sheet_id: sheet_id.into(),
            range: range.into(),
            auth,
            header_rows: 1,
        })
    }

    /// Point at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Number of leading rows to drop
    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }

    fn values_url(&self) -> ScoreboardResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ScoreboardError::config(format!("sheets base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ScoreboardError::config("sheets base url cannot have a path"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.sheet_id.as_str(), "values", self.range.as_str()]);
        Ok(url)
    }
}

/// Render one JSON cell the way the sheet shows it
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RowSource for SheetsRowSource {
    async fn fetch_rows(&self) -> ScoreboardResult<Vec<RawRow>> {
        let url = self.values_url()?;
        let request = match &self.auth {
            SheetsAuth::ApiKey(key) => self.client.get(url).query(&[("key", key)]),
            SheetsAuth::BearerToken(token) => self.client.get(url).bearer_auth(token),
        };

        let response = request
            .send()
            .await
            .map_err(|e| {
                ScoreboardError::source_unavailable(format!("sheets request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoreboardError::source_unavailable(format!(
                "sheets returned HTTP {status}: {body}"
            )));
        }

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| {
                ScoreboardError::source_unavailable(format!("unreadable sheets response: {e}"))
            })?;

        let rows: Vec<RawRow> = range
            .values
            .iter()
            .skip(self.header_rows)
            .map(|cells| RawRow::new(cells.iter().map(cell_text)))
            .collect();

        component_debug!(
            Component::Source,
            "📥 Fetched {} rows from sheet {}",
            rows.len(),
            self.sheet_id
        );
        Ok(rows)
    }
}

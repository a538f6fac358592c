//! Transport to the spreadsheet `values` API
//!
//! The backend is treated as an opaque key-range store with three verbs:
//! read a range, overwrite a range with literal values, clear a range.
//! No retries, no backoff; failures surface to the caller as-is.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::range::CellRange;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// Wire type for the `values` endpoint
///
/// `values` is absent entirely when the addressed range is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<String>>>,
}

/// Pooled async client for one spreadsheet document
///
/// Cheap to clone; all clones share the underlying connection pool and the
/// immutable [`StoreConfig`].
#[derive(Clone)]
pub struct SheetsClient {
    inner: Arc<SheetsClientInner>,
}

struct SheetsClientInner {
    http: reqwest::Client,
    config: StoreConfig,
}

impl SheetsClient {
    /// Create a client from the given configuration
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;

        Ok(Self {
            inner: Arc::new(SheetsClientInner { http, config }),
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Read a range, returning its rows of string cells
    ///
    /// An empty range yields an empty vec, not an error.
    pub async fn read_range(&self, range: &CellRange) -> StoreResult<Vec<Vec<String>>> {
        let url = self.values_url(range, false)?;
        tracing::debug!(%range, "reading range");

        let response = self.inner.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body = response.bytes().await?;
        let value_range: ValueRange = serde_json::from_slice(&body)
            .map_err(|e| StoreError::Json(format!("failed to decode range response: {}", e)))?;

        Ok(value_range.values.unwrap_or_default())
    }

    /// Overwrite a range with literal values (no formula evaluation)
    pub async fn write_range(&self, range: &CellRange, rows: Vec<Vec<String>>) -> StoreResult<()> {
        let mut url = self.values_url(range, false)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        tracing::debug!(%range, rows = rows.len(), "writing range");

        let body = ValueRange {
            range: None,
            major_dimension: None,
            values: Some(rows),
        };

        let response = self.inner.http.put(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(())
    }

    /// Blank all cells in a range without altering row count
    pub async fn clear_range(&self, range: &CellRange) -> StoreResult<()> {
        let url = self.values_url(range, true)?;
        tracing::debug!(%range, "clearing range");

        let response = self.inner.http.post(url).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(())
    }

    /// Assemble the endpoint URL for a range, with the API key attached
    fn values_url(&self, range: &CellRange, clear: bool) -> StoreResult<Url> {
        let config = &self.inner.config;
        let mut raw = format!(
            "{}/{}/values/{}",
            config.base_url.trim_end_matches('/'),
            config.spreadsheet_id,
            range
        );
        if clear {
            raw.push_str(":clear");
        }

        let mut url = Url::parse(&raw)?;
        url.query_pairs_mut().append_pair("key", &config.api_key);
        Ok(url)
    }
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("base_url", &self.inner.config.base_url)
            .field("spreadsheet_id", &self.inner.config.spreadsheet_id)
            .field("sheet_name", &self.inner.config.sheet_name)
            .finish()
    }
}

/// Turn a non-success response into a status error, keeping a body snippet
async fn status_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let detail: String = body.chars().take(200).collect();
    StoreError::Status { status, detail }
}

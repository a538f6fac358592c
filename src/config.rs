//! Record store configuration

use std::time::Duration;

/// Immutable connection parameters for the record store
///
/// Constructed once and injected at client creation; nothing here is
/// mutated after construction.
///
/// # Example
///
/// ```ignore
/// use sheetstore::StoreConfig;
///
/// let config = StoreConfig::new("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms", "api-key")
///     .sheet_name("Attendance")
///     .timeout_secs(15.0);
/// ```
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the spreadsheet `values` API
    pub base_url: String,

    /// Backend document identifier
    pub spreadsheet_id: String,

    /// API key, sent as the `key` query parameter on every request
    pub api_key: String,

    /// Sheet/tab name; the first segment of every A1 range
    pub sheet_name: String,

    /// Total request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,
}

impl StoreConfig {
    /// Create a config for the given document and credential, with defaults
    /// for everything else
    pub fn new(spreadsheet_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            api_key: api_key.into(),
            sheet_name: "Sheet1".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("sheetstore/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL (e.g. to point at a mock backend)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the sheet/tab name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Set the total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the total request timeout from seconds
    pub fn timeout_secs(mut self, secs: f64) -> Self {
        self.timeout = Duration::from_secs_f64(secs);
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("api_key", &"[REDACTED]")
            .field("sheet_name", &self.sheet_name)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new("doc-1", "secret");
        assert_eq!(
            config.base_url,
            "https://sheets.googleapis.com/v4/spreadsheets"
        );
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_pattern() {
        let config = StoreConfig::new("doc-1", "secret")
            .base_url("http://localhost:8080")
            .sheet_name("Attendance")
            .timeout_secs(15.0);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.sheet_name, "Attendance");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = StoreConfig::new("doc-1", "super-secret-key");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}

use std::{env, time::Duration};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines (default).
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Application configuration loaded from environment variables.
///
/// Read once at process start and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Table backing the service (default: "Products")
    pub table_name: String,
    /// Custom store endpoint, e.g. a local DynamoDB (default: unset)
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub region: String,
    /// Store client operation timeout in seconds (default: 5)
    pub store_timeout_seconds: u64,
    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Log output format (default: pretty)
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Backing table name (default: "Products")
    /// - `AWS_ENDPOINT_URL` - Custom store endpoint (default: unset)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `STORE_TIMEOUT_SECONDS` - Store operation timeout (default: 5)
    /// - `REQUEST_TIMEOUT_SECONDS` - HTTP request timeout (default: 10)
    /// - `LOG_FORMAT` - `json` or `pretty` (default: "pretty")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: lookup("TABLE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "Products".to_string()),
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|v| !v.trim().is_empty()),
            region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            store_timeout_seconds: lookup("STORE_TIMEOUT_SECONDS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(5),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(10),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Get the store operation timeout as a Duration.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_seconds)
    }

    /// Get the HTTP request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

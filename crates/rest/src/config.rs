//! REST adapter configuration loaded from environment variables.

/// Connection settings for the hosted database's REST endpoint.
///
/// All fields have defaults suitable for a local development stack.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the REST endpoint, without a trailing slash.
    pub base_url: String,
    /// API key sent as `apikey` and bearer token. Optional for local stacks.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl RestConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                           |
    /// |----------------------------|-----------------------------------|
    /// | `BUREAU_API_URL`           | `http://localhost:54321/rest/v1`  |
    /// | `BUREAU_API_KEY`           | unset                             |
    /// | `BUREAU_HTTP_TIMEOUT_SECS` | `30`                              |
    pub fn from_env() -> Self {
        let base_url = std::env::var("BUREAU_API_URL")
            .unwrap_or_else(|_| "http://localhost:54321/rest/v1".into());

        let api_key = std::env::var("BUREAU_API_KEY").ok().filter(|k| !k.is_empty());

        let timeout_secs: u64 = std::env::var("BUREAU_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("BUREAU_HTTP_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            timeout_secs,
        }
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321/rest/v1".into(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

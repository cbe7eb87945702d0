use std::path::PathBuf;
use std::time::Duration;

use crate::graph::DEFAULT_MAX_CONVERSATIONS;

/// Configuration options for talking to a tracepcap backend.
pub struct Config {
    /// Base url of the backend api, defaults to http://localhost:8080/api, can be
    /// overridden with environment variable TRACEPCAP_API_URL
    pub base_url: String,
    /// Bearer token sent with every request, can be set with environment variable
    /// TRACEPCAP_API_TOKEN
    pub api_token: Option<String>,
    /// Per-request timeout. Uploads of large captures can take a while.
    pub request_timeout: Duration,
    /// Interval between analysis status probes
    pub poll_interval: Duration,
    /// Total time to wait for analysis before giving up
    pub poll_deadline: Duration,
    /// Conversation cap applied when building the network graph
    pub max_conversations: usize,
    /// Path where recent uploads and cached summaries are persisted
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base_url = if let Ok(s) = std::env::var("TRACEPCAP_API_URL") {
            s
        } else {
            String::from("http://localhost:8080/api")
        };
        Config {
            base_url,
            api_token: std::env::var("TRACEPCAP_API_TOKEN").ok(),
            request_timeout: Duration::from_secs(600),
            poll_interval: Duration::from_secs(2),
            poll_deadline: Duration::from_secs(60),
            max_conversations: DEFAULT_MAX_CONVERSATIONS,
            store_path: {
                if let Some(s) = std::env::var_os("TRACEPCAP_STORE").map(PathBuf::from) {
                    s
                } else {
                    PathBuf::from(".tracepcap-store.json")
                }
            },
        }
    }
}

impl Config {
    /// Trailing slashes on the base url would otherwise double up when joined
    /// with endpoint paths.
    pub(crate) fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

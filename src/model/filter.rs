use crate::model::{date_format, EndpointAddr, Protocol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body for `/filter/generate/{fileId}`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGenerationRequest {
    pub file_id: String,
    pub natural_language_query: String,
}

/// A display filter produced by the backend's natural-language translation.
#[derive(Clone, Debug, Deserialize)]
pub struct FilterGenerationResponse {
    pub filter: String,
    pub explanation: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterExecutionRequest {
    pub file_id: String,
    pub filter: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterExecutionResponse {
    #[serde(default)]
    pub packets: Vec<PacketRecord>,
    #[serde(default)]
    pub total_matches: u64,
    /// Milliseconds the backend spent evaluating the filter
    #[serde(default)]
    pub execution_time: u64,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketRecord {
    pub id: String,
    #[serde(with = "date_format")]
    pub timestamp: DateTime<Utc>,
    pub source: EndpointAddr,
    pub destination: EndpointAddr,
    pub protocol: Protocol,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub payload: String,
    #[serde(default)]
    pub flags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_filter_generation() {
        let msg = r#"{"filter":"tcp.port == 80 || tcp.port == 443","explanation":"Captures HTTP and HTTPS traffic.","confidence":0.85,"suggestions":["Add \"http.request\" to see only HTTP requests"]}"#;

        let generated: FilterGenerationResponse = serde_json::from_str(msg).expect("Failed to parse");
        assert_eq!(generated.filter, "tcp.port == 80 || tcp.port == 443");
        assert_eq!(generated.suggestions.len(), 1);
    }

    #[test]
    fn should_deserialize_filter_execution() {
        let msg = r#"{"packets":[{"id":"1","timestamp":1445340250000,"source":{"ip":"192.168.1.100","port":54321},"destination":{"ip":"93.184.216.34","port":80},"protocol":{"layer":"application","name":"HTTP"},"size":512,"payload":"GET / HTTP/1.1\r\nHost: example.com\r\n","flags":["SYN","ACK"]}],"totalMatches":1,"executionTime":45,"page":1,"pageSize":25,"totalPages":1}"#;

        let executed: FilterExecutionResponse = serde_json::from_str(msg).expect("Failed to parse");
        assert_eq!(executed.total_matches, 1);
        assert_eq!(executed.packets[0].destination.port, 80);
        assert_eq!(executed.packets[0].flags, vec!["SYN", "ACK"]);
    }
}

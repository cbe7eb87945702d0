mod analysis;
mod conversation;
pub mod date_format;
mod file;
mod filter;
mod page;
mod story;
mod timeline;

pub use analysis::{
    Anomaly, AnalysisSummary, FiveWs, GeoInfo, HostRecord, HostTraffic, ProtocolStats, Severity,
    ServiceInfo, SummaryRecord, SuspiciousActivity, TimeWindow, TopConversationRecord, WhatAnalysis,
    WhenAnalysis, WhereAnalysis, WhoAnalysis, WhyAnalysis,
};
pub use conversation::{Conversation, ConversationRecord, Direction};
pub use file::{FileRecord, FileStatus, RecentFile, UploadProgress};
pub use filter::{
    FilterExecutionRequest, FilterExecutionResponse, FilterGenerationRequest,
    FilterGenerationResponse, PacketRecord,
};
pub use page::PagedResponse;
pub use story::{
    Highlight, HighlightKind, NarrativeSection, RelatedData, SectionKind, Story, StoryEventKind,
    StoryTimelineEvent,
};
pub use timeline::TimelinePoint;

use serde::{Deserialize, Deserializer, Serialize};
use std::net::IpAddr;

/// One side of a conversation. Ports are absent for portless protocols (ICMP);
/// the backend sends null there and the views fold it to 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointAddr {
    pub ip: IpAddr,
    #[serde(default, deserialize_with = "null_port")]
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl EndpointAddr {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        EndpointAddr {
            ip,
            port,
            mac: None,
            hostname: None,
        }
    }
}

pub(crate) fn null_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let port: Option<u16> = Option::deserialize(deserializer)?;
    Ok(port.unwrap_or(0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolLayer {
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "network")]
    Network,
    #[serde(rename = "transport")]
    Transport,
    #[serde(rename = "application")]
    Application,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Protocol {
    pub layer: ProtocolLayer,
    pub name: String,
}

impl Protocol {
    /// Uppercase the wire tag and bucket it into the layer the views group by.
    pub fn classify(name: &str) -> Self {
        let name = name.to_uppercase();
        let layer = match name.as_str() {
            "TCP" | "UDP" => ProtocolLayer::Transport,
            "ICMP" | "IPV6-ICMP" => ProtocolLayer::Network,
            _ => ProtocolLayer::Application,
        };
        Protocol { layer, name }
    }
}

/// Traffic role of a host. Built from port heuristics client-side and also
/// reported by the backend in the five W's breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    #[serde(rename = "client")]
    Client,
    #[serde(rename = "server")]
    Server,
    #[serde(rename = "both")]
    Both,
    #[serde(rename = "unknown")]
    Unknown,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Server => write!(f, "server"),
            Self::Both => write!(f, "both"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

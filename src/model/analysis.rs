use crate::model::{
    date_format, Conversation, Direction, EndpointAddr, NodeRole, Protocol,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Wire shape of `/analysis/{fileId}/summary`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    /// Unix milliseconds
    #[serde(default)]
    pub upload_time: Option<i64>,
    #[serde(default)]
    pub total_packets: Option<u64>,
    /// [start, end] as unix milliseconds
    #[serde(default)]
    pub time_range: Option<Vec<i64>>,
    #[serde(default)]
    pub protocol_distribution: Vec<ProtocolStats>,
    #[serde(default)]
    pub top_conversations: Vec<TopConversationRecord>,
    #[serde(default)]
    pub unique_hosts: Vec<HostRecord>,
    #[serde(default)]
    pub five_ws: Option<FiveWs>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopConversationRecord {
    pub id: String,
    pub src_ip: IpAddr,
    #[serde(default)]
    pub src_port: Option<u16>,
    pub dst_ip: IpAddr,
    #[serde(default)]
    pub dst_port: Option<u16>,
    pub protocol: String,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub packet_count: u64,
    #[serde(default)]
    pub total_bytes: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HostRecord {
    pub ip: IpAddr,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub hostname: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolStats {
    pub protocol: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub bytes: u64,
}

/// Summary view model. Cached in the store once analysis completes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub file_id: String,
    pub file_name: String,
    pub file_size: u64,
    pub upload_time: DateTime<Utc>,
    pub total_packets: u64,
    pub time_range: (DateTime<Utc>, DateTime<Utc>),
    pub protocol_distribution: Vec<ProtocolStats>,
    pub top_conversations: Vec<Conversation>,
    pub unique_hosts: Vec<EndpointAddr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub five_ws: Option<FiveWs>,
}

impl From<SummaryRecord> for AnalysisSummary {
    fn from(v: SummaryRecord) -> Self {
        let now = Utc::now();
        let (start, end) = match v.time_range.as_deref() {
            Some([start, end, ..]) => (date_format::from_millis(*start), date_format::from_millis(*end)),
            _ => (now, now),
        };
        let top_conversations = v
            .top_conversations
            .into_iter()
            .map(|c| Conversation {
                id: c.id,
                endpoints: [
                    EndpointAddr::new(c.src_ip, c.src_port.unwrap_or(0)),
                    EndpointAddr::new(c.dst_ip, c.dst_port.unwrap_or(0)),
                ],
                protocol: Protocol::classify(&c.protocol),
                start_time: c.start_time.map(date_format::from_millis).unwrap_or(start),
                end_time: c.end_time.map(date_format::from_millis).unwrap_or(end),
                packet_count: c.packet_count,
                total_bytes: c.total_bytes,
                direction: Direction::Bidirectional,
            })
            .collect();
        let unique_hosts = v
            .unique_hosts
            .into_iter()
            .map(|h| EndpointAddr {
                ip: h.ip,
                port: h.port.unwrap_or(0),
                mac: None,
                hostname: h.hostname,
            })
            .collect();
        AnalysisSummary {
            file_id: v.file_id,
            file_name: v.file_name.unwrap_or_else(|| String::from("unknown.pcap")),
            file_size: v.file_size.unwrap_or(0),
            upload_time: v.upload_time.map(date_format::from_millis).unwrap_or(now),
            total_packets: v.total_packets.unwrap_or(0),
            time_range: (start, end),
            protocol_distribution: v.protocol_distribution,
            top_conversations,
            unique_hosts,
            five_ws: v.five_ws,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FiveWs {
    pub who: WhoAnalysis,
    pub what: WhatAnalysis,
    pub when: WhenAnalysis,
    pub r#where: WhereAnalysis,
    pub why: WhyAnalysis,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAnalysis {
    #[serde(default)]
    pub hosts: Vec<HostTraffic>,
    #[serde(default)]
    pub top_talkers: Vec<EndpointAddr>,
    #[serde(default)]
    pub roles: BTreeMap<String, NodeRole>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostTraffic {
    pub endpoint: EndpointAddr,
    #[serde(default)]
    pub packets_sent: u64,
    #[serde(default)]
    pub packets_received: u64,
    #[serde(default)]
    pub bytes_sent: u64,
    #[serde(default)]
    pub bytes_received: u64,
    pub role: NodeRole,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatAnalysis {
    #[serde(default)]
    pub protocols: Vec<ProtocolStats>,
    #[serde(default)]
    pub services: Vec<ServiceInfo>,
    #[serde(default)]
    pub data_transferred: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub name: String,
    pub port: u16,
    pub protocol: String,
    #[serde(default)]
    pub packet_count: u64,
    #[serde(default)]
    pub bytes: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhenAnalysis {
    #[serde(with = "date_format")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "date_format")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub peak_activity: Vec<TimeWindow>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    #[serde(with = "date_format")]
    pub start: DateTime<Utc>,
    #[serde(with = "date_format")]
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub packet_count: u64,
    #[serde(default)]
    pub bytes: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereAnalysis {
    #[serde(default)]
    pub internal_networks: Vec<String>,
    #[serde(default)]
    pub external_networks: Vec<String>,
    #[serde(default)]
    pub geolocation: BTreeMap<String, GeoInfo>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GeoInfo {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhyAnalysis {
    #[serde(default)]
    pub purposes: Vec<String>,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
    #[serde(default)]
    pub suspicious_activity: Vec<SuspiciousActivity>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "critical")]
    Critical,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub description: String,
    #[serde(with = "date_format")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub related_packets: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspiciousActivity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(with = "date_format")]
    pub timestamp: DateTime<Utc>,
    pub source: EndpointAddr,
    #[serde(default)]
    pub destination: Option<EndpointAddr>,
    #[serde(default)]
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_summary() {
        let msg = r#"{"analysisId":"0e0f6c1e-8a1f-4a52-9a3b-0d8f0b1e6c11","fileId":"f-100","fileName":"free5gc.pcap","fileSize":2097152,"uploadTime":1445340250000,"totalPackets":50900,"timeRange":[1445340250000,1445340286000],"protocolDistribution":[{"protocol":"TCP","count":44592,"percentage":87.6,"bytes":3500000},{"protocol":"UDP","count":4629,"percentage":9.1,"bytes":400000}],"topConversations":[{"id":"c-1","srcIp":"10.10.10.30","srcPort":57656,"dstIp":"10.10.10.10","dstPort":102,"protocol":"tcp","startTime":1445340250230,"endTime":1445340286195,"packetCount":11,"totalBytes":666}],"uniqueHosts":[{"ip":"10.10.10.30","port":57656,"hostname":null},{"ip":"10.10.10.10","port":102,"hostname":"plc.internal"}]}"#;

        let summary: AnalysisSummary =
            serde_json::from_str::<SummaryRecord>(msg).expect("Failed to parse").into();

        assert_eq!(summary.file_id, "f-100");
        assert_eq!(summary.total_packets, 50_900);
        assert_eq!(summary.protocol_distribution.len(), 2);
        assert_eq!(summary.top_conversations[0].protocol.name, "TCP");
        assert_eq!(summary.unique_hosts[1].hostname.as_deref(), Some("plc.internal"));
        assert!(summary.five_ws.is_none());
        let (start, end) = summary.time_range;
        assert_eq!((end - start).num_seconds(), 36);
    }

    #[test]
    fn should_deserialize_sparse_summary() {
        let summary: AnalysisSummary = serde_json::from_str::<SummaryRecord>(r#"{"fileId":"f-2"}"#)
            .expect("Failed to parse")
            .into();
        assert_eq!(summary.file_name, "unknown.pcap");
        assert_eq!(summary.file_size, 0);
        assert!(summary.top_conversations.is_empty());
    }

    #[test]
    fn should_deserialize_five_ws() {
        let msg = r#"{"who":{"hosts":[{"endpoint":{"ip":"192.168.1.5","port":443},"packetsSent":120,"packetsReceived":80,"bytesSent":90000,"bytesReceived":20000,"role":"server"}],"topTalkers":[{"ip":"192.168.1.5","port":443}],"roles":{"192.168.1.5":"server","192.168.1.100":"client"}},"what":{"protocols":[],"services":[{"name":"https","port":443,"protocol":"TCP","packetCount":200,"bytes":110000}],"dataTransferred":110000},"when":{"startTime":1445340250000,"endTime":1445340286000,"duration":36000,"peakActivity":[]},"where":{"internalNetworks":["192.168.0.0/16"],"externalNetworks":["93.184.216.0/24"],"geolocation":{}},"why":{"purposes":["web browsing"],"anomalies":[{"id":"a-1","type":"port-scan","severity":"high","description":"Sequential connections from 192.168.1.100 to 22 ports","timestamp":1445340260000,"relatedPackets":[]}],"suspiciousActivity":[{"id":"s-1","type":"beaconing","description":"Periodic callbacks","timestamp":1445340270000,"source":{"ip":"192.168.1.100","port":50123},"destination":{"ip":"203.0.113.99","port":443},"confidence":0.8}]}}"#;

        let five_ws: FiveWs = serde_json::from_str(msg).expect("Failed to parse");
        assert_eq!(five_ws.who.roles.get("192.168.1.5"), Some(&NodeRole::Server));
        assert_eq!(five_ws.why.anomalies[0].severity, Severity::High);
        assert_eq!(
            five_ws.why.suspicious_activity[0].destination.as_ref().map(|d| d.port),
            Some(443)
        );
        assert_eq!(five_ws.r#where.internal_networks.len(), 1);
    }
}

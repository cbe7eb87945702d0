//! Builds the node/edge graph the network diagram renders from a conversation
//! list, plus the aggregate statistics shown beside it.

use crate::model::{AnalysisSummary, Conversation, EndpointAddr, NodeRole, Severity};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;

/// Conversation cap applied before layout. Render performance degrades past
/// this many edges, so lower-traffic conversations are dropped, not merged.
pub const DEFAULT_MAX_CONVERSATIONS: usize = 500;

/// Well-known ports are the server signal for role inference.
const SERVER_PORT_CUTOFF: u16 = 1024;

pub type NodeMap = HashMap<IpAddr, GraphNode>;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub ip: IpAddr,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub packets_sent: u64,
    pub packets_received: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub total_bytes: u64,
    pub role: NodeRole,
    pub protocols: Vec<String>,
    pub connections: u32,
    pub is_anomaly: bool,
}

impl GraphNode {
    fn new(endpoint: &EndpointAddr) -> Self {
        GraphNode {
            ip: endpoint.ip,
            label: endpoint
                .hostname
                .clone()
                .unwrap_or_else(|| endpoint.ip.to_string()),
            mac: endpoint.mac.clone(),
            hostname: endpoint.hostname.clone(),
            packets_sent: 0,
            packets_received: 0,
            bytes_sent: 0,
            bytes_received: 0,
            total_bytes: 0,
            role: NodeRole::Unknown,
            protocols: vec![],
            connections: 0,
            is_anomaly: false,
        }
    }

    fn absorb_sent(&mut self, conversation: &Conversation, protocol: &str) {
        self.packets_sent += conversation.packet_count;
        self.bytes_sent += conversation.total_bytes;
        self.after_absorb(protocol);
    }

    fn absorb_received(&mut self, conversation: &Conversation, protocol: &str) {
        self.packets_received += conversation.packet_count;
        self.bytes_received += conversation.total_bytes;
        self.after_absorb(protocol);
    }

    fn after_absorb(&mut self, protocol: &str) {
        self.total_bytes = self.bytes_sent + self.bytes_received;
        if !self.protocols.iter().any(|p| p == protocol) {
            self.protocols.push(protocol.to_owned());
        }
        self.connections += 1;
    }

    /// Role is re-derived every time a conversation is folded in, never stored
    /// authoritatively. A node seen in both directions counts as a server when
    /// either side of the latest conversation uses a well-known port; a
    /// one-directional node inherits that direction's port signal.
    fn infer_role(&mut self, src_port: u16, dst_port: u16) {
        let src_role = port_role(src_port);
        let dst_role = port_role(dst_port);

        if self.packets_sent > 0 && self.packets_received > 0 {
            if src_role == NodeRole::Server || dst_role == NodeRole::Server {
                self.role = NodeRole::Server;
            } else {
                self.role = NodeRole::Client;
            }
        } else if self.packets_sent > 0 {
            self.role = src_role;
        } else if self.packets_received > 0 {
            self.role = dst_role;
        }
    }
}

fn port_role(port: u16) -> NodeRole {
    if port < SERVER_PORT_CUTOFF {
        NodeRole::Server
    } else {
        NodeRole::Client
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: IpAddr,
    pub target: IpAddr,
    pub label: String,
    pub protocol: String,
    pub packet_count: u64,
    pub total_bytes: u64,
    pub conversation_id: String,
    pub bidirectional: bool,
}

impl GraphEdge {
    fn from_conversation(conversation: &Conversation, protocol: &str) -> Self {
        GraphEdge {
            id: conversation.id.clone(),
            source: conversation.source().ip,
            target: conversation.destination().ip,
            label: format!("{} ({})", protocol, conversation.packet_count),
            protocol: protocol.to_owned(),
            packet_count: conversation.packet_count,
            total_bytes: conversation.total_bytes,
            conversation_id: conversation.id.clone(),
            bidirectional: conversation.direction == crate::model::Direction::Bidirectional,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub total_packets: u64,
    pub total_bytes: u64,
    pub protocol_breakdown: BTreeMap<String, u64>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub stats: NetworkStats,
    pub is_limited: bool,
    pub total_conversations: usize,
    pub displayed_conversations: usize,
}

/// Transform conversations into the node/edge graph plus summary statistics.
/// Above `max_conversations` the top conversations by packet count are kept
/// (ties keep their original order). Pure over in-memory data; malformed input
/// degrades to empty results.
pub fn build_network_graph(
    conversations: &[Conversation],
    summary: Option<&AnalysisSummary>,
    max_conversations: usize,
) -> NetworkGraph {
    let total_conversations = conversations.len();
    let is_limited = total_conversations > max_conversations;

    let retained: Vec<&Conversation> = if is_limited {
        let mut by_traffic: Vec<&Conversation> = conversations.iter().collect();
        by_traffic.sort_by(|a, b| b.packet_count.cmp(&a.packet_count));
        by_traffic.truncate(max_conversations);
        by_traffic
    } else {
        conversations.iter().collect()
    };

    if is_limited {
        debug!(
            "Graph limited to {} of {} conversations",
            retained.len(),
            total_conversations
        );
    }

    let mut node_map: NodeMap = HashMap::new();
    let mut seen_order: Vec<IpAddr> = Vec::new();
    let mut edges: Vec<GraphEdge> = Vec::with_capacity(retained.len());

    for conversation in &retained {
        let src = conversation.source().clone();
        let dst = conversation.destination().clone();
        let protocol = conversation.protocol.name.to_uppercase();

        if !node_map.contains_key(&src.ip) {
            seen_order.push(src.ip);
            node_map.insert(src.ip, GraphNode::new(&src));
        }
        if let Some(node) = node_map.get_mut(&src.ip) {
            node.absorb_sent(conversation, &protocol);
            node.infer_role(src.port, dst.port);
        }

        if !node_map.contains_key(&dst.ip) {
            seen_order.push(dst.ip);
            node_map.insert(dst.ip, GraphNode::new(&dst));
        }
        if let Some(node) = node_map.get_mut(&dst.ip) {
            node.absorb_received(conversation, &protocol);
            node.infer_role(src.port, dst.port);
        }

        edges.push(GraphEdge::from_conversation(conversation, &protocol));
    }

    if let Some(summary) = summary {
        mark_anomalies(&mut node_map, summary);
    }

    let stats = network_stats(&node_map, &edges);

    let nodes: Vec<GraphNode> = seen_order
        .into_iter()
        .filter_map(|ip| node_map.remove(&ip))
        .collect();

    NetworkGraph {
        nodes,
        edges,
        stats,
        is_limited,
        total_conversations,
        displayed_conversations: retained.len(),
    }
}

lazy_static! {
    static ref DOTTED_QUAD_REGEX: Regex =
        Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("Bad regex");
}

/// Flag nodes the analysis summary implicates: endpoints of suspicious
/// activity, and dotted quads mentioned in high or critical anomaly
/// descriptions. IPs with no node in the graph are ignored.
fn mark_anomalies(node_map: &mut NodeMap, summary: &AnalysisSummary) {
    let why = match summary.five_ws.as_ref() {
        Some(five_ws) => &five_ws.why,
        None => return,
    };

    for activity in &why.suspicious_activity {
        if let Some(node) = node_map.get_mut(&activity.source.ip) {
            node.is_anomaly = true;
        }
        if let Some(destination) = &activity.destination {
            if let Some(node) = node_map.get_mut(&destination.ip) {
                node.is_anomaly = true;
            }
        }
    }

    for anomaly in &why.anomalies {
        if anomaly.severity < Severity::High {
            continue;
        }
        for found in DOTTED_QUAD_REGEX.find_iter(&anomaly.description) {
            if let Ok(ip) = found.as_str().parse::<IpAddr>() {
                if let Some(node) = node_map.get_mut(&ip) {
                    node.is_anomaly = true;
                }
            }
        }
    }
}

/// Sent-side counters only, so a packet is not counted at both ends.
fn network_stats(node_map: &NodeMap, edges: &[GraphEdge]) -> NetworkStats {
    let total_packets = node_map.values().map(|n| n.packets_sent).sum();
    let total_bytes = node_map.values().map(|n| n.bytes_sent).sum();

    let mut protocol_breakdown: BTreeMap<String, u64> = BTreeMap::new();
    for edge in edges {
        *protocol_breakdown.entry(edge.protocol.clone()).or_insert(0) += edge.packet_count;
    }

    NetworkStats {
        total_nodes: node_map.len(),
        total_edges: edges.len(),
        total_packets,
        total_bytes,
        protocol_breakdown,
    }
}

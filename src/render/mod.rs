//! Declarative page rendering. Each page is an askama template struct built
//! from already-fetched view models; fetching never happens here.

pub mod chart;
pub mod pagination;

use crate::errors::Error;
use crate::format::*;
use crate::graph::NetworkGraph;
use crate::model::{
    AnalysisSummary, Conversation, FilterExecutionResponse, FilterGenerationResponse,
    HighlightKind, NodeRole, PagedResponse, RecentFile, SectionKind, Story, StoryEventKind,
    TimelinePoint,
};
use crate::render::pagination::{PageItem, Pagination};

use askama::Template;

pub struct NavTab {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

const ANALYSIS_TABS: [(&'static str, &'static str); 6] = [
    ("Overview", ""),
    ("Conversations", "/conversations"),
    ("Timeline", "/timeline"),
    ("Story", "/story"),
    ("Filter Generator", "/filter-generator"),
    ("Network Diagram", "/network-diagram"),
];

fn analysis_tabs(file_id: &str, active: &'static str) -> Vec<NavTab> {
    ANALYSIS_TABS
        .iter()
        .map(|&(label, suffix)| NavTab {
            label,
            href: format!("/analysis/{}{}", file_id, suffix),
            active: label == active,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub title: String,
    pub message: String,
    pub retry_href: String,
    pub retryable: bool,
}

impl ErrorPage {
    pub fn from_error(title: &str, err: &Error, retry_href: &str) -> Self {
        ErrorPage {
            title: title.to_owned(),
            message: err.to_string(),
            retry_href: retry_href.to_owned(),
            retryable: err.is_retryable(),
        }
    }

    pub fn not_found(path: &str) -> Self {
        ErrorPage {
            title: String::from("Page Not Found"),
            message: format!("No page at {}", path),
            retry_href: String::from("/"),
            retryable: false,
        }
    }
}

pub struct FileRow {
    pub id: String,
    pub name: String,
    pub size: String,
    pub uploaded_at: String,
    pub href: String,
}

#[derive(Template)]
#[template(path = "files.html")]
pub struct FilesPage {
    pub rows: Vec<FileRow>,
}

impl FilesPage {
    pub fn from_recent(recent: &[RecentFile]) -> Self {
        let rows = recent
            .iter()
            .map(|f| FileRow {
                id: f.id.clone(),
                name: f.name.clone(),
                size: format_bytes(f.size),
                uploaded_at: format_timestamp(&f.uploaded_at),
                href: format!("/analysis/{}", f.id),
            })
            .collect();
        FilesPage { rows }
    }
}

pub struct StatTile {
    pub label: &'static str,
    pub value: String,
}

pub struct ProtocolRow {
    pub protocol: String,
    pub count: String,
    pub percentage: String,
    pub bytes: String,
    pub color: &'static str,
}

pub struct ConversationRow {
    pub id: String,
    pub source: String,
    pub destination: String,
    pub protocol: String,
    pub packets: String,
    pub bytes: String,
    pub duration: String,
}

impl ConversationRow {
    fn from_conversation(conversation: &Conversation) -> Self {
        let source = conversation.source();
        let destination = conversation.destination();
        ConversationRow {
            id: conversation.id.clone(),
            source: format_ip_port(&source.ip, source.port),
            destination: format_ip_port(&destination.ip, destination.port),
            protocol: conversation.protocol.name.clone(),
            packets: format_number(conversation.packet_count),
            bytes: format_bytes(conversation.total_bytes),
            duration: format_duration_ms(conversation.duration_ms().max(0) as u64),
        }
    }
}

pub struct HostRow {
    pub address: String,
    pub hostname: String,
}

pub struct AnomalyCard {
    pub kind: String,
    pub severity: String,
    pub severity_class: &'static str,
    pub description: String,
    pub when: String,
}

pub struct FiveWsView {
    pub purposes: Vec<String>,
    pub top_talkers: Vec<String>,
    pub internal_networks: Vec<String>,
    pub external_networks: Vec<String>,
    pub services: Vec<String>,
    pub anomalies: Vec<AnomalyCard>,
}

#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewPage {
    pub file_id: String,
    pub file_name: String,
    pub tabs: Vec<NavTab>,
    pub tiles: Vec<StatTile>,
    pub pie: Vec<chart::PieSlice>,
    pub protocol_rows: Vec<ProtocolRow>,
    pub conversation_rows: Vec<ConversationRow>,
    pub host_rows: Vec<HostRow>,
    pub five_ws: Option<FiveWsView>,
}

impl OverviewPage {
    pub fn build(summary: &AnalysisSummary) -> Self {
        let (start, end) = summary.time_range;
        let duration_ms = (end - start).num_milliseconds().max(0) as u64;

        let tiles = vec![
            StatTile {
                label: "Total Packets",
                value: format_number(summary.total_packets),
            },
            StatTile {
                label: "File Size",
                value: format_bytes(summary.file_size),
            },
            StatTile {
                label: "Capture Duration",
                value: format_duration_ms(duration_ms),
            },
            StatTile {
                label: "Unique Hosts",
                value: format_number(summary.unique_hosts.len() as u64),
            },
            StatTile {
                label: "Uploaded",
                value: format_timestamp(&summary.upload_time),
            },
        ];

        let breakdown: Vec<(String, u64)> = summary
            .protocol_distribution
            .iter()
            .map(|p| (p.protocol.clone(), p.count))
            .collect();
        let pie = chart::pie_slices(&breakdown, 100.0, 100.0, 90.0);

        let protocol_rows = summary
            .protocol_distribution
            .iter()
            .enumerate()
            .map(|(index, p)| ProtocolRow {
                protocol: format_protocol(&p.protocol),
                count: format_number(p.count),
                percentage: format_percentage(p.percentage / 100.0, 1),
                bytes: format_bytes(p.bytes),
                color: chart::palette_color(index),
            })
            .collect();

        let conversation_rows = summary
            .top_conversations
            .iter()
            .map(ConversationRow::from_conversation)
            .collect();

        let host_rows = summary
            .unique_hosts
            .iter()
            .map(|h| HostRow {
                address: format_ip_port(&h.ip, h.port),
                hostname: h.hostname.clone().unwrap_or_default(),
            })
            .collect();

        let five_ws = summary.five_ws.as_ref().map(|five| FiveWsView {
            purposes: five.why.purposes.clone(),
            top_talkers: five
                .who
                .top_talkers
                .iter()
                .map(|t| format_ip_port(&t.ip, t.port))
                .collect(),
            internal_networks: five.r#where.internal_networks.clone(),
            external_networks: five.r#where.external_networks.clone(),
            services: five
                .what
                .services
                .iter()
                .map(|s| format!("{} ({}/{})", s.name, s.protocol, s.port))
                .collect(),
            anomalies: five
                .why
                .anomalies
                .iter()
                .map(|a| AnomalyCard {
                    kind: a.kind.clone(),
                    severity: format!("{:?}", a.severity).to_lowercase(),
                    severity_class: severity_class(&a.severity),
                    description: a.description.clone(),
                    when: format_timestamp(&a.timestamp),
                })
                .collect(),
        });

        OverviewPage {
            file_id: summary.file_id.clone(),
            file_name: summary.file_name.clone(),
            tabs: analysis_tabs(&summary.file_id, "Overview"),
            tiles,
            pie,
            protocol_rows,
            conversation_rows,
            host_rows,
            five_ws,
        }
    }
}

fn severity_class(severity: &crate::model::Severity) -> &'static str {
    use crate::model::Severity;
    match severity {
        Severity::Critical => "badge-critical",
        Severity::High => "badge-high",
        Severity::Medium => "badge-medium",
        Severity::Low => "badge-low",
    }
}

pub struct PageLink {
    pub label: String,
    pub href: String,
    pub active: bool,
    pub is_ellipsis: bool,
}

pub struct PaginationView {
    pub info: String,
    pub prev_href: String,
    pub prev_disabled: bool,
    pub next_href: String,
    pub next_disabled: bool,
    pub links: Vec<PageLink>,
}

impl PaginationView {
    pub fn build<F: Fn(u32) -> String>(pagination: &Pagination, href_for: F) -> Self {
        let links = pagination
            .page_items()
            .into_iter()
            .map(|item| match item {
                PageItem::Page(page) => PageLink {
                    label: page.to_string(),
                    href: href_for(page),
                    active: page == pagination.current_page,
                    is_ellipsis: false,
                },
                PageItem::Ellipsis => PageLink {
                    label: String::from("..."),
                    href: String::new(),
                    active: false,
                    is_ellipsis: true,
                },
            })
            .collect();
        PaginationView {
            info: format!(
                "Showing {} to {} of {} items",
                format_number(pagination.start_item()),
                format_number(pagination.end_item()),
                format_number(pagination.total_items)
            ),
            prev_href: href_for(pagination.previous_page()),
            prev_disabled: !pagination.has_previous(),
            next_href: href_for(pagination.next_page()),
            next_disabled: !pagination.has_next(),
            links,
        }
    }
}

#[derive(Template)]
#[template(path = "conversations.html")]
pub struct ConversationsPage {
    pub file_id: String,
    pub tabs: Vec<NavTab>,
    pub rows: Vec<ConversationRow>,
    pub pagination: PaginationView,
}

impl ConversationsPage {
    pub fn build(file_id: &str, listing: &PagedResponse<Conversation>) -> Self {
        let rows = listing
            .data
            .iter()
            .map(ConversationRow::from_conversation)
            .collect();
        let pagination = Pagination::new(
            listing.page,
            listing.total_pages,
            listing.total,
            listing.page_size,
        );
        let id = file_id.to_owned();
        ConversationsPage {
            file_id: file_id.to_owned(),
            tabs: analysis_tabs(file_id, "Conversations"),
            rows,
            pagination: PaginationView::build(&pagination, move |page| {
                format!("/analysis/{}/conversations?page={}", id, page)
            }),
        }
    }
}

#[derive(Template)]
#[template(path = "timeline.html")]
pub struct TimelinePage {
    pub file_id: String,
    pub tabs: Vec<NavTab>,
    pub chart: chart::AreaChart,
    pub bucket_count: String,
    pub peak: String,
    pub empty: bool,
}

impl TimelinePage {
    pub fn build(file_id: &str, points: &[TimelinePoint]) -> Self {
        let series: Vec<_> = points.iter().map(|p| (p.timestamp, p.packet_count)).collect();
        let chart = chart::AreaChart::build(&series, 600, 200);
        TimelinePage {
            file_id: file_id.to_owned(),
            tabs: analysis_tabs(file_id, "Timeline"),
            bucket_count: format_number(points.len() as u64),
            peak: format_number(chart.y_max),
            empty: points.is_empty(),
            chart,
        }
    }
}

pub struct SvgEdge {
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
    pub title: String,
}

pub struct SvgNode {
    pub cx: String,
    pub cy: String,
    pub r: String,
    pub fill: &'static str,
    pub label: String,
    pub label_x: String,
    pub label_y: String,
    pub anomaly: bool,
}

pub struct NodeRow {
    pub address: String,
    pub role: String,
    pub packets: String,
    pub bytes: String,
    pub protocols: String,
    pub anomaly: bool,
}

#[derive(Template)]
#[template(path = "network.html")]
pub struct NetworkPage {
    pub file_id: String,
    pub tabs: Vec<NavTab>,
    pub tiles: Vec<StatTile>,
    pub svg_edges: Vec<SvgEdge>,
    pub svg_nodes: Vec<SvgNode>,
    pub node_rows: Vec<NodeRow>,
    pub limited: bool,
    pub limited_note: String,
}

impl NetworkPage {
    pub fn build(file_id: &str, graph: &NetworkGraph) -> Self {
        let tiles = vec![
            StatTile {
                label: "Hosts",
                value: format_number(graph.stats.total_nodes as u64),
            },
            StatTile {
                label: "Conversations",
                value: format_number(graph.stats.total_edges as u64),
            },
            StatTile {
                label: "Total Packets",
                value: format_number(graph.stats.total_packets),
            },
            StatTile {
                label: "Total Bytes",
                value: format_bytes(graph.stats.total_bytes),
            },
        ];

        let positions = chart::circular_layout(graph.nodes.len(), 300.0, 300.0, 250.0);
        let position_of = |ip: &std::net::IpAddr| {
            graph
                .nodes
                .iter()
                .position(|n| n.ip == *ip)
                .map(|i| positions[i])
        };

        let svg_edges = graph
            .edges
            .iter()
            .filter_map(|edge| {
                let (x1, y1) = position_of(&edge.source)?;
                let (x2, y2) = position_of(&edge.target)?;
                Some(SvgEdge {
                    x1: format!("{:.1}", x1),
                    y1: format!("{:.1}", y1),
                    x2: format!("{:.1}", x2),
                    y2: format!("{:.1}", y2),
                    title: edge.label.clone(),
                })
            })
            .collect();

        let max_bytes = graph.nodes.iter().map(|n| n.total_bytes).max().unwrap_or(0).max(1);
        let svg_nodes = graph
            .nodes
            .iter()
            .zip(positions.iter())
            .map(|(node, (x, y))| {
                let share = node.total_bytes as f64 / max_bytes as f64;
                let radius = 8.0 + 10.0 * share.sqrt();
                SvgNode {
                    cx: format!("{:.1}", x),
                    cy: format!("{:.1}", y),
                    r: format!("{:.1}", radius),
                    fill: role_color(node.role),
                    label: node.label.clone(),
                    label_x: format!("{:.1}", x),
                    label_y: format!("{:.1}", y - radius - 6.0),
                    anomaly: node.is_anomaly,
                }
            })
            .collect();

        let node_rows = graph
            .nodes
            .iter()
            .map(|node| NodeRow {
                address: node.label.clone(),
                role: node.role.to_string(),
                packets: format_number(node.packets_sent + node.packets_received),
                bytes: format_bytes(node.total_bytes),
                protocols: node.protocols.join(", "),
                anomaly: node.is_anomaly,
            })
            .collect();

        NetworkPage {
            file_id: file_id.to_owned(),
            tabs: analysis_tabs(file_id, "Network Diagram"),
            tiles,
            svg_edges,
            svg_nodes,
            node_rows,
            limited: graph.is_limited,
            limited_note: format!(
                "Showing top {} of {} conversations by packet count",
                format_number(graph.displayed_conversations as u64),
                format_number(graph.total_conversations as u64)
            ),
        }
    }
}

fn role_color(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Server => "#0d6efd",
        NodeRole::Client => "#198754",
        NodeRole::Both => "#fd7e14",
        NodeRole::Unknown => "#6c757d",
    }
}

pub struct SectionCard {
    pub title: String,
    pub content: String,
    pub css_class: &'static str,
    pub related: Vec<String>,
}

pub struct HighlightCard {
    pub title: String,
    pub description: String,
    pub css_class: &'static str,
}

pub struct EventRow {
    pub when: String,
    pub title: String,
    pub description: String,
    pub marker_class: &'static str,
}

#[derive(Template)]
#[template(path = "story.html")]
pub struct StoryPage {
    pub file_id: String,
    pub tabs: Vec<NavTab>,
    pub generated_at: String,
    pub sections: Vec<SectionCard>,
    pub highlights: Vec<HighlightCard>,
    pub events: Vec<EventRow>,
}

impl StoryPage {
    pub fn build(story: &Story) -> Self {
        let sections = story
            .narrative
            .iter()
            .map(|section| {
                let mut related = vec![];
                if !section.related_data.hosts.is_empty() {
                    related.push(format!("Hosts: {}", section.related_data.hosts.join(", ")));
                }
                if !section.related_data.conversations.is_empty() {
                    related.push(format!(
                        "Conversations: {}",
                        section.related_data.conversations.len()
                    ));
                }
                if !section.related_data.packets.is_empty() {
                    related.push(format!("Packets: {}", section.related_data.packets.len()));
                }
                SectionCard {
                    title: section.title.clone(),
                    content: section.content.clone(),
                    css_class: section_class(section.kind),
                    related,
                }
            })
            .collect();

        let highlights = story
            .ordered_highlights()
            .into_iter()
            .map(|highlight| HighlightCard {
                title: highlight.title.clone(),
                description: highlight.description.clone(),
                css_class: highlight_class(highlight.kind),
            })
            .collect();

        let events = story
            .timeline
            .iter()
            .map(|event| EventRow {
                when: format_time(&event.timestamp),
                title: event.title.clone(),
                description: event.description.clone(),
                marker_class: event_class(event.kind),
            })
            .collect();

        StoryPage {
            file_id: story.file_id.clone(),
            tabs: analysis_tabs(&story.file_id, "Story"),
            generated_at: format_timestamp(&story.generated_at),
            sections,
            highlights,
            events,
        }
    }
}

fn section_class(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Summary => "card-summary",
        SectionKind::Detail => "card-detail",
        SectionKind::Anomaly => "card-anomaly",
        SectionKind::Conclusion => "card-conclusion",
    }
}

fn highlight_class(kind: HighlightKind) -> &'static str {
    match kind {
        HighlightKind::Anomaly => "alert-danger",
        HighlightKind::Warning => "alert-warning",
        HighlightKind::Insight => "alert-info",
        HighlightKind::Info => "alert-secondary",
    }
}

fn event_class(kind: StoryEventKind) -> &'static str {
    match kind {
        StoryEventKind::Normal => "marker-normal",
        StoryEventKind::Suspicious => "marker-suspicious",
        StoryEventKind::Critical => "marker-critical",
    }
}

pub struct PacketRow {
    pub id: String,
    pub time: String,
    pub source: String,
    pub destination: String,
    pub protocol: String,
    pub size: String,
    pub payload: String,
    pub flags: String,
}

pub struct FilterResultView {
    pub filter: String,
    pub explanation: String,
    pub confidence: String,
    pub suggestions: Vec<String>,
    pub matches: String,
    pub execution_time: String,
    pub rows: Vec<PacketRow>,
    pub pagination: PaginationView,
}

#[derive(Template)]
#[template(path = "filter.html")]
pub struct FilterPage {
    pub file_id: String,
    pub tabs: Vec<NavTab>,
    pub query: String,
    pub result: Option<FilterResultView>,
}

impl FilterPage {
    pub fn empty(file_id: &str) -> Self {
        FilterPage {
            file_id: file_id.to_owned(),
            tabs: analysis_tabs(file_id, "Filter Generator"),
            query: String::new(),
            result: None,
        }
    }

    pub fn build(
        file_id: &str,
        query: &str,
        generation: &FilterGenerationResponse,
        execution: &FilterExecutionResponse,
        page_size: u32,
    ) -> Self {
        let rows = execution
            .packets
            .iter()
            .map(|packet| PacketRow {
                id: packet.id.clone(),
                time: format_time(&packet.timestamp),
                source: format_ip_port(&packet.source.ip, packet.source.port),
                destination: format_ip_port(&packet.destination.ip, packet.destination.port),
                protocol: packet.protocol.name.clone(),
                size: format_bytes(packet.size),
                payload: packet.payload.clone(),
                flags: packet.flags.join(" "),
            })
            .collect();

        let page_size = execution.page_size.unwrap_or(page_size);
        let total_pages = execution.total_pages.unwrap_or(if execution.total_matches > 0 {
            ((execution.total_matches + page_size as u64 - 1) / page_size as u64) as u32
        } else {
            0
        });
        let pagination = Pagination::new(
            execution.page.unwrap_or(1),
            total_pages,
            execution.total_matches,
            page_size,
        );
        let id = file_id.to_owned();
        let encoded_query = urlencode(query);
        let pagination = PaginationView::build(&pagination, move |page| {
            format!(
                "/analysis/{}/filter-generator?q={}&page={}",
                id, encoded_query, page
            )
        });

        FilterPage {
            file_id: file_id.to_owned(),
            tabs: analysis_tabs(file_id, "Filter Generator"),
            query: query.to_owned(),
            result: Some(FilterResultView {
                filter: generation.filter.clone(),
                explanation: generation.explanation.clone(),
                confidence: format_percentage(generation.confidence, 0),
                suggestions: generation.suggestions.clone(),
                matches: format_number(execution.total_matches),
                execution_time: format_duration_ms(execution.execution_time),
                rows,
                pagination,
            }),
        }
    }
}

pub(crate) fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SummaryRecord;

    const SUMMARY_BODY: &'static str = r#"{"fileId":"f-100","fileName":"free5gc.pcap","fileSize":2097152,"uploadTime":1445340250000,"totalPackets":50900,"timeRange":[1445340250000,1445340286000],"protocolDistribution":[{"protocol":"TCP","count":44592,"percentage":87.6,"bytes":3500000},{"protocol":"UDP","count":4629,"percentage":9.1,"bytes":400000}],"topConversations":[{"id":"c-1","srcIp":"10.10.10.30","srcPort":57656,"dstIp":"10.10.10.10","dstPort":102,"protocol":"tcp","startTime":1445340250230,"endTime":1445340286195,"packetCount":11,"totalBytes":666}],"uniqueHosts":[{"ip":"10.10.10.30","port":57656},{"ip":"10.10.10.10","port":102,"hostname":"plc.internal"}]}"#;

    fn summary() -> AnalysisSummary {
        serde_json::from_str::<SummaryRecord>(SUMMARY_BODY)
            .expect("Failed to parse")
            .into()
    }

    #[test]
    fn overview_page_renders() {
        let page = OverviewPage::build(&summary());
        let html = page.render().expect("Failed to render");

        assert!(html.contains("free5gc.pcap"));
        assert!(html.contains("50,900"));
        assert!(html.contains("plc.internal"));
        assert!(html.contains("<svg"));
        // two protocols, two pie slices
        assert_eq!(html.matches("<path").count(), 2);
    }

    #[test]
    fn files_page_renders_recent_uploads() {
        use chrono::{TimeZone, Utc};
        let recent = vec![RecentFile {
            id: "f-1".to_owned(),
            name: "capture.pcap".to_owned(),
            size: 2048,
            uploaded_at: Utc.timestamp_millis_opt(1_445_340_250_000).single().expect("Invalid time"),
        }];
        let html = FilesPage::from_recent(&recent).render().expect("Failed to render");

        assert!(html.contains("capture.pcap"));
        assert!(html.contains("2.00 KB"));
        assert!(html.contains("/analysis/f-1"));
    }

    #[test]
    fn error_page_offers_retry_only_when_retryable() {
        let err = Error::Custom {
            msg: String::from("boom"),
        };
        let html = ErrorPage::from_error("Failed to Load Analysis", &err, "/analysis/f-1")
            .render()
            .expect("Failed to render");
        assert!(html.contains("Retry"));
        assert!(html.contains("boom"));

        let html = ErrorPage::from_error("Failed to Load Analysis", &Error::Unauthorized, "/x")
            .render()
            .expect("Failed to render");
        assert!(!html.contains("Retry"));
    }

    #[test]
    fn network_page_marks_truncation() {
        use crate::graph::build_network_graph;
        use crate::model::{Direction, EndpointAddr, Protocol};
        use chrono::{TimeZone, Utc};

        let start = Utc.timestamp_millis_opt(1_445_340_250_000).single().expect("Invalid time");
        let conversations: Vec<Conversation> = (0..4u64)
            .map(|i| Conversation {
                id: format!("c-{}", i),
                endpoints: [
                    EndpointAddr::new(format!("10.0.0.{}", i + 1).parse().expect("Failed to parse"), 50_000),
                    EndpointAddr::new("10.0.1.1".parse().expect("Failed to parse"), 80),
                ],
                protocol: Protocol::classify("tcp"),
                start_time: start,
                end_time: start,
                packet_count: 10 + i,
                total_bytes: 1000,
                direction: Direction::Bidirectional,
            })
            .collect();

        let graph = build_network_graph(&conversations, None, 2);
        let html = NetworkPage::build("f-100", &graph).render().expect("Failed to render");

        assert!(html.contains("Showing top 2 of 4 conversations"));
        assert!(html.contains("<circle"));
        assert!(html.contains("<line"));
    }

    #[test]
    fn urlencode_round_trips_spaces() {
        assert_eq!(urlencode("show me dns"), "show+me+dns");
        assert_eq!(urlencode("ip=10.0.0.1&x"), "ip%3D10.0.0.1%26x");
    }
}

use chrono::{TimeZone, Utc};
use tracepcap_client::prelude::*;

const SUMMARY_BODY: &'static str = r#"{"fileId":"f-100","fileName":"free5gc.pcap","fileSize":2097152,"uploadTime":1445340250000,"totalPackets":50900,"timeRange":[1445340250000,1445340286000],"protocolDistribution":[{"protocol":"TCP","count":44592,"percentage":87.6,"bytes":3500000}],"topConversations":[{"id":"c-1","srcIp":"10.10.10.30","srcPort":57656,"dstIp":"10.10.10.10","dstPort":102,"protocol":"tcp","startTime":1445340250230,"endTime":1445340286195,"packetCount":11,"totalBytes":666}],"uniqueHosts":[{"ip":"10.10.10.30","port":57656}]}"#;

fn summary() -> AnalysisSummary {
    serde_json::from_str::<SummaryRecord>(SUMMARY_BODY)
        .expect("Failed to parse")
        .into()
}

#[test]
fn store_round_trips_through_disk() {
    let _ = env_logger::try_init();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");

    let mut store = Store::new();
    store.add_recent_file(RecentFile {
        id: "f-100".to_owned(),
        name: "free5gc.pcap".to_owned(),
        size: 2_097_152,
        uploaded_at: Utc
            .timestamp_millis_opt(1_445_340_250_000)
            .single()
            .expect("Invalid time"),
    });
    store.set_summary("f-100", summary());
    store.set_current_file("f-100");
    store.save(&path).expect("Failed to save");

    let restored = Store::load(&path);
    assert_eq!(restored.recent_files().len(), 1);
    assert_eq!(restored.recent_files()[0].name, "free5gc.pcap");

    let cached = restored.summary("f-100").expect("No cached summary");
    assert_eq!(cached.total_packets, 50_900);
    assert_eq!(cached.top_conversations.len(), 1);
    assert_eq!(cached.top_conversations[0].protocol.name, "TCP");

    // the current-file pointer is session state, not persisted
    assert_eq!(restored.current_file(), None);
}

#[test]
fn missing_store_starts_empty() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Store::load(dir.path().join("absent.json"));
    assert!(store.recent_files().is_empty());
}

#[test]
fn corrupt_store_is_discarded() {
    let _ = env_logger::try_init();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");
    std::fs::write(&path, b"{not json").expect("Failed to write");

    let store = Store::load(&path);
    assert!(store.recent_files().is_empty());
    assert!(store.summary("f-100").is_none());
}

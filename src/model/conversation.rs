use crate::model::{date_format, EndpointAddr, Protocol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Wire shape of `/conversations/{fileId}` entries.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecord {
    pub conversation_id: String,
    pub src_ip: IpAddr,
    #[serde(default)]
    pub src_port: Option<u16>,
    pub dst_ip: IpAddr,
    #[serde(default)]
    pub dst_port: Option<u16>,
    pub protocol: String,
    #[serde(default)]
    pub packet_count: u64,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(with = "date_format")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "date_format")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "bidirectional")]
    Bidirectional,
    #[serde(rename = "unidirectional")]
    Unidirectional,
}

/// A bidirectional exchange between two endpoints, aggregated by the backend
/// from raw packets. Immutable once fetched.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub endpoints: [EndpointAddr; 2],
    pub protocol: Protocol,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub packet_count: u64,
    pub total_bytes: u64,
    pub direction: Direction,
}

impl Conversation {
    pub fn source(&self) -> &EndpointAddr {
        &self.endpoints[0]
    }

    pub fn destination(&self) -> &EndpointAddr {
        &self.endpoints[1]
    }

    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }
}

impl From<ConversationRecord> for Conversation {
    fn from(v: ConversationRecord) -> Self {
        Conversation {
            id: v.conversation_id,
            endpoints: [
                EndpointAddr::new(v.src_ip, v.src_port.unwrap_or(0)),
                EndpointAddr::new(v.dst_ip, v.dst_port.unwrap_or(0)),
            ],
            protocol: Protocol::classify(&v.protocol),
            start_time: v.start_time,
            end_time: v.end_time,
            packet_count: v.packet_count,
            total_bytes: v.total_bytes,
            // the backend does not track directionality yet
            direction: Direction::Bidirectional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProtocolLayer;

    #[test]
    fn should_deserialize_conversation_record() {
        let msg = r#"{"conversationId":"7f6cb4a8-8df2-4d5e-9c78-0f4b6f7b2a11","srcIp":"10.10.10.30","srcPort":57656,"dstIp":"10.10.10.10","dstPort":102,"protocol":"tcp","packetCount":11,"totalBytes":666,"startTime":"2015-10-20T11:24:10.230829","endTime":"2015-10-20T11:24:46.195059","durationMs":35964}"#;

        let record: ConversationRecord = serde_json::from_str(msg).expect("Failed to parse");
        assert_eq!(record.src_ip, "10.10.10.30".parse::<IpAddr>().expect("Failed to parse"));
        assert_eq!(record.src_port, Some(57_656));
        assert_eq!(record.packet_count, 11);

        let conversation = Conversation::from(record);
        assert_eq!(conversation.protocol.name, "TCP");
        assert_eq!(conversation.protocol.layer, ProtocolLayer::Transport);
        assert_eq!(conversation.duration_ms(), 35_964);
        assert_eq!(conversation.direction, Direction::Bidirectional);
    }

    #[test]
    fn should_deserialize_portless_conversation() {
        let msg = r#"{"conversationId":"c1","srcIp":"fe80:0:0:0:7836:ddff:fe67:941f","srcPort":null,"dstIp":"ff02:0:0:0:0:0:0:2","dstPort":null,"protocol":"IPV6-ICMP","packetCount":3,"totalBytes":210,"startTime":[2016,6,16,15,6,53,839093000],"endTime":[2016,6,16,15,7,1,859044000],"durationMs":8019}"#;

        let conversation: Conversation =
            serde_json::from_str::<ConversationRecord>(msg).expect("Failed to parse").into();
        assert_eq!(conversation.source().port, 0);
        assert_eq!(conversation.destination().port, 0);
        assert_eq!(conversation.protocol.layer, ProtocolLayer::Network);
    }
}

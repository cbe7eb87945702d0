use crate::model::date_format;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One bucket of `/timeline/{fileId}` traffic, keyed by bucket start.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    #[serde(with = "date_format")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub packet_count: u64,
    #[serde(default)]
    pub bytes: u64,
    /// Protocol name -> packet count within the bucket
    #[serde(default)]
    pub protocols: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_timeline_point() {
        let msg = r#"{"timestamp":[2015,10,20,11,24,10,0],"packetCount":230,"bytes":48213,"protocols":{"TCP":180,"UDP":50}}"#;

        let point: TimelinePoint = serde_json::from_str(msg).expect("Failed to parse");
        assert_eq!(point.packet_count, 230);
        assert_eq!(point.protocols.get("TCP"), Some(&180));
        assert_eq!(point.timestamp.timestamp(), 1445340250);
    }

    #[test]
    fn should_deserialize_timeline_point_with_text_timestamp() {
        let msg = r#"{"timestamp":"2015-10-20T11:24:10","packetCount":1,"bytes":60,"protocols":{}}"#;

        let point: TimelinePoint = serde_json::from_str(msg).expect("Failed to parse");
        assert_eq!(point.timestamp.timestamp(), 1445340250);
    }
}

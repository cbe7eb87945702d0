use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{self, Deserialize, Deserializer, Serializer};

const LOCAL_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.f";

/// Timestamps serialize back out as unix milliseconds, the encoding the backend
/// uses for its own numeric timestamps.
pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(date.timestamp_millis())
}

/// The backend emits three timestamp encodings depending on the endpoint: unix
/// milliseconds, ISO-8601 text (zoned or zone-less), and LocalDateTime field
/// arrays [year, month, day, hour, minute, second, nanosecond].
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = WireInstant::deserialize(deserializer)?;
    resolve(wire).map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireInstant {
    Millis(i64),
    Text(String),
    Fields(Vec<i64>),
}

fn resolve(wire: WireInstant) -> Result<DateTime<Utc>, String> {
    match wire {
        WireInstant::Millis(ms) => from_millis_checked(ms),
        WireInstant::Text(s) => parse_date_time(&s),
        WireInstant::Fields(fields) => from_fields(&fields),
    }
}

pub fn parse_date_time(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    // LocalDateTime strings carry no offset, the backend works in UTC
    NaiveDateTime::parse_from_str(s, LOCAL_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| format!("unparseable timestamp '{}': {}", s, e))
}

pub(crate) fn from_millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(|| DateTime::<Utc>::from(std::time::UNIX_EPOCH))
}

fn from_millis_checked(ms: i64) -> Result<DateTime<Utc>, String> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| format!("timestamp out of range: {}", ms))
}

fn from_fields(fields: &[i64]) -> Result<DateTime<Utc>, String> {
    if fields.len() < 6 {
        return Err(format!("timestamp array too short: {:?}", fields));
    }
    let nano = fields.get(6).cloned().unwrap_or(0);
    NaiveDate::from_ymd_opt(fields[0] as i32, fields[1] as u32, fields[2] as u32)
        .and_then(|d| d.and_hms_nano_opt(fields[3] as u32, fields[4] as u32, fields[5] as u32, nano as u32))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| format!("invalid timestamp array: {:?}", fields))
}

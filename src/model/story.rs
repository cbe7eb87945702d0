use crate::model::date_format;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// AI-generated narrative for a capture, returned by `/story/generate/{fileId}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub file_id: String,
    #[serde(with = "date_format")]
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub narrative: Vec<NarrativeSection>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub timeline: Vec<StoryTimelineEvent>,
}

impl Story {
    /// Highlights ordered most severe first, the order the story page lists them.
    pub fn ordered_highlights(&self) -> Vec<&Highlight> {
        let mut highlights: Vec<&Highlight> = self.highlights.iter().collect();
        highlights.sort_by_key(|h| h.kind.severity_rank());
        highlights
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    #[serde(rename = "summary")]
    Summary,
    #[serde(rename = "detail")]
    Detail,
    #[serde(rename = "anomaly")]
    Anomaly,
    #[serde(rename = "conclusion")]
    Conclusion,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeSection {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(default)]
    pub related_data: RelatedData,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightKind {
    #[serde(rename = "anomaly")]
    Anomaly,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "insight")]
    Insight,
    #[serde(rename = "info")]
    Info,
}

impl HighlightKind {
    pub fn severity_rank(&self) -> u8 {
        match self {
            Self::Anomaly => 1,
            Self::Warning => 2,
            Self::Insight => 3,
            Self::Info => 4,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HighlightKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryEventKind {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "suspicious")]
    Suspicious,
    #[serde(rename = "critical")]
    Critical,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryTimelineEvent {
    #[serde(with = "date_format")]
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: StoryEventKind,
    #[serde(default)]
    pub related_data: RelatedData,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RelatedData {
    #[serde(default)]
    pub packets: Vec<String>,
    #[serde(default)]
    pub conversations: Vec<String>,
    #[serde(default)]
    pub hosts: Vec<String>,
}

use crate::model::date_format;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    #[serde(rename = "uploading", alias = "UPLOADING")]
    Uploading,
    #[serde(rename = "processing", alias = "PROCESSING")]
    Processing,
    #[serde(rename = "analyzing", alias = "ANALYZING")]
    Analyzing,
    #[serde(rename = "completed", alias = "COMPLETED")]
    Completed,
    #[serde(rename = "failed", alias = "FAILED")]
    Failed,
}

impl FileStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FileStatus::Completed | FileStatus::Failed)
    }
}

/// Wire shape shared by the upload response and `/files/{fileId}` metadata.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub file_id: String,
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    pub status: FileStatus,
    #[serde(with = "date_format")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub storage_location: Option<String>,
}

impl FileRecord {
    /// Coarse progress figure for status displays while the backend works.
    pub fn progress(&self) -> UploadProgress {
        let progress = match self.status {
            FileStatus::Completed => 100,
            FileStatus::Processing | FileStatus::Analyzing => 50,
            _ => 0,
        };
        UploadProgress {
            file_id: self.file_id.clone(),
            status: self.status,
            progress,
            message: format!("File {}", status_label(self.status)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UploadProgress {
    pub file_id: String,
    pub status: FileStatus,
    pub progress: u8,
    pub message: String,
}

fn status_label(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Uploading => "uploading",
        FileStatus::Processing => "processing",
        FileStatus::Analyzing => "analyzing",
        FileStatus::Completed => "completed",
        FileStatus::Failed => "failed",
    }
}

/// Store entry for a previously uploaded capture.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFile {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_file_record() {
        let msg = r#"{"fileId":"f-100","fileName":"free5gc.pcap","fileSize":2097152,"uploadedAt":1445340250000,"status":"processing","storageLocation":"/data/uploads/f-100.pcap"}"#;

        let record: FileRecord = serde_json::from_str(msg).expect("Failed to parse");
        assert_eq!(record.status, FileStatus::Processing);
        assert!(!record.status.is_terminal());
        assert_eq!(record.progress().progress, 50);
    }

    #[test]
    fn should_accept_uppercase_status() {
        let record: FileRecord = serde_json::from_str(
            r#"{"fileId":"f-1","fileName":"a.pcap","fileSize":1,"uploadedAt":0,"status":"COMPLETED"}"#,
        )
        .expect("Failed to parse");
        assert_eq!(record.status, FileStatus::Completed);
        assert_eq!(record.progress().progress, 100);
    }
}

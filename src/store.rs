use crate::errors::Error;
use crate::model::{AnalysisSummary, RecentFile};

use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// Recent uploads are capped; oldest entries fall off the end.
const RECENT_FILE_LIMIT: usize = 10;

/// Client-side state that outlives a page: the recent-upload list and cached
/// analysis summaries, keyed by file id. Mutated only by its owner, persisted
/// as a single json document. The current-file pointer is session state and is
/// not written out.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default)]
    recent_files: Vec<RecentFile>,
    #[serde(default)]
    analysis_summaries: HashMap<String, AnalysisSummary>,
    #[serde(skip)]
    current_file_id: Option<String>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// Load a previously persisted store. Missing or unreadable files start
    /// empty rather than failing the caller.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(store) => store,
                Err(e) => {
                    warn!("Discarding unreadable store at {:?}: {}", path, e);
                    Store::default()
                }
            },
            Err(e) => {
                debug!("No store at {:?} ({}), starting empty", path, e);
                Store::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let mut f = std::fs::File::create(path).map_err(Error::Io)?;
        serde_json::to_writer(&mut f, self)?;
        f.flush().map_err(Error::Io)?;
        info!("Persisted store to {:?}", path);
        Ok(())
    }

    pub fn add_recent_file(&mut self, file: RecentFile) {
        self.recent_files.retain(|f| f.id != file.id);
        self.recent_files.insert(0, file);
        self.recent_files.truncate(RECENT_FILE_LIMIT);
    }

    pub fn remove_recent_file(&mut self, file_id: &str) {
        self.recent_files.retain(|f| f.id != file_id);
    }

    pub fn clear_recent_files(&mut self) {
        self.recent_files.clear();
    }

    pub fn recent_files(&self) -> &[RecentFile] {
        &self.recent_files
    }

    pub fn summary(&self, file_id: &str) -> Option<&AnalysisSummary> {
        self.analysis_summaries.get(file_id)
    }

    pub fn set_summary(&mut self, file_id: &str, summary: AnalysisSummary) {
        self.analysis_summaries.insert(file_id.to_owned(), summary);
    }

    pub fn set_current_file(&mut self, file_id: &str) {
        self.current_file_id = Some(file_id.to_owned());
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current_file_id.as_deref()
    }

    pub fn clear_analysis(&mut self) {
        self.current_file_id = None;
        self.analysis_summaries.clear();
    }
}

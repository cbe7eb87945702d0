//! Polls the summary endpoint while the backend processes a capture, feeding
//! the store's cache once a terminal state is reached.

use crate::api::SummaryProbe;
use crate::client::ApiClient;
use crate::config::Config;
use crate::errors::Error;
use crate::model::AnalysisSummary;
use crate::store::Store;

use log::*;
use smol::future::or;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cancels a watch from outside, the guard a torn-down view flips so a late
/// poll result is dropped instead of applied.
#[derive(Clone)]
pub struct WatchHandle {
    cancelled: Arc<AtomicBool>,
}

impl WatchHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

pub struct SummaryWatcher {
    client: ApiClient,
    poll_interval: Duration,
    poll_deadline: Duration,
    cancelled: Arc<AtomicBool>,
}

impl SummaryWatcher {
    pub fn new(client: ApiClient, config: &Config) -> Self {
        SummaryWatcher {
            client,
            poll_interval: config.poll_interval,
            poll_deadline: config.poll_deadline,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn handle(&self) -> WatchHandle {
        WatchHandle {
            cancelled: self.cancelled.clone(),
        }
    }

    /// Resolve the analysis summary for a file, tolerating the backend's
    /// asynchronous processing. Cache hits return immediately; otherwise the
    /// summary endpoint is probed on a fixed interval until it reports a
    /// terminal state or the deadline passes. Only "still processing" is
    /// retried, failures surface at once. One probe is in flight at a time.
    pub async fn wait_for_summary(
        &self,
        store: &mut Store,
        file_id: &str,
    ) -> Result<AnalysisSummary, Error> {
        if let Some(cached) = store.summary(file_id) {
            debug!("Summary cache hit for {}", file_id);
            return Ok(cached.clone());
        }

        let deadline = self.poll_deadline;
        let expired = async move {
            smol::Timer::after(deadline).await;
            warn!("Analysis did not reach a terminal state within {:?}", deadline);
            Err(Error::AnalysisTimeout(deadline))
        };

        let summary = or(self.poll_until_terminal(file_id), expired).await?;

        store.set_summary(file_id, summary.clone());
        store.set_current_file(file_id);
        Ok(summary)
    }

    async fn poll_until_terminal(&self, file_id: &str) -> Result<AnalysisSummary, Error> {
        loop {
            if self.cancelled.load(Ordering::SeqCst) {
                return Err(Error::Cancelled);
            }

            let client = self.client.clone();
            let id = file_id.to_owned();
            match smol::unblock(move || client.probe_summary(&id)).await? {
                SummaryProbe::Ready(summary) => {
                    info!("Analysis of {} complete", file_id);
                    return Ok(summary);
                }
                SummaryProbe::Failed { message } => {
                    return Err(Error::Backend {
                        status: 500,
                        message,
                    });
                }
                SummaryProbe::Processing { .. } => {
                    smol::Timer::after(self.poll_interval).await;
                }
            }
        }
    }
}

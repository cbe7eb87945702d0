use crate::client::{endpoints, error_message, ApiClient};
use crate::errors::Error;
use crate::model::{AnalysisSummary, FiveWs, ProtocolStats, SummaryRecord};

use log::*;

/// Tri-state answer from the summary endpoint while the backend chews on a
/// capture: 200 carries the summary, 202 means keep polling, 500 means the
/// analysis itself failed.
#[derive(Debug)]
pub enum SummaryProbe {
    Ready(AnalysisSummary),
    Processing { retry_after: Option<u64> },
    Failed { message: Option<String> },
}

impl ApiClient {
    pub fn probe_summary(&self, file_id: &str) -> Result<SummaryProbe, Error> {
        let path = endpoints::analysis_summary(file_id);
        debug!("GET {}", path);
        match self.request("GET", &path).call() {
            Ok(response) => match response.status() {
                200 => {
                    let record: SummaryRecord = response.into_json()?;
                    Ok(SummaryProbe::Ready(record.into()))
                }
                202 => {
                    let retry_after = response
                        .header("Retry-After")
                        .and_then(|v| v.parse().ok());
                    debug!("Analysis of {} still processing, retry after {:?}s", file_id, retry_after);
                    Ok(SummaryProbe::Processing { retry_after })
                }
                status => Err(Error::UnexpectedStatus { status, path }),
            },
            Err(ureq::Error::Status(500, response)) => Ok(SummaryProbe::Failed {
                message: error_message(response),
            }),
            Err(e) => Err(self.fail(&path, e)),
        }
    }

    /// One-shot summary fetch for refetches once analysis is known complete.
    pub fn analysis_summary(&self, file_id: &str) -> Result<AnalysisSummary, Error> {
        match self.probe_summary(file_id)? {
            SummaryProbe::Ready(summary) => Ok(summary),
            SummaryProbe::Processing { .. } => Err(Error::Custom {
                msg: format!("analysis of {} still processing", file_id),
            }),
            SummaryProbe::Failed { message } => Err(Error::Backend {
                status: 500,
                message,
            }),
        }
    }

    pub fn protocol_stats(&self, file_id: &str) -> Result<Vec<ProtocolStats>, Error> {
        self.get_json(&endpoints::protocol_stats(file_id), &[])
    }

    pub fn five_ws(&self, file_id: &str) -> Result<FiveWs, Error> {
        self.get_json(&endpoints::five_ws(file_id), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::{Reply, StubServer};

    const SUMMARY_BODY: &'static str = r#"{"fileId":"f-100","fileName":"free5gc.pcap","fileSize":2097152,"uploadTime":1445340250000,"totalPackets":50900,"timeRange":[1445340250000,1445340286000],"protocolDistribution":[{"protocol":"TCP","count":44592,"percentage":87.6,"bytes":3500000}],"topConversations":[],"uniqueHosts":[]}"#;

    fn client_for(server: &StubServer) -> ApiClient {
        ApiClient::new(&Config {
            base_url: server.base_url(),
            ..Config::default()
        })
    }

    #[test]
    fn test_probe_ready() {
        let _ = env_logger::try_init();

        let server = StubServer::start(vec![Reply::json(200, SUMMARY_BODY)]);
        let probe = client_for(&server)
            .probe_summary("f-100")
            .expect("Probe failed");

        match probe {
            SummaryProbe::Ready(summary) => assert_eq!(summary.total_packets, 50_900),
            other => panic!("Not ready: {:?}", other),
        }
    }

    #[test]
    fn test_probe_processing_reads_retry_after() {
        let _ = env_logger::try_init();

        let server = StubServer::start(vec![Reply::status(202).with_header("Retry-After", "2")]);
        let probe = client_for(&server)
            .probe_summary("f-100")
            .expect("Probe failed");

        match probe {
            SummaryProbe::Processing { retry_after } => assert_eq!(retry_after, Some(2)),
            other => panic!("Not processing: {:?}", other),
        }
    }

    #[test]
    fn test_probe_failed_on_500() {
        let _ = env_logger::try_init();

        let server = StubServer::start(vec![Reply::json(
            500,
            r#"{"status":500,"error":"Internal Server Error","message":"truncated capture"}"#,
        )]);
        let probe = client_for(&server)
            .probe_summary("f-100")
            .expect("Probe failed");

        match probe {
            SummaryProbe::Failed { message } => {
                assert_eq!(message.as_deref(), Some("truncated capture"))
            }
            other => panic!("Not failed: {:?}", other),
        }
    }
}

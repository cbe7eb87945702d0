use crate::client::{endpoints, ApiClient};
use crate::errors::Error;
use crate::model::{
    FilterExecutionRequest, FilterExecutionResponse, FilterGenerationRequest,
    FilterGenerationResponse,
};

impl ApiClient {
    /// Translate a natural-language question into a display filter.
    pub fn generate_filter(
        &self,
        file_id: &str,
        query: &str,
    ) -> Result<FilterGenerationResponse, Error> {
        let request = FilterGenerationRequest {
            file_id: file_id.to_owned(),
            natural_language_query: query.to_owned(),
        };
        self.post_json(&endpoints::generate_filter(file_id), &[], &request)
    }

    /// Run a filter over the capture, returning the matching packets one page
    /// at a time.
    pub fn execute_filter(
        &self,
        file_id: &str,
        filter: &str,
        page: u32,
        page_size: u32,
    ) -> Result<FilterExecutionResponse, Error> {
        let request = FilterExecutionRequest {
            file_id: file_id.to_owned(),
            filter: filter.to_owned(),
        };
        self.post_json(
            &endpoints::execute_filter(file_id),
            &[
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
            ],
            &request,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::{Reply, StubServer};

    #[test]
    fn test_generate_then_execute() {
        let _ = env_logger::try_init();

        let generated = r#"{"filter":"udp.port == 53","explanation":"DNS traffic on both transports.","confidence":0.9,"suggestions":[]}"#;
        let executed = r#"{"packets":[],"totalMatches":0,"executionTime":12,"page":1,"pageSize":25,"totalPages":0}"#;
        let server = StubServer::start(vec![
            Reply::json(200, generated),
            Reply::json(200, executed),
        ]);
        let client = ApiClient::new(&Config {
            base_url: server.base_url(),
            ..Config::default()
        });

        let generation = client
            .generate_filter("f-100", "show me dns queries")
            .expect("Generation failed");
        assert_eq!(generation.filter, "udp.port == 53");

        let execution = client
            .execute_filter("f-100", &generation.filter, 1, 25)
            .expect("Execution failed");
        assert_eq!(execution.total_matches, 0);
    }
}

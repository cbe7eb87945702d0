use crate::config::Config;
use crate::errors::Error;

use log::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Backend route table.
pub mod endpoints {
    pub const FILES: &'static str = "/files";

    pub fn file_metadata(file_id: &str) -> String {
        format!("/files/{}", file_id)
    }

    pub fn file_download(file_id: &str) -> String {
        format!("/files/{}/download", file_id)
    }

    pub fn analysis_summary(file_id: &str) -> String {
        format!("/analysis/{}/summary", file_id)
    }

    pub fn protocol_stats(file_id: &str) -> String {
        format!("/analysis/{}/protocols", file_id)
    }

    pub fn five_ws(file_id: &str) -> String {
        format!("/analysis/{}/five-ws", file_id)
    }

    pub fn conversations(file_id: &str) -> String {
        format!("/conversations/{}", file_id)
    }

    pub fn conversation_detail(conversation_id: &str) -> String {
        format!("/conversations/detail/{}", conversation_id)
    }

    pub fn timeline(file_id: &str) -> String {
        format!("/timeline/{}", file_id)
    }

    pub fn timeline_range(file_id: &str) -> String {
        format!("/timeline/{}/range", file_id)
    }

    pub fn generate_story(file_id: &str) -> String {
        format!("/story/generate/{}", file_id)
    }

    pub fn story(story_id: &str) -> String {
        format!("/story/{}", story_id)
    }

    pub fn generate_filter(file_id: &str) -> String {
        format!("/filter/generate/{}", file_id)
    }

    pub fn execute_filter(file_id: &str) -> String {
        format!("/filter/execute/{}", file_id)
    }
}

/// Body the backend attaches to error statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub(crate) fn error_message(response: ureq::Response) -> Option<String> {
    response
        .into_json::<ErrorBody>()
        .ok()
        .and_then(|body| body.message.or(body.error))
}

/// Shared HTTP client. Injects the bearer token and json content headers on
/// every request and maps error statuses onto crate errors. Cheap to clone,
/// clones share the token cell.
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    token: Arc<Mutex<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.request_timeout)
            .build();
        ApiClient {
            agent,
            base_url: config.trimmed_base_url().to_owned(),
            token: Arc::new(Mutex::new(config.api_token.clone())),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: &str, path: &str) -> ureq::Request {
        let mut request = self
            .agent
            .request(method, &self.url(path))
            .set("Accept", "application/json");
        let token = self.token.lock().ok().and_then(|guard| guard.clone());
        if let Some(token) = token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }
        request
    }

    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {}", path);
        let mut request = self.request("GET", path);
        for (name, value) in query {
            request = request.query(name, value);
        }
        let response = request.call().map_err(|e| self.fail(path, e))?;
        response.into_json::<T>().map_err(Error::Io)
    }

    pub(crate) fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {}", path);
        let mut request = self
            .request("POST", path)
            .set("Content-Type", "application/json");
        for (name, value) in query {
            request = request.query(name, value);
        }
        let response = request
            .send_json(serde_json::to_value(body)?)
            .map_err(|e| self.fail(path, e))?;
        response.into_json::<T>().map_err(Error::Io)
    }

    pub(crate) fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        debug!("POST {}", path);
        let response = self
            .request("POST", path)
            .call()
            .map_err(|e| self.fail(path, e))?;
        response.into_json::<T>().map_err(Error::Io)
    }

    /// Map a failed request onto crate errors. A 401 also drops the held token
    /// so later requests go out unauthenticated rather than repeating a dead
    /// credential.
    pub(crate) fn fail(&self, path: &str, err: ureq::Error) -> Error {
        match err {
            ureq::Error::Status(401, _) => {
                warn!("401 from {}, dropping bearer token", path);
                self.clear_token();
                Error::Unauthorized
            }
            ureq::Error::Status(500, response) => {
                let message = error_message(response);
                error!("Server error from {}: {:?}", path, message);
                Error::Backend {
                    status: 500,
                    message,
                }
            }
            ureq::Error::Status(status, _) => Error::UnexpectedStatus {
                status,
                path: path.to_owned(),
            },
            ureq::Error::Transport(transport) => Error::from(transport),
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn has_token(&self) -> bool {
        self.token.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }
}

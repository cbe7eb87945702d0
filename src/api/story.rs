use crate::client::{endpoints, ApiClient};
use crate::errors::Error;
use crate::model::Story;

use log::info;

impl ApiClient {
    /// Ask the backend to narrate a capture. Generation runs an LLM server
    /// side and can take a while; the request timeout covers it.
    pub fn generate_story(&self, file_id: &str) -> Result<Story, Error> {
        info!("Requesting story generation for {}", file_id);
        self.post_empty(&endpoints::generate_story(file_id))
    }

    pub fn story(&self, story_id: &str) -> Result<Story, Error> {
        self.get_json(&endpoints::story(story_id), &[])
    }
}

use crate::client::{endpoints, ApiClient};
use crate::errors::Error;
use crate::model::{Conversation, ConversationRecord, PagedResponse};

use serde::Deserialize;

/// List endpoints answered with a bare array before pagination landed in the
/// backend; both shapes are still in the wild.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConversationListing {
    Paged(PagedResponse<ConversationRecord>),
    Bare(Vec<ConversationRecord>),
}

impl ApiClient {
    pub fn conversations(
        &self,
        file_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResponse<Conversation>, Error> {
        let listing: ConversationListing = self.get_json(
            &endpoints::conversations(file_id),
            &[
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
            ],
        )?;

        Ok(match listing {
            ConversationListing::Paged(paged) => PagedResponse {
                data: paged.data.into_iter().map(Conversation::from).collect(),
                page: paged.page,
                page_size: paged.page_size,
                total: paged.total,
                total_pages: paged.total_pages,
            },
            ConversationListing::Bare(records) => {
                let total = records.len() as u64;
                let total_pages = if records.is_empty() { 0 } else { 1 };
                PagedResponse {
                    data: records.into_iter().map(Conversation::from).collect(),
                    page: 1,
                    page_size: total.max(1) as u32,
                    total,
                    total_pages,
                }
            }
        })
    }

    pub fn conversation_detail(&self, conversation_id: &str) -> Result<Conversation, Error> {
        let record: ConversationRecord =
            self.get_json(&endpoints::conversation_detail(conversation_id), &[])?;
        Ok(record.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::{Reply, StubServer};

    const RECORD: &'static str = r#"{"conversationId":"c-1","srcIp":"10.10.10.30","srcPort":57656,"dstIp":"10.10.10.10","dstPort":102,"protocol":"TCP","packetCount":11,"totalBytes":666,"startTime":1445340250000,"endTime":1445340286000,"durationMs":36000}"#;

    fn client_for(server: &StubServer) -> ApiClient {
        ApiClient::new(&Config {
            base_url: server.base_url(),
            ..Config::default()
        })
    }

    #[test]
    fn test_paged_listing() {
        let _ = env_logger::try_init();

        let body = format!(
            r#"{{"data":[{}],"page":1,"pageSize":25,"total":1,"totalPages":1}}"#,
            RECORD
        );
        let server = StubServer::start(vec![Reply::json(200, &body)]);

        let paged = client_for(&server)
            .conversations("f-100", 1, 25)
            .expect("Fetch failed");
        assert_eq!(paged.total, 1);
        assert_eq!(paged.data[0].protocol.name, "TCP");
    }

    #[test]
    fn test_bare_listing_normalizes_to_single_page() {
        let _ = env_logger::try_init();

        let body = format!("[{}]", RECORD);
        let server = StubServer::start(vec![Reply::json(200, &body)]);

        let paged = client_for(&server)
            .conversations("f-100", 1, 25)
            .expect("Fetch failed");
        assert_eq!(paged.page, 1);
        assert_eq!(paged.total, 1);
        assert_eq!(paged.total_pages, 1);
        assert_eq!(paged.data[0].source().port, 57_656);
    }
}

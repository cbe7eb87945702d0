use serde::Deserialize;

/// Paged wrapper the backend uses for list endpoints.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_paged_response() {
        let msg = r#"{"data":["a","b"],"page":2,"pageSize":2,"total":5,"totalPages":3}"#;

        let page: PagedResponse<String> = serde_json::from_str(msg).expect("Failed to parse");
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total_pages, 3);
    }
}

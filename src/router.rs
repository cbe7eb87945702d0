//! Maps url paths onto pages and drives fetch-then-render for each one.

use crate::client::ApiClient;
use crate::config::Config;
use crate::errors::Error;
use crate::graph::build_network_graph;
use crate::model::{FileRecord, RecentFile};
use crate::render::{
    ConversationsPage, ErrorPage, FilesPage, FilterPage, NetworkPage, OverviewPage, StoryPage,
    TimelinePage,
};
use crate::store::Store;
use crate::watch::SummaryWatcher;

use askama::Template;
use log::*;
use std::path::{Path, PathBuf};

const CONVERSATION_PAGE_SIZE: u32 = 25;
/// The diagram wants every conversation; the cap is applied client side.
const GRAPH_FETCH_PAGE_SIZE: u32 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Files,
    Overview {
        file_id: String,
    },
    Conversations {
        file_id: String,
        page: u32,
    },
    Timeline {
        file_id: String,
    },
    Story {
        file_id: String,
    },
    FilterGenerator {
        file_id: String,
        query: Option<String>,
        page: u32,
    },
    NetworkDiagram {
        file_id: String,
    },
    NotFound {
        path: String,
    },
}

impl Route {
    pub fn parse(target: &str) -> Route {
        let (path, query) = match target.find('?') {
            Some(index) => (&target[..index], &target[index + 1..]),
            None => (target, ""),
        };
        let params = parse_query(query);
        let page = params
            .iter()
            .find(|(name, _)| name == "page")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(1u32)
            .max(1);

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Files,
            ["analysis", file_id] => Route::Overview {
                file_id: (*file_id).to_owned(),
            },
            ["analysis", file_id, "conversations"] => Route::Conversations {
                file_id: (*file_id).to_owned(),
                page,
            },
            ["analysis", file_id, "timeline"] => Route::Timeline {
                file_id: (*file_id).to_owned(),
            },
            ["analysis", file_id, "story"] => Route::Story {
                file_id: (*file_id).to_owned(),
            },
            ["analysis", file_id, "filter-generator"] => Route::FilterGenerator {
                file_id: (*file_id).to_owned(),
                query: params
                    .into_iter()
                    .find(|(name, _)| name == "q")
                    .map(|(_, value)| value)
                    .filter(|value| !value.is_empty()),
                page,
            },
            ["analysis", file_id, "network-diagram"] => Route::NetworkDiagram {
                file_id: (*file_id).to_owned(),
            },
            _ => Route::NotFound {
                path: path.to_owned(),
            },
        }
    }

    /// Canonical path for the route, the inverse of [`Route::parse`].
    pub fn path(&self) -> String {
        match self {
            Route::Files => String::from("/"),
            Route::Overview { file_id } => format!("/analysis/{}", file_id),
            Route::Conversations { file_id, page } => {
                if *page > 1 {
                    format!("/analysis/{}/conversations?page={}", file_id, page)
                } else {
                    format!("/analysis/{}/conversations", file_id)
                }
            }
            Route::Timeline { file_id } => format!("/analysis/{}/timeline", file_id),
            Route::Story { file_id } => format!("/analysis/{}/story", file_id),
            Route::FilterGenerator {
                file_id,
                query,
                page,
            } => match query {
                Some(query) => format!(
                    "/analysis/{}/filter-generator?q={}&page={}",
                    file_id,
                    crate::render::urlencode(query),
                    page
                ),
                None => format!("/analysis/{}/filter-generator", file_id),
            },
            Route::NetworkDiagram { file_id } => format!("/analysis/{}/network-diagram", file_id),
            Route::NotFound { path } => path.clone(),
        }
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.find('=') {
            Some(index) => (
                percent_decode(&pair[..index]),
                percent_decode(&pair[index + 1..]),
            ),
            None => (percent_decode(pair), String::new()),
        })
        .collect()
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match decoded {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Page dispatcher: resolves the analysis summary through the watcher, calls
/// the feature binding for the tab, and renders the template. Every analysis
/// tab loads behind the summary, the shell gate for the whole analysis view.
pub struct Pages {
    client: ApiClient,
    watcher: SummaryWatcher,
    store: Store,
    store_path: PathBuf,
    max_conversations: usize,
}

impl Pages {
    pub fn new(config: Config) -> Self {
        let client = ApiClient::new(&config);
        let watcher = SummaryWatcher::new(client.clone(), &config);
        let store = Store::load(&config.store_path);
        Pages {
            client,
            watcher,
            store,
            store_path: config.store_path,
            max_conversations: config.max_conversations,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn save_store(&self) -> Result<(), Error> {
        self.store.save(&self.store_path)
    }

    /// Upload a capture and remember it in the recent list. The caller
    /// navigates to the overview route afterwards, where the watcher picks up
    /// the processing state.
    pub fn upload_capture<P, F>(&mut self, capture: P, on_progress: F) -> Result<FileRecord, Error>
    where
        P: AsRef<Path>,
        F: FnMut(u64, u64),
    {
        let record = self.client.upload_capture(capture, on_progress)?;
        self.store.add_recent_file(RecentFile {
            id: record.file_id.clone(),
            name: record.file_name.clone(),
            size: record.file_size,
            uploaded_at: record.uploaded_at,
        });
        self.save_store()?;
        Ok(record)
    }

    /// Render a route, mapping failures onto the retry-capable error panel.
    pub async fn render(&mut self, route: &Route) -> String {
        match self.render_page(route).await {
            Ok(html) => html,
            Err(e) => {
                error!("Failed to render {}: {}", route.path(), e);
                let title = match route {
                    Route::Files => "Failed to Load Captures",
                    _ => "Failed to Load Analysis",
                };
                ErrorPage::from_error(title, &e, &route.path())
                    .render()
                    .unwrap_or_else(|_| e.to_string())
            }
        }
    }

    pub async fn render_page(&mut self, route: &Route) -> Result<String, Error> {
        match route {
            Route::Files => Ok(FilesPage::from_recent(self.store.recent_files()).render()?),
            Route::Overview { file_id } => {
                let summary = self.watcher.wait_for_summary(&mut self.store, file_id).await?;
                Ok(OverviewPage::build(&summary).render()?)
            }
            Route::Conversations { file_id, page } => {
                self.watcher.wait_for_summary(&mut self.store, file_id).await?;
                let client = self.client.clone();
                let id = file_id.clone();
                let page = *page;
                let listing = smol::unblock(move || {
                    client.conversations(&id, page, CONVERSATION_PAGE_SIZE)
                })
                .await?;
                Ok(ConversationsPage::build(file_id, &listing).render()?)
            }
            Route::Timeline { file_id } => {
                self.watcher.wait_for_summary(&mut self.store, file_id).await?;
                let client = self.client.clone();
                let id = file_id.clone();
                let points = smol::unblock(move || client.timeline(&id)).await?;
                Ok(TimelinePage::build(file_id, &points).render()?)
            }
            Route::Story { file_id } => {
                self.watcher.wait_for_summary(&mut self.store, file_id).await?;
                let client = self.client.clone();
                let id = file_id.clone();
                let story = smol::unblock(move || client.generate_story(&id)).await?;
                Ok(StoryPage::build(&story).render()?)
            }
            Route::FilterGenerator {
                file_id,
                query,
                page,
            } => {
                self.watcher.wait_for_summary(&mut self.store, file_id).await?;
                match query {
                    None => Ok(FilterPage::empty(file_id).render()?),
                    Some(query) => {
                        let client = self.client.clone();
                        let id = file_id.clone();
                        let q = query.clone();
                        let page = *page;
                        let (generation, execution) = smol::unblock(move || {
                            let generation = client.generate_filter(&id, &q)?;
                            let execution = client.execute_filter(
                                &id,
                                &generation.filter,
                                page,
                                CONVERSATION_PAGE_SIZE,
                            )?;
                            Ok::<_, Error>((generation, execution))
                        })
                        .await?;
                        Ok(FilterPage::build(
                            file_id,
                            query,
                            &generation,
                            &execution,
                            CONVERSATION_PAGE_SIZE,
                        )
                        .render()?)
                    }
                }
            }
            Route::NetworkDiagram { file_id } => {
                let summary = self.watcher.wait_for_summary(&mut self.store, file_id).await?;
                let client = self.client.clone();
                let id = file_id.clone();
                let listing = smol::unblock(move || {
                    client.conversations(&id, 1, GRAPH_FETCH_PAGE_SIZE)
                })
                .await?;
                let graph =
                    build_network_graph(&listing.data, Some(&summary), self.max_conversations);
                Ok(NetworkPage::build(file_id, &graph).render()?)
            }
            Route::NotFound { path } => Ok(ErrorPage::not_found(path).render()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_route_table() {
        assert_eq!(Route::parse("/"), Route::Files);
        assert_eq!(Route::parse(""), Route::Files);
        assert_eq!(
            Route::parse("/analysis/f-100"),
            Route::Overview {
                file_id: "f-100".to_owned()
            }
        );
        assert_eq!(
            Route::parse("/analysis/f-100/conversations?page=3"),
            Route::Conversations {
                file_id: "f-100".to_owned(),
                page: 3
            }
        );
        assert_eq!(
            Route::parse("/analysis/f-100/filter-generator?q=show+me+dns&page=2"),
            Route::FilterGenerator {
                file_id: "f-100".to_owned(),
                query: Some("show me dns".to_owned()),
                page: 2
            }
        );
        assert_eq!(
            Route::parse("/analysis/f-100/network-diagram"),
            Route::NetworkDiagram {
                file_id: "f-100".to_owned()
            }
        );
        assert!(matches!(Route::parse("/nope/nope"), Route::NotFound { .. }));
    }

    #[test]
    fn path_round_trips() {
        let routes = vec![
            Route::Files,
            Route::Overview {
                file_id: "f-1".to_owned(),
            },
            Route::Conversations {
                file_id: "f-1".to_owned(),
                page: 4,
            },
            Route::Timeline {
                file_id: "f-1".to_owned(),
            },
            Route::Story {
                file_id: "f-1".to_owned(),
            },
            Route::FilterGenerator {
                file_id: "f-1".to_owned(),
                query: Some("dns traffic".to_owned()),
                page: 2,
            },
            Route::NetworkDiagram {
                file_id: "f-1".to_owned(),
            },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn bad_page_numbers_fall_back_to_one() {
        assert_eq!(
            Route::parse("/analysis/f-1/conversations?page=zero"),
            Route::Conversations {
                file_id: "f-1".to_owned(),
                page: 1
            }
        );
        assert_eq!(
            Route::parse("/analysis/f-1/conversations?page=0"),
            Route::Conversations {
                file_id: "f-1".to_owned(),
                page: 1
            }
        );
    }

    #[test]
    fn files_page_renders_without_a_backend() {
        let _ = env_logger::try_init();

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config {
            store_path: dir.path().join("store.json"),
            ..Config::default()
        };
        let mut pages = Pages::new(config);

        let html = smol::block_on(pages.render(&Route::Files));
        assert!(html.contains("Capture Files"));

        let html = smol::block_on(pages.render(&Route::NotFound {
            path: "/nope".to_owned(),
        }));
        assert!(html.contains("Page Not Found"));
    }
}

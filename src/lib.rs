//! # tracepcap-client
//!
//! Client for a tracepcap capture-analysis service. The backend does the heavy
//! lifting over pcap files (parsing, conversation reconstruction, anomaly
//! detection, narrative generation); this crate is the typed REST surface over
//! it plus the presentation layer: view models, the conversation graph
//! builder, a summary polling watcher, a small persisted store, and askama
//! page rendering.
//!
//! ```rust,no_run
//! use tracepcap_client::prelude::*;
//!
//! fn main() {
//!     let mut pages = Pages::new(Config::default());
//!
//!     smol::block_on(async move {
//!         let record = pages
//!             .upload_capture("capture.pcap", |sent, total| {
//!                 log::debug!("upload {}/{}", sent, total)
//!             })
//!             .expect("Upload failed");
//!
//!         let route = Route::parse(&format!("/analysis/{}", record.file_id));
//!         let html = pages.render(&route).await;
//!         println!("{}", html);
//!     })
//! }
//! ```
#![deny(unused_must_use, bare_trait_objects)]
pub mod api;
pub mod client;
pub mod config;
mod errors;
pub mod format;
pub mod graph;
pub mod model;
pub mod render;
pub mod router;
pub mod store;
#[cfg(test)]
pub(crate) mod testing;
pub mod watch;

pub mod prelude {
    pub use super::api::SummaryProbe;
    pub use super::client::ApiClient;
    pub use super::config::Config;
    pub use super::errors::Error;
    pub use super::graph::{build_network_graph, NetworkGraph, DEFAULT_MAX_CONVERSATIONS};
    pub use super::model::*;
    pub use super::router::{Pages, Route};
    pub use super::store::Store;
    pub use super::watch::{SummaryWatcher, WatchHandle};

    pub use chrono;
}

pub use errors::Error;

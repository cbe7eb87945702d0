//! Per-feature bindings over [`ApiClient`](crate::client::ApiClient), one
//! module per backend feature. Each call adapts the wire DTOs into the view
//! models under [`model`](crate::model).

mod analysis;
mod conversations;
mod files;
mod filter;
mod story;
mod timeline;

pub use analysis::SummaryProbe;
pub use files::ProgressReader;

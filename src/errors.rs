use std::time::Duration;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("IO Error: {0:?}")]
    Io(#[from] std::io::Error),
    #[error("Utf8 conversion error: {0:?}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Serde json conversion error: {0:?}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Askama error: {0:?}")]
    Askama(#[from] askama::Error),
    #[error("Transport error: {0:?}")]
    Transport(Box<ureq::Transport>),
    #[error("Unexpected status {} from {}", status, path)]
    UnexpectedStatus { status: u16, path: String },
    #[error("Authorization rejected by server, bearer token dropped")]
    Unauthorized,
    #[error("Backend failure ({}): {}", status, message.as_deref().unwrap_or("no detail"))]
    Backend { status: u16, message: Option<String> },
    #[error("Analysis still processing after {0:?}")]
    AnalysisTimeout(Duration),
    #[error("Watch cancelled")]
    Cancelled,
    #[error("{0}", msg)]
    Custom { msg: String },
}

impl From<ureq::Transport> for Error {
    fn from(v: ureq::Transport) -> Self {
        Error::Transport(Box::new(v))
    }
}

impl Error {
    /// Whether re-issuing the request may succeed. Every category surfaced to a
    /// page is retry-capable except a rejected token.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Error::Unauthorized)
    }
}

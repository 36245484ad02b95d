//! Errors surfaced by request construction and execution

use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The protocol request could not be formed from the accumulated fields.
///
/// Raised before any network activity takes place.
#[derive(Error, Debug)]
pub enum ConstructionError {
    #[error("invalid HTTP method {method:?}: {source}")]
    InvalidMethod {
        method: String,
        #[source]
        source: http::method::InvalidMethod,
    },

    #[error("invalid request URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid header name {name:?}: {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: InvalidHeaderName,
    },

    #[error("invalid value for header {name:?}: {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: InvalidHeaderValue,
    },
}

/// Errors returned by [`Request::execute`](crate::Request::execute) and
/// [`HttpClientConfig::build_client`](crate::HttpClientConfig::build_client).
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to construct request: {0}")]
    Construction(#[from] ConstructionError),

    /// The client could not complete the call. The client's own error is
    /// carried unchanged.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl Error {
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

//! Error types for the unich-airdrop crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading input files or talking to the airdrop API.
#[derive(Debug, Error)]
pub enum AirdropError {
    /// An input file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The token file yielded no tokens.
    #[error("no tokens found in {}", .0.display())]
    NoTokens(PathBuf),

    /// A token cannot be sent as an HTTP header value.
    #[error("token contains characters not allowed in a header")]
    InvalidToken,

    /// The configured base URL or an endpoint path is not a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A proxy URI was rejected by reqwest.
    #[error("invalid proxy {uri}: {source}")]
    InvalidProxy {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    /// Building the HTTP client failed.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (connect, proxy or middleware failure).
    #[error("request failed: {0}")]
    Request(#[from] reqwest_middleware::Error),

    /// The API answered with a non-success status.
    #[error("api returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response envelope carried no `data` payload.
    #[error("response from {0} carried no data")]
    MissingData(&'static str),
}

impl From<reqwest::Error> for AirdropError {
    fn from(err: reqwest::Error) -> Self {
        AirdropError::Request(reqwest_middleware::Error::Reqwest(err))
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("invalid server url {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("server url {0} cannot carry a request path")]
    OpaqueBaseUrl(String),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status} for {target}")]
    Status { status: u16, target: String },
    #[error("malformed response body from {target}: {source}")]
    Decode {
        target: String,
        source: serde_json::Error,
    },
}

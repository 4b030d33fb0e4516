//! Error types shared by the client, the walker and the printers

use std::io;
use std::path::PathBuf;

/// Broad category of a failure, used to decide how the CLI reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The credential file is missing, unreadable or unusable.
    Configuration,
    /// The token exchange failed.
    Authentication,
    /// A call to the remote API failed.
    Remote,
    /// Writing output failed.
    Output,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file '{}' does not exist or is not a file", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("cannot read config file '{}': {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("invalid config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot load private key: {0}")]
    PrivateKey(String),

    #[error("cannot build assertion: {0}")]
    Assertion(#[source] serde_json::Error),

    #[error("authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("token request failed: {0}")]
    TokenRequest(#[source] reqwest::Error),

    #[error("invalid API base URL '{url}': {message}")]
    ApiBase { url: String, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("error writing output: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConfigNotFound(_)
            | Error::ConfigRead { .. }
            | Error::ConfigParse { .. }
            | Error::PrivateKey(_)
            | Error::ApiBase { .. }
            | Error::InvalidPageSize => ErrorKind::Configuration,
            Error::Assertion(_) | Error::Auth { .. } | Error::TokenRequest(_) => {
                ErrorKind::Authentication
            }
            Error::Http(_) | Error::Api { .. } => ErrorKind::Remote,
            Error::Io(_) => ErrorKind::Output,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for azrm commands

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parameter set cannot be resolved using the specified named parameters: {0}")]
    AmbiguousOrMissingParameters(String),

    #[error("{kind} with the specified name '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{kind} '{name}' was not found")]
    NotFound { kind: &'static str, name: String },

    #[error("'{name}' matched {count} {kind} entries, expected exactly one")]
    AmbiguousMatch {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("'{value}' is not a valid {kind}; expected one of: {expected}")]
    InvalidEnumValue {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("Invalid resource id '{id}': {reason}")]
    InvalidResourceId { id: String, reason: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Remote call failed{}: {message}", status_suffix(.status))]
    RemoteCall {
        status: Option<u16>,
        code: Option<String>,
        message: String,
    },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl Error {
    /// HTTP status of a failed remote call, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteCall { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_remote_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Error::RemoteCall {
            status: err.status().map(|s| s.as_u16()),
            code: None,
            message: err.to_string(),
        }
    }
}

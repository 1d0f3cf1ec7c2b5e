use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Export to {} failed: {message}", .path.display())]
    Export { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn export(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::Export {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Why the article listing could not be retrieved.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("could not connect to the API: {0}")]
    Connection(String),

    #[error("API key rejected (HTTP {0})")]
    Unauthorized(u16),

    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed API response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout(err.to_string());
        }
        if err.is_decode() {
            return FetchError::Malformed(err.to_string());
        }
        if let Some(status) = err.status() {
            let code = status.as_u16();
            return match code {
                401 | 403 => FetchError::Unauthorized(code),
                _ => FetchError::Status {
                    status: code,
                    body: String::new(),
                },
            };
        }
        FetchError::Connection(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.into())
    }
}

/// A problem found while normalizing one raw API record.
///
/// The record is still kept: the offending field is replaced by its default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataIssue {
    #[error("missing id, using 0")]
    MissingId,

    #[error("missing title, using \"(untitled)\"")]
    MissingTitle,

    #[error("missing published_at, using the Unix epoch")]
    MissingPublishedAt,

    #[error("unparseable published_at {0:?}, using the Unix epoch")]
    InvalidPublishedAt(String),

    #[error("invalid {0}, using 0")]
    InvalidCount(&'static str),

    #[error("record is not an object, using defaults")]
    NotAnObject,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages_are_distinct() {
        let messages = [
            FetchError::Timeout("30s".to_string()).to_string(),
            FetchError::Connection("refused".to_string()).to_string(),
            FetchError::Unauthorized(401).to_string(),
            FetchError::Status { status: 500, body: "boom".to_string() }.to_string(),
            FetchError::Malformed("expected array".to_string()).to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(messages[2].contains("401"));
    }

    #[test]
    fn test_export_error_names_path() {
        let err = Error::export("/nope/out.csv", "permission denied");
        assert_eq!(err.to_string(), "Export to /nope/out.csv failed: permission denied");
    }
}

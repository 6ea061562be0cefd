//! Error types for API calls.
//!
//! The taxonomy is deliberately flat: every failure a caller can observe is
//! one of four cases, and nothing is retried or recovered internally. A
//! streamed call fails at the point of iteration where the error occurred,
//! after yielding any values decoded before it.

use thiserror::Error;

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a status outside 200-299.
    ///
    /// The raw body is captured as text; error bodies are not guaranteed to
    /// match the endpoint's format and are never force-decoded.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, best-effort text.
        body: String,
    },

    /// A payload could not be parsed as the format it was declared to be.
    #[error("failed to decode response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Connection, DNS, or timeout failure below the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid request construction; a programmer error, not a runtime
    /// condition to handle.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the HTTP status code if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = Error::Status {
            status: 404,
            body: "Not found".into(),
        };
        assert_eq!(err.status(), Some(404));

        let err = Error::Config("bad endpoint".into());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_decode_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: Error = serde_err.into();
        assert!(matches!(err, Error::Decode(_)));
    }
}

//! Authenticated HTTP transport.
//!
//! A [`TokenSession`] wraps one `reqwest::Client` with the
//! `Authorization: Bearer <token>` header installed once at construction.
//! The session is the only long-lived shared resource in the crate; it is
//! created once per [`Client`](crate::Client) and shared read-only by every
//! namespace.
//!
//! The underlying client is built without a total request timeout: streamed
//! responses are expected to stay open indefinitely, and per-call deadlines
//! are applied by the requestor instead (see [`Timeout`](crate::Timeout)).

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::error::Error;

/// A `reqwest::Client` using bearer-token authentication.
#[derive(Debug, Clone)]
pub struct TokenSession {
    client: reqwest::Client,
}

impl TokenSession {
    /// Builds a session authenticated with the given personal access token.
    ///
    /// ## Errors
    ///
    /// [`Error::Config`] if the token is not a valid header value or the
    /// HTTP client cannot be constructed.
    pub fn new(token: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::try_from(format!("Bearer {token}"))
            .map_err(|e| Error::Config(format!("invalid token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self { client })
    }

    /// Builds an unauthenticated session for public endpoints.
    ///
    /// ## Errors
    ///
    /// [`Error::Config`] if the HTTP client cannot be constructed.
    pub fn anonymous() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(Error::Transport)?;
        Ok(Self { client })
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_builds() {
        assert!(TokenSession::new("lip_abc123").is_ok());
        assert!(TokenSession::anonymous().is_ok());
    }

    #[test]
    fn test_token_with_control_chars_rejected() {
        let err = TokenSession::new("bad\ntoken").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

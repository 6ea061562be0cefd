//! Endpoint descriptors.
//!
//! An [`Endpoint`] is an immutable-by-convention value describing one API
//! operation: where it lives, which verb it uses, whether the response is a
//! single document or a line stream, which [`Format`] governs decoding, and
//! an optional post-decode converter. Endpoints carry no behavior of their
//! own; they are the argument to [`Requestor`](crate::Requestor) calls.
//!
//! Descriptors are cheap value objects built fresh at each call site. The
//! fields are public so a caller may rebind `format` between calls when the
//! same path is consumed in more than one shape (PGN vs. NDJSON exports).

use crate::format::{Converter, Format};
use crate::method::Method;

/// Describes one API operation.
///
/// ## Examples
///
/// ```rust
/// use lichess_client::{Endpoint, Format};
///
/// let account = Endpoint::get("api/account");
/// let games = Endpoint::get("api/games/user/alice")
///     .streaming()
///     .format(Format::Ndjson);
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Resource path, resolved against the requestor's base URL.
    pub path: String,
    /// HTTP verb, GET by default.
    pub method: Method,
    /// Whether the response body is consumed as newline-delimited records.
    pub stream: bool,
    /// Decoding format; `None` uses the requestor's configured default.
    pub format: Option<Format>,
    /// Post-decode transform; `None` means identity.
    pub converter: Option<Converter>,
}

impl Endpoint {
    /// Creates a GET endpoint for the given path.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::Get,
            stream: false,
            format: None,
            converter: None,
        }
    }

    /// Creates a POST endpoint for the given path.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(path)
        }
    }

    /// Marks the response as a line stream.
    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    /// Sets the decoding format.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the post-decode converter.
    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_defaults() {
        let ep = Endpoint::get("api/account");
        assert_eq!(ep.path, "api/account");
        assert_eq!(ep.method, Method::Get);
        assert!(!ep.stream);
        assert!(ep.format.is_none());
        assert!(ep.converter.is_none());
    }

    #[test]
    fn test_post_defaults() {
        let ep = Endpoint::post("api/users");
        assert_eq!(ep.method, Method::Post);
        assert!(!ep.stream);
    }

    #[test]
    fn test_chaining() {
        let ep = Endpoint::get("api/games/user/alice")
            .streaming()
            .format(Format::Ndjson);
        assert!(ep.stream);
        assert_eq!(ep.format, Some(Format::Ndjson));
    }

    #[test]
    fn test_format_rebind() {
        // Call sites may switch format on a reused descriptor.
        let mut ep = Endpoint::get("api/games/user/alice")
            .streaming()
            .format(Format::Pgn);
        ep.format = Some(Format::Ndjson);
        assert_eq!(ep.format, Some(Format::Ndjson));
    }
}

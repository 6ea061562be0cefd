//! Wire formats and response decoding.
//!
//! Each [`Format`] names one content type the lichess API can answer with,
//! provides the `Accept` header value for requesting it, and decodes a raw
//! payload in two stages: [`parse`](Format::parse) (format-specific
//! deserialization) then [`handle`](Format::handle) (parse plus an optional
//! post-decode converter).
//!
//! Formats are stateless; the enum variants play the role of process-wide
//! constants. Text-shaped formats (plain text and PGN) decode to
//! [`Value::String`], the JSON family to whatever document the body holds.

use serde_json::Value;

use crate::error::Error;

/// A post-decode transform applied to a parsed payload.
///
/// Converters are plain functions so endpoint descriptors stay `Copy`-cheap
/// to build per call site. The converter tables in [`crate::models`] are the
/// usual source of these.
pub type Converter = fn(Value) -> Value;

/// Content types understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `text/plain` - raw text, passed through unchanged.
    Text,
    /// `application/json` - a single JSON document.
    Json,
    /// `application/x-ndjson` - newline-delimited JSON records.
    Ndjson,
    /// `application/vnd.lichess.v3+json` - lichess vendor JSON.
    Lijson,
    /// `application/x-chess-pgn` - PGN game notation, opaque text.
    Pgn,
}

impl Format {
    /// The MIME type, used verbatim as the `Accept` request header.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Json => "application/json",
            Self::Ndjson => "application/x-ndjson",
            Self::Lijson => "application/vnd.lichess.v3+json",
            Self::Pgn => "application/x-chess-pgn",
        }
    }

    /// Returns `true` for formats that decode to a JSON document.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::Ndjson | Self::Lijson)
    }

    /// Parses a raw payload according to this format.
    ///
    /// JSON-family formats deserialize the text as one JSON document; text
    /// and PGN return the payload unchanged as a [`Value::String`].
    ///
    /// ## Errors
    ///
    /// [`Error::Decode`] if a JSON-family payload is malformed.
    pub fn parse(&self, raw: &str) -> Result<Value, Error> {
        if self.is_json() {
            Ok(serde_json::from_str(raw)?)
        } else {
            Ok(Value::String(raw.to_owned()))
        }
    }

    /// Parses a raw payload and applies the converter (identity when absent).
    ///
    /// PGN payloads are opaque text blocks, never keyed documents, so the
    /// PGN format ignores any supplied converter rather than letting a
    /// JSON-oriented one silently no-op or panic on a string.
    pub fn handle(&self, raw: &str, converter: Option<Converter>) -> Result<Value, Error> {
        let parsed = self.parse(raw)?;
        match (self, converter) {
            (Self::Pgn, _) | (_, None) => Ok(parsed),
            (_, Some(convert)) => Ok(convert(parsed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upcase(value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        }
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(Format::Json.mime_type(), "application/json");
        assert_eq!(Format::Ndjson.mime_type(), "application/x-ndjson");
        assert_eq!(Format::Lijson.mime_type(), "application/vnd.lichess.v3+json");
        assert_eq!(Format::Pgn.mime_type(), "application/x-chess-pgn");
        assert_eq!(Format::Text.mime_type(), "text/plain");
    }

    #[test]
    fn test_json_parse_roundtrip() {
        // parse(serialize(x)) == x for any JSON-representable value
        for value in [
            json!({"username": "alice", "rating": 2401}),
            json!([1, 2, 3]),
            json!("just a string"),
            json!(42.5),
            json!(true),
            json!(null),
        ] {
            for fmt in [Format::Json, Format::Ndjson, Format::Lijson] {
                let serialized = serde_json::to_string(&value).unwrap();
                assert_eq!(fmt.parse(&serialized).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_text_parse_is_identity() {
        let raw = "anything at all {not json";
        assert_eq!(Format::Text.parse(raw).unwrap(), Value::String(raw.into()));
        assert_eq!(Format::Pgn.parse(raw).unwrap(), Value::String(raw.into()));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = Format::Json.parse("{not valid").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_handle_defaults_to_identity() {
        let raw = r#"{"a":1}"#;
        assert_eq!(
            Format::Json.handle(raw, None).unwrap(),
            Format::Json.parse(raw).unwrap()
        );
    }

    #[test]
    fn test_handle_applies_converter() {
        let converted = Format::Text.handle("hello", Some(upcase)).unwrap();
        assert_eq!(converted, Value::String("HELLO".into()));
    }

    #[test]
    fn test_pgn_ignores_converter() {
        let pgn = "[Event \"Casual Blitz\"]\n1. e4 e5 2. Nf3 *";
        let with = Format::Pgn.handle(pgn, Some(upcase)).unwrap();
        let without = Format::Pgn.handle(pgn, None).unwrap();
        assert_eq!(with, without);
        assert_eq!(with, Value::String(pgn.into()));
    }
}

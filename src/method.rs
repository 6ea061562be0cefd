//! HTTP method types for the lichess API.

use strum::{Display, EnumString};

/// HTTP verbs used by the lichess API.
///
/// The API only ever issues GET and POST requests; mutation endpoints
/// (moves, chat, challenge actions) are all POST.
///
/// ## Examples
///
/// ```rust
/// use lichess_client::Method;
///
/// let method = Method::Get;
/// assert!(!method.has_body());
///
/// // Parse from string
/// let parsed: Method = "POST".parse().unwrap();
/// assert_eq!(parsed, Method::Post);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// HTTP GET - Retrieve a resource.
    #[default]
    Get,
    /// HTTP POST - Trigger an action or submit a payload.
    Post,
}

impl Method {
    /// Returns `true` if this method typically carries a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        method.to_reqwest()
    }
}

//! Resource namespaces.
//!
//! Every namespace is a thin layer over the shared [`Requestor`]: methods
//! assemble query parameters and payloads, describe the call with an
//! [`Endpoint`](crate::Endpoint), and either await the single decoded value
//! or hand back the stream for the caller to iterate.

mod account;
mod board;
mod bots;
mod broadcasts;
mod challenges;
mod games;
mod simuls;
mod studies;
mod teams;
mod tournaments;
mod users;

use std::sync::Arc;

pub use account::Account;
pub use board::Board;
pub use bots::Bots;
pub use broadcasts::{BroadcastOptions, Broadcasts};
pub use challenges::{ChallengeOptions, Challenges};
pub use games::{ExportOptions, Games, PlayerGamesQuery};
pub use simuls::Simuls;
pub use studies::Studies;
pub use teams::Teams;
pub use tournaments::{TournamentOptions, Tournaments};
pub use users::Users;

use serde_json::{Map, Value};
use url::Url;

use crate::error::Error;
use crate::format::Format;
use crate::requestor::Requestor;
use crate::session::TokenSession;

/// Production API origin.
pub const API_URL: &str = "https://lichess.org/";

/// Main touchpoint for the API.
///
/// All endpoints are namespaced into the fields below; every namespace
/// shares one [`Requestor`] and therefore one authenticated connection pool.
///
/// ## Examples
///
/// ```rust,no_run
/// use lichess_client::Client;
///
/// # async fn example() -> Result<(), lichess_client::Error> {
/// let client = Client::new("lip_...")?;
/// let account = client.account.get().await?;
/// println!("logged in as {}", account["username"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    /// Account information for the authenticated user.
    pub account: Account,
    /// Public user data, statuses, and leaderboards.
    pub users: Users,
    /// Team membership.
    pub teams: Teams,
    /// Game export and TV.
    pub games: Games,
    /// Creating and answering challenges.
    pub challenges: Challenges,
    /// Physical-board and external-application play.
    pub board: Board,
    /// Bot account play.
    pub bots: Bots,
    /// Arena tournaments.
    pub tournaments: Tournaments,
    /// Broadcasts of one or more games.
    pub broadcasts: Broadcasts,
    /// Simultaneous exhibitions.
    pub simuls: Simuls,
    /// Study export.
    pub studies: Studies,
}

impl Client {
    /// Creates a client for the production API with bearer authentication.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::builder().token(token).build()
    }

    /// Creates a builder for configuring base URL and export defaults.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

/// Builder for configuring a [`Client`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    token: Option<String>,
    base_url: Option<String>,
    pgn_as_default: bool,
}

impl ClientBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the personal access token. Without one the client is anonymous
    /// and restricted to public endpoints.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Overrides the API origin (for test servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Makes PGN the default format for game exports when `as_pgn` is left
    /// unset on methods that support it.
    pub fn pgn_as_default(mut self, pgn_as_default: bool) -> Self {
        self.pgn_as_default = pgn_as_default;
        self
    }

    /// Builds the [`Client`].
    ///
    /// ## Errors
    ///
    /// [`Error::Config`] if the base URL or token is malformed.
    pub fn build(self) -> Result<Client, Error> {
        let base_url = self.base_url.as_deref().unwrap_or(API_URL);
        let base_url =
            Url::parse(base_url).map_err(|e| Error::Config(format!("invalid base URL: {e}")))?;
        let session = match self.token.as_deref() {
            Some(token) => TokenSession::new(token)?,
            None => TokenSession::anonymous()?,
        };
        let requestor = Arc::new(Requestor::new(session, base_url, Format::Json));

        Ok(Client {
            account: Account::new(Arc::clone(&requestor)),
            users: Users::new(Arc::clone(&requestor)),
            teams: Teams::new(Arc::clone(&requestor)),
            games: Games::new(Arc::clone(&requestor), self.pgn_as_default),
            challenges: Challenges::new(Arc::clone(&requestor)),
            board: Board::new(Arc::clone(&requestor)),
            bots: Bots::new(Arc::clone(&requestor)),
            tournaments: Tournaments::new(Arc::clone(&requestor), self.pgn_as_default),
            broadcasts: Broadcasts::new(Arc::clone(&requestor)),
            simuls: Simuls::new(Arc::clone(&requestor)),
            studies: Studies::new(requestor),
        })
    }
}

/// Incremental JSON payload builder that omits absent fields.
#[derive(Debug, Default)]
pub(crate) struct Payload(Map<String, Value>);

impl Payload {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    pub(crate) fn opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Unwraps the `{"ok": true}` acknowledgement shape.
pub(crate) fn ok_flag(value: Value) -> bool {
    value.get("ok").and_then(Value::as_bool).unwrap_or(false)
}

/// Extracts one field from a decoded document.
pub(crate) fn take_field(mut value: Value, key: &str) -> Result<Value, Error> {
    match value.get_mut(key) {
        Some(field) => Ok(field.take()),
        None => Err(Error::Config(format!("response is missing field `{key}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_skips_absent() {
        let payload = Payload::new()
            .set("rated", true)
            .opt("days", None::<u32>)
            .opt("color", Some("white"))
            .into_value();
        assert_eq!(payload, json!({"rated": true, "color": "white"}));
    }

    #[test]
    fn test_ok_flag() {
        assert!(ok_flag(json!({"ok": true})));
        assert!(!ok_flag(json!({"ok": false})));
        assert!(!ok_flag(json!({})));
    }

    #[test]
    fn test_take_field() {
        assert_eq!(
            take_field(json!({"email": "a@b.c"}), "email").unwrap(),
            json!("a@b.c")
        );
        assert!(take_field(json!({}), "email").is_err());
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let err = Client::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

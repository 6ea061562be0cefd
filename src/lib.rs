//! Typed async client for the lichess.org HTTP API.
//!
//! The crate is built around three pieces:
//!
//! - [`Endpoint`] — a descriptor of one API operation: path, verb, whether
//!   the response is streamed line-by-line, which [`Format`] decodes it, and
//!   an optional post-decode converter.
//! - [`Format`] — the wire content types (JSON, NDJSON, vendor JSON, PGN,
//!   plain text), each knowing its `Accept` header and how to parse a
//!   payload.
//! - [`Requestor`] — the single execution engine that turns an endpoint plus
//!   call-time arguments into a lazy stream of decoded values: exactly one
//!   for unary endpoints, one per non-empty line for streaming endpoints.
//!
//! Most callers never touch these directly; the [`Client`] namespaces
//! (account, users, games, challenges, board, bots, tournaments, broadcasts,
//! teams, simuls, studies) assemble endpoints and arguments for every
//! operation the API offers.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use lichess_client::Client;
//!
//! # async fn example() -> Result<(), lichess_client::Error> {
//! let client = Client::new("lip_...")?;
//!
//! // A unary call awaits its single decoded value.
//! let account = client.account.get().await?;
//!
//! // A streaming call yields decoded records as they arrive.
//! let mut games = client
//!     .games
//!     .export_by_player("alice", None, &Default::default());
//! while let Some(game) = games.next().await {
//!     println!("{}", game?["id"]);
//! }
//! # Ok(())
//! # }
//! ```

mod clients;
mod endpoint;
mod error;
mod format;
mod method;
pub mod models;
mod requestor;
mod session;

pub use clients::{
    Account, Board, Bots, BroadcastOptions, Broadcasts, ChallengeOptions, Challenges, Client,
    ClientBuilder, ExportOptions, Games, PlayerGamesQuery, Simuls, Studies, Teams,
    TournamentOptions, Tournaments, Users, API_URL,
};
pub use endpoint::Endpoint;
pub use error::Error;
pub use format::{Converter, Format};
pub use method::Method;
pub use requestor::{ApiStream, Body, RequestArgs, Requestor, Timeout};
pub use session::TokenSession;

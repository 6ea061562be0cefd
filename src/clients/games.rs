//! Game export and TV endpoints.
//!
//! Export endpoints can answer in two shapes: structured JSON/NDJSON
//! records, or PGN text. The shape is fixed per call via `as_pgn`
//! (falling back to the client-level `pgn_as_default`), and the decoded
//! element type follows it: `Value::String` lines for PGN, objects for
//! JSON.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::take_field;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::format::Format;
use crate::models;
use crate::requestor::{ApiStream, RequestArgs, Requestor, Timeout};

/// PGN rendering options shared by export endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Include the PGN moves.
    pub moves: Option<bool>,
    /// Include the PGN tags.
    pub tags: Option<bool>,
    /// Include clock comments in the PGN moves.
    pub clocks: Option<bool>,
    /// Include analysis evaluation comments, when available.
    pub evals: Option<bool>,
    /// Include the opening name.
    pub opening: Option<bool>,
    /// Include textual annotations in the PGN.
    pub literate: Option<bool>,
}

impl ExportOptions {
    pub(crate) fn apply(&self, args: RequestArgs) -> RequestArgs {
        args.opt_param("moves", self.moves)
            .opt_param("tags", self.tags)
            .opt_param("clocks", self.clocks)
            .opt_param("evals", self.evals)
            .opt_param("opening", self.opening)
            .opt_param("literate", self.literate)
    }
}

/// Filters for exporting the games of one player.
#[derive(Debug, Clone, Default)]
pub struct PlayerGamesQuery {
    /// Lower bound on the game timestamp (epoch millis).
    pub since: Option<u64>,
    /// Upper bound on the game timestamp (epoch millis).
    pub until: Option<u64>,
    /// Limit on the number of games returned.
    pub max: Option<u32>,
    /// Filter by opponent username.
    pub vs: Option<String>,
    /// Filter by game mode (`true` rated, `false` casual).
    pub rated: Option<bool>,
    /// Filter by speed or variant.
    pub perf_type: Option<String>,
    /// Filter by the color the player had.
    pub color: Option<String>,
    /// Filter by analysis availability.
    pub analysed: Option<bool>,
    /// PGN rendering options.
    pub export: ExportOptions,
}

impl PlayerGamesQuery {
    fn apply(&self, args: RequestArgs) -> RequestArgs {
        let args = args
            .opt_param("since", self.since)
            .opt_param("until", self.until)
            .opt_param("max", self.max)
            .opt_param("vs", self.vs.as_deref())
            .opt_param("rated", self.rated)
            .opt_param("perfType", self.perf_type.as_deref())
            .opt_param("color", self.color.as_deref())
            .opt_param("analysed", self.analysed);
        self.export.apply(args)
    }
}

/// Client for games-related endpoints.
#[derive(Debug, Clone)]
pub struct Games {
    r: Arc<Requestor>,
    pgn_as_default: bool,
}

impl Games {
    pub(crate) fn new(r: Arc<Requestor>, pgn_as_default: bool) -> Self {
        Self { r, pgn_as_default }
    }

    fn use_pgn(&self, as_pgn: Option<bool>) -> bool {
        as_pgn.unwrap_or(self.pgn_as_default)
    }

    /// One finished game, as PGN text or a JSON document.
    pub async fn export(
        &self,
        game_id: &str,
        as_pgn: Option<bool>,
        options: &ExportOptions,
    ) -> Result<Value, Error> {
        let format = if self.use_pgn(as_pgn) {
            Format::Pgn
        } else {
            Format::Json
        };
        let ep = Endpoint::get(format!("game/export/{game_id}"))
            .format(format)
            .converter(models::game);
        self.r.single(&ep, options.apply(RequestArgs::new())).await
    }

    /// Streams the games of one player, as PGN lines or NDJSON records.
    pub fn export_by_player(
        &self,
        username: &str,
        as_pgn: Option<bool>,
        query: &PlayerGamesQuery,
    ) -> ApiStream {
        let format = if self.use_pgn(as_pgn) {
            Format::Pgn
        } else {
            Format::Ndjson
        };
        let ep = Endpoint::get(format!("api/games/user/{username}"))
            .streaming()
            .format(format)
            .converter(models::game);
        self.r.stream(&ep, query.apply(RequestArgs::new()))
    }

    /// Streams multiple games by ID.
    pub fn export_multi(
        &self,
        game_ids: &[&str],
        as_pgn: Option<bool>,
        options: &ExportOptions,
    ) -> ApiStream {
        let format = if self.use_pgn(as_pgn) {
            Format::Pgn
        } else {
            Format::Ndjson
        };
        let ep = Endpoint::post("games/export/_ids")
            .streaming()
            .format(format)
            .converter(models::game);
        let args = options.apply(RequestArgs::new()).text(game_ids.join(","));
        self.r.stream(&ep, args)
    }

    /// Streams the games currently being played among the given players.
    ///
    /// Games where only one of the players appears in the list are not
    /// included. The connection stays open until the caller stops
    /// iterating.
    pub fn among_players(&self, usernames: &[&str]) -> ApiStream {
        let ep = Endpoint::post("api/stream/games-by-users")
            .streaming()
            .format(Format::Ndjson)
            .converter(models::game);
        let args = RequestArgs::new()
            .text(usernames.join(","))
            .timeout(Timeout::Unbounded);
        self.r.stream(&ep, args)
    }

    /// Your currently ongoing games.
    pub async fn ongoing(&self, count: u32) -> Result<Value, Error> {
        let ep = Endpoint::get("api/account/playing");
        let args = RequestArgs::new().param("nb", count);
        let response = self.r.single(&ep, args).await?;
        take_field(response, "nowPlaying")
    }

    /// Best ongoing games in each speed and variant.
    pub async fn tv_channels(&self) -> Result<Value, Error> {
        let ep = Endpoint::get("api/tv/channels");
        self.r.single(&ep, RequestArgs::new()).await
    }
}

//! Arena tournament endpoints.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::games::ExportOptions;
use crate::clients::Payload;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::format::Format;
use crate::models;
use crate::requestor::{ApiStream, RequestArgs, Requestor};

/// Optional settings for a new tournament.
#[derive(Debug, Clone, Default)]
pub struct TournamentOptions {
    /// Tournament name; one is generated when absent.
    pub name: Option<String>,
    /// Future start time in minutes from now; overridden by `start_date`.
    pub wait_minutes: Option<u32>,
    /// When to start the tournament.
    pub start_date: Option<String>,
    /// Variant, if other than standard.
    pub variant: Option<String>,
    /// Whether games affect player ratings.
    pub rated: Option<bool>,
    /// Whether players can use berserk.
    pub berserkable: Option<bool>,
    /// Custom initial position in FEN.
    pub position: Option<String>,
    /// Password; makes the tournament private.
    pub password: Option<String>,
    /// Participation conditions, sent as `conditions.<name>` fields.
    pub conditions: Vec<(String, Value)>,
}

impl TournamentOptions {
    fn apply(&self, payload: Payload) -> Payload {
        let mut payload = payload
            .opt("name", self.name.as_deref())
            .opt("waitMinutes", self.wait_minutes)
            .opt("startDate", self.start_date.as_deref())
            .opt("variant", self.variant.as_deref())
            .opt("rated", self.rated)
            .opt("berserkable", self.berserkable)
            .opt("position", self.position.as_deref())
            .opt("password", self.password.as_deref());
        for (condition, value) in &self.conditions {
            payload = payload.set(&format!("conditions.{condition}"), value.clone());
        }
        payload
    }
}

/// Client for tournament-related endpoints.
#[derive(Debug, Clone)]
pub struct Tournaments {
    r: Arc<Requestor>,
    pgn_as_default: bool,
}

impl Tournaments {
    pub(crate) fn new(r: Arc<Requestor>, pgn_as_default: bool) -> Self {
        Self { r, pgn_as_default }
    }

    /// Recently finished, ongoing, and upcoming tournaments.
    pub async fn current(&self) -> Result<Value, Error> {
        let ep = Endpoint::get("api/tournament").converter(models::tournaments);
        self.r.single(&ep, RequestArgs::new()).await
    }

    /// Creates a new tournament.
    pub async fn create(
        &self,
        clock_time: u32,
        clock_increment: u32,
        minutes: u32,
        options: &TournamentOptions,
    ) -> Result<Value, Error> {
        let payload = options.apply(
            Payload::new()
                .set("clockTime", clock_time)
                .set("clockIncrement", clock_increment)
                .set("minutes", minutes),
        );
        let ep = Endpoint::post("api/tournament").converter(models::tournament);
        self.r
            .single(&ep, RequestArgs::new().json(payload.into_value()))
            .await
    }

    /// Streams the games of a tournament, as PGN lines or NDJSON records.
    pub fn export_games(
        &self,
        tournament_id: &str,
        as_pgn: Option<bool>,
        options: &ExportOptions,
    ) -> ApiStream {
        let format = if as_pgn.unwrap_or(self.pgn_as_default) {
            Format::Pgn
        } else {
            Format::Ndjson
        };
        let ep = Endpoint::get(format!("api/tournament/{tournament_id}/games"))
            .streaming()
            .format(format)
            .converter(models::game);
        self.r.stream(&ep, options.apply(RequestArgs::new()))
    }

    /// Streams the results of a tournament: players with their scores and
    /// performance, in rank order.
    ///
    /// Results for ongoing tournaments can be inconsistent due to ranking
    /// changes.
    pub fn stream_results(&self, tournament_id: &str, limit: Option<u32>) -> ApiStream {
        let ep = Endpoint::get(format!("api/tournament/{tournament_id}/results")).streaming();
        self.r
            .stream(&ep, RequestArgs::new().opt_param("nb", limit))
    }

    /// Streams the tournaments created by a player.
    pub fn stream_by_creator(&self, username: &str) -> ApiStream {
        let ep = Endpoint::get(format!("api/user/{username}/tournament/created")).streaming();
        self.r.stream(&ep, RequestArgs::new())
    }
}

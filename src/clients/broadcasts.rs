//! Broadcast endpoints.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{ok_flag, Payload};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models;
use crate::requestor::{RequestArgs, Requestor};

/// Optional metadata for a broadcast.
#[derive(Debug, Clone, Default)]
pub struct BroadcastOptions {
    /// URL lichess can poll for PGN updates; must be publicly accessible.
    /// Without it, updates have to be pushed manually.
    pub sync_url: Option<String>,
    /// Long description, markdown.
    pub markdown: Option<String>,
    /// Short text crediting the source provider.
    pub credit: Option<String>,
    /// Start time as epoch millis.
    pub starts_at: Option<u64>,
}

impl BroadcastOptions {
    fn apply(&self, payload: Payload) -> Payload {
        payload
            .opt("syncUrl", self.sync_url.as_deref())
            .opt("markdown", self.markdown.as_deref())
            .opt("credit", self.credit.as_deref())
            .opt("startsAt", self.starts_at)
    }
}

/// Client for broadcasts: relayed coverage of one or more games.
#[derive(Debug, Clone)]
pub struct Broadcasts {
    r: Arc<Requestor>,
}

impl Broadcasts {
    pub(crate) fn new(r: Arc<Requestor>) -> Self {
        Self { r }
    }

    /// Creates a new broadcast.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        options: &BroadcastOptions,
    ) -> Result<Value, Error> {
        let payload = options.apply(
            Payload::new()
                .set("name", name)
                .set("description", description),
        );
        let ep = Endpoint::post("broadcast/new").converter(models::broadcast);
        self.r
            .single(&ep, RequestArgs::new().json(payload.into_value()))
            .await
    }

    /// A broadcast by ID. The slug is only used for SEO and may stay `-`.
    pub async fn get(&self, broadcast_id: &str, slug: Option<&str>) -> Result<Value, Error> {
        let slug = slug.unwrap_or("-");
        let ep = Endpoint::get(format!("broadcast/{slug}/{broadcast_id}"))
            .converter(models::broadcast);
        self.r.single(&ep, RequestArgs::new()).await
    }

    /// Updates an existing broadcast.
    ///
    /// All fields must be provided; values missing from the update are
    /// erased server-side.
    pub async fn update(
        &self,
        broadcast_id: &str,
        name: &str,
        description: &str,
        options: &BroadcastOptions,
        slug: Option<&str>,
    ) -> Result<Value, Error> {
        let slug = slug.unwrap_or("-");
        let payload = options.apply(
            Payload::new()
                .set("name", name)
                .set("description", description),
        );
        let ep = Endpoint::post(format!("broadcast/{slug}/{broadcast_id}"))
            .converter(models::broadcast);
        self.r
            .single(&ep, RequestArgs::new().json(payload.into_value()))
            .await
    }

    /// Pushes PGN to manually update a broadcast.
    pub async fn push_pgn_update(
        &self,
        broadcast_id: &str,
        pgn_games: &[&str],
        slug: Option<&str>,
    ) -> Result<bool, Error> {
        let slug = slug.unwrap_or("-");
        let games = pgn_games
            .iter()
            .map(|game| game.trim())
            .collect::<Vec<_>>()
            .join("\n\n");
        let ep = Endpoint::post(format!("broadcast/{slug}/{broadcast_id}/push"));
        Ok(ok_flag(
            self.r.single(&ep, RequestArgs::new().text(games)).await?,
        ))
    }
}

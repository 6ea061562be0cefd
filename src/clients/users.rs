//! User-related endpoints.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::take_field;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::format::Format;
use crate::models;
use crate::requestor::{ApiStream, RequestArgs, Requestor};

/// Client for user-related endpoints.
#[derive(Debug, Clone)]
pub struct Users {
    r: Arc<Requestor>,
}

impl Users {
    pub(crate) fn new(r: Arc<Requestor>) -> Self {
        Self { r }
    }

    /// Streams puzzle activity history, most recent first.
    pub fn puzzle_activity(&self, max: Option<u32>) -> ApiStream {
        let ep = Endpoint::get("api/user/puzzle-activity")
            .streaming()
            .format(Format::Ndjson)
            .converter(models::puzzle_activity);
        self.r.stream(&ep, RequestArgs::new().opt_param("max", max))
    }

    /// Online, playing, and streaming statuses of the given players.
    ///
    /// Only `id` and `name` fields are returned for offline users.
    pub async fn realtime_statuses(&self, user_ids: &[&str]) -> Result<Value, Error> {
        let ep = Endpoint::get("api/users/status");
        let args = RequestArgs::new().param("ids", user_ids.join(","));
        self.r.single(&ep, args).await
    }

    /// Top 10 players for each speed and variant.
    pub async fn all_top_10(&self) -> Result<Value, Error> {
        let ep = Endpoint::get("player").format(Format::Lijson);
        self.r.single(&ep, RequestArgs::new()).await
    }

    /// Leaderboard for one speed or variant.
    pub async fn leaderboard(&self, perf_type: &str, count: u32) -> Result<Value, Error> {
        let ep = Endpoint::get(format!("player/top/{count}/{perf_type}")).format(Format::Lijson);
        let response = self.r.single(&ep, RequestArgs::new()).await?;
        take_field(response, "users")
    }

    /// Public data for a user.
    pub async fn public_data(&self, username: &str) -> Result<Value, Error> {
        let ep = Endpoint::get(format!("api/user/{username}")).converter(models::user);
        self.r.single(&ep, RequestArgs::new()).await
    }

    /// Activity feed of a user.
    pub async fn activity_feed(&self, username: &str) -> Result<Value, Error> {
        let ep =
            Endpoint::get(format!("api/user/{username}/activity")).converter(models::activity);
        self.r.single(&ep, RequestArgs::new()).await
    }

    /// Multiple users by ID, via a comma-joined POST body.
    pub async fn by_ids(&self, usernames: &[&str]) -> Result<Value, Error> {
        let ep = Endpoint::post("api/users").converter(models::user);
        let args = RequestArgs::new().text(usernames.join(","));
        self.r.single(&ep, args).await
    }

    /// Basic information about currently streaming users.
    pub async fn live_streamers(&self) -> Result<Value, Error> {
        let ep = Endpoint::get("streamer/live");
        self.r.single(&ep, RequestArgs::new()).await
    }

    /// Rating history of a user, for all game types.
    pub async fn rating_history(&self, username: &str) -> Result<Value, Error> {
        let ep = Endpoint::get(format!("api/user/{username}/rating-history"))
            .converter(models::rating_history);
        self.r.single(&ep, RequestArgs::new()).await
    }
}

//! Bot account endpoints.

use std::sync::Arc;

use crate::clients::ok_flag;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models;
use crate::requestor::{ApiStream, RequestArgs, Requestor};

/// Client for bot-related endpoints.
#[derive(Debug, Clone)]
pub struct Bots {
    r: Arc<Requestor>,
}

impl Bots {
    pub(crate) fn new(r: Arc<Requestor>) -> Self {
        Self { r }
    }

    /// Streams your incoming events (challenges, game starts) in realtime.
    pub fn stream_incoming_events(&self) -> ApiStream {
        let ep = Endpoint::get("api/stream/event").streaming();
        self.r.stream(&ep, RequestArgs::new())
    }

    /// Streams the state of a bot game.
    pub fn stream_game_state(&self, game_id: &str) -> ApiStream {
        let ep = Endpoint::get(format!("api/bot/game/stream/{game_id}"))
            .streaming()
            .converter(models::game_state);
        self.r.stream(&ep, RequestArgs::new())
    }

    /// Makes a move in a bot game.
    pub async fn make_move(&self, game_id: &str, mv: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/bot/game/{game_id}/move/{mv}"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Posts a message to the player or spectator room of a bot game.
    pub async fn post_message(
        &self,
        game_id: &str,
        text: &str,
        spectator: bool,
    ) -> Result<bool, Error> {
        let room = if spectator { "spectator" } else { "player" };
        let payload = serde_json::json!({"room": room, "text": text});
        let ep = Endpoint::post(format!("api/bot/game/{game_id}/chat"));
        Ok(ok_flag(
            self.r.single(&ep, RequestArgs::new().json(payload)).await?,
        ))
    }

    /// Aborts a bot game.
    pub async fn abort_game(&self, game_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/bot/game/{game_id}/abort"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Resigns a bot game.
    pub async fn resign_game(&self, game_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/bot/game/{game_id}/resign"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Accepts an incoming challenge.
    pub async fn accept_challenge(&self, challenge_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/challenge/{challenge_id}/accept"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Declines an incoming challenge.
    pub async fn decline_challenge(&self, challenge_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/challenge/{challenge_id}/decline"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }
}

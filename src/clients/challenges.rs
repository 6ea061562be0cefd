//! Challenge endpoints.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{ok_flag, Payload};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models;
use crate::requestor::{RequestArgs, Requestor};

/// Clock, color, and variant settings for a new challenge.
#[derive(Debug, Clone, Default)]
pub struct ChallengeOptions {
    /// Clock initial time in seconds.
    pub clock_limit: Option<u32>,
    /// Clock increment in seconds.
    pub clock_increment: Option<u32>,
    /// Days per move, for correspondence games (omit the clock).
    pub days: Option<u32>,
    /// Color of the accepting player.
    pub color: Option<String>,
    /// Game variant.
    pub variant: Option<String>,
    /// Custom initial position in FEN (standard variant, unrated only).
    pub position: Option<String>,
}

impl ChallengeOptions {
    fn apply(&self, payload: Payload) -> Payload {
        payload
            .opt("clock.limit", self.clock_limit)
            .opt("clock.increment", self.clock_increment)
            .opt("days", self.days)
            .opt("color", self.color.as_deref())
            .opt("variant", self.variant.as_deref())
            .opt("fen", self.position.as_deref())
    }
}

/// Client for challenge-related endpoints.
#[derive(Debug, Clone)]
pub struct Challenges {
    r: Arc<Requestor>,
}

impl Challenges {
    pub(crate) fn new(r: Arc<Requestor>) -> Self {
        Self { r }
    }

    /// Challenges another player to a game.
    pub async fn create(
        &self,
        username: &str,
        rated: bool,
        options: &ChallengeOptions,
    ) -> Result<Value, Error> {
        let payload = options.apply(Payload::new().set("rated", rated));
        let ep = Endpoint::post(format!("api/challenge/{username}"))
            .converter(models::tournament);
        self.r
            .single(&ep, RequestArgs::new().json(payload.into_value()))
            .await
    }

    /// Starts a game with another player by force-accepting the challenge.
    ///
    /// Requires the opponent's OAuth token with the `challenge:write`
    /// scope.
    pub async fn create_with_accept(
        &self,
        username: &str,
        rated: bool,
        token: &str,
        options: &ChallengeOptions,
    ) -> Result<Value, Error> {
        let payload = options.apply(
            Payload::new()
                .set("rated", rated)
                .set("acceptByToken", token),
        );
        let ep = Endpoint::post(format!("api/challenge/{username}"))
            .converter(models::tournament);
        self.r
            .single(&ep, RequestArgs::new().json(payload.into_value()))
            .await
    }

    /// Challenges the AI to a game at the given level (1 to 8).
    pub async fn create_ai(
        &self,
        level: u8,
        options: &ChallengeOptions,
    ) -> Result<Value, Error> {
        let payload = options.apply(Payload::new().set("level", level));
        let ep = Endpoint::post("api/challenge/ai").converter(models::tournament);
        self.r
            .single(&ep, RequestArgs::new().json(payload.into_value()))
            .await
    }

    /// Creates a challenge that any two players can join.
    pub async fn create_open(&self, options: &ChallengeOptions) -> Result<Value, Error> {
        let payload = options.apply(Payload::new());
        let ep = Endpoint::post("api/challenge/open").converter(models::tournament);
        self.r
            .single(&ep, RequestArgs::new().json(payload.into_value()))
            .await
    }

    /// Accepts an incoming challenge.
    pub async fn accept(&self, challenge_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/challenge/{challenge_id}/accept"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Declines an incoming challenge.
    pub async fn decline(&self, challenge_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/challenge/{challenge_id}/decline"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Cancels an outgoing challenge.
    pub async fn cancel(&self, challenge_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/challenge/{challenge_id}/cancel"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }
}

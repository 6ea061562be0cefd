//! Physical board and external application endpoints.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::StreamExt;

use crate::clients::ok_flag;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::format::Format;
use crate::models;
use crate::requestor::{ApiStream, RequestArgs, Requestor, Timeout};

/// Client for physical board or external application endpoints.
#[derive(Debug, Clone)]
pub struct Board {
    r: Arc<Requestor>,
}

impl Board {
    pub(crate) fn new(r: Arc<Requestor>) -> Self {
        Self { r }
    }

    /// Streams your incoming events (challenges, game starts) in realtime.
    pub fn stream_incoming_events(&self) -> ApiStream {
        let ep = Endpoint::get("api/stream/event").streaming();
        self.r.stream(&ep, RequestArgs::new())
    }

    /// Creates a public seek and blocks until it is matched or cancelled.
    ///
    /// The seek stays active for as long as its response stream is being
    /// read, so this consumes the stream to completion and returns the time
    /// the search took.
    pub async fn seek(
        &self,
        time: u32,
        increment: u32,
        rated: bool,
        variant: &str,
        color: &str,
        rating_range: Option<(u16, u16)>,
    ) -> Result<Duration, Error> {
        let rating_range = rating_range
            .map(|(low, high)| format!("{low}-{high}"))
            .unwrap_or_default();
        let fields = vec![
            ("rated".to_owned(), rated.to_string()),
            ("time".to_owned(), time.to_string()),
            ("increment".to_owned(), increment.to_string()),
            ("variant".to_owned(), variant.to_owned()),
            ("color".to_owned(), color.to_owned()),
            ("ratingRange".to_owned(), rating_range),
        ];

        let ep = Endpoint::post("api/board/seek")
            .streaming()
            .format(Format::Text);
        let args = RequestArgs::new().form(fields).timeout(Timeout::Unbounded);

        let start = Instant::now();
        // Keep reading to keep the search going.
        let mut lines = self.r.stream(&ep, args);
        while let Some(line) = lines.next().await {
            line?;
        }
        Ok(start.elapsed())
    }

    /// Streams the state of a board game.
    pub fn stream_game_state(&self, game_id: &str) -> ApiStream {
        let ep = Endpoint::get(format!("api/board/game/stream/{game_id}"))
            .streaming()
            .converter(models::game_state);
        self.r.stream(&ep, RequestArgs::new())
    }

    /// Makes a move in a board game.
    pub async fn make_move(&self, game_id: &str, mv: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/board/game/{game_id}/move/{mv}"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Posts a message to the player or spectator room of a board game.
    pub async fn post_message(
        &self,
        game_id: &str,
        text: &str,
        spectator: bool,
    ) -> Result<bool, Error> {
        let room = if spectator { "spectator" } else { "player" };
        let payload = serde_json::json!({"room": room, "text": text});
        let ep = Endpoint::post(format!("api/board/game/{game_id}/chat"));
        Ok(ok_flag(
            self.r.single(&ep, RequestArgs::new().json(payload)).await?,
        ))
    }

    /// Aborts a board game.
    pub async fn abort_game(&self, game_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/board/game/{game_id}/abort"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Resigns a board game.
    pub async fn resign_game(&self, game_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("api/board/game/{game_id}/resign"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Creates, accepts, or declines a draw offer.
    ///
    /// Pass `accept = true` with an in-progress game to offer or accept a
    /// draw, `accept = false` to decline one.
    pub async fn handle_draw_offer(&self, game_id: &str, accept: bool) -> Result<bool, Error> {
        let answer = if accept { "yes" } else { "no" };
        let ep = Endpoint::post(format!("api/board/game/{game_id}/draw/{answer}"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Offers a draw in the given game.
    pub async fn offer_draw(&self, game_id: &str) -> Result<bool, Error> {
        self.handle_draw_offer(game_id, true).await
    }

    /// Accepts an already offered draw in the given game.
    pub async fn accept_draw(&self, game_id: &str) -> Result<bool, Error> {
        self.handle_draw_offer(game_id, true).await
    }

    /// Declines an already offered draw in the given game.
    pub async fn decline_draw(&self, game_id: &str) -> Result<bool, Error> {
        self.handle_draw_offer(game_id, false).await
    }
}

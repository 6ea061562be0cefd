//! Team-related endpoints.

use std::sync::Arc;

use crate::clients::ok_flag;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::format::Format;
use crate::models;
use crate::requestor::{ApiStream, RequestArgs, Requestor};

/// Client for team-related endpoints.
#[derive(Debug, Clone)]
pub struct Teams {
    r: Arc<Requestor>,
}

impl Teams {
    pub(crate) fn new(r: Arc<Requestor>) -> Self {
        Self { r }
    }

    /// Streams the members of a team.
    pub fn members(&self, team_id: &str) -> ApiStream {
        let ep = Endpoint::get(format!("api/team/{team_id}/users"))
            .streaming()
            .format(Format::Ndjson)
            .converter(models::user);
        self.r.stream(&ep, RequestArgs::new())
    }

    /// Joins a team.
    pub async fn join(&self, team_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("team/{team_id}/join"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Leaves a team.
    pub async fn leave(&self, team_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("team/{team_id}/quit"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }

    /// Kicks a member out of one of your teams.
    pub async fn kick_member(&self, team_id: &str, user_id: &str) -> Result<bool, Error> {
        let ep = Endpoint::post(format!("team/{team_id}/kick/{user_id}"));
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }
}

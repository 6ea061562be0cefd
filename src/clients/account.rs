//! Account-related endpoints.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{ok_flag, take_field};
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models;
use crate::requestor::{RequestArgs, Requestor};

/// Client for account-related endpoints.
#[derive(Debug, Clone)]
pub struct Account {
    r: Arc<Requestor>,
}

impl Account {
    pub(crate) fn new(r: Arc<Requestor>) -> Self {
        Self { r }
    }

    /// Public information about the authenticated user.
    pub async fn get(&self) -> Result<Value, Error> {
        let ep = Endpoint::get("api/account").converter(models::account);
        self.r.single(&ep, RequestArgs::new()).await
    }

    /// Email address of the authenticated user.
    pub async fn email(&self) -> Result<String, Error> {
        let ep = Endpoint::get("api/account/email");
        let response = self.r.single(&ep, RequestArgs::new()).await?;
        match take_field(response, "email")? {
            Value::String(email) => Ok(email),
            other => Err(Error::Config(format!("unexpected email value: {other}"))),
        }
    }

    /// Account preferences of the authenticated user.
    pub async fn preferences(&self) -> Result<Value, Error> {
        let ep = Endpoint::get("api/account/preferences");
        let response = self.r.single(&ep, RequestArgs::new()).await?;
        take_field(response, "prefs")
    }

    /// Current kid mode status.
    pub async fn kid_mode(&self) -> Result<bool, Error> {
        let ep = Endpoint::get("api/account/kid");
        let response = self.r.single(&ep, RequestArgs::new()).await?;
        match take_field(response, "kid")? {
            Value::Bool(kid) => Ok(kid),
            other => Err(Error::Config(format!("unexpected kid value: {other}"))),
        }
    }

    /// Enables or disables kid mode.
    pub async fn set_kid_mode(&self, value: bool) -> Result<bool, Error> {
        let ep = Endpoint::post("api/account/kid");
        let args = RequestArgs::new().param("v", value);
        Ok(ok_flag(self.r.single(&ep, args).await?))
    }

    /// Upgrades the account to a bot account.
    ///
    /// Requires the `bot:play` oauth scope and an account with no previously
    /// played games.
    pub async fn upgrade_to_bot(&self) -> Result<bool, Error> {
        let ep = Endpoint::post("api/bot/account/upgrade");
        Ok(ok_flag(self.r.single(&ep, RequestArgs::new()).await?))
    }
}

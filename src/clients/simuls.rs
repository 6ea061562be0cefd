//! Simultaneous exhibition endpoints.

use std::sync::Arc;

use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::requestor::{RequestArgs, Requestor};

/// Client for simultaneous exhibitions: one player versus many.
#[derive(Debug, Clone)]
pub struct Simuls {
    r: Arc<Requestor>,
}

impl Simuls {
    pub(crate) fn new(r: Arc<Requestor>) -> Self {
        Self { r }
    }

    /// Recently finished, ongoing, and upcoming simuls.
    pub async fn current(&self) -> Result<Value, Error> {
        let ep = Endpoint::get("api/simul");
        self.r.single(&ep, RequestArgs::new()).await
    }
}

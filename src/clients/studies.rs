//! Study export endpoints.

use std::sync::Arc;

use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::format::Format;
use crate::requestor::{ApiStream, RequestArgs, Requestor};

/// Client for studies.
#[derive(Debug, Clone)]
pub struct Studies {
    r: Arc<Requestor>,
}

impl Studies {
    pub(crate) fn new(r: Arc<Requestor>) -> Self {
        Self { r }
    }

    /// Exports one chapter of a study as PGN text.
    pub async fn export_chapter(
        &self,
        study_id: &str,
        chapter_id: &str,
    ) -> Result<String, Error> {
        let ep = Endpoint::get(format!("study/{study_id}/{chapter_id}.pgn")).format(Format::Pgn);
        match self.r.single(&ep, RequestArgs::new()).await? {
            Value::String(pgn) => Ok(pgn),
            other => Err(Error::Config(format!("unexpected PGN payload: {other}"))),
        }
    }

    /// Streams all chapters of a study as PGN lines.
    pub fn export(&self, study_id: &str) -> ApiStream {
        let ep = Endpoint::get(format!("study/{study_id}.pgn"))
            .streaming()
            .format(Format::Pgn);
        self.r.stream(&ep, RequestArgs::new())
    }
}

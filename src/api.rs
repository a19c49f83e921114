use serde::{Deserialize, Serialize};

use crate::model::Outcome;

/// Body of a page-load hook call.
#[derive(Debug, Deserialize)]
pub struct PageLoadRequest {
    pub web_absolute_url: String,
    pub page_url: String,
}

#[derive(Debug, Serialize, Default)]
pub struct APIResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl APIResponse {
    pub fn new_from_msg(msg: &str) -> Self {
        APIResponse {
            status: msg.to_owned(),
            outcome: None,
        }
    }

    pub fn new_from_outcome(outcome: Outcome) -> Self {
        let msg = match outcome {
            Outcome::RecordAdded => "learning record is added",
            Outcome::NotLearningPage => "this is not a learning page",
        };

        APIResponse {
            status: msg.to_owned(),
            outcome: Some(outcome),
        }
    }
}

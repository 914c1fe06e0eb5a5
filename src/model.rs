use std::fmt::Display;

use serde::Serialize;

/// One team's row from the league table. Every field is always present;
/// an empty string means the page did not carry a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,
    pub overall_ranking: String,
    pub yet_to_play: String,
    pub captain: String,
    pub gameweek_points: String,
    pub total_points: String,
}

/// Response envelope for `/league` and the CLI commands.
#[derive(Debug, Serialize)]
pub struct LeagueResponse {
    pub count: usize,
    pub results: Results,
}

/// `results` is an array on success and an `{"error": ..}` object on failure.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Results {
    Records(Vec<Record>),
    Error { error: String },
}

impl LeagueResponse {
    pub fn records(records: Vec<Record>) -> Self {
        Self {
            count: records.len(),
            results: Results::Records(records),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            count: 0,
            results: Results::Error {
                error: message.into(),
            },
        }
    }
}

impl<E: Display> From<Result<Vec<Record>, E>> for LeagueResponse {
    fn from(result: Result<Vec<Record>, E>) -> Self {
        match result {
            Ok(records) => Self::records(records),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Joke {
    #[serde(rename = "type")]
    pub kind: String,
    pub setup: String,
    pub punchline: String,
    pub id: i64,
    /// Not sent by the server; stamped by the client when the joke arrives.
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl std::fmt::Display for Joke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.setup, self.punchline)
    }
}

/// Wire format for batch endpoints: a bare JSON array of jokes.
#[derive(Debug, Deserialize)]
pub struct JokesResponse(Vec<Joke>);

impl JokesResponse {
    pub fn into_inner(self) -> Vec<Joke> {
        self.0
    }
}

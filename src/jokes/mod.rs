mod types;

pub use types::{Joke, JokesResponse};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use chrono::Utc;
use tracing::info;

pub struct JokesClient {
    http: HttpClient,
    base_url: String,
}

impl JokesClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = HttpClient::new(
            &config.api.user_agent,
            config.api.timeout_secs,
            config.api.max_retries,
        )?;
        Ok(Self::new(http, config.api.base_url.clone()))
    }

    /// One random joke of any kind.
    pub async fn random(&self) -> Result<Joke> {
        let url = format!("{}/jokes/random", self.base_url);
        let joke: Joke = self.http.get_json(&url).await?;
        let joke = stamp(joke);
        info!(id = joke.id, kind = %joke.kind, "fetched joke");
        Ok(joke)
    }

    /// One random joke of the given kind.
    pub async fn random_of(&self, kind: &str) -> Result<Joke> {
        let url = format!("{}/jokes/{kind}/random", self.base_url);
        // Kind-filtered endpoints answer with an array, even for one joke.
        let batch: JokesResponse = self.http.get_json(&url).await?;
        let first = mark_fetched(batch.into_inner().into_iter().next());

        let Some(joke) = first else {
            return Err(Error::NoJokes(kind.to_string()));
        };

        info!(id = joke.id, kind = %joke.kind, "fetched joke");
        Ok(joke)
    }

    /// Up to `count` jokes of the given kind. The API pages in tens, so
    /// `count` beyond ten is truncated to what one page delivers.
    pub async fn batch_of(&self, kind: &str, count: usize) -> Result<Vec<Joke>> {
        let url = format!("{}/jokes/{kind}/ten", self.base_url);
        let batch: JokesResponse = self.http.get_json(&url).await?;

        let mut jokes: Vec<Joke> = batch.into_inner().into_iter().map(stamp).collect();
        if jokes.is_empty() {
            return Err(Error::NoJokes(kind.to_string()));
        }
        jokes.truncate(count);

        info!(kind, joke_count = jokes.len(), "fetched joke batch");
        Ok(jokes)
    }

    /// A specific joke by id.
    pub async fn by_id(&self, id: i64) -> Result<Joke> {
        let url = format!("{}/jokes/{id}", self.base_url);
        let joke: Joke = self.http.get_json(&url).await?;
        Ok(stamp(joke))
    }

    /// Joke kinds the API currently serves.
    pub async fn kinds(&self) -> Result<Vec<String>> {
        let url = format!("{}/types", self.base_url);
        let kinds: Vec<String> = self.http.get_json(&url).await?;
        info!(kind_count = kinds.len(), "fetched joke kinds");
        Ok(kinds)
    }
}

fn stamp(mut joke: Joke) -> Joke {
    joke.fetched_at = Some(Utc::now());
    joke
}

/// Stamps the receipt time if a joke arrived; absence stays absent.
fn mark_fetched(value: Option<Joke>) -> Option<Joke> {
    let joke = value?;
    Some(stamp(joke))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unstamped() -> Joke {
        Joke {
            kind: "general".into(),
            setup: "s".into(),
            punchline: "p".into(),
            id: 7,
            fetched_at: None,
        }
    }

    #[test]
    fn mark_fetched_stamps_present_joke() {
        let joke = mark_fetched(Some(unstamped())).unwrap();
        assert!(joke.fetched_at.is_some());
    }

    #[test]
    fn mark_fetched_leaves_absent_unset() {
        assert!(mark_fetched(None).is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let http = HttpClient::new("jokebox-test", 5, 0).unwrap();
        let client = JokesClient::new(http, "http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}

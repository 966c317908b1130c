use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::SemanticParser;
use crate::intent::{Intent, WireIntent};

/// HTTP client for a parser exposing `GET <base>/query?q=...`.
#[derive(Clone)]
pub struct HttpParser {
    client: Client,
    base_url: String,
    session_id: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    /// JSON-encoded intent.
    answer: String,
}

impl HttpParser {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session_id: uuid::Uuid::new_v4().simple().to_string(),
        }
    }
}

#[async_trait]
impl SemanticParser for HttpParser {
    async fn parse(&self, utterance: &str) -> Result<Intent> {
        let url = Url::parse_with_params(
            &format!("{}/query", self.base_url),
            &[("q", utterance), ("sessionId", self.session_id.as_str())],
        )?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("parser error: {}", response.status()));
        }

        let body: QueryResponse = response.json().await?;
        let best = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("parser returned no candidates"))?;
        debug!("parser candidate: {}", best.answer);

        let intent = WireIntent::from_json(&best.answer)?.into_intent()?;
        Ok(intent)
    }
}

pub mod client;

use anyhow::Result;
use async_trait::async_trait;

use crate::intent::Intent;

pub use client::HttpParser;

/// Upstream semantic parser: free text in, structured intent out.
#[async_trait]
pub trait SemanticParser: Send + Sync {
    async fn parse(&self, utterance: &str) -> Result<Intent>;
}

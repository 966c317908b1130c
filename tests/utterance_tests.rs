mod common;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use common::{catalog, RecordingLoader, RecordingRemote};
use ruleforge::intent::{Intent, WireIntent};
use ruleforge::outputs::text::render_transcript;
use ruleforge::services::{SemanticParser, Services};
use ruleforge::{DialogConfig, DialogError, Reactor};

/// Parser that understands exactly one phrase.
struct CannedParser;

#[async_trait]
impl SemanticParser for CannedParser {
    async fn parse(&self, utterance: &str) -> Result<Intent> {
        match utterance {
            "get me a comic" => {
                let wire = WireIntent::from_json(r#"{"query":{"name":{"id":"tt:xkcd.get_comic"},"args":[]}}"#)?;
                Ok(wire.into_intent()?)
            }
            _ => anyhow::bail!("no parse for {:?}", utterance),
        }
    }
}

fn reactor(with_parser: bool, config: DialogConfig) -> (Reactor, Arc<RecordingLoader>) {
    let loader = Arc::new(RecordingLoader::default());
    let mut services = Services::from_catalog(Arc::new(catalog()), loader.clone(), Arc::new(RecordingRemote::default()));
    if with_parser {
        services = services.with_parser(Arc::new(CannedParser));
    }
    (Reactor::new(services, config), loader)
}

#[tokio::test]
async fn test_utterance_without_parser() {
    let (mut reactor, _) = reactor(false, DialogConfig::default());
    let result = reactor.handle_command("get me a comic").await;
    assert!(matches!(result, Err(DialogError::NoParser)));
}

#[tokio::test]
async fn test_utterance_goes_through_parser() {
    let (mut reactor, loader) = reactor(true, DialogConfig::default());
    let messages = reactor.handle_command("get me a comic").await.unwrap();
    assert_eq!(render_transcript(&messages), ">> ask special null\n");
    assert_eq!(loader.apps.lock().unwrap().len(), 1);

    let result = reactor.handle_command("sing a song").await;
    assert!(matches!(result, Err(DialogError::Service(_))));
}

#[tokio::test]
async fn test_confirm_queries_asks_first() {
    let config = DialogConfig {
        confirm_queries: true,
        ..DialogConfig::default()
    };
    let (mut reactor, loader) = reactor(true, config);

    let messages = reactor.handle_command("get me a comic").await.unwrap();
    assert_eq!(
        render_transcript(&messages),
        ">> Ok, so you want me to get an Xkcd comic. Is that right?\n>> ask special yesno\n"
    );
    assert!(loader.apps.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_config_from_json() {
    let config: DialogConfig = serde_json::from_str(r#"{"assistant_name":"Sabrina"}"#).unwrap();
    assert_eq!(config.assistant_name, "Sabrina");
    assert!(!config.confirm_queries);
    assert!(config.parser_url.is_none());
}

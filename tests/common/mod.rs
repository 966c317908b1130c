#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use ruleforge::outputs::text::render_transcript;
use ruleforge::services::{AppLoader, Catalog, FlowTokenGenerator, RemoteDispatch, RemoteSender, Services};
use ruleforge::{DialogConfig, DialogResult, Reactor};

pub const TOKEN: &str = "0123456789abcdef0123456789abcdef";

#[derive(Default)]
pub struct RecordingLoader {
    pub apps: Mutex<Vec<String>>,
}

#[async_trait]
impl AppLoader for RecordingLoader {
    async fn load_one_app(&self, program: &str) -> Result<()> {
        self.apps.lock().unwrap().push(program.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingRemote {
    pub dispatches: Mutex<Vec<RemoteDispatch>>,
}

#[async_trait]
impl RemoteSender for RecordingRemote {
    async fn send_rule(&self, dispatch: RemoteDispatch) -> Result<()> {
        self.dispatches.lock().unwrap().push(dispatch);
        Ok(())
    }
}

pub struct FixedTokenGenerator;

impl FlowTokenGenerator for FixedTokenGenerator {
    fn generate(&self) -> String {
        TOKEN.to_string()
    }
}

pub fn catalog() -> Catalog {
    let raw = json!({
        "devices": [
            { "kind": "xkcd", "id": "xkcd-6", "display_label": "XKCD" },
            { "kind": "twitter", "id": "twitter-foo", "display_label": "Twitter Account foo" },
            { "kind": "twitter", "id": "twitter-bar", "display_label": "Twitter Account bar" },
            { "kind": "facebook", "id": "facebook-7", "display_label": "Facebook" },
            { "kind": "security-camera", "id": "security-camera-1", "display_label": "Some Device 1" },
            { "kind": "security-camera", "id": "security-camera-2", "display_label": "Some Device 2" }
        ],
        "functions": [
            {
                "kind": "xkcd", "name": "get_comic", "role": "query",
                "canonical": "comic", "confirmation": "get an Xkcd comic", "category": "media",
                "outputs": [
                    { "name": "number", "type": "Number" },
                    { "name": "title", "type": "String" },
                    { "name": "picture_url", "type": "Picture" },
                    { "name": "link", "type": "URL" }
                ]
            },
            {
                "kind": "twitter", "name": "post_picture", "role": "action",
                "canonical": "post picture", "confirmation": "tweet $caption with an attached picture",
                "category": "social-network",
                "inputs": [
                    { "name": "caption", "type": "String", "question": "What do you want to tweet?" },
                    { "name": "picture_url", "type": "Picture", "question": "Upload the picture now." }
                ]
            },
            {
                "kind": "twitter", "name": "sink", "role": "action",
                "canonical": "tweet", "confirmation": "tweet $status", "category": "social-network",
                "inputs": [
                    { "name": "status", "type": "String", "question": "What do you want to tweet?" }
                ]
            },
            {
                "kind": "twitter", "name": "source", "role": "trigger",
                "canonical": "tweet", "confirmation": "anyone you follow tweets", "category": "social-network",
                "outputs": [
                    { "name": "text", "type": "String" },
                    { "name": "hashtags", "type": "String" },
                    { "name": "urls", "type": "URL" },
                    { "name": "from", "type": "String" },
                    { "name": "in_reply_to", "type": "String" }
                ]
            },
            {
                "kind": "facebook", "name": "post", "role": "action",
                "canonical": "post", "confirmation": "post $status on Facebook", "category": "social-network",
                "inputs": [
                    { "name": "status", "type": "String" }
                ]
            },
            {
                "kind": "security-camera", "name": "new_event", "role": "trigger",
                "canonical": "new event", "confirmation": "any event is detected on your security camera",
                "category": "home",
                "outputs": [
                    { "name": "start_time", "type": "Date" },
                    { "name": "has_sound", "type": "Boolean" },
                    { "name": "has_motion", "type": "Boolean" },
                    { "name": "has_person", "type": "Boolean" },
                    { "name": "picture_url", "type": "Picture" }
                ]
            },
            {
                "kind": "phone", "name": "send_sms", "role": "action",
                "canonical": "send sms", "confirmation": "send a text saying $message", "category": "communication",
                "inputs": [
                    { "name": "message", "type": "String" }
                ]
            }
        ],
        "contacts": [
            { "name": "mom", "principal": "mock-account:MOCK1234-phone:+1800666", "display_name": "Mom Corp Inc." }
        ],
        "setup": [
            { "kind": "phone", "title": "Configure phone", "url": "https://thingpedia.example/devices/create/phone" }
        ]
    });
    serde_json::from_value(raw).unwrap()
}

/// A reactor over the fixture catalog, with its hand-off capabilities
/// recorded.
pub struct Harness {
    pub reactor: Reactor,
    pub loader: Arc<RecordingLoader>,
    pub remote: Arc<RecordingRemote>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(DialogConfig::default())
    }

    pub fn with_config(config: DialogConfig) -> Self {
        let loader = Arc::new(RecordingLoader::default());
        let remote = Arc::new(RecordingRemote::default());
        let services = Services::from_catalog(Arc::new(catalog()), loader.clone(), remote.clone())
            .with_token_generator(Arc::new(FixedTokenGenerator));
        Self {
            reactor: Reactor::new(services, config),
            loader,
            remote,
        }
    }

    /// One parsed-intent turn, rendered as transcript lines.
    pub async fn json(&mut self, json: &str) -> String {
        let messages = self.reactor.handle_parsed_command(json).await.unwrap();
        render_transcript(&messages)
    }

    /// One raw-utterance turn, rendered as transcript lines.
    pub async fn say(&mut self, text: &str) -> String {
        let messages = self.reactor.handle_command(text).await.unwrap();
        render_transcript(&messages)
    }

    pub async fn try_json(&mut self, json: &str) -> DialogResult<String> {
        self.reactor
            .handle_parsed_command(json)
            .await
            .map(|messages| render_transcript(&messages))
    }

    pub fn apps(&self) -> Vec<String> {
        self.loader.apps.lock().unwrap().clone()
    }

    pub fn dispatches(&self) -> Vec<RemoteDispatch> {
        self.remote.dispatches.lock().unwrap().clone()
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ruleforge::outputs::deliver;
use ruleforge::outputs::text::TextDelegate;
use ruleforge::services::parser::HttpParser;
use ruleforge::services::{AppLoader, Catalog, RemoteDispatch, RemoteSender, Services};
use ruleforge::{DialogConfig, Reactor};

/// Prints loaded programs instead of running them.
struct ConsoleLoader;

#[async_trait]
impl AppLoader for ConsoleLoader {
    async fn load_one_app(&self, program: &str) -> Result<()> {
        println!("[APP]\n{}", program);
        Ok(())
    }
}

struct ConsoleRemote;

#[async_trait]
impl RemoteSender for ConsoleRemote {
    async fn send_rule(&self, dispatch: RemoteDispatch) -> Result<()> {
        tracing::info!("Remote rule for {} ({})", dispatch.principal, dispatch.kind_channel);
        println!("[REMOTE {}]\n{}", dispatch.principal, dispatch.program);
        Ok(())
    }
}

#[derive(Parser)]
#[command(name = "ruleforge")]
#[command(about = "Console session that turns intents into trigger-action programs")]
struct Args {
    /// Devices, functions and contacts as JSON
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Dialog settings as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the semantic parser; without it only JSON intents work
    #[arg(long = "with-parser", value_name = "URL")]
    parser_url: Option<String>,
}

async fn load_config(path: Option<&PathBuf>) -> Result<DialogConfig> {
    match path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading config {}", path.display()))?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(DialogConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 2. Configuration + services
    let mut config = load_config(args.config.as_ref()).await?;
    if args.parser_url.is_some() {
        config.parser_url = args.parser_url;
    }

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path).await?,
        None => {
            tracing::warn!("No --catalog given, starting with an empty one");
            Catalog::default()
        }
    };
    let mut services = Services::from_catalog(Arc::new(catalog), Arc::new(ConsoleLoader), Arc::new(ConsoleRemote));
    if let Some(url) = &config.parser_url {
        tracing::info!("Using semantic parser at {}", url);
        services = services.with_parser(Arc::new(HttpParser::new(url)));
    }

    let mut reactor = Reactor::new(services, config);
    let mut delegate = TextDelegate::new();
    let mut stdout = std::io::stdout();

    // 3. Console loop: `\r {json}` or a bare JSON object is a parsed intent,
    // anything else is an utterance.
    println!("Type a command, or \\r followed by an intent in JSON.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = match line.strip_prefix("\\r ") {
            Some(json) => reactor.handle_parsed_command(json).await,
            None if line.starts_with('{') => reactor.handle_parsed_command(line).await,
            None => reactor.handle_command(line).await,
        };

        match result {
            Ok(messages) => {
                deliver(&messages, &mut delegate);
                delegate.flush_to(&mut stdout)?;
            }
            Err(e) => {
                tracing::warn!("Input rejected: {}", e);
                println!(">> Sorry, I did not understand that ({}).", e);
            }
        }
    }

    let snapshot = reactor.telemetry.snapshot();
    tracing::info!("Session ended: {:?}", snapshot);
    Ok(())
}

//! Injected capabilities: everything the dialog consults but does not own.
//!
//! The reactor only sees the traits; [`catalog::Catalog`] is the in-memory
//! implementation used by the console driver and the tests.

pub mod catalog;
pub mod loader;
pub mod parser;
pub mod registry;
pub mod token;

use std::sync::Arc;

pub use catalog::Catalog;
pub use loader::{AppLoader, RemoteDispatch, RemoteSender};
pub use parser::SemanticParser;
pub use registry::{ContactBook, DeviceRegistry, DeviceSetup, SchemaProvider};
pub use token::{FlowTokenGenerator, RandomTokenGenerator};

/// Bundle of capabilities handed to the reactor at construction.
#[derive(Clone)]
pub struct Services {
    pub registry: Arc<dyn DeviceRegistry>,
    pub schemas: Arc<dyn SchemaProvider>,
    pub contacts: Arc<dyn ContactBook>,
    pub loader: Arc<dyn AppLoader>,
    pub remote: Arc<dyn RemoteSender>,
    pub tokens: Arc<dyn FlowTokenGenerator>,
    pub parser: Option<Arc<dyn SemanticParser>>,
}

impl Services {
    pub fn new(
        registry: Arc<dyn DeviceRegistry>,
        schemas: Arc<dyn SchemaProvider>,
        contacts: Arc<dyn ContactBook>,
        loader: Arc<dyn AppLoader>,
        remote: Arc<dyn RemoteSender>,
    ) -> Self {
        Self {
            registry,
            schemas,
            contacts,
            loader,
            remote,
            tokens: Arc::new(RandomTokenGenerator),
            parser: None,
        }
    }

    /// Catalog serves devices, schemas and contacts at once.
    pub fn from_catalog(catalog: Arc<Catalog>, loader: Arc<dyn AppLoader>, remote: Arc<dyn RemoteSender>) -> Self {
        Self::new(catalog.clone(), catalog.clone(), catalog, loader, remote)
    }

    pub fn with_token_generator(mut self, tokens: Arc<dyn FlowTokenGenerator>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn SemanticParser>) -> Self {
        self.parser = Some(parser);
        self
    }
}

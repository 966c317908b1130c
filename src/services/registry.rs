use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::intent::FunctionRef;
use crate::kernel::program::{Contact, DeviceDescriptor};
use crate::kernel::schema::FunctionSchema;

/// How a missing device kind can be configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSetup {
    pub kind: String,
    pub title: String,
    pub url: String,
}

/// Device instances configured for the user, per kind.
#[async_trait]
pub trait DeviceRegistry: Send + Sync {
    /// Candidates in registry order. The order is what the user sees.
    async fn devices(&self, kind: &str) -> Result<Vec<DeviceDescriptor>>;

    async fn setup_info(&self, kind: &str) -> Result<Option<DeviceSetup>>;
}

/// Declared function signatures.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    async fn function(&self, function: &FunctionRef) -> Result<Option<FunctionSchema>>;

    async fn functions_in_category(&self, category: &str) -> Result<Vec<FunctionSchema>>;
}

#[async_trait]
pub trait ContactBook: Send + Sync {
    async fn lookup(&self, person: &str) -> Result<Option<Contact>>;
}

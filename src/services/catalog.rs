use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::registry::{ContactBook, DeviceRegistry, DeviceSetup, SchemaProvider};
use crate::intent::FunctionRef;
use crate::kernel::program::{Contact, DeviceDescriptor};
use crate::kernel::schema::FunctionSchema;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactEntry {
    /// Name the parser uses for this person ("mom").
    pub name: String,
    pub principal: String,
    pub display_name: String,
}

/// Static, JSON-loadable registry of devices, function schemas and contacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub devices: Vec<DeviceDescriptor>,
    #[serde(default)]
    pub functions: Vec<FunctionSchema>,
    #[serde(default)]
    pub contacts: Vec<ContactEntry>,
    #[serde(default)]
    pub setup: Vec<DeviceSetup>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        Ok(catalog)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = Self::from_json(&raw).with_context(|| format!("parsing catalog {}", path.display()))?;
        info!(
            "Catalog loaded: {} devices, {} functions, {} contacts",
            catalog.devices.len(),
            catalog.functions.len(),
            catalog.contacts.len()
        );
        Ok(catalog)
    }
}

#[async_trait]
impl DeviceRegistry for Catalog {
    async fn devices(&self, kind: &str) -> Result<Vec<DeviceDescriptor>> {
        Ok(self.devices.iter().filter(|d| d.kind == kind).cloned().collect())
    }

    async fn setup_info(&self, kind: &str) -> Result<Option<DeviceSetup>> {
        Ok(self.setup.iter().find(|s| s.kind == kind).cloned())
    }
}

#[async_trait]
impl SchemaProvider for Catalog {
    async fn function(&self, function: &FunctionRef) -> Result<Option<FunctionSchema>> {
        Ok(self
            .functions
            .iter()
            .find(|f| f.kind == function.kind && f.name == function.channel)
            .cloned())
    }

    async fn functions_in_category(&self, category: &str) -> Result<Vec<FunctionSchema>> {
        Ok(self
            .functions
            .iter()
            .filter(|f| f.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ContactBook for Catalog {
    async fn lookup(&self, person: &str) -> Result<Option<Contact>> {
        Ok(self.contacts.iter().find(|c| c.name == person).map(|c| Contact {
            principal: c.principal.clone(),
            display_name: c.display_name.clone(),
        }))
    }
}

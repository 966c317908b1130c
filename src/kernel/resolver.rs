use std::sync::Arc;

use tracing::debug;

use super::error::DialogError;
use super::event::{AskKind, Outbox};
use super::program::DeviceDescriptor;
use crate::services::DeviceRegistry;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Exactly one candidate: bound without asking.
    Resolved(DeviceDescriptor),
    /// Several candidates, in registry order. The user has to pick.
    Ambiguous(Vec<DeviceDescriptor>),
}

/// Turns a device kind into a concrete device.
pub struct DeviceResolver {
    registry: Arc<dyn DeviceRegistry>,
}

impl DeviceResolver {
    pub fn new(registry: Arc<dyn DeviceRegistry>) -> Self {
        Self { registry }
    }

    pub async fn resolve(&self, kind: &str) -> Result<Resolution, DialogError> {
        let mut candidates = self.registry.devices(kind).await?;
        debug!("{} candidate device(s) of type {}", candidates.len(), kind);
        match candidates.len() {
            0 => Err(DialogError::NoDevice(kind.to_string())),
            1 => Ok(Resolution::Resolved(candidates.remove(0))),
            _ => Ok(Resolution::Ambiguous(candidates)),
        }
    }

    /// Numbered prompt, one choice per candidate in registry order.
    pub fn prompt(kind: &str, candidates: &[DeviceDescriptor], out: &mut Outbox) {
        out.send(format!(
            "You have multiple devices of type {}. Which one do you want to use?",
            kind
        ));
        out.ask(AskKind::Generic);
        out.choices(candidates.iter().map(|d| d.display_label.clone()));
    }

    /// Tells the user the kind is missing, with a setup link when one is known.
    pub async fn report_missing(&self, kind: &str, out: &mut Outbox) {
        out.send(format!("You don't have a {} configured.", kind));
        match self.registry.setup_info(kind).await {
            Ok(Some(setup)) => out.link(setup.title, setup.url),
            Ok(None) => {}
            Err(e) => debug!("No setup info for {}: {}", kind, e),
        }
    }
}

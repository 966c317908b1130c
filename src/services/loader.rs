use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Installs a compiled program locally. Fire-and-forget.
#[async_trait]
pub trait AppLoader: Send + Sync {
    async fn load_one_app(&self, program: &str) -> Result<()>;
}

/// Addressing triple plus payload for delegating a rule to a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDispatch {
    pub principal: String,
    pub token: String,
    /// `"query:<kind>:<function>"`
    pub kind_channel: String,
    /// What the collaborator is asked to do, in words.
    pub description: String,
    /// The local receiving program.
    pub program: String,
}

#[async_trait]
pub trait RemoteSender: Send + Sync {
    async fn send_rule(&self, dispatch: RemoteDispatch) -> Result<()>;
}

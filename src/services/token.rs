use uuid::Uuid;

/// Source of opaque flow tokens for remote dispatch.
pub trait FlowTokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 32 lowercase hex digits from a random v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl FlowTokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

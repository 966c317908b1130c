pub mod types;
pub mod wire;

pub use types::*;
pub use wire::WireIntent;

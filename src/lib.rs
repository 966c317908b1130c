pub mod intent;
pub mod kernel;
pub mod outputs;
pub mod services;

pub use kernel::error::{DialogError, DialogResult};
pub use kernel::reactor::{DialogConfig, Reactor};

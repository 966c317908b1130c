pub mod builder;
pub mod cancel;
pub mod compiler;
pub mod error;
pub mod event;
pub mod filter;
pub mod program;
pub mod reactor;
pub mod resolver;
pub mod schema;
pub mod slots;
pub mod state;
pub mod telemetry;
pub mod time;

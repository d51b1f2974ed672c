//!
//! Logging for the gateway client.
//!

pub mod config;
mod setup;

pub use setup::{setup, LoggerInit};
pub use tracing::{debug, error, info, warn};

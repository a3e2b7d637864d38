//! Shared utilities for the agent demos
//!
//! Logging setup and the app/user/session identity every demo runs under.

pub mod config;
pub mod logging;

pub use config::AppConfig;
pub use logging::init_tracing;

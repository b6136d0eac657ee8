//! # Observability
//!
//! Structured logging for route compilation.

pub mod logging;

pub use logging::{env_filter, init_logging, log_config_info};

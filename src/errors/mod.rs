//! # Error Handling
//!
//! This module provides error handling for routeplane. Endpoint resolution
//! failures abort a route build; everything else the synthesis engine meets
//! (unusable mirror URLs, misplaced policies) is logged and skipped instead.

pub mod types;

pub use types::{Error, Result};

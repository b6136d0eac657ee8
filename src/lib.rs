//! # routeplane
//!
//! routeplane compiles a protocol-agnostic API contract (base path,
//! operations, endpoints and traffic policies) into Kubernetes Gateway API
//! route resources: an HTTPRoute for REST-style APIs, a GRPCRoute for gRPC
//! services.
//!
//! ## Architecture
//!
//! ```text
//! Contract file → loader → ApiContract ─┐
//!                                       ├→ RouteCompiler → HTTPRoute / GRPCRoute
//! Gateway + endpoint type → Context ────┘
//! ```
//!
//! ## Core Components
//!
//! - **Endpoint resolution**: picks the backend per operation, operation-level
//!   endpoints first, then the contract-level fallback
//! - **Path translation**: templated targets become regex matches and
//!   capture-group rewrites
//! - **Filter chains**: header, mirror and redirect policies become ordered
//!   Gateway API filters
//! - **Route generators**: one rule per operation, wrapped in a named route
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use routeplane::domain::{EndpointType, GatewayConfiguration};
//! use routeplane::{load_contract, compile_contract, Result};
//!
//! fn main() -> Result<()> {
//!     let contract = load_contract("employees.yaml")?;
//!     let gateway = GatewayConfiguration {
//!         name: "wso2-apim".to_string(),
//!         listener_name: "wso2-apim-gateway".to_string(),
//!         hostname: "wso2-apim".to_string(),
//!     };
//!     let route = compile_contract(&contract, &gateway, EndpointType::Production)?;
//!     println!("{}", serde_json::to_string_pretty(&route)?);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod gateway_api;
pub mod loader;
pub mod observability;
pub mod synthesis;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use errors::{Error, Result};
pub use loader::load_contract;
pub use synthesis::{compile_contract, CompilationContext, CompiledRoute, RouteCompiler};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

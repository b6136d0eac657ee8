//! # Route synthesis
//!
//! Compiles an [`ApiContract`] into Gateway API routes. Compilation is a pure
//! function of its inputs: the engine holds no state between calls, so
//! callers may compile several endpoint types or contracts concurrently.
//!
//! ## Module Organization
//!
//! - `endpoint`: endpoint resolution and URL helpers
//! - `path`: match pattern and rewrite expression for operation targets
//! - `filters`: filter chains from operation policies
//! - `context`: the immutable compilation context
//! - `hostnames`: hostname resolvers
//! - `generator`, `http`, `grpc`: protocol route generators

pub mod context;
pub mod endpoint;
pub mod filters;
pub mod generator;
pub mod grpc;
pub mod hostnames;
pub mod http;
pub mod path;

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::{ApiContract, EndpointType, GatewayConfiguration, Protocol};
use crate::errors::Result;
use crate::gateway_api::{GrpcRoute, HttpRoute};

pub use context::CompilationContext;
pub use endpoint::{contract_endpoints, resolve_endpoint};
pub use filters::{build_filters, Direction, FilterChain};
pub use generator::RouteGenerator;
pub use grpc::GrpcRouteGenerator;
pub use hostnames::{HostnameResolver, NoHostnames, VirtualHostnames};
pub use http::HttpRouteGenerator;
pub use path::{build_match, build_rewrite};

/// Route produced for one (contract, endpoint type) compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CompiledRoute {
    Http(HttpRoute),
    Grpc(GrpcRoute),
}

impl CompiledRoute {
    pub fn name(&self) -> &str {
        match self {
            CompiledRoute::Http(route) => &route.metadata.name,
            CompiledRoute::Grpc(route) => &route.metadata.name,
        }
    }

    pub fn rule_count(&self) -> usize {
        match self {
            CompiledRoute::Http(route) => route.spec.rules.len(),
            CompiledRoute::Grpc(route) => route.spec.rules.len(),
        }
    }
}

/// Compiles contracts with the generator matching their protocol
#[derive(Clone, Default)]
pub struct RouteCompiler {
    http: HttpRouteGenerator,
    grpc: GrpcRouteGenerator,
}

impl RouteCompiler {
    pub fn new(hostnames: Arc<dyn HostnameResolver>) -> Self {
        Self {
            http: HttpRouteGenerator::new(Arc::clone(&hostnames)),
            grpc: GrpcRouteGenerator::new(hostnames),
        }
    }

    pub fn compile_http(&self, ctx: &CompilationContext<'_>) -> Result<HttpRoute> {
        self.http.generate_route(ctx)
    }

    pub fn compile_grpc(&self, ctx: &CompilationContext<'_>) -> Result<GrpcRoute> {
        self.grpc.generate_route(ctx)
    }

    /// GRPC contracts compile to a GRPCRoute, every other API type to an HTTPRoute
    pub fn compile(&self, ctx: &CompilationContext<'_>) -> Result<CompiledRoute> {
        let protocol = ctx.contract.protocol();
        let span = crate::compile_span!(ctx.contract.name, ctx.endpoint_type, protocol);
        let _guard = span.enter();

        let route = match protocol {
            Protocol::Http => CompiledRoute::Http(self.compile_http(ctx)?),
            Protocol::Grpc => CompiledRoute::Grpc(self.compile_grpc(ctx)?),
        };

        info!(route = %route.name(), rules = route.rule_count(), "Compiled route");
        Ok(route)
    }
}

/// Compile a contract for one endpoint type with its own contract-level
/// endpoint as fallback and no hostnames.
pub fn compile_contract(
    contract: &ApiContract,
    gateway: &GatewayConfiguration,
    endpoint_type: EndpointType,
) -> Result<CompiledRoute> {
    let ctx = CompilationContext::new(contract, gateway, endpoint_type).contract_fallback();
    RouteCompiler::default().compile(&ctx)
}

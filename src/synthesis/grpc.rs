//! GRPCRoute generation

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{Operation, Protocol};
use crate::errors::Result;
use crate::gateway_api::{
    BackendRef, CommonRouteSpec, GrpcMethodMatch, GrpcRoute, GrpcRouteMatch, GrpcRouteRule,
    GrpcRouteSpec, ObjectMeta, GATEWAY_API_VERSION, GRPC_ROUTE_KIND,
};

use super::context::CompilationContext;
use super::endpoint::backend_object_reference;
use super::generator::RouteGenerator;
use super::hostnames::{HostnameResolver, NoHostnames};

/// Generates GRPCRoutes. The operation target names the service and the
/// verb names the method; rules carry no filters.
#[derive(Clone)]
pub struct GrpcRouteGenerator {
    hostnames: Arc<dyn HostnameResolver>,
}

impl Default for GrpcRouteGenerator {
    fn default() -> Self {
        Self::new(Arc::new(NoHostnames))
    }
}

impl GrpcRouteGenerator {
    pub fn new(hostnames: Arc<dyn HostnameResolver>) -> Self {
        Self { hostnames }
    }
}

impl RouteGenerator for GrpcRouteGenerator {
    type Rule = GrpcRouteRule;
    type Route = GrpcRoute;

    fn protocol(&self) -> Protocol {
        Protocol::Grpc
    }

    #[instrument(skip_all, fields(service = %operation.target, method = %operation.verb))]
    fn generate_rule(&self, ctx: &CompilationContext<'_>, operation: &Operation) -> Result<GrpcRouteRule> {
        let endpoint = ctx.endpoint_for(operation)?;

        Ok(GrpcRouteRule {
            matches: vec![GrpcRouteMatch {
                method: GrpcMethodMatch::exact(operation.target.clone(), operation.verb.clone()),
            }],
            backend_refs: vec![BackendRef::from(backend_object_reference(&endpoint))],
        })
    }

    #[instrument(skip_all, fields(contract = %ctx.contract.name, endpoint_type = %ctx.endpoint_type))]
    fn generate_route(&self, ctx: &CompilationContext<'_>) -> Result<GrpcRoute> {
        let rules = self.generate_rules(ctx)?;
        let name = ctx.route_name(self.protocol());
        debug!(route = %name, rules = rules.len(), "Generated GRPCRoute");

        Ok(GrpcRoute {
            api_version: GATEWAY_API_VERSION.to_string(),
            kind: GRPC_ROUTE_KIND.to_string(),
            metadata: ObjectMeta { name },
            spec: GrpcRouteSpec {
                common: CommonRouteSpec { parent_refs: ctx.parent_refs() },
                hostnames: self.hostnames.hostnames(
                    ctx.contract,
                    &ctx.endpoint_type,
                    &ctx.organization,
                ),
                rules,
            },
        })
    }
}

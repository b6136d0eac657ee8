//! HTTPRoute generation

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{Operation, Protocol};
use crate::errors::Result;
use crate::gateway_api::{
    BackendRef, CommonRouteSpec, HttpPathMatch, HttpRoute, HttpRouteMatch, HttpRouteRule,
    HttpRouteSpec, ObjectMeta, GATEWAY_API_VERSION, HTTP_ROUTE_KIND,
};

use super::context::CompilationContext;
use super::endpoint::backend_object_reference;
use super::filters::build_rule_filters;
use super::generator::RouteGenerator;
use super::hostnames::{HostnameResolver, NoHostnames};
use super::path::build_match;

/// Generates HTTPRoutes: one rule per operation, matched on verb and a
/// regular-expression path under the contract's base path.
#[derive(Clone)]
pub struct HttpRouteGenerator {
    hostnames: Arc<dyn HostnameResolver>,
}

impl Default for HttpRouteGenerator {
    fn default() -> Self {
        Self::new(Arc::new(NoHostnames))
    }
}

impl HttpRouteGenerator {
    pub fn new(hostnames: Arc<dyn HostnameResolver>) -> Self {
        Self { hostnames }
    }

    fn route_match(ctx: &CompilationContext<'_>, operation: &Operation) -> HttpRouteMatch {
        HttpRouteMatch {
            path: HttpPathMatch::regex(build_match(
                operation.target_or_default(),
                &ctx.contract.base_path,
            )),
            method: Some(operation.verb.clone()),
        }
    }
}

impl RouteGenerator for HttpRouteGenerator {
    type Rule = HttpRouteRule;
    type Route = HttpRoute;

    fn protocol(&self) -> Protocol {
        Protocol::Http
    }

    #[instrument(skip_all, fields(verb = %operation.verb, target = %operation.target_or_default()))]
    fn generate_rule(&self, ctx: &CompilationContext<'_>, operation: &Operation) -> Result<HttpRouteRule> {
        let endpoint = ctx.endpoint_for(operation)?;
        let chain = build_rule_filters(ctx.contract, operation, &endpoint);

        let backend_refs = if chain.has_redirect {
            debug!("Redirect present, rule carries no backend");
            Vec::new()
        } else {
            vec![BackendRef::from(backend_object_reference(&endpoint))]
        };

        Ok(HttpRouteRule {
            matches: vec![Self::route_match(ctx, operation)],
            filters: chain.filters,
            backend_refs,
        })
    }

    #[instrument(skip_all, fields(contract = %ctx.contract.name, endpoint_type = %ctx.endpoint_type))]
    fn generate_route(&self, ctx: &CompilationContext<'_>) -> Result<HttpRoute> {
        let rules = self.generate_rules(ctx)?;
        let name = ctx.route_name(self.protocol());
        debug!(route = %name, rules = rules.len(), "Generated HTTPRoute");

        Ok(HttpRoute {
            api_version: GATEWAY_API_VERSION.to_string(),
            kind: HTTP_ROUTE_KIND.to_string(),
            metadata: ObjectMeta { name },
            spec: HttpRouteSpec {
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

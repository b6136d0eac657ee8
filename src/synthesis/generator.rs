//! Protocol-specific route generation

use crate::domain::{Operation, Protocol};
use crate::errors::Result;

use super::context::CompilationContext;

/// Builds one protocol's route object from a compilation context.
///
/// Implementations supply the per-operation rule and the route wrapper;
/// `generate_rules` stops at the first operation that fails, so a failed
/// compilation never yields a partial route.
pub trait RouteGenerator: Send + Sync {
    type Rule;
    type Route;

    fn protocol(&self) -> Protocol;

    fn generate_rule(&self, ctx: &CompilationContext<'_>, operation: &Operation) -> Result<Self::Rule>;

    fn generate_rules(&self, ctx: &CompilationContext<'_>) -> Result<Vec<Self::Rule>> {
        ctx.contract
            .operations
            .iter()
            .map(|operation| self.generate_rule(ctx, operation))
            .collect()
    }

    fn generate_route(&self, ctx: &CompilationContext<'_>) -> Result<Self::Route>;
}

//! Compilation context shared by the route generators

use crate::domain::{
    ApiContract, EndpointDetails, EndpointType, GatewayConfiguration, Operation, Organization,
    Protocol,
};
use crate::errors::{Error, Result};
use crate::gateway_api::ParentReference;

use super::endpoint::{operation_endpoint, resolve_endpoint};

/// Everything one (contract, endpoint type) compilation needs.
///
/// Built once per compilation and read by every generator call; nothing in it
/// is mutated while rules are generated.
#[derive(Debug, Clone)]
pub struct CompilationContext<'a> {
    pub contract: &'a ApiContract,
    pub gateway: &'a GatewayConfiguration,
    pub endpoint_type: EndpointType,
    pub organization: Organization,
    pub unique_id: String,
    pub count: u32,
    pub fallback_endpoint: Option<EndpointDetails>,
}

impl<'a> CompilationContext<'a> {
    /// Context with the contract id as unique id, a count of 1 and no fallback endpoint
    pub fn new(
        contract: &'a ApiContract,
        gateway: &'a GatewayConfiguration,
        endpoint_type: EndpointType,
    ) -> Self {
        Self {
            contract,
            gateway,
            endpoint_type,
            organization: Organization::default(),
            unique_id: contract.id.clone(),
            count: 1,
            fallback_endpoint: None,
        }
    }

    pub fn organization(mut self, organization: Organization) -> Self {
        self.organization = organization;
        self
    }

    pub fn unique_id<S: Into<String>>(mut self, unique_id: S) -> Self {
        self.unique_id = unique_id.into();
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn fallback_endpoint(mut self, endpoint: Option<EndpointDetails>) -> Self {
        self.fallback_endpoint = endpoint;
        self
    }

    /// Use the contract-level endpoint for this endpoint type as fallback
    pub fn contract_fallback(mut self) -> Self {
        self.fallback_endpoint =
            resolve_endpoint(self.contract.endpoint_configurations.as_ref(), None, &self.endpoint_type);
        self
    }

    /// `{uniqueId}-{endpointType}-{protocol}route-{count}`
    pub fn route_name(&self, protocol: Protocol) -> String {
        format!("{}-{}-{}route-{}", self.unique_id, self.endpoint_type, protocol, self.count)
    }

    /// The single parent reference every route attaches to
    pub fn parent_refs(&self) -> Vec<ParentReference> {
        vec![ParentReference::gateway(&self.gateway.name, &self.gateway.listener_name)]
    }

    /// Endpoint a rule for `operation` forwards to.
    ///
    /// The operation's own endpoint for this type wins, then the fallback.
    pub fn endpoint_for(&self, operation: &Operation) -> Result<EndpointDetails> {
        operation_endpoint(operation, &self.endpoint_type)
            .or_else(|| self.fallback_endpoint.clone())
            .ok_or_else(|| {
                Error::invalid_endpoint(operation.target_or_default(), self.endpoint_type.as_str())
            })
    }
}

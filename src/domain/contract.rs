//! API contract domain types
//!
//! Plain records describing an API: its operations, endpoints, policies and
//! the metadata carried alongside them. These types have no behavior beyond
//! small accessors; route synthesis lives in [`crate::synthesis`].

use serde::{Deserialize, Serialize};

use super::endpoint::EndpointConfigurations;
use super::policy::OperationPolicies;

pub const API_TYPE_REST: &str = "REST";
pub const API_TYPE_GRAPHQL: &str = "GRAPHQL";
pub const API_TYPE_GRPC: &str = "GRPC";
pub const API_TYPE_ASYNC: &str = "ASYNC";
pub const API_TYPE_SOAP: &str = "SOAP";
pub const API_TYPE_SSE: &str = "SSE";
pub const API_TYPE_WS: &str = "WS";
pub const API_TYPE_WEBSUB: &str = "WEBSUB";

/// Target used when an operation leaves its target empty
pub const MATCH_ALL_TARGET: &str = "/*";

/// Protocol a contract compiles to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Http,
    Grpc,
}

impl Protocol {
    /// Lowercase name used in generated route names (`httproute`, `grpcroute`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Grpc => "grpc",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Protocol-agnostic API description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContract {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub base_path: String,
    /// One of the `API_TYPE_*` values
    #[serde(default, rename = "type")]
    pub api_type: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub default_version: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_configurations: Option<EndpointConfigurations>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authentication: Vec<AuthConfiguration>,
    #[serde(default, rename = "corsConfiguration", skip_serializing_if = "Option::is_none")]
    pub cors_config: Option<CorsConfiguration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_properties: Vec<AdditionalProperty>,
    #[serde(default)]
    pub subscription_validation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimit>,
    /// Policies applied to every operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_policies: Option<OperationPolicies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_provider: Option<AiProvider>,
}

impl ApiContract {
    /// gRPC contracts compile to GRPCRoutes, everything else to HTTPRoutes
    pub fn protocol(&self) -> Protocol {
        if self.api_type.eq_ignore_ascii_case(API_TYPE_GRPC) {
            Protocol::Grpc
        } else {
            Protocol::Http
        }
    }
}

/// One routable action in a contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Path template for HTTP, fully qualified service name for gRPC
    #[serde(default)]
    pub target: String,
    /// HTTP method for HTTP, method name for gRPC
    #[serde(default)]
    pub verb: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub secured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_configurations: Option<EndpointConfigurations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_policies: Option<OperationPolicies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimit>,
}

impl Operation {
    pub fn new<T: Into<String>, V: Into<String>>(target: T, verb: V) -> Self {
        Self { target: target.into(), verb: verb.into(), ..Default::default() }
    }

    /// Target path, `/*` when none was given
    pub fn target_or_default(&self) -> &str {
        if self.target.is_empty() {
            MATCH_ALL_TARGET
        } else {
            &self.target
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    #[serde(default)]
    pub requests_per_unit: u32,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub name: String,
    pub key: String,
}

/// Security configuration for the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(default)]
    pub auth_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_name: Option<String>,
    #[serde(default, rename = "sendTokenToUpstream")]
    pub send_token_upstream: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_param_name: Option<String>,
    #[serde(default, rename = "headerEnable")]
    pub header_enabled: bool,
    #[serde(default)]
    pub query_param_enable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<Certificate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audience: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfiguration {
    #[serde(default)]
    pub cors_configuration_enabled: bool,
    #[serde(default)]
    pub access_control_allow_origins: Vec<String>,
    #[serde(default)]
    pub access_control_allow_credentials: bool,
    #[serde(default)]
    pub access_control_allow_headers: Vec<String>,
    #[serde(default)]
    pub access_control_allow_methods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalProperty {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiProvider {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub api_version: String,
}

/// Organization owning the API; only consulted for hostnames
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub organization_claim_value: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub service_listing_namespaces: Vec<String>,
    #[serde(default)]
    pub properties: Vec<OrganizationProperty>,
}

impl Organization {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationProperty {
    pub name: String,
    pub value: String,
}

/// Gateway and listener the generated routes attach to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfiguration {
    pub name: String,
    pub listener_name: String,
    #[serde(default)]
    pub hostname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_target_matches_everything() {
        assert_eq!(Operation::new("", "GET").target_or_default(), "/*");
        assert_eq!(Operation::new("/pets", "GET").target_or_default(), "/pets");
    }

    #[test]
    fn protocol_follows_api_type() {
        let mut contract = ApiContract { api_type: API_TYPE_REST.to_string(), ..Default::default() };
        assert_eq!(contract.protocol(), Protocol::Http);

        contract.api_type = API_TYPE_GRPC.to_string();
        assert_eq!(contract.protocol(), Protocol::Grpc);

        contract.api_type = "grpc".to_string();
        assert_eq!(contract.protocol(), Protocol::Grpc);

        contract.api_type = API_TYPE_GRAPHQL.to_string();
        assert_eq!(contract.protocol(), Protocol::Http);
    }

    #[test]
    fn contract_deserializes_from_yaml() {
        let yaml = r#"
name: EmployeeServiceAPI
version: "3.14"
basePath: /employees-info
type: REST
endpointConfigurations:
  production:
    endpoint: http://employee-service:8080
rateLimit:
  unit: Minute
  requestsPerUnit: 5
authentication:
  - authType: APIKey
    enabled: true
operations:
  - target: /employees
    verb: GET
    secured: true
  - target: /employee/{employeeId}
    verb: PUT
    secured: true
    scopes: [admin]
"#;
        let contract: ApiContract = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(contract.name, "EmployeeServiceAPI");
        assert_eq!(contract.base_path, "/employees-info");
        assert_eq!(contract.operations.len(), 2);
        assert_eq!(contract.operations[1].scopes, vec!["admin".to_string()]);
        assert_eq!(contract.rate_limit.as_ref().map(|r| r.requests_per_unit), Some(5));
        assert_eq!(contract.authentication[0].auth_type, "APIKey");
        assert!(contract.endpoint_configurations.unwrap().production.is_some());
    }
}

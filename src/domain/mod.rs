//! Domain layer
//!
//! This module contains the input records of route synthesis: API contracts,
//! their operations, endpoints and traffic policies. They are plain values
//! with zero infrastructure dependencies and are never mutated by the engine.
//!
//! ## Module Organization
//!
//! - `contract`: API contract, operations, organization and gateway identity
//! - `endpoint`: Endpoint variants, endpoint types and resolved endpoint details
//! - `policy`: Operation policies as a closed set of actions

pub mod contract;
pub mod endpoint;
pub mod policy;

pub use contract::{
    AdditionalProperty, AiProvider, ApiContract, AuthConfiguration, Certificate,
    CorsConfiguration, GatewayConfiguration, Operation, Organization, OrganizationProperty,
    Protocol, RateLimit, API_TYPE_ASYNC, API_TYPE_GRAPHQL, API_TYPE_GRPC, API_TYPE_REST,
    API_TYPE_SOAP, API_TYPE_SSE, API_TYPE_WEBSUB, API_TYPE_WS, MATCH_ALL_TARGET,
};
pub use endpoint::{
    AiRatelimit, Endpoint, EndpointCertificate, EndpointConfiguration, EndpointConfigurations,
    EndpointDetails, EndpointSecurity, EndpointType, RequestAiRatelimit, SecretInfo,
    ServiceEndpoint, TokenAiRatelimit, PRODUCTION_TYPE, SANDBOX_TYPE,
};
pub use policy::{Header, OperationPolicies, OperationPolicy, PolicyAction, RedirectPolicy, UrlList};

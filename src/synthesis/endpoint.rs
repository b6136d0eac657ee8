//! Endpoint resolution
//!
//! Picks the backend a rule forwards to and derives host, port, scheme and
//! path from endpoint URLs. URL handling is deliberately literal: only
//! `http://` and `https://` URLs are understood, and anything else yields no
//! host and no usable port.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{
    ApiContract, Endpoint, EndpointConfiguration, EndpointConfigurations, EndpointDetails,
    EndpointType, Operation, ServiceEndpoint,
};
use crate::gateway_api::BackendObjectReference;

const HTTPS_PREFIX: &str = "https://";
const HTTP_PREFIX: &str = "http://";
const DEFAULT_HTTPS_PORT: u16 = 443;
const DEFAULT_HTTP_PORT: u16 = 80;
const CLUSTER_DOMAIN: &str = "svc.cluster.local";

fn split_scheme(url: &str) -> Option<(&'static str, &str)> {
    if let Some(rest) = url.strip_prefix(HTTPS_PREFIX) {
        Some(("https", rest))
    } else {
        url.strip_prefix(HTTP_PREFIX).map(|rest| ("http", rest))
    }
}

/// URL of an in-cluster service: `{protocol}://{name}.{namespace}.svc.cluster.local:{port}`
pub fn service_url(service: &ServiceEndpoint) -> String {
    let protocol = if service.protocol.trim().is_empty() { "http" } else { service.protocol.trim() };
    format!(
        "{}://{}.{}.{}:{}",
        protocol, service.name, service.namespace, CLUSTER_DOMAIN, service.port
    )
}

/// URL an endpoint is reached at
pub fn endpoint_url(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Url(url) => url.clone(),
        Endpoint::Service(service) => service_url(service),
    }
}

/// Host part of a URL, cut at the first `:` or `/` after the scheme
pub fn host(url: &str) -> Option<&str> {
    let (_, rest) = split_scheme(url)?;
    let end = rest.find([':', '/']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Port of a URL, defaulting by scheme. `None` means no usable port.
pub fn port(url: &str) -> Option<u16> {
    let (scheme, rest) = split_scheme(url)?;
    let authority = rest.split('/').next().unwrap_or(rest);

    match authority.split_once(':') {
        Some((_, port)) => port.parse::<u16>().ok().filter(|port| *port > 0),
        None if scheme == "https" => Some(DEFAULT_HTTPS_PORT),
        None => Some(DEFAULT_HTTP_PORT),
    }
}

/// `https` for https URLs, `http` for everything else
pub fn scheme(url: &str) -> &'static str {
    if url.starts_with(HTTPS_PREFIX) {
        "https"
    } else {
        "http"
    }
}

/// Scheme of an endpoint; services use their declared protocol
pub fn endpoint_scheme(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Url(url) => scheme(url).to_string(),
        Endpoint::Service(service) if service.protocol.trim().is_empty() => "http".to_string(),
        Endpoint::Service(service) => service.protocol.trim().to_string(),
    }
}

/// Path of a URL starting at the first `/` after the authority, or empty
pub fn path(url: &str) -> &str {
    match split_scheme(url) {
        Some((_, rest)) => rest.find('/').map_or("", |index| &rest[index..]),
        None => "",
    }
}

/// Resolve one endpoint configuration. `None` when no host can be derived.
pub fn resolve_configuration(config: &EndpointConfiguration) -> Option<EndpointDetails> {
    let url = endpoint_url(&config.endpoint);
    let Some(name) = host(&url).filter(|host| !host.is_empty()) else {
        debug!(url = %url, "Endpoint URL has no http(s) host");
        return None;
    };

    let namespace = match &config.endpoint {
        Endpoint::Url(_) => None,
        Endpoint::Service(service) => Some(service.namespace.clone()),
    };

    Some(EndpointDetails {
        name: name.to_string(),
        url: url.clone(),
        namespace,
        service_entry: config.service_entry,
    })
}

/// Resolve the endpoint for a type, preferring the operation-level declaration
/// over the contract-level one.
pub fn resolve_endpoint(
    contract_endpoints: Option<&EndpointConfigurations>,
    operation_endpoints: Option<&EndpointConfigurations>,
    endpoint_type: &EndpointType,
) -> Option<EndpointDetails> {
    operation_endpoints
        .and_then(|configs| configs.get(endpoint_type))
        .or_else(|| contract_endpoints.and_then(|configs| configs.get(endpoint_type)))
        .and_then(resolve_configuration)
}

/// Endpoint an operation overrides for the given type
pub fn operation_endpoint(
    operation: &Operation,
    endpoint_type: &EndpointType,
) -> Option<EndpointDetails> {
    resolve_endpoint(None, operation.endpoint_configurations.as_ref(), endpoint_type)
}

/// Every contract-level endpoint, keyed by endpoint type
pub fn contract_endpoints(contract: &ApiContract) -> HashMap<EndpointType, EndpointDetails> {
    let mut endpoints = HashMap::new();
    let Some(configs) = contract.endpoint_configurations.as_ref() else {
        return endpoints;
    };

    for endpoint_type in [EndpointType::Production, EndpointType::Sandbox] {
        if let Some(details) = configs.get(&endpoint_type).and_then(resolve_configuration) {
            endpoints.insert(endpoint_type, details);
        }
    }
    endpoints
}

/// Service reference to a resolved endpoint
pub fn backend_object_reference(endpoint: &EndpointDetails) -> BackendObjectReference {
    BackendObjectReference {
        namespace: endpoint.namespace.clone(),
        port: port(&endpoint.url),
        ..BackendObjectReference::service(endpoint.name.clone())
    }
}

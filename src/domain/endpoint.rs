//! Endpoint domain types
//!
//! Backend endpoints as they appear in an API contract, and the resolved
//! [`EndpointDetails`] produced from them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PRODUCTION_TYPE: &str = "production";
pub const SANDBOX_TYPE: &str = "sandbox";

/// Traffic-direction selector for endpoint resolution.
///
/// `production` and `sandbox` are the two directions a contract declares
/// endpoints for. Any other key is carried through verbatim: it never matches
/// a declared endpoint, so rules compiled for it rely on the fallback endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EndpointType {
    Production,
    Sandbox,
    Other(String),
}

impl EndpointType {
    pub fn as_str(&self) -> &str {
        match self {
            EndpointType::Production => PRODUCTION_TYPE,
            EndpointType::Sandbox => SANDBOX_TYPE,
            EndpointType::Other(key) => key,
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EndpointType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            PRODUCTION_TYPE => EndpointType::Production,
            SANDBOX_TYPE => EndpointType::Sandbox,
            other => EndpointType::Other(other.to_string()),
        })
    }
}

impl From<&str> for EndpointType {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(endpoint_type) => endpoint_type,
            Err(never) => match never {},
        }
    }
}

/// A backend endpoint: either a literal URL or an in-cluster service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    /// Literal URL such as `http://employee-service:8080`
    Url(String),

    /// Kubernetes service reachable inside the cluster
    Service(ServiceEndpoint),
}

impl Endpoint {
    pub fn url<S: Into<String>>(url: S) -> Self {
        Endpoint::Url(url.into())
    }
}

/// In-cluster service coordinates
///
/// The port is kept as written. A value that is not a port number still
/// loads; it simply yields no usable port when the service URL is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub name: String,
    pub namespace: String,
    #[serde(deserialize_with = "port_from_number_or_string")]
    pub port: String,
    #[serde(default)]
    pub protocol: String,
}

fn port_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(i64),
        Text(String),
    }

    Ok(match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => port.to_string(),
        PortValue::Text(text) => text.trim().to_string(),
    })
}

/// Secret holding credentials for endpoint security
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    #[serde(default, rename = "userNameKey", skip_serializing_if = "Option::is_none")]
    pub username_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_name_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_value_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSecurity {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub security_type: SecretInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointCertificate {
    #[serde(rename = "secretName")]
    pub name: String,
    #[serde(rename = "secretKey")]
    pub key: String,
}

/// Token and request limits applied to AI backends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRatelimit {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub token: TokenAiRatelimit,
    #[serde(default)]
    pub request: RequestAiRatelimit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAiRatelimit {
    #[serde(default)]
    pub prompt_limit: u32,
    #[serde(default)]
    pub completion_limit: u32,
    #[serde(default)]
    pub total_limit: u32,
    /// Minute, Hour or Day
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAiRatelimit {
    #[serde(default)]
    pub request_limit: u32,
    /// Minute, Hour or Day
    #[serde(default)]
    pub unit: String,
}

/// One endpoint plus the metadata attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfiguration {
    pub endpoint: Endpoint,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<EndpointCertificate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_security: Option<EndpointSecurity>,

    #[serde(default, rename = "aiRatelimit", skip_serializing_if = "Option::is_none")]
    pub ai_ratelimit: Option<AiRatelimit>,

    /// Endpoint is registered as a mesh service entry
    #[serde(default)]
    pub service_entry: bool,
}

impl EndpointConfiguration {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            certificate: None,
            endpoint_security: None,
            ai_ratelimit: None,
            service_entry: false,
        }
    }
}

/// Production and sandbox endpoints declared at one scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfigurations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<EndpointConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<EndpointConfiguration>,
}

impl EndpointConfigurations {
    /// Endpoint declared for the given type, if any
    pub fn get(&self, endpoint_type: &EndpointType) -> Option<&EndpointConfiguration> {
        match endpoint_type {
            EndpointType::Production => self.production.as_ref(),
            EndpointType::Sandbox => self.sandbox.as_ref(),
            EndpointType::Other(_) => None,
        }
    }
}

/// Concrete backend picked for a rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDetails {
    /// Host name, used as the backend reference name
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub service_entry: bool,
}

impl EndpointDetails {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), ..Default::default() }
    }
}

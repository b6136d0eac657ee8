//! Types shared by HTTPRoute and GRPCRoute

use serde::{Deserialize, Serialize};

pub const GATEWAY_API_VERSION: &str = "gateway.networking.k8s.io/v1";
pub const GATEWAY_GROUP: &str = "gateway.networking.k8s.io";
pub const GATEWAY_KIND: &str = "Gateway";
pub const SERVICE_KIND: &str = "Service";

/// Object metadata. Only the name is generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
}

/// Reference from a route to the Gateway listener it attaches to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    pub group: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
}

impl ParentReference {
    /// Parent reference to a Gateway listener
    pub fn gateway<N: Into<String>, L: Into<String>>(name: N, listener_name: L) -> Self {
        Self {
            group: GATEWAY_GROUP.to_string(),
            kind: GATEWAY_KIND.to_string(),
            name: name.into(),
            section_name: Some(listener_name.into()),
        }
    }
}

/// Reference to a backend object, used by backend refs and mirror filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl BackendObjectReference {
    /// Reference to a Kubernetes Service
    pub fn service<S: Into<String>>(name: S) -> Self {
        Self {
            group: None,
            kind: Some(SERVICE_KIND.to_string()),
            name: name.into(),
            namespace: None,
            port: None,
        }
    }
}

/// Backend a rule forwards to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendRef {
    #[serde(flatten)]
    pub object: BackendObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

impl From<BackendObjectReference> for BackendRef {
    fn from(object: BackendObjectReference) -> Self {
        Self { object, weight: None }
    }
}

/// Fields common to every route spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonRouteSpec {
    #[serde(default)]
    pub parent_refs: Vec<ParentReference>,
}

//! Operation policy domain types
//!
//! Traffic policies attached to a contract or an operation. The policy name
//! decides the shape of its parameters, so a policy is modeled as a closed
//! [`PolicyAction`] enum and an unknown name is rejected while the contract
//! is being read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Error;

pub const ADD_HEADER: &str = "AddHeader";
pub const SET_HEADER: &str = "SetHeader";
pub const REMOVE_HEADER: &str = "RemoveHeader";
pub const MIRROR: &str = "Mirror";
pub const REDIRECT: &str = "Redirect";

/// Header name/value pair used by the header policies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub header_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub header_value: String,
}

/// Mirror targets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlList {
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectPolicy {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// What a policy does, keyed by its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyAction {
    AddHeader(Header),
    SetHeader(Header),
    RemoveHeader(Header),
    Mirror(UrlList),
    Redirect(RedirectPolicy),
}

impl PolicyAction {
    pub fn name(&self) -> &'static str {
        match self {
            PolicyAction::AddHeader(_) => ADD_HEADER,
            PolicyAction::SetHeader(_) => SET_HEADER,
            PolicyAction::RemoveHeader(_) => REMOVE_HEADER,
            PolicyAction::Mirror(_) => MIRROR,
            PolicyAction::Redirect(_) => REDIRECT,
        }
    }
}

/// A single named policy with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOperationPolicy", into = "RawOperationPolicy")]
pub struct OperationPolicy {
    pub action: PolicyAction,
    pub version: Option<String>,
    pub id: Option<String>,
}

impl OperationPolicy {
    pub fn new(action: PolicyAction) -> Self {
        Self { action, version: None, id: None }
    }

    pub fn add_header<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self::new(PolicyAction::AddHeader(Header {
            header_name: name.into(),
            header_value: value.into(),
        }))
    }

    pub fn set_header<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self::new(PolicyAction::SetHeader(Header {
            header_name: name.into(),
            header_value: value.into(),
        }))
    }

    pub fn remove_header<N: Into<String>>(name: N) -> Self {
        Self::new(PolicyAction::RemoveHeader(Header {
            header_name: name.into(),
            header_value: String::new(),
        }))
    }

    pub fn mirror<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PolicyAction::Mirror(UrlList { urls: urls.into_iter().map(Into::into).collect() }))
    }

    pub fn redirect<S: Into<String>>(url: S, status_code: Option<u16>) -> Self {
        Self::new(PolicyAction::Redirect(RedirectPolicy { url: url.into(), status_code }))
    }

    pub fn name(&self) -> &'static str {
        self.action.name()
    }
}

/// Wire shape of a policy: `policyName` plus an untyped `parameters` map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOperationPolicy {
    policy_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policy_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policy_id: Option<String>,
    #[serde(default)]
    parameters: Value,
}

fn parameters<T: serde::de::DeserializeOwned>(policy: &str, value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|err| Error::invalid_policy(policy, err.to_string()))
}

impl TryFrom<RawOperationPolicy> for OperationPolicy {
    type Error = Error;

    fn try_from(raw: RawOperationPolicy) -> Result<Self, Self::Error> {
        let name = raw.policy_name.as_str();
        let action = match name {
            ADD_HEADER => PolicyAction::AddHeader(parameters(name, raw.parameters)?),
            SET_HEADER => PolicyAction::SetHeader(parameters(name, raw.parameters)?),
            REMOVE_HEADER => PolicyAction::RemoveHeader(parameters(name, raw.parameters)?),
            MIRROR | "RequestMirror" => PolicyAction::Mirror(parameters(name, raw.parameters)?),
            REDIRECT | "RequestRedirect" => {
                PolicyAction::Redirect(parameters(name, raw.parameters)?)
            }
            other => return Err(Error::invalid_policy(other, "unknown policy name")),
        };

        Ok(Self { action, version: raw.policy_version, id: raw.policy_id })
    }
}

impl From<OperationPolicy> for RawOperationPolicy {
    fn from(policy: OperationPolicy) -> Self {
        let policy_name = policy.name().to_string();
        let parameters = match policy.action {
            PolicyAction::AddHeader(header)
            | PolicyAction::SetHeader(header)
            | PolicyAction::RemoveHeader(header) => serde_json::to_value(header),
            PolicyAction::Mirror(urls) => serde_json::to_value(urls),
            PolicyAction::Redirect(redirect) => serde_json::to_value(redirect),
        }
        .unwrap_or(Value::Null);

        Self {
            policy_name,
            policy_version: policy.version,
            policy_id: policy.id,
            parameters,
        }
    }
}

/// Request- and response-direction policy lists. Order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationPolicies {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request: Vec<OperationPolicy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response: Vec<OperationPolicy>,
}

impl OperationPolicies {
    /// True when neither direction carries a policy
    pub fn is_empty(&self) -> bool {
        self.request.is_empty() && self.response.is_empty()
    }
}

//! HTTPRoute resource model

use serde::{Deserialize, Serialize};

use super::common::{BackendObjectReference, BackendRef, CommonRouteSpec, ObjectMeta};

pub const HTTP_ROUTE_KIND: &str = "HTTPRoute";

/// Gateway API HTTPRoute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRoute {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: HttpRouteSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteSpec {
    #[serde(flatten)]
    pub common: CommonRouteSpec,
    #[serde(default)]
    pub hostnames: Vec<String>,
    #[serde(default)]
    pub rules: Vec<HttpRouteRule>,
}

/// One rule per contract operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteRule {
    #[serde(default)]
    pub matches: Vec<HttpRouteMatch>,
    #[serde(default)]
    pub filters: Vec<HttpRouteFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backend_refs: Vec<BackendRef>,
}

impl HttpRouteRule {
    pub fn has_redirect(&self) -> bool {
        self.filters.iter().any(|f| matches!(f, HttpRouteFilter::RequestRedirect { .. }))
    }

    pub fn url_rewrite(&self) -> Option<&HttpUrlRewriteFilter> {
        self.filters.iter().find_map(|f| match f {
            HttpRouteFilter::UrlRewrite { url_rewrite } => Some(url_rewrite),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteMatch {
    pub path: HttpPathMatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathMatchType {
    Exact,
    PathPrefix,
    RegularExpression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpPathMatch {
    #[serde(rename = "type")]
    pub match_type: PathMatchType,
    pub value: String,
}

impl HttpPathMatch {
    pub fn regex<S: Into<String>>(value: S) -> Self {
        Self { match_type: PathMatchType::RegularExpression, value: value.into() }
    }
}

/// Filter applied to requests matched by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HttpRouteFilter {
    RequestHeaderModifier {
        #[serde(rename = "requestHeaderModifier")]
        request_header_modifier: HttpHeaderFilter,
    },
    ResponseHeaderModifier {
        #[serde(rename = "responseHeaderModifier")]
        response_header_modifier: HttpHeaderFilter,
    },
    RequestMirror {
        #[serde(rename = "requestMirror")]
        request_mirror: HttpRequestMirrorFilter,
    },
    RequestRedirect {
        #[serde(rename = "requestRedirect")]
        request_redirect: HttpRequestRedirectFilter,
    },
    #[serde(rename = "URLRewrite")]
    UrlRewrite {
        #[serde(rename = "urlRewrite")]
        url_rewrite: HttpUrlRewriteFilter,
    },
}

impl HttpRouteFilter {
    /// Gateway API filter type name
    pub fn type_name(&self) -> &'static str {
        match self {
            HttpRouteFilter::RequestHeaderModifier { .. } => "RequestHeaderModifier",
            HttpRouteFilter::ResponseHeaderModifier { .. } => "ResponseHeaderModifier",
            HttpRouteFilter::RequestMirror { .. } => "RequestMirror",
            HttpRouteFilter::RequestRedirect { .. } => "RequestRedirect",
            HttpRouteFilter::UrlRewrite { .. } => "URLRewrite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

/// Header additions, overwrites and removals for one direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeaderFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set: Vec<HttpHeader>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<HttpHeader>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}

impl HttpHeaderFilter {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.add.is_empty() && self.remove.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestMirrorFilter {
    pub backend_ref: BackendObjectReference,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestRedirectFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpUrlRewriteFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathModifier>,
}

/// Path modification used by rewrite and redirect filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HttpPathModifier {
    ReplaceFullPath {
        #[serde(rename = "replaceFullPath")]
        replace_full_path: String,
    },
}

impl HttpPathModifier {
    pub fn full_path<S: Into<String>>(path: S) -> Self {
        HttpPathModifier::ReplaceFullPath { replace_full_path: path.into() }
    }

    pub fn value(&self) -> &str {
        match self {
            HttpPathModifier::ReplaceFullPath { replace_full_path } => replace_full_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filters_serialize_with_gateway_api_tags() {
        let rewrite = HttpRouteFilter::UrlRewrite {
            url_rewrite: HttpUrlRewriteFilter {
                hostname: None,
                path: Some(HttpPathModifier::full_path("/employee/\\1")),
            },
        };
        assert_eq!(
            serde_json::to_value(&rewrite).unwrap(),
            json!({
                "type": "URLRewrite",
                "urlRewrite": {
                    "path": { "type": "ReplaceFullPath", "replaceFullPath": "/employee/\\1" }
                }
            })
        );

        let headers = HttpRouteFilter::ResponseHeaderModifier {
            response_header_modifier: HttpHeaderFilter {
                remove: vec!["server".to_string()],
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&headers).unwrap(),
            json!({
                "type": "ResponseHeaderModifier",
                "responseHeaderModifier": { "remove": ["server"] }
            })
        );
    }

    #[test]
    fn path_match_serializes_type() {
        let route_match = HttpRouteMatch {
            path: HttpPathMatch::regex("/api(.*)"),
            method: Some("GET".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&route_match).unwrap(),
            json!({
                "path": { "type": "RegularExpression", "value": "/api(.*)" },
                "method": "GET"
            })
        );
    }
}

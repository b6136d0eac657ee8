//! Filter-chain synthesis
//!
//! Turns request and response operation policies into ordered Gateway API
//! filters. Within one direction, mirror and redirect filters keep the order
//! of their policies and a single header modifier combining every header
//! policy follows them. A URL rewrite closes the chain unless a redirect
//! appeared in either direction.

use tracing::{debug, warn};

use crate::domain::{
    ApiContract, EndpointDetails, Header, Operation, OperationPolicies, OperationPolicy, PolicyAction,
};
use crate::gateway_api::{
    HttpHeader, HttpHeaderFilter, HttpPathModifier, HttpRequestMirrorFilter,
    HttpRequestRedirectFilter, HttpRouteFilter, HttpUrlRewriteFilter,
};

use super::endpoint::{backend_object_reference, host, path, port, scheme};
use super::path::build_rewrite;

/// Direction a policy list applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Request,
    Response,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Request => "request",
            Direction::Response => "response",
        }
    }
}

/// Filters built for one rule, and whether a redirect was among them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain {
    pub filters: Vec<HttpRouteFilter>,
    pub has_redirect: bool,
}

impl FilterChain {
    fn extend(&mut self, other: FilterChain) {
        self.filters.extend(other.filters);
        self.has_redirect |= other.has_redirect;
    }
}

#[derive(Default)]
struct HeaderBuckets {
    add: Vec<HttpHeader>,
    set: Vec<HttpHeader>,
    remove: Vec<String>,
}

impl HeaderBuckets {
    fn into_filter(self, direction: Direction) -> Option<HttpRouteFilter> {
        let modifier = HttpHeaderFilter { set: self.set, add: self.add, remove: self.remove };
        if modifier.is_empty() {
            return None;
        }

        Some(match direction {
            Direction::Request => {
                HttpRouteFilter::RequestHeaderModifier { request_header_modifier: modifier }
            }
            Direction::Response => {
                HttpRouteFilter::ResponseHeaderModifier { response_header_modifier: modifier }
            }
        })
    }
}

fn header(policy_header: &Header) -> HttpHeader {
    HttpHeader { name: policy_header.header_name.clone(), value: policy_header.header_value.clone() }
}

fn redirect_filter(url: &str, status_code: Option<u16>) -> HttpRouteFilter {
    let mut request_redirect = HttpRequestRedirectFilter::default();

    if port(url).is_some() {
        request_redirect.hostname = host(url).map(str::to_string);
        request_redirect.scheme = Some(scheme(url).to_string());
        let redirect_path = path(url);
        if !redirect_path.is_empty() {
            request_redirect.path = Some(HttpPathModifier::full_path(redirect_path));
        }
    } else {
        debug!(url = %url, "Redirect URL has no usable port; leaving target to the gateway");
    }

    request_redirect.status_code = status_code.filter(|code| *code > 0);

    HttpRouteFilter::RequestRedirect { request_redirect }
}

/// Build the filters for one direction's policies.
///
/// Mirror filters reference the backend of `endpoint`; a mirror URL without a
/// usable port is dropped. Mirror and redirect policies on the response
/// direction are logged as warnings and still emitted.
pub fn build_filters(
    policies: &[OperationPolicy],
    direction: Direction,
    endpoint: &EndpointDetails,
) -> FilterChain {
    let mut chain = FilterChain::default();
    let mut headers = HeaderBuckets::default();

    for policy in policies {
        match &policy.action {
            PolicyAction::AddHeader(h) => headers.add.push(header(h)),
            PolicyAction::SetHeader(h) => headers.set.push(header(h)),
            PolicyAction::RemoveHeader(h) => headers.remove.push(h.header_name.clone()),
            PolicyAction::Mirror(list) => {
                if direction == Direction::Response {
                    warn!(
                        policy = policy.name(),
                        direction = direction.as_str(),
                        "Mirror filter cannot be applied as a response policy"
                    );
                }
                for url in &list.urls {
                    if port(url).is_none() {
                        debug!(url = %url, "Skipping mirror URL without a usable port");
                        continue;
                    }
                    chain.filters.push(HttpRouteFilter::RequestMirror {
                        request_mirror: HttpRequestMirrorFilter {
                            backend_ref: backend_object_reference(endpoint),
                        },
                    });
                }
            }
            PolicyAction::Redirect(redirect) => {
                if direction == Direction::Response {
                    warn!(
                        policy = policy.name(),
                        direction = direction.as_str(),
                        "Redirect filter cannot be applied as a response policy"
                    );
                }
                chain.has_redirect = true;
                chain.filters.push(redirect_filter(&redirect.url, redirect.status_code));
            }
        }
    }

    if let Some(modifier) = headers.into_filter(direction) {
        chain.filters.push(modifier);
    }

    chain
}

/// Policies a rule is built from.
///
/// Non-empty API-wide policies replace every operation's own policies.
pub fn effective_policies<'a>(
    contract: &'a ApiContract,
    operation: &'a Operation,
) -> Option<&'a OperationPolicies> {
    match contract.api_policies.as_ref() {
        Some(api_policies) if !api_policies.is_empty() => Some(api_policies),
        _ => operation.operation_policies.as_ref(),
    }
}

/// URL rewrite to the translated upstream path
pub fn url_rewrite_filter(operation: &Operation, endpoint: &EndpointDetails) -> HttpRouteFilter {
    let rewrite = build_rewrite(operation.target_or_default(), endpoint.service_entry);
    HttpRouteFilter::UrlRewrite {
        url_rewrite: HttpUrlRewriteFilter {
            hostname: None,
            path: Some(HttpPathModifier::full_path(rewrite)),
        },
    }
}

/// Complete filter chain for one HTTP rule
pub fn build_rule_filters(
    contract: &ApiContract,
    operation: &Operation,
    endpoint: &EndpointDetails,
) -> FilterChain {
    let mut chain = FilterChain::default();

    if let Some(policies) = effective_policies(contract, operation) {
        chain.extend(build_filters(&policies.request, Direction::Request, endpoint));
        chain.extend(build_filters(&policies.response, Direction::Response, endpoint));
    }

    if !chain.has_redirect {
        chain.filters.push(url_rewrite_filter(operation, endpoint));
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn endpoint() -> EndpointDetails {
        EndpointDetails {
            name: "employee-service".to_string(),
            url: "http://employee-service:8080".to_string(),
            namespace: None,
            service_entry: false,
        }
    }

    fn with_policies(request: Vec<OperationPolicy>, response: Vec<OperationPolicy>) -> Operation {
        Operation {
            operation_policies: Some(OperationPolicies { request, response }),
            ..Operation::new("/employee/{employeeId}", "GET")
        }
    }

    #[test]
    fn header_policies_merge_into_one_modifier() {
        let chain = build_filters(
            &[
                OperationPolicy::add_header("x-request-id", "abc"),
                OperationPolicy::remove_header("x-debug"),
                OperationPolicy::set_header("x-env", "prod"),
                OperationPolicy::add_header("x-trace", "1"),
            ],
            Direction::Request,
            &endpoint(),
        );

        assert!(!chain.has_redirect);
        assert_eq!(chain.filters.len(), 1);
        match &chain.filters[0] {
            HttpRouteFilter::RequestHeaderModifier { request_header_modifier } => {
                let added: Vec<_> =
                    request_header_modifier.add.iter().map(|h| h.name.as_str()).collect();
                assert_eq!(added, vec!["x-request-id", "x-trace"]);
                assert_eq!(request_header_modifier.set[0].value, "prod");
                assert_eq!(request_header_modifier.remove, vec!["x-debug".to_string()]);
            }
            other => panic!("unexpected filter {}", other.type_name()),
        }
    }

    #[test]
    fn response_headers_use_response_modifier() {
        let chain = build_filters(
            &[OperationPolicy::remove_header("server")],
            Direction::Response,
            &endpoint(),
        );
        assert_eq!(chain.filters[0].type_name(), "ResponseHeaderModifier");
    }

    #[test]
    fn header_modifier_follows_mirror_filters() {
        let chain = build_filters(
            &[
                OperationPolicy::add_header("x-a", "1"),
                OperationPolicy::mirror(["http://mirror:9000", "http://mirror:bad", "https://other"]),
            ],
            Direction::Request,
            &endpoint(),
        );

        let types: Vec<_> = chain.filters.iter().map(HttpRouteFilter::type_name).collect();
        assert_eq!(types, vec!["RequestMirror", "RequestMirror", "RequestHeaderModifier"]);

        match &chain.filters[0] {
            HttpRouteFilter::RequestMirror { request_mirror } => {
                assert_eq!(request_mirror.backend_ref.name, "employee-service");
                assert_eq!(request_mirror.backend_ref.port, Some(8080));
            }
            other => panic!("unexpected filter {}", other.type_name()),
        }
    }

    #[test]
    fn redirect_derives_target_from_url() {
        let chain = build_filters(
            &[OperationPolicy::redirect("https://new.example.com/v2/employees", Some(301))],
            Direction::Request,
            &endpoint(),
        );

        assert!(chain.has_redirect);
        match &chain.filters[0] {
            HttpRouteFilter::RequestRedirect { request_redirect } => {
                assert_eq!(request_redirect.hostname.as_deref(), Some("new.example.com"));
                assert_eq!(request_redirect.scheme.as_deref(), Some("https"));
                assert_eq!(
                    request_redirect.path.as_ref().map(HttpPathModifier::value),
                    Some("/v2/employees")
                );
                assert_eq!(request_redirect.status_code, Some(301));
            }
            other => panic!("unexpected filter {}", other.type_name()),
        }
    }

    #[test]
    fn redirect_without_usable_port_leaves_target_unset() {
        let chain = build_filters(
            &[OperationPolicy::redirect("http://new.example.com:abc", None)],
            Direction::Request,
            &endpoint(),
        );

        assert!(chain.has_redirect);
        assert_eq!(
            chain.filters,
            vec![HttpRouteFilter::RequestRedirect {
                request_redirect: HttpRequestRedirectFilter::default()
            }]
        );
    }

    #[test]
    fn zero_status_code_is_not_attached() {
        let chain = build_filters(
            &[OperationPolicy::redirect("http://new.example.com", Some(0))],
            Direction::Request,
            &endpoint(),
        );
        match &chain.filters[0] {
            HttpRouteFilter::RequestRedirect { request_redirect } => {
                assert_eq!(request_redirect.status_code, None);
                assert_eq!(request_redirect.path, None);
            }
            other => panic!("unexpected filter {}", other.type_name()),
        }
    }

    #[traced_test]
    #[test]
    fn response_mirror_warns_and_is_kept() {
        let chain = build_filters(
            &[OperationPolicy::mirror(["http://mirror:9000"])],
            Direction::Response,
            &endpoint(),
        );

        assert_eq!(chain.filters.len(), 1);
        assert!(logs_contain("Mirror filter cannot be applied as a response policy"));
    }

    #[traced_test]
    #[test]
    fn response_redirect_warns_and_is_kept() {
        let chain = build_filters(
            &[OperationPolicy::redirect("http://new.example.com", None)],
            Direction::Response,
            &endpoint(),
        );

        assert!(chain.has_redirect);
        assert!(logs_contain("Redirect filter cannot be applied as a response policy"));
    }

    #[test]
    fn rule_without_redirect_ends_with_rewrite() {
        let operation = with_policies(vec![OperationPolicy::add_header("x-a", "1")], vec![]);
        let chain = build_rule_filters(&ApiContract::default(), &operation, &endpoint());

        assert!(!chain.has_redirect);
        let types: Vec<_> = chain.filters.iter().map(HttpRouteFilter::type_name).collect();
        assert_eq!(types, vec!["RequestHeaderModifier", "URLRewrite"]);
        match chain.filters.last() {
            Some(HttpRouteFilter::UrlRewrite { url_rewrite }) => {
                assert_eq!(url_rewrite.path.as_ref().map(HttpPathModifier::value), Some("/employee/\\1"));
            }
            _ => panic!("expected URLRewrite"),
        }
    }

    #[test]
    fn redirect_in_either_direction_suppresses_rewrite() {
        let request_redirect =
            with_policies(vec![OperationPolicy::redirect("http://moved:8080/x", None)], vec![]);
        let chain = build_rule_filters(&ApiContract::default(), &request_redirect, &endpoint());
        assert!(chain.has_redirect);
        assert!(chain.filters.iter().all(|f| f.type_name() != "URLRewrite"));

        let response_redirect =
            with_policies(vec![], vec![OperationPolicy::redirect("http://moved:8080/x", None)]);
        let chain = build_rule_filters(&ApiContract::default(), &response_redirect, &endpoint());
        assert!(chain.has_redirect);
        assert!(chain.filters.iter().all(|f| f.type_name() != "URLRewrite"));
    }

    #[test]
    fn request_filters_precede_response_filters() {
        let operation = with_policies(
            vec![OperationPolicy::set_header("x-req", "1")],
            vec![OperationPolicy::set_header("x-res", "1")],
        );
        let chain = build_rule_filters(&ApiContract::default(), &operation, &endpoint());
        let types: Vec<_> = chain.filters.iter().map(HttpRouteFilter::type_name).collect();
        assert_eq!(types, vec!["RequestHeaderModifier", "ResponseHeaderModifier", "URLRewrite"]);
    }

    #[test]
    fn api_policies_replace_operation_policies() {
        let contract = ApiContract {
            api_policies: Some(OperationPolicies {
                request: vec![OperationPolicy::add_header("x-api", "1")],
                response: vec![],
            }),
            ..Default::default()
        };
        let operation = with_policies(vec![OperationPolicy::redirect("http://moved", None)], vec![]);

        let chosen = effective_policies(&contract, &operation);
        assert_eq!(chosen, contract.api_policies.as_ref());

        let chain = build_rule_filters(&contract, &operation, &endpoint());
        assert!(!chain.has_redirect);
        let types: Vec<_> = chain.filters.iter().map(HttpRouteFilter::type_name).collect();
        assert_eq!(types, vec!["RequestHeaderModifier", "URLRewrite"]);
    }

    #[test]
    fn empty_api_policies_defer_to_operation() {
        let contract =
            ApiContract { api_policies: Some(OperationPolicies::default()), ..Default::default() };
        let operation = with_policies(vec![OperationPolicy::add_header("x-op", "1")], vec![]);

        assert_eq!(effective_policies(&contract, &operation), operation.operation_policies.as_ref());
    }

    #[test]
    fn service_entry_rewrite_is_trimmed() {
        let operation = Operation::new("/ items ", "GET");
        let endpoint = EndpointDetails { service_entry: true, ..endpoint() };
        match url_rewrite_filter(&operation, &endpoint) {
            HttpRouteFilter::UrlRewrite { url_rewrite } => {
                assert_eq!(url_rewrite.path.as_ref().map(HttpPathModifier::value), Some("/items"));
            }
            other => panic!("unexpected filter {}", other.type_name()),
        }
    }
}

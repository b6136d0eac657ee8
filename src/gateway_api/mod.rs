//! # Gateway API route model
//!
//! The route resources produced by synthesis: HTTPRoute and GRPCRoute as
//! defined by the Kubernetes Gateway API (`gateway.networking.k8s.io/v1`).
//! Field names serialize in the Gateway API's camelCase form so a compiled
//! route can be submitted to a control plane as-is.

pub mod common;
pub mod grpc;
pub mod http;

pub use common::{
    BackendObjectReference, BackendRef, CommonRouteSpec, ObjectMeta, ParentReference,
    GATEWAY_API_VERSION, GATEWAY_GROUP, GATEWAY_KIND, SERVICE_KIND,
};
pub use grpc::{
    GrpcMethodMatch, GrpcMethodMatchType, GrpcRoute, GrpcRouteMatch, GrpcRouteRule,
    GrpcRouteSpec, GRPC_ROUTE_KIND,
};
pub use http::{
    HttpHeader, HttpHeaderFilter, HttpPathMatch, HttpPathModifier, HttpRequestMirrorFilter,
    HttpRequestRedirectFilter, HttpRoute, HttpRouteFilter, HttpRouteMatch, HttpRouteRule,
    HttpRouteSpec, HttpUrlRewriteFilter, PathMatchType, HTTP_ROUTE_KIND,
};

//! # Structured Logging
//!
//! Span macros and subscriber setup on top of the tracing ecosystem.
//!
//! `RUST_LOG` takes precedence over the configured log level. With
//! `json_logging` enabled every event is written as one JSON object per line,
//! including the fields of the enclosing compile span.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, ObservabilityConfig};

/// Create a tracing span for one route compilation.
///
/// ```rust,ignore
/// let span = compile_span!(contract.name, endpoint_type, protocol);
/// let span = compile_span!(contract.name, endpoint_type, protocol, unique_id = "route-1");
/// ```
#[macro_export]
macro_rules! compile_span {
    ($contract:expr, $endpoint_type:expr, $protocol:expr) => {
        tracing::info_span!(
            "route_compilation",
            contract = %$contract,
            endpoint_type = %$endpoint_type,
            protocol = %$protocol
        )
    };
    ($contract:expr, $endpoint_type:expr, $protocol:expr, $($field:tt)*) => {
        tracing::info_span!(
            "route_compilation",
            contract = %$contract,
            endpoint_type = %$endpoint_type,
            protocol = %$protocol,
            $($field)*
        )
    };
}

/// Filter from `RUST_LOG`, else the configured level
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed (tests, embedding
/// applications); the existing one is kept.
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = if config.json_logging {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };

    let installed = result.is_ok();
    if installed {
        tracing::info!(
            service_name = %config.service_name,
            log_level = %config.log_level,
            json_logging = %config.json_logging,
            "Logging initialized"
        );
    }
    installed
}

/// Log configuration at startup
pub fn log_config_info(config: &AppConfig) {
    tracing::debug!(
        service_name = %config.observability.service_name,
        gateway = %config.gateway.name,
        listener = %config.gateway.listener_name,
        endpoint_type = %config.gateway.endpoint_type,
        output_format = %config.output.format,
        json_logging = %config.observability.json_logging,
        "routeplane configuration"
    );
}

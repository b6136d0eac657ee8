//! # Configuration Settings
//!
//! Defines the configuration structure for routeplane.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// Gateway the generated routes attach to
    #[validate(nested)]
    pub gateway: GatewayDefaults,

    /// Output rendering
    #[validate(nested)]
    pub output: OutputConfig,

    /// Observability configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;
        self.validate_custom()
    }

    fn validate_custom(&self) -> Result<()> {
        if self.gateway.count == 0 {
            return Err(Error::validation_field("Route count must start at 1", "count"));
        }

        if self.gateway.vhosts().any(|host| host.contains("://")) {
            return Err(Error::validation_field(
                "Virtual hosts must be bare host names without a scheme",
                "vhosts",
            ));
        }

        Ok(())
    }

    /// Load configuration from `ROUTEPLANE_*` environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = AppConfig::default();

        let config = Self {
            gateway: GatewayDefaults {
                name: env_or("ROUTEPLANE_GATEWAY_NAME", defaults.gateway.name),
                listener_name: env_or("ROUTEPLANE_GATEWAY_LISTENER", defaults.gateway.listener_name),
                hostname: env_or("ROUTEPLANE_GATEWAY_HOSTNAME", defaults.gateway.hostname),
                organization: env_or("ROUTEPLANE_ORGANIZATION", defaults.gateway.organization),
                endpoint_type: env_or("ROUTEPLANE_ENDPOINT_TYPE", defaults.gateway.endpoint_type),
                count: env_parse("ROUTEPLANE_ROUTE_COUNT", defaults.gateway.count)?,
                production_vhosts: env_list(
                    "ROUTEPLANE_PRODUCTION_VHOSTS",
                    defaults.gateway.production_vhosts,
                ),
                sandbox_vhosts: env_list("ROUTEPLANE_SANDBOX_VHOSTS", defaults.gateway.sandbox_vhosts),
            },
            output: OutputConfig {
                format: env_parse("ROUTEPLANE_OUTPUT_FORMAT", defaults.output.format)?,
            },
            observability: ObservabilityConfig {
                service_name: env_or("ROUTEPLANE_SERVICE_NAME", defaults.observability.service_name),
                log_level: env_or("ROUTEPLANE_LOG_LEVEL", defaults.observability.log_level),
                json_logging: env_parse("ROUTEPLANE_JSON_LOGGING", defaults.observability.json_logging)?,
            },
        };

        config.validate()?;
        Ok(config)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty()).unwrap_or(default)
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e| Error::config(format!("Invalid value for {}: {}", key, e))),
        _ => Ok(default),
    }
}

fn env_list(key: &str, default: Vec<String>) -> Vec<String> {
    match std::env::var(key) {
        Ok(value) => value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => default,
    }
}

/// Gateway identity and compilation defaults
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GatewayDefaults {
    /// Gateway resource name
    #[validate(length(min = 1, message = "Gateway name cannot be empty"))]
    pub name: String,

    /// Listener (section name) on the gateway
    #[validate(length(min = 1, message = "Listener name cannot be empty"))]
    pub listener_name: String,

    /// Gateway hostname
    pub hostname: String,

    /// Organization name used for hostnames
    pub organization: String,

    /// Endpoint type compiled when none is given
    #[validate(length(min = 1, message = "Endpoint type cannot be empty"))]
    pub endpoint_type: String,

    /// Sequence counter in generated route names
    pub count: u32,

    /// Virtual host domains for production routes
    pub production_vhosts: Vec<String>,

    /// Virtual host domains for sandbox routes
    pub sandbox_vhosts: Vec<String>,
}

impl Default for GatewayDefaults {
    fn default() -> Self {
        Self {
            name: "wso2-apim".to_string(),
            listener_name: "wso2-apim-gateway".to_string(),
            hostname: "wso2-apim".to_string(),
            organization: "default".to_string(),
            endpoint_type: "production".to_string(),
            count: 1,
            production_vhosts: Vec::new(),
            sandbox_vhosts: Vec::new(),
        }
    }
}

impl GatewayDefaults {
    fn vhosts(&self) -> impl Iterator<Item = &String> {
        self.production_vhosts.iter().chain(self.sandbox_vhosts.iter())
    }

    /// True when any virtual host is configured
    pub fn has_vhosts(&self) -> bool {
        self.vhosts().next().is_some()
    }
}

/// Rendering of compiled routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(Error::config(format!(
                "Unsupported output format: '{}'. Use 'json' or 'yaml'.",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Service name attached to logs
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "routeplane".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

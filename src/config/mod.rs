//! # Configuration Management
//!
//! Gateway identity, output and logging settings for the routeplane CLI.
//! Values come from defaults overridden by `ROUTEPLANE_*` environment
//! variables; a `.env` file is loaded by the binary before reading them.

pub mod settings;

pub use settings::{AppConfig, GatewayDefaults, ObservabilityConfig, OutputConfig, OutputFormat};

use crate::domain::{GatewayConfiguration, Organization};

impl GatewayDefaults {
    /// Gateway identity the routes attach to
    pub fn gateway_configuration(&self) -> GatewayConfiguration {
        GatewayConfiguration {
            name: self.name.clone(),
            listener_name: self.listener_name.clone(),
            hostname: self.hostname.clone(),
        }
    }

    pub fn organization(&self) -> Organization {
        Organization::named(self.organization.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const VARS: &[&str] = &[
        "ROUTEPLANE_GATEWAY_NAME",
        "ROUTEPLANE_GATEWAY_LISTENER",
        "ROUTEPLANE_ROUTE_COUNT",
        "ROUTEPLANE_OUTPUT_FORMAT",
        "ROUTEPLANE_PRODUCTION_VHOSTS",
        "ROUTEPLANE_JSON_LOGGING",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_config_from_env() {
        clear();
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.gateway.name, "wso2-apim");
        assert_eq!(config.gateway.count, 1);

        env::set_var("ROUTEPLANE_GATEWAY_NAME", "edge");
        env::set_var("ROUTEPLANE_GATEWAY_LISTENER", "https");
        env::set_var("ROUTEPLANE_ROUTE_COUNT", "4");
        env::set_var("ROUTEPLANE_OUTPUT_FORMAT", "yaml");
        env::set_var("ROUTEPLANE_PRODUCTION_VHOSTS", "gw.example.com, api.example.com");
        env::set_var("ROUTEPLANE_JSON_LOGGING", "true");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.gateway.name, "edge");
        assert_eq!(config.gateway.listener_name, "https");
        assert_eq!(config.gateway.count, 4);
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert_eq!(config.gateway.production_vhosts, vec!["gw.example.com", "api.example.com"]);
        assert!(config.observability.json_logging);

        let gateway = config.gateway.gateway_configuration();
        assert_eq!(gateway.name, "edge");
        assert_eq!(gateway.listener_name, "https");

        env::set_var("ROUTEPLANE_ROUTE_COUNT", "many");
        assert!(matches!(AppConfig::from_env(), Err(crate::Error::Config { .. })));

        clear();
    }
}

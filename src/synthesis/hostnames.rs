//! Hostname resolution for compiled routes

use crate::domain::{ApiContract, EndpointType, Organization};

/// Supplies the hostnames a compiled route is served on
pub trait HostnameResolver: Send + Sync {
    fn hostnames(
        &self,
        contract: &ApiContract,
        endpoint_type: &EndpointType,
        organization: &Organization,
    ) -> Vec<String>;
}

/// Routes carry no hostnames and match every host on the listener
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHostnames;

impl HostnameResolver for NoHostnames {
    fn hostnames(&self, _: &ApiContract, _: &EndpointType, _: &Organization) -> Vec<String> {
        Vec::new()
    }
}

/// Virtual hosts per endpoint type.
///
/// Each configured domain yields `{organization}[-{environment}].{domain}`, or
/// the bare domain when the organization has no name.
#[derive(Debug, Clone, Default)]
pub struct VirtualHostnames {
    pub production: Vec<String>,
    pub sandbox: Vec<String>,
}

impl VirtualHostnames {
    pub fn new(production: Vec<String>, sandbox: Vec<String>) -> Self {
        Self { production, sandbox }
    }

    fn domains(&self, endpoint_type: &EndpointType) -> &[String] {
        match endpoint_type {
            EndpointType::Production => &self.production,
            EndpointType::Sandbox => &self.sandbox,
            EndpointType::Other(_) => &[],
        }
    }
}

impl HostnameResolver for VirtualHostnames {
    fn hostnames(
        &self,
        contract: &ApiContract,
        endpoint_type: &EndpointType,
        organization: &Organization,
    ) -> Vec<String> {
        let mut prefix = organization.name.clone();
        if !prefix.is_empty() && !contract.environment.is_empty() {
            prefix = format!("{}-{}", prefix, contract.environment);
        }

        self.domains(endpoint_type)
            .iter()
            .filter(|domain| !domain.trim().is_empty())
            .map(|domain| {
                if prefix.is_empty() {
                    domain.trim().to_string()
                } else {
                    format!("{}.{}", prefix, domain.trim())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hostnames_is_empty() {
        let hosts = NoHostnames.hostnames(
            &ApiContract::default(),
            &EndpointType::Production,
            &Organization::named("wso2"),
        );
        assert!(hosts.is_empty());
    }

    #[test]
    fn virtual_hosts_are_prefixed_by_organization() {
        let resolver = VirtualHostnames::new(
            vec!["gw.example.com".to_string()],
            vec!["sandbox.gw.example.com".to_string(), " ".to_string()],
        );
        let contract = ApiContract::default();
        let org = Organization::named("wso2");

        assert_eq!(
            resolver.hostnames(&contract, &EndpointType::Production, &org),
            vec!["wso2.gw.example.com".to_string()]
        );
        assert_eq!(
            resolver.hostnames(&contract, &EndpointType::Sandbox, &org),
            vec!["wso2.sandbox.gw.example.com".to_string()]
        );
        assert!(resolver.hostnames(&contract, &EndpointType::from("canary"), &org).is_empty());
    }

    #[test]
    fn environment_joins_organization() {
        let resolver = VirtualHostnames::new(vec!["gw.example.com".to_string()], vec![]);
        let contract = ApiContract { environment: "dev".to_string(), ..Default::default() };

        assert_eq!(
            resolver.hostnames(&contract, &EndpointType::Production, &Organization::named("wso2")),
            vec!["wso2-dev.gw.example.com".to_string()]
        );
        assert_eq!(
            resolver.hostnames(&contract, &EndpointType::Production, &Organization::default()),
            vec!["gw.example.com".to_string()]
        );
    }
}

//! # Command Line Interface
//!
//! Compiles API contract files into Gateway API routes and prints them.

pub mod output;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{AppConfig, OutputFormat};
use crate::domain::{EndpointDetails, EndpointType};
use crate::loader::load_contract;
use crate::observability::{init_logging, log_config_info};
use crate::synthesis::{
    contract_endpoints, CompilationContext, HostnameResolver, NoHostnames, RouteCompiler,
    VirtualHostnames,
};

#[derive(Parser)]
#[command(name = "routeplane")]
#[command(about = "Compile API contracts into Gateway API routes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json or yaml)
    #[arg(short, long, global = true)]
    pub output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a contract into an HTTPRoute or GRPCRoute
    Generate {
        /// Contract file (YAML or JSON)
        contract: PathBuf,

        /// Endpoint type to compile: production, sandbox or an override key
        #[arg(short, long)]
        endpoint_type: Option<String>,

        /// Unique route identifier, defaults to the contract id
        #[arg(long)]
        unique_id: Option<String>,

        /// Sequence counter in the route name
        #[arg(long)]
        count: Option<u32>,

        /// Organization name used for hostnames
        #[arg(long)]
        organization: Option<String>,

        /// Gateway name override
        #[arg(long)]
        gateway: Option<String>,

        /// Gateway listener override
        #[arg(long)]
        listener: Option<String>,
    },

    /// Show the contract-level endpoints by endpoint type
    Endpoints {
        /// Contract file (YAML or JSON)
        contract: PathBuf,
    },
}

/// Run CLI commands
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if cli.verbose {
        config.observability.log_level = "debug".to_string();
    }
    initialise_logging(&config);
    log_config_info(&config);

    let format = match cli.output.as_deref() {
        Some(format) => format.parse::<OutputFormat>()?,
        None => config.output.format,
    };

    match cli.command {
        Commands::Generate {
            contract,
            endpoint_type,
            unique_id,
            count,
            organization,
            gateway,
            listener,
        } => {
            if let Some(gateway) = gateway {
                config.gateway.name = gateway;
            }
            if let Some(listener) = listener {
                config.gateway.listener_name = listener;
            }
            if let Some(organization) = organization {
                config.gateway.organization = organization;
            }
            if let Some(endpoint_type) = endpoint_type {
                config.gateway.endpoint_type = endpoint_type;
            }
            if let Some(count) = count {
                config.gateway.count = count;
            }
            config.validate()?;

            handle_generate(&contract, unique_id, &config, format)
        }
        Commands::Endpoints { contract } => handle_endpoints(&contract, format),
    }
}

fn initialise_logging(config: &AppConfig) {
    if !init_logging(&config.observability) {
        tracing::debug!("Logging subscriber already installed; keeping it");
    }
}

fn hostname_resolver(config: &AppConfig) -> Arc<dyn HostnameResolver> {
    if config.gateway.has_vhosts() {
        Arc::new(VirtualHostnames::new(
            config.gateway.production_vhosts.clone(),
            config.gateway.sandbox_vhosts.clone(),
        ))
    } else {
        Arc::new(NoHostnames)
    }
}

fn handle_generate(
    path: &Path,
    unique_id: Option<String>,
    config: &AppConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let contract = load_contract(path)?;
    let gateway = config.gateway.gateway_configuration();
    let organization = config.gateway.organization();
    let endpoint_type = EndpointType::from(config.gateway.endpoint_type.as_str());

    let mut ctx = CompilationContext::new(&contract, &gateway, endpoint_type)
        .organization(organization)
        .count(config.gateway.count)
        .contract_fallback();
    if let Some(unique_id) = unique_id {
        ctx = ctx.unique_id(unique_id);
    }

    let route = RouteCompiler::new(hostname_resolver(config))
        .compile(&ctx)
        .with_context(|| format!("Failed to compile {}", path.display()))?;

    info!(route = %route.name(), "Route generated");
    output::print_output(&route, format)
}

fn handle_endpoints(path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let contract = load_contract(path)?;
    let endpoints: BTreeMap<String, EndpointDetails> = contract_endpoints(&contract)
        .into_iter()
        .map(|(endpoint_type, details)| (endpoint_type.to_string(), details))
        .collect();

    output::print_output(&endpoints, format)
}

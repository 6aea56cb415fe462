//! CLI entry point for edge-api.
//!
//! Loads a client profile, then dispatches one subcommand per API
//! operation. Results are printed as JSON, except resource listings which
//! default to a table.
//!
//! Exit codes:
//! - 0: success
//! - 1: runtime error (validation, API error, not found, network, config)
//! - 2: argument error (clap handles this automatically)

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use edge_api::activations::{ActivateEndpointRequest, Activation, activate_endpoint};
use edge_api::client::EdgeClient;
use edge_api::config::{ClientConfig, DEFAULT_SECTION};
use edge_api::endpoints::Network;
use edge_api::error::Result;
use edge_api::export_configuration::{GetExportConfigurationRequest, get_export_configuration};
use edge_api::resources::{
    GetResourcesRequest, get_resource, get_resources, get_resources_matching, resources_table,
};
use edge_api::siem_settings::{
    GetSiemSettingsRequest, RemoveSiemSettingsRequest, SiemSettings, UpdateSiemSettingsRequest,
    get_siem_settings, remove_siem_settings, update_siem_settings,
};

/// Log filter variable. Takes precedence over `-v`.
const LOG_ENV: &str = "EDGE_API_LOG";

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file. Defaults to ~/.edge-api.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Profile (top-level table) to read from the config file.
    #[arg(long, global = true, default_value = DEFAULT_SECTION)]
    section: String,

    /// Output format for listings.
    #[arg(long, global = true, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Args, Debug)]
struct EndpointVersion {
    #[arg(long)]
    endpoint_id: u64,

    #[arg(long)]
    endpoint_version: u64,
}

impl EndpointVersion {
    fn resources_request(&self) -> GetResourcesRequest {
        GetResourcesRequest {
            endpoint_id: self.endpoint_id,
            version: self.endpoint_version,
        }
    }
}

#[derive(Args, Debug)]
struct ConfigVersion {
    #[arg(long)]
    config_id: u64,

    #[arg(long)]
    config_version: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Activate an endpoint version on one or more networks.
    Activate {
        #[command(flatten)]
        target: EndpointVersion,

        /// Network to activate on (staging or production). Repeatable.
        #[arg(long = "network", required = true)]
        networks: Vec<Network>,

        /// Email notified on completion. Repeatable.
        #[arg(long = "notify")]
        notification_recipients: Vec<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List the resources of an endpoint version.
    Resources {
        #[command(flatten)]
        target: EndpointVersion,
    },

    /// Look up resources by ID or by pattern over name and path.
    Resource {
        #[command(flatten)]
        target: EndpointVersion,

        /// Resource ID, or a regular expression. With --all a trailing `*`
        /// is a wildcard.
        token: String,

        /// Return every match instead of the first.
        #[arg(long)]
        all: bool,
    },

    /// Fetch the full export of a security configuration version.
    Export {
        #[command(flatten)]
        target: ConfigVersion,
    },

    /// Manage SIEM settings of a security configuration version.
    Siem {
        #[command(subcommand)]
        action: SiemCommands,
    },
}

#[derive(Subcommand)]
enum SiemCommands {
    /// Show the current SIEM settings.
    Get {
        #[command(flatten)]
        target: ConfigVersion,
    },

    /// Replace the SIEM settings.
    Update {
        #[command(flatten)]
        target: ConfigVersion,

        #[arg(long)]
        enable_siem: bool,

        /// Forward events for every security policy.
        #[arg(long)]
        all_policies: bool,

        /// Also forward Bot Manager events.
        #[arg(long)]
        botman_events: bool,

        #[arg(long, default_value_t = 0)]
        siem_definition_id: u64,

        /// Security policy ID to forward events for. Repeatable.
        #[arg(long = "policy")]
        firewall_policy_ids: Vec<String>,
    },

    /// Disable SIEM forwarding.
    Remove {
        #[command(flatten)]
        target: ConfigVersion,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::load(cli.config.as_deref(), &cli.section)?;
    tracing::info!("Using host {}", config.host);
    let client = EdgeClient::new(&config)?;

    match cli.command {
        Commands::Activate {
            target,
            networks,
            notification_recipients,
            notes,
        } => {
            let request = ActivateEndpointRequest {
                endpoint_id: target.endpoint_id,
                version: target.endpoint_version,
                activation: Activation {
                    networks,
                    notification_recipients,
                    notes,
                },
            };
            let submitted = activate_endpoint(&client, &request).await?;
            print_json(&submitted)
        }
        Commands::Resources { target } => {
            let resources = get_resources(&client, &target.resources_request()).await?;
            match cli.format {
                Format::Json => print_json(&resources),
                Format::Table => {
                    println!("{}", resources_table(&resources));
                    Ok(())
                }
            }
        }
        Commands::Resource { target, token, all } => {
            let request = target.resources_request();
            let resources = if all {
                get_resources_matching(&client, &request, &token).await?
            } else {
                vec![get_resource(&client, &request, &token).await?]
            };
            match cli.format {
                Format::Json => print_json(&resources),
                Format::Table => {
                    println!("{}", resources_table(&resources));
                    Ok(())
                }
            }
        }
        Commands::Export { target } => {
            let request = GetExportConfigurationRequest {
                config_id: target.config_id,
                version: target.config_version,
            };
            print_json(&get_export_configuration(&client, &request).await?)
        }
        Commands::Siem { action } => match action {
            SiemCommands::Get { target } => {
                let request = GetSiemSettingsRequest {
                    config_id: target.config_id,
                    version: target.config_version,
                };
                print_json(&get_siem_settings(&client, &request).await?)
            }
            SiemCommands::Update {
                target,
                enable_siem,
                all_policies,
                botman_events,
                siem_definition_id,
                firewall_policy_ids,
            } => {
                let request = UpdateSiemSettingsRequest {
                    config_id: target.config_id,
                    version: target.config_version,
                    settings: SiemSettings {
                        enable_for_all_policies: all_policies,
                        enable_siem,
                        enabled_botman_siem_events: botman_events,
                        siem_definition_id,
                        firewall_policy_ids,
                    },
                };
                print_json(&update_siem_settings(&client, &request).await?)
            }
            SiemCommands::Remove { target } => {
                let request = RemoveSiemSettingsRequest {
                    config_id: target.config_id,
                    version: target.config_version,
                };
                print_json(&remove_siem_settings(&client, &request).await?)
            }
        },
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn activate_collects_repeated_networks() {
        let cli = Cli::try_parse_from([
            "edge-api",
            "activate",
            "--endpoint-id",
            "492375",
            "--endpoint-version",
            "3",
            "--network",
            "staging",
            "--network",
            "PRODUCTION",
            "--notify",
            "ops@example.com",
        ])
        .expect("should parse a full activate command");
        match cli.command {
            Commands::Activate {
                target,
                networks,
                notification_recipients,
                notes,
            } => {
                assert_eq!(target.endpoint_id, 492375);
                assert_eq!(target.endpoint_version, 3);
                assert_eq!(networks, vec![Network::Staging, Network::Production]);
                assert_eq!(notification_recipients, vec!["ops@example.com"]);
                assert!(notes.is_empty());
            }
            _ => panic!("expected activate"),
        }
    }

    #[test]
    fn activate_requires_a_network() {
        let result = Cli::try_parse_from([
            "edge-api",
            "activate",
            "--endpoint-id",
            "1",
            "--endpoint-version",
            "1",
        ]);
        assert!(result.is_err(), "activate without --network must be rejected");
    }

    #[test]
    fn unknown_network_is_rejected() {
        let result = Cli::try_parse_from([
            "edge-api",
            "activate",
            "--endpoint-id",
            "1",
            "--endpoint-version",
            "1",
            "--network",
            "qa",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn resource_lookup_takes_positional_token() {
        let cli = Cli::try_parse_from([
            "edge-api",
            "resource",
            "--endpoint-id",
            "7",
            "--endpoint-version",
            "2",
            "users*",
            "--all",
            "--format",
            "json",
        ])
        .expect("should parse resource lookup");
        assert_eq!(cli.format, Format::Json);
        match cli.command {
            Commands::Resource { token, all, .. } => {
                assert_eq!(token, "users*");
                assert!(all);
            }
            _ => panic!("expected resource"),
        }
    }

    #[test]
    fn siem_update_maps_flags() {
        let cli = Cli::try_parse_from([
            "edge-api",
            "--section",
            "staging",
            "siem",
            "update",
            "--config-id",
            "43253",
            "--config-version",
            "7",
            "--enable-siem",
            "--siem-definition-id",
            "1",
            "--policy",
            "PLCY_1",
            "--policy",
            "PLCY_2",
        ])
        .expect("should parse siem update");
        assert_eq!(cli.section, "staging");
        match cli.command {
            Commands::Siem {
                action:
                    SiemCommands::Update {
                        target,
                        enable_siem,
                        all_policies,
                        firewall_policy_ids,
                        ..
                    },
            } => {
                assert_eq!(target.config_id, 43253);
                assert_eq!(target.config_version, 7);
                assert!(enable_siem);
                assert!(!all_policies);
                assert_eq!(firewall_policy_ids, vec!["PLCY_1", "PLCY_2"]);
            }
            _ => panic!("expected siem update"),
        }
    }

    #[test]
    fn single_verbose_flag_enables_debug() {
        let cli = Cli::try_parse_from([
            "edge-api",
            "-v",
            "siem",
            "get",
            "--config-id",
            "1",
            "--config-version",
            "1",
        ])
        .expect("should parse -v");
        assert_eq!(log_level(cli.verbose), "debug");
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(2), "trace");
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["edge-api"]).is_err());
    }
}

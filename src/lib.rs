//! Async Rust client library for the API definitions and application
//! security REST APIs.
//!
//! Each operation validates the identifying fields of its request, builds
//! the request against a fixed URI template, executes it through
//! [`client::EdgeClient`] and decodes the JSON answer into a typed record.
//! Statuses outside an operation's success set become
//! [`error::EdgeError::Api`].
//!
//! # Modules
//!
//! - [`activations`]: endpoint version activation and the active-network check.
//! - [`auth`]: request signing seam (`RequestSigner`).
//! - [`client`]: HTTP executor (signing, status checks, JSON decoding).
//! - [`config`]: TOML profile configuration with environment overrides.
//! - [`endpoints`]: endpoint definition records and activation networks.
//! - [`error`]: typed error hierarchy (`EdgeError`).
//! - [`export_configuration`]: exported security configuration versions.
//! - [`resources`]: endpoint resources, ID/pattern matching, table output.
//! - [`siem_settings`]: SIEM settings get / update / remove.
//!
//! # Quick Start
//!
//! ```ignore
//! use edge_api::client::EdgeClient;
//! use edge_api::config::ClientConfig;
//! use edge_api::siem_settings::{GetSiemSettingsRequest, get_siem_settings};
//!
//! let config = ClientConfig::load(None, "default")?;
//! let client = EdgeClient::new(&config)?;
//! let siem = get_siem_settings(&client, &GetSiemSettingsRequest { config_id: 43253, version: 7 }).await?;
//! ```

pub mod activations;
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod export_configuration;
pub mod resources;
pub mod siem_settings;

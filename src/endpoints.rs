//! API endpoint definitions and activation networks.
//!
//! An [`Endpoint`] is one version of an API definition. Its staging and
//! production status strings are what [`is_active`](crate::activations::is_active)
//! inspects. [`Network`] names the two activation targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::null_as_default;

/// Activation target network.
///
/// Serialized upper-case (`"STAGING"`, `"PRODUCTION"`) to match the
/// activation request body. Parsed case-insensitively so CLI users can
/// type `staging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Network {
    Staging,
    Production,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Staging => f.write_str("staging"),
            Network::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "staging" => Ok(Network::Staging),
            "production" => Ok(Network::Production),
            other => Err(format!(
                "unknown network '{other}', expected 'staging' or 'production'"
            )),
        }
    }
}

/// One version of an API endpoint definition.
///
/// Only the ID, name and version are always present. Status fields are
/// absent for versions that were never activated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub api_end_point_id: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub api_end_point_name: String,

    #[serde(default)]
    pub api_end_point_version: Option<i64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub base_path: Option<String>,

    /// Hostnames the endpoint is served on.
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_end_point_hosts: Vec<String>,

    /// Staging activation status, e.g. `ACTIVE`, `PENDING`, `DEACTIVATED`.
    #[serde(default)]
    pub staging_status: Option<String>,

    /// Production activation status, same vocabulary as staging.
    #[serde(default)]
    pub production_status: Option<String>,

    #[serde(default)]
    pub lock_version: i64,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub create_date: Option<String>,

    #[serde(default)]
    pub updated_by: Option<String>,

    #[serde(default)]
    pub update_date: Option<String>,
}

impl Endpoint {
    /// Status string reported for `network`, if any.
    pub fn status(&self, network: Network) -> Option<&str> {
        match network {
            Network::Staging => self.staging_status.as_deref(),
            Network::Production => self.production_status.as_deref(),
        }
    }
}

//! Client configuration loading.
//!
//! Configuration lives in a TOML file whose top-level tables are named
//! profiles, so one file can hold credentials for several accounts:
//!
//! ```toml
//! [default]
//! host = "akab-xxxx.luna.example.net"
//! access_token = "akab-token"
//!
//! [staging]
//! host = "https://staging-api.example.net"
//! request_timeout_secs = 120
//! ```
//!
//! Values are resolved in order, later sources winning:
//!
//! 1. Built-in defaults (timeouts).
//! 2. The selected profile of the config file, when the file exists.
//! 3. `EDGE_API_HOST` / `EDGE_API_TOKEN` environment variables.
//!
//! A missing file is not an error as long as the environment supplies a
//! host. A missing profile inside an existing file is.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EdgeError, Result};

/// Default config file name, resolved against the home directory.
pub const CONFIG_FILE: &str = ".edge-api.toml";

/// Profile used when none is selected.
pub const DEFAULT_SECTION: &str = "default";

pub const HOST_ENV: &str = "EDGE_API_HOST";
pub const TOKEN_ENV: &str = "EDGE_API_TOKEN";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One profile table as written in the file. Every key is optional so
/// the environment can fill in what the file leaves out.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Profile {
    host: Option<String>,
    access_token: Option<String>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Resolved settings for an [`EdgeClient`](crate::client::EdgeClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API host. Always carries a scheme once resolved.
    pub host: String,
    /// Bearer token, when the deployment uses one.
    pub access_token: Option<String>,
    /// TCP + TLS handshake budget.
    pub connect_timeout: Duration,
    /// Whole request budget, including the response body.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Config for `host` with default timeouts and no token.
    pub fn new(host: &str) -> Self {
        ClientConfig {
            host: normalize_host(host),
            access_token: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// `~/.edge-api.toml`, or `.edge-api.toml` in the working directory
    /// when no home directory is known.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Loads `section` from the file at `path` (or the default path) and
    /// applies environment overrides.
    pub fn load(path: Option<&Path>, section: &str) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        let profile = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| EdgeError::Config {
                message: format!("cannot read {}", path.display()),
                source: Some(Box::new(e)),
            })?;
            debug!("Loaded config file {:?}", path);
            Some(parse_profile(&content, section)?)
        } else {
            debug!("No config file at {:?}", path);
            None
        };

        resolve(
            profile,
            std::env::var(HOST_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
        )
    }

    /// Parses `section` out of TOML text, without environment overrides.
    pub fn from_toml(content: &str, section: &str) -> Result<Self> {
        resolve(Some(parse_profile(content, section)?), None, None)
    }

    /// Base URL with a trailing slash, ready for relative paths.
    pub fn base_url(&self) -> String {
        format!("{}/", self.host.trim_end_matches('/'))
    }
}

fn parse_profile(content: &str, section: &str) -> Result<Profile> {
    let mut profiles: BTreeMap<String, Profile> =
        toml::from_str(content).map_err(|e| EdgeError::Config {
            message: "invalid config file".to_string(),
            source: Some(Box::new(e)),
        })?;
    profiles
        .remove(section)
        .ok_or_else(|| EdgeError::config(format!("profile [{section}] not found in config file")))
}

fn resolve(
    profile: Option<Profile>,
    env_host: Option<String>,
    env_token: Option<String>,
) -> Result<ClientConfig> {
    let profile = profile.unwrap_or_default();

    let host = env_host
        .filter(|h| !h.is_empty())
        .or(profile.host)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| EdgeError::config(format!("no host configured (set `host` or {HOST_ENV})")))?;

    let mut config = ClientConfig::new(&host);
    config.access_token = env_token.filter(|t| !t.is_empty()).or(profile.access_token);
    if let Some(secs) = profile.connect_timeout_secs {
        config.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = profile.request_timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

/// Hosts are usually written bare in credential files.
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

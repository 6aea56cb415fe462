//! SIEM settings of a security configuration version.
//!
//! SIEM settings control whether security events for the version are
//! forwarded to a SIEM connector, and for which firewall policies.
//!
//! ## Endpoints
//!
//! | Function | API Path |
//! |----------|----------|
//! | [`get_siem_settings`] | GET `/appsec/v1/configs/{configId}/versions/{version}/siem` |
//! | [`update_siem_settings`] | PUT `/appsec/v1/configs/{configId}/versions/{version}/siem` |
//! | [`remove_siem_settings`] | PUT `/appsec/v1/configs/{configId}/versions/{version}/siem` |
//!
//! There is no DELETE for this resource. Removing settings is an update
//! whose body is fixed to `{"enableSiem": false}`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::client::{EdgeClient, null_as_default};
use crate::error::Result;

/// SIEM settings as read and written by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiemSettings {
    /// Forward events for every security policy, ignoring
    /// `firewall_policy_ids`.
    pub enable_for_all_policies: bool,
    pub enable_siem: bool,
    /// Also forward Bot Manager events.
    pub enabled_botman_siem_events: bool,
    /// SIEM connector definition events are delivered to.
    pub siem_definition_id: u64,
    /// Security policies whose events are forwarded when
    /// `enable_for_all_policies` is off.
    #[serde(deserialize_with = "null_as_default")]
    pub firewall_policy_ids: Vec<String>,
}

// ── Requests ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct GetSiemSettingsRequest {
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub config_id: u64,
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub version: u64,
}

/// Replaces the SIEM settings of a configuration version.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct UpdateSiemSettingsRequest {
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub config_id: u64,
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub version: u64,
    pub settings: SiemSettings,
}

/// Disables SIEM forwarding for a configuration version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct RemoveSiemSettingsRequest {
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub config_id: u64,
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub version: u64,
}

/// Body of the settings PUT. Remove is the `Reset` form of update.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SiemUpdate<'a> {
    Settings(&'a SiemSettings),
    Reset {
        #[serde(rename = "enableSiem")]
        enable_siem: bool,
    },
}

const RESET: SiemUpdate<'static> = SiemUpdate::Reset { enable_siem: false };

// ── Endpoint functions ──────────────────────────────────────────────────

/// Reads the SIEM settings of a configuration version.
///
/// # Errors
///
/// - `EdgeError::Validation`: zero config ID or version. Nothing is sent.
/// - `EdgeError::Api`: non-200 status.
/// - `EdgeError::Network` / `EdgeError::Parse`: transport or decode failure.
pub async fn get_siem_settings(
    client: &EdgeClient,
    params: &GetSiemSettingsRequest,
) -> Result<SiemSettings> {
    params.validate()?;

    debug!("GetSiemSettings");
    client.get(&siem_path(params.config_id, params.version)).await
}

/// Replaces the SIEM settings of a configuration version and returns the
/// settings the API stored. 200 and 201 are both success.
///
/// # Errors
///
/// Same as [`get_siem_settings`].
pub async fn update_siem_settings(
    client: &EdgeClient,
    params: &UpdateSiemSettingsRequest,
) -> Result<SiemSettings> {
    params.validate()?;

    debug!("UpdateSiemSettings");
    put_siem(
        client,
        params.config_id,
        params.version,
        &SiemUpdate::Settings(&params.settings),
    )
    .await
}

/// Turns SIEM forwarding off for a configuration version and returns the
/// resulting settings.
///
/// # Errors
///
/// Same as [`get_siem_settings`].
pub async fn remove_siem_settings(
    client: &EdgeClient,
    params: &RemoveSiemSettingsRequest,
) -> Result<SiemSettings> {
    params.validate()?;

    debug!("RemoveSiemSettings");
    put_siem(client, params.config_id, params.version, &RESET).await
}

async fn put_siem(
    client: &EdgeClient,
    config_id: u64,
    version: u64,
    body: &SiemUpdate<'_>,
) -> Result<SiemSettings> {
    client.put(&siem_path(config_id, version), body).await
}

fn siem_path(config_id: u64, version: u64) -> String {
    format!("/appsec/v1/configs/{config_id}/versions/{version}/siem")
}

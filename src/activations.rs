//! Endpoint version activation.
//!
//! | Function | API Path |
//! |----------|----------|
//! | [`activate_endpoint`] | POST `/api-definitions/v2/endpoints/{endpointId}/versions/{version}/activate` |
//!
//! [`is_active`] is the local gate callers use before activating or while
//! polling: a network counts as active once its status is `PENDING` or
//! `ACTIVE`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::client::{EdgeClient, null_as_default};
use crate::endpoints::{Endpoint, Network};
use crate::error::Result;

/// Request body for the activate endpoint, also returned on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    /// Networks to activate on. At least one is required.
    #[validate(length(min = 1, message = "cannot be blank"))]
    pub networks: Vec<Network>,
    /// Email addresses notified when activation completes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub notification_recipients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

/// Targets one version of an endpoint.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ActivateEndpointRequest {
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub endpoint_id: u64,
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub version: u64,
    #[validate(nested)]
    pub activation: Activation,
}

/// Activates `params.version` of endpoint `params.endpoint_id`.
///
/// The API's response body carries nothing beyond what was submitted, so
/// on success the submitted activation is returned.
///
/// # Errors
///
/// - `EdgeError::Validation`: zero endpoint ID or version, or no
///   networks. Nothing is sent.
/// - `EdgeError::Api`: non-2xx status.
/// - `EdgeError::Network`: transport-level failure.
pub async fn activate_endpoint(
    client: &EdgeClient,
    params: &ActivateEndpointRequest,
) -> Result<Activation> {
    params.validate()?;

    debug!("ActivateEndpoint");
    let path = format!(
        "/api-definitions/v2/endpoints/{}/versions/{}/activate",
        params.endpoint_id, params.version
    );
    client.post_accepted(&path, &params.activation).await?;
    Ok(params.activation.clone())
}

/// Whether `endpoint` is active (or activating) on `network`.
pub fn is_active(endpoint: &Endpoint, network: Network) -> bool {
    matches!(endpoint.status(network), Some("PENDING" | "ACTIVE"))
}

//! Exported security configuration versions.
//!
//! | Function | API Path |
//! |----------|----------|
//! | [`get_export_configuration`] | GET `/appsec/v1/export/configs/{configId}/versions/{version}` |
//!
//! The export is a full snapshot of one configuration version: hosts,
//! rate policies, reputation profiles, custom rules, rulesets, match
//! targets, security policies and advanced options. Every nested
//! collection defaults to empty and unknown members are ignored, so the
//! types tolerate both sparse exports and schema additions.

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::client::{EdgeClient, null_as_default};
use crate::error::Result;

// ── Request ─────────────────────────────────────────────────────────────

/// Identifies the configuration version to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct GetExportConfigurationRequest {
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub config_id: u64,
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub version: u64,
}

// ── Response ────────────────────────────────────────────────────────────

/// Full export of one configuration version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfiguration {
    pub config_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub config_name: String,
    pub version: u64,
    /// Version this one was cloned from.
    pub based_on: u64,
    pub staging: NetworkStatus,
    pub production: NetworkStatus,
    pub create_date: Option<String>,
    pub created_by: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub selected_hosts: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub selectable_hosts: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub rate_policies: Vec<RatePolicy>,
    #[serde(deserialize_with = "null_as_default")]
    pub reputation_profiles: Vec<ReputationProfile>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_rules: Vec<CustomRule>,
    #[serde(deserialize_with = "null_as_default")]
    pub rulesets: Vec<Ruleset>,
    pub match_targets: MatchTargets,
    #[serde(deserialize_with = "null_as_default")]
    pub security_policies: Vec<SecurityPolicy>,
    pub advanced_options: AdvancedOptions,
}

/// Activation status of the version on one network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

/// A rate control policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatePolicy {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub policy_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub match_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub request_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub client_identifier: String,
    pub average_threshold: u64,
    pub burst_threshold: u64,
    pub all_traffic: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub additional_match_options: Vec<AdditionalMatchOption>,
    pub file_extensions: ValueMatch,
    pub path: ValueMatch,
    #[serde(deserialize_with = "null_as_default")]
    pub path_match_type: String,
    pub path_uri_positive_match: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub query_parameters: Vec<QueryParameter>,
    pub same_action_on_ipv6: bool,
    pub use_x_forward_for_headers: bool,
    pub used: bool,
    pub create_date: Option<String>,
    pub update_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdditionalMatchOption {
    pub positive_match: bool,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub option_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<String>,
}

/// A value list with a match polarity, used for paths and extensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValueMatch {
    pub positive_match: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParameter {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub positive_match: bool,
    pub value_in_range: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReputationProfile {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub context: String,
    #[serde(deserialize_with = "null_as_default")]
    pub context_readable: String,
    pub enabled: bool,
    pub threshold: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomRule {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub version: u64,
    pub rule_activated: bool,
    pub structured: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub tag: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<CustomRuleCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomRuleCondition {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub condition_type: String,
    pub positive_match: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub value: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub value_case: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub value_wildcard: bool,
}

/// A versioned set of WAF rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Ruleset {
    pub id: u64,
    pub ruleset_version_id: u64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub ruleset_type: String,
    pub release_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rule {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    pub rule_version: u64,
    pub score: i64,
    pub inspect_request_body: bool,
    pub inspect_response_body: bool,
    pub outdated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchTargets {
    #[serde(deserialize_with = "null_as_default")]
    pub website_targets: Vec<WebsiteTarget>,
}

/// Routes matching traffic to a security policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebsiteTarget {
    pub id: u64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub target_type: String,
    pub sequence: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub default_file: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_paths: Vec<String>,
    pub is_negative_file_extension_match: bool,
    pub is_negative_path_match: bool,
    pub effective_security_controls: EffectiveSecurityControls,
    pub security_policy: SecurityPolicyRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectiveSecurityControls {
    pub apply_application_layer_controls: bool,
    pub apply_network_layer_controls: bool,
    pub apply_rate_controls: bool,
    pub apply_reputation_controls: bool,
    pub apply_slow_post_controls: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityPolicyRef {
    #[serde(deserialize_with = "null_as_default")]
    pub policy_id: String,
}

/// A security policy and the actions it applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityPolicy {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub has_rate_policy_with_api_key: bool,
    pub security_controls: SecurityControls,
    pub web_application_firewall: WebApplicationFirewall,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_rule_actions: Vec<CustomRuleAction>,
    pub api_request_constraints: ApiRequestConstraints,
    pub client_reputation: ClientReputation,
    #[serde(deserialize_with = "null_as_default")]
    pub rate_policy_actions: Vec<RatePolicyAction>,
    pub ip_geo_firewall: IpGeoFirewall,
    pub slow_post: SlowPost,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityControls {
    pub apply_api_constraints: bool,
    pub apply_application_layer_controls: bool,
    pub apply_botman_controls: bool,
    pub apply_network_layer_controls: bool,
    pub apply_rate_controls: bool,
    pub apply_reputation_controls: bool,
    pub apply_slow_post_controls: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebApplicationFirewall {
    #[serde(deserialize_with = "null_as_default")]
    pub rule_actions: Vec<RuleAction>,
    #[serde(deserialize_with = "null_as_default")]
    pub attack_group_actions: Vec<AttackGroupAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleAction {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    pub ruleset_version_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttackGroupAction {
    #[serde(deserialize_with = "null_as_default")]
    pub group: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    pub ruleset_version_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomRuleAction {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiRequestConstraints {
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientReputation {
    #[serde(deserialize_with = "null_as_default")]
    pub reputation_profile_actions: Vec<ReputationProfileAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationProfileAction {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatePolicyAction {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub ipv4_action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ipv6_action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpGeoFirewall {
    #[serde(deserialize_with = "null_as_default")]
    pub block: String,
}

/// Slow POST protection settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlowPost {
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    pub slow_rate_threshold: SlowRateThreshold,
    pub duration_threshold: DurationThreshold,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlowRateThreshold {
    pub period: u64,
    pub rate: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationThreshold {
    pub timeout: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedOptions {
    pub logging: LoggingOptions,
    pub prefetch: Prefetch,
}

/// Which request headers and cookies are included in security logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingOptions {
    pub allow_sampling: bool,
    pub cookies: HeaderSelection,
    pub custom_headers: HeaderSelection,
    pub standard_headers: HeaderSelection,
}

/// `all`, `none`, `only` or `exclude`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSelection {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub selection_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Prefetch {
    pub all_extensions: bool,
    pub enable_app_layer: bool,
    pub enable_rate_controls: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub extensions: Vec<String>,
}

// ── Endpoint function ───────────────────────────────────────────────────

/// Fetches the full export of a configuration version.
///
/// # Errors
///
/// - `EdgeError::Validation`: zero config ID or version. Nothing is sent.
/// - `EdgeError::Api`: non-200 status.
/// - `EdgeError::Network` / `EdgeError::Parse`: transport or decode failure.
pub async fn get_export_configuration(
    client: &EdgeClient,
    params: &GetExportConfigurationRequest,
) -> Result<ExportConfiguration> {
    params.validate()?;

    debug!("GetExportConfiguration");
    let path = format!(
        "/appsec/v1/export/configs/{}/versions/{}",
        params.config_id, params.version
    );
    client.get(&path).await
}

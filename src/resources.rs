//! Resources of an endpoint version.
//!
//! - [`get_resources`]: GET `/api-definitions/v2/endpoints/{endpointId}/versions/{version}/resources`
//! - [`find_resource`] / [`find_resources`]: resolve a free-form token
//!   against a listing.
//! - [`get_resource`] / [`get_resources_matching`]: fetch, then resolve.
//! - [`resources_table`]: render a listing for a terminal.
//!
//! ## Tokens
//!
//! A token that parses as an integer is an exact resource ID. Anything
//! else is a regular expression searched (unanchored) in both the
//! resource name and its path. The multi-match variant also accepts a
//! trailing `*` shell-style wildcard, rewritten to `.*`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};
use tracing::debug;
use validator::Validate;

use crate::client::{EdgeClient, null_as_default};
use crate::error::{EdgeError, Result};

/// Identifies the endpoint version whose resources are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct GetResourcesRequest {
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub endpoint_id: u64,
    #[validate(range(min = 1, message = "cannot be blank"))]
    pub version: u64,
}

/// An HTTP method attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMethod {
    #[serde(default)]
    pub api_resource_method_id: Option<i64>,
    /// Method name, e.g. `GET`.
    #[serde(deserialize_with = "null_as_default")]
    pub api_resource_method: String,
    #[serde(default)]
    pub api_resource_method_logic_id: Option<i64>,
}

/// A path/method grouping within an endpoint version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub api_resource_id: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub api_resource_name: String,

    #[serde(deserialize_with = "null_as_default")]
    pub resource_path: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub lock_version: i64,

    /// Whether the resource is hidden from API consumers.
    #[serde(default)]
    pub private: bool,

    /// Set when the resource was cloned from another version.
    #[serde(default)]
    pub api_resource_cloned_from_id: Option<i64>,

    /// Stable across versions, unlike `api_resource_id`.
    #[serde(default)]
    pub api_resource_logic_id: i64,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub create_date: Option<String>,

    #[serde(default)]
    pub updated_by: Option<String>,

    #[serde(default)]
    pub update_date: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub api_resource_methods: Vec<ResourceMethod>,

    /// Method names only. The listing endpoint fills this in.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub api_resource_method_name_lists: Vec<String>,
}

impl Resource {
    fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.api_resource_name) || pattern.is_match(&self.resource_path)
    }
}

/// Lists every resource of the endpoint version, in the order the API
/// returns them.
///
/// # Errors
///
/// - `EdgeError::Validation`: zero endpoint ID or version.
/// - `EdgeError::Api`: non-200 status.
/// - `EdgeError::Network` / `EdgeError::Parse`: transport or decode failure.
pub async fn get_resources(
    client: &EdgeClient,
    params: &GetResourcesRequest,
) -> Result<Vec<Resource>> {
    params.validate()?;

    debug!("GetResources");
    let path = format!(
        "/api-definitions/v2/endpoints/{}/versions/{}/resources",
        params.endpoint_id, params.version
    );
    client.get(&path).await
}

/// Returns the first resource matching `token`, in listing order.
///
/// # Errors
///
/// - `EdgeError::InvalidPattern`: `token` is neither an integer nor a
///   valid regular expression.
/// - `EdgeError::ResourceNotFound`: nothing matched.
pub fn find_resource<'a>(resources: &'a [Resource], token: &str) -> Result<&'a Resource> {
    let found = match token.parse::<i64>() {
        Ok(id) => resources.iter().find(|r| r.api_resource_id == id),
        Err(_) => {
            let pattern = Regex::new(token)?;
            resources.iter().find(|r| r.matches(&pattern))
        }
    };
    found.ok_or_else(|| not_found(token))
}

/// Returns every resource matching `token`, in listing order.
///
/// An integer token still yields at most one resource. A trailing `*`
/// is treated as a wildcard (`users*` searches `users.*`).
///
/// # Errors
///
/// Same as [`find_resource`].
pub fn find_resources<'a>(resources: &'a [Resource], token: &str) -> Result<Vec<&'a Resource>> {
    let found: Vec<&Resource> = match token.parse::<i64>() {
        Ok(id) => resources
            .iter()
            .filter(|r| r.api_resource_id == id)
            .take(1)
            .collect(),
        Err(_) => {
            let pattern = Regex::new(&expand_wildcard(token))?;
            resources.iter().filter(|r| r.matches(&pattern)).collect()
        }
    };
    if found.is_empty() {
        return Err(not_found(token));
    }
    Ok(found)
}

/// Fetches the listing and resolves `token` with [`find_resource`].
pub async fn get_resource(
    client: &EdgeClient,
    params: &GetResourcesRequest,
    token: &str,
) -> Result<Resource> {
    let resources = get_resources(client, params).await?;
    find_resource(&resources, token).cloned()
}

/// Fetches the listing and resolves `token` with [`find_resources`].
pub async fn get_resources_matching(
    client: &EdgeClient,
    params: &GetResourcesRequest,
    token: &str,
) -> Result<Vec<Resource>> {
    let resources = get_resources(client, params).await?;
    let found = find_resources(&resources, token)?;
    Ok(found.into_iter().cloned().collect())
}

fn expand_wildcard(token: &str) -> String {
    match token.strip_suffix('*') {
        Some(prefix) => format!("{prefix}.*"),
        None => token.to_string(),
    }
}

fn not_found(token: &str) -> EdgeError {
    EdgeError::ResourceNotFound {
        token: token.to_string(),
    }
}

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Methods")]
    methods: String,
    #[tabled(rename = "Private")]
    private: bool,
}

/// Renders resources as a table with ID, Name, Path, Methods and Private
/// columns.
pub fn resources_table<'a, I>(resources: I) -> Table
where
    I: IntoIterator<Item = &'a Resource>,
{
    let rows: Vec<ResourceRow> = resources
        .into_iter()
        .map(|r| ResourceRow {
            id: r.api_resource_id,
            name: r.api_resource_name.clone(),
            path: r.resource_path.clone(),
            methods: r.api_resource_method_name_lists.join(","),
            private: r.private,
        })
        .collect();
    Table::new(rows)
}

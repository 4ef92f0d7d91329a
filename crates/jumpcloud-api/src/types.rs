// Request/response types for the JumpCloud v2 API.
//
// Field names mirror the wire format (camelCase). Serialization follows the
// API's omit-when-empty convention: empty strings, `false`, empty lists and
// absent options never reach the request body. Unknown response fields are
// ignored so newer API versions do not break decoding.

use serde::{Deserialize, Serialize};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Query type the API expects for filter-based member queries.
pub const FILTER_QUERY: &str = "FilterQuery";

// ── User groups ────────────────────────────────────────────────────

/// `/v2/usergroups` entity.
///
/// `id` stays empty until the API assigns one on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<UserGroupAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_query: Option<MemberQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_query_exceptions: Vec<MemberQueryException>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub member_suggestions_notify: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub membership_automated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_counts: Option<SuggestionCounts>,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub group_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sudo: Option<SudoConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ldap_groups: Vec<LdapGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub posix_groups: Vec<PosixGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<RadiusConfig>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub samba_enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SudoConfig {
    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub without_password: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LdapGroup {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosixGroup {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reply: Vec<RadiusReply>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusReply {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberQuery {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub query_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<QueryFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

/// Users excluded from an automated member query. Read-only for the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberQueryException {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub exception_type: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionCounts {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub add: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub remove: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total: i64,
}

// ── Active Directory ───────────────────────────────────────────────

/// Body for `POST /v2/activedirectories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveDirectoryInput {
    pub domain: String,
}

/// `/v2/activedirectories` entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDirectory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub domain: String,
}

// ── System (device) groups ─────────────────────────────────────────

/// Body for `POST /v2/systemgroups` and `PUT /v2/systemgroups/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemGroupInput {
    pub name: String,
}

/// `/v2/systemgroups` entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemGroup {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub group_type: String,
}

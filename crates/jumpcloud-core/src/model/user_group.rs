use serde::{Deserialize, Serialize};

use crate::value::Value;

/// State of a `jumpcloud_usergroup` resource.
///
/// Field names are the attribute names in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserGroupModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub sudo: Option<SudoModel>,
    pub ldap: Value<LdapModel>,
    pub posix: Option<Vec<PosixGroupModel>>,
    pub radius: Option<Vec<RadiusReplyModel>>,
    pub samba: Option<SambaModel>,
    pub description: Value<String>,
    pub email: Value<String>,
    pub member_queries: Option<Vec<MemberQueryModel>>,
    pub notify: Value<bool>,
    pub auto: Value<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SudoModel {
    pub enabled: Value<bool>,
    pub passwordless: Value<bool>,
}

impl SudoModel {
    /// Equivalent to no sudo block at all.
    pub fn is_empty(&self) -> bool {
        !self.enabled.value_or_default() && !self.passwordless.value_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdapModel {
    pub groups: Value<Vec<LdapGroupModel>>,
}

impl LdapModel {
    pub fn is_empty(&self) -> bool {
        self.groups.as_known().is_none_or(Vec::is_empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdapGroupModel {
    pub name: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosixGroupModel {
    pub id: Value<i64>,
    pub name: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusReplyModel {
    pub name: Value<String>,
    pub value: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SambaModel {
    pub enabled: Value<bool>,
}

impl SambaModel {
    pub fn is_empty(&self) -> bool {
        !self.enabled.value_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberQueryModel {
    pub field: Value<String>,
    pub operator: Value<String>,
    pub value: Value<String>,
}

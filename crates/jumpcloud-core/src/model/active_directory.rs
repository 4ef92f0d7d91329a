use serde::{Deserialize, Serialize};

use crate::value::Value;

/// State of a `jumpcloud_ad` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveDirectoryModel {
    pub id: Value<String>,
    pub domain: Value<String>,
}

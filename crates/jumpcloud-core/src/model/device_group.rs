use serde::{Deserialize, Serialize};

use crate::value::Value;

/// State of a `jumpcloud_devicegroup` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceGroupModel {
    pub id: Value<String>,
    pub name: Value<String>,
}

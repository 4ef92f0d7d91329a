use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use jumpcloud_api::JumpCloudClient;
use jumpcloud_api::types::SystemGroupInput;

use super::{Refresh, Resource, api_error, require_id};
use crate::diag::Diagnostics;
use crate::error::CoreError;
use crate::model::DeviceGroupModel;
use crate::schema::{Attribute, PlanModifier, Schema};
use crate::value::Value;

pub(crate) const TYPE_NAME: &str = "jumpcloud_devicegroup";
const ENTITY: &str = "Device Group";

/// `jumpcloud_devicegroup`: a JumpCloud system group.
#[derive(Debug, Clone)]
pub struct DeviceGroupResource {
    client: Arc<JumpCloudClient>,
}

impl DeviceGroupResource {
    pub fn new(client: Arc<JumpCloudClient>) -> Self {
        Self { client }
    }
}

pub(crate) fn schema() -> Schema {
    Schema::new("Device Group")
        .with_attribute(
            "id",
            Attribute::string()
                .computed()
                .description("Resource ID (Computed / Read-Only)")
                .plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            "name",
            Attribute::string()
                .required()
                .description("Name for the Device Group"),
        )
}

#[async_trait]
impl Resource for DeviceGroupResource {
    type State = DeviceGroupModel;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(&self, diags: &mut Diagnostics, planned: DeviceGroupModel) -> Option<DeviceGroupModel> {
        let input = SystemGroupInput::from(&planned);
        debug!(name = %input.name, "creating device group");

        match self.client.create_system_group(&input).await {
            Ok(group) => {
                info!(id = %group.id, name = %group.name, "created device group");
                Some(group.into())
            }
            Err(e) => {
                api_error(diags, "Error creating Device Group", &e.into());
                None
            }
        }
    }

    async fn read(
        &self,
        diags: &mut Diagnostics,
        state: DeviceGroupModel,
    ) -> Option<Refresh<DeviceGroupModel>> {
        let summary = "Error retrieving Device Group from JumpCloud";
        let id = require_id(diags, summary, ENTITY, &state.id)?;

        match self.client.get_system_group(&id).await {
            Ok(group) => Some(Refresh::Current(group.into())),
            Err(e) => match CoreError::from_api(e, ENTITY, &id) {
                err if err.is_not_found() => {
                    warn!(%id, "device group no longer exists, removing from state");
                    diags.add_warning(
                        "Device Group not found",
                        format!("{err}; it will be removed from state"),
                    );
                    Some(Refresh::Gone)
                }
                err => {
                    api_error(diags, summary, &err);
                    None
                }
            },
        }
    }

    async fn update(
        &self,
        diags: &mut Diagnostics,
        prior: DeviceGroupModel,
        planned: DeviceGroupModel,
    ) -> Option<DeviceGroupModel> {
        let summary = "Error updating Device Group on JumpCloud";
        let id = require_id(diags, summary, ENTITY, &planned.id.clone().or_known(prior.id))?;
        let input = SystemGroupInput::from(&planned);
        debug!(%id, name = %input.name, "updating device group");

        match self.client.update_system_group(&id, &input).await {
            Ok(group) => {
                info!(%id, name = %group.name, "updated device group");
                Some(group.into())
            }
            Err(e) => {
                api_error(diags, summary, &CoreError::from_api(e, ENTITY, &id));
                None
            }
        }
    }

    async fn delete(&self, diags: &mut Diagnostics, state: DeviceGroupModel) -> Option<()> {
        let summary = "Error deleting Device Group from JumpCloud";
        let id = require_id(diags, summary, ENTITY, &state.id)?;

        match self.client.delete_system_group(&id).await {
            Ok(()) => {
                info!(%id, "deleted device group");
                Some(())
            }
            Err(e) => {
                api_error(diags, summary, &CoreError::from_api(e, ENTITY, &id));
                None
            }
        }
    }

    async fn import_state(&self, _diags: &mut Diagnostics, id: &str) -> Option<DeviceGroupModel> {
        Some(DeviceGroupModel {
            id: Value::known(id.to_owned()),
            name: Value::Unknown,
        })
    }
}

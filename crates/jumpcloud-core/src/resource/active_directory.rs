use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use jumpcloud_api::JumpCloudClient;
use jumpcloud_api::types::ActiveDirectoryInput;

use super::{Refresh, Resource, api_error, require_id};
use crate::diag::Diagnostics;
use crate::error::CoreError;
use crate::model::ActiveDirectoryModel;
use crate::schema::{Attribute, PlanModifier, Schema};
use crate::value::Value;

pub(crate) const TYPE_NAME: &str = "jumpcloud_ad";
const ENTITY: &str = "Active Directory";

/// `jumpcloud_ad`: an Active Directory domain. There is no in-place update.
#[derive(Debug, Clone)]
pub struct ActiveDirectoryResource {
    client: Arc<JumpCloudClient>,
}

impl ActiveDirectoryResource {
    pub fn new(client: Arc<JumpCloudClient>) -> Self {
        Self { client }
    }
}

pub(crate) fn schema() -> Schema {
    Schema::new("Active Directory")
        .with_attribute(
            "id",
            Attribute::string()
                .computed()
                .description("Resource ID (Computed / Read-Only)")
                .plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            "domain",
            Attribute::string()
                .required()
                .description("The Active Directory Domain (eg DC=mydomain,DC=com)"),
        )
}

#[async_trait]
impl Resource for ActiveDirectoryResource {
    type State = ActiveDirectoryModel;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(
        &self,
        diags: &mut Diagnostics,
        planned: ActiveDirectoryModel,
    ) -> Option<ActiveDirectoryModel> {
        let input = ActiveDirectoryInput::from(&planned);
        debug!(domain = %input.domain, "creating active directory");

        match self.client.create_active_directory(&input).await {
            Ok(ad) => {
                info!(id = %ad.id, domain = %ad.domain, "created active directory");
                Some(ad.into())
            }
            Err(e) => {
                api_error(diags, "Error creating Active Directory", &e.into());
                None
            }
        }
    }

    async fn read(
        &self,
        diags: &mut Diagnostics,
        state: ActiveDirectoryModel,
    ) -> Option<Refresh<ActiveDirectoryModel>> {
        let summary = "Error retrieving Active Directory from JumpCloud";
        let id = require_id(diags, summary, ENTITY, &state.id)?;

        match self.client.get_active_directory(&id).await {
            Ok(ad) => Some(Refresh::Current(ad.into())),
            Err(e) => match CoreError::from_api(e, ENTITY, &id) {
                err if err.is_not_found() => {
                    warn!(%id, "active directory no longer exists, removing from state");
                    diags.add_warning(
                        "Active Directory not found",
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
        _prior: ActiveDirectoryModel,
        _planned: ActiveDirectoryModel,
    ) -> Option<ActiveDirectoryModel> {
        let err = CoreError::Unsupported {
            operation: "update of jumpcloud_ad".into(),
        };
        diags.add_error("Update is unsupported for Active Directories", err.to_string());
        None
    }

    async fn delete(&self, diags: &mut Diagnostics, state: ActiveDirectoryModel) -> Option<()> {
        let summary = "Error deleting Active Directory from JumpCloud";
        let id = require_id(diags, summary, ENTITY, &state.id)?;

        match self.client.delete_active_directory(&id).await {
            Ok(()) => {
                info!(%id, "deleted active directory");
                Some(())
            }
            Err(e) => {
                api_error(diags, summary, &CoreError::from_api(e, ENTITY, &id));
                None
            }
        }
    }

    async fn import_state(
        &self,
        _diags: &mut Diagnostics,
        id: &str,
    ) -> Option<ActiveDirectoryModel> {
        Some(ActiveDirectoryModel {
            id: Value::known(id.to_owned()),
            domain: Value::Unknown,
        })
    }
}

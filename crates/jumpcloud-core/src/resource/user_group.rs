use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use jumpcloud_api::JumpCloudClient;

use super::{Refresh, Resource, api_error, require_id};
use crate::convert::{to_domain, to_resource_model};
use crate::diag::Diagnostics;
use crate::error::CoreError;
use crate::model::UserGroupModel;
use crate::schema::{Attribute, FilterOperator, PlanModifier, Schema, Validator};
use crate::value::Value;

pub(crate) const TYPE_NAME: &str = "jumpcloud_usergroup";
const ENTITY: &str = "User Group";

/// `jumpcloud_usergroup`: a JumpCloud user group with its directory attributes.
#[derive(Debug, Clone)]
pub struct UserGroupResource {
    client: Arc<JumpCloudClient>,
}

impl UserGroupResource {
    pub fn new(client: Arc<JumpCloudClient>) -> Self {
        Self { client }
    }
}

fn nested(attributes: impl IntoIterator<Item = (&'static str, Attribute)>) -> IndexMap<String, Attribute> {
    attributes
        .into_iter()
        .map(|(name, attribute)| (name.to_owned(), attribute))
        .collect()
}

pub(crate) fn schema() -> Schema {
    Schema::new("JumpCloud User Group")
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
                .description("Name for the User Group"),
        )
        .with_attribute(
            "sudo",
            Attribute::single_nested(nested([
                (
                    "enabled",
                    Attribute::bool()
                        .required()
                        .description("Whether this user-group will allowed to use sudo"),
                ),
                (
                    "passwordless",
                    Attribute::bool().required().description(
                        "Whether members of this user-group will be able to use sudo without entering a password",
                    ),
                ),
            ]))
            .optional()
            .description("Sudo configuration for the user-group"),
        )
        .with_attribute(
            "ldap",
            Attribute::single_nested(nested([(
                "groups",
                Attribute::list_nested(nested([(
                    "name",
                    Attribute::string().required().description("The LDAP Group Name"),
                )]))
                .optional()
                .computed(),
            )]))
            .optional()
            .computed()
            .description("List of LDAP Groups the user-group is mapped to"),
        )
        .with_attribute(
            "posix",
            Attribute::list_nested(nested([
                (
                    "id",
                    Attribute::int64().required().description("The posix group id"),
                ),
                (
                    "name",
                    Attribute::string().required().description("The posix group name"),
                ),
            ]))
            .optional()
            .description("List of POSIX Groups the user-group is mapped to"),
        )
        .with_attribute(
            "radius",
            Attribute::list_nested(nested([
                (
                    "name",
                    Attribute::string().required().description("The reply name"),
                ),
                (
                    "value",
                    Attribute::string().required().description("The reply value"),
                ),
            ]))
            .optional()
            .description("List of RADIUS Replies to associate with the user-group"),
        )
        .with_attribute(
            "samba",
            Attribute::single_nested(nested([(
                "enabled",
                Attribute::bool()
                    .required()
                    .description("Whether samba propagation is enabled"),
            )]))
            .optional()
            .description("Samba configuration for the user-group"),
        )
        .with_attribute(
            "description",
            Attribute::string()
                .optional()
                .computed()
                .description("Description for the User Group")
                .plan_modifier(PlanModifier::StringDefault(String::new())),
        )
        .with_attribute(
            "email",
            Attribute::string()
                .optional()
                .computed()
                .description("E-Mail Address for the User Group (Mailing List Group)")
                .plan_modifier(PlanModifier::StringDefault(String::new())),
        )
        .with_attribute(
            "member_queries",
            Attribute::list_nested(nested([
                (
                    "field",
                    Attribute::string()
                        .required()
                        .description("The name of the field to query"),
                ),
                (
                    "operator",
                    Attribute::string()
                        .required()
                        .description("The operator to use for the query")
                        .validator(Validator::one_of(FilterOperator::names())),
                ),
                (
                    "value",
                    Attribute::string()
                        .required()
                        .description("The value for the filter expression"),
                ),
            ]))
            .optional()
            .description("Query using a sequence of field filters."),
        )
        .with_attribute(
            "notify",
            Attribute::bool().optional().computed().description(
                "Whether to send notifications for new member suggestions that match member-query-filters",
            ),
        )
        .with_attribute(
            "auto",
            Attribute::bool().optional().computed().description(
                "Whether users matching member-query-filters should be automatically added to the user-group",
            ),
        )
}

#[async_trait]
impl Resource for UserGroupResource {
    type State = UserGroupModel;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(&self, diags: &mut Diagnostics, planned: UserGroupModel) -> Option<UserGroupModel> {
        let request = to_domain(&planned);
        debug!(name = %request.name, "creating user group");

        match self.client.create_user_group(&request).await {
            Ok(created) => {
                info!(id = %created.id, name = %created.name, "created user group");
                Some(to_resource_model(&created, &planned))
            }
            Err(e) => {
                api_error(diags, "Error creating User Group", &e.into());
                None
            }
        }
    }

    async fn read(
        &self,
        diags: &mut Diagnostics,
        state: UserGroupModel,
    ) -> Option<Refresh<UserGroupModel>> {
        let summary = "Error retrieving User Group from JumpCloud";
        let id = require_id(diags, summary, ENTITY, &state.id)?;

        match self.client.get_user_group(&id).await {
            Ok(group) => Some(Refresh::Current(to_resource_model(&group, &state))),
            Err(e) => match CoreError::from_api(e, ENTITY, &id) {
                err if err.is_not_found() => {
                    warn!(%id, "user group no longer exists, removing from state");
                    diags.add_warning(
                        "User Group not found",
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
        prior: UserGroupModel,
        planned: UserGroupModel,
    ) -> Option<UserGroupModel> {
        let summary = "Error updating User Group on JumpCloud";
        let id = require_id(diags, summary, ENTITY, &planned.id.clone().or_known(prior.id))?;

        let mut request = to_domain(&planned);
        request.id.clone_from(&id);
        debug!(%id, name = %request.name, "updating user group");

        match self.client.update_user_group(&request).await {
            Ok(updated) => {
                info!(%id, name = %updated.name, "updated user group");
                Some(to_resource_model(&updated, &planned))
            }
            Err(e) => {
                api_error(diags, summary, &CoreError::from_api(e, ENTITY, &id));
                None
            }
        }
    }

    async fn delete(&self, diags: &mut Diagnostics, state: UserGroupModel) -> Option<()> {
        let summary = "Error deleting User Group from JumpCloud";
        let id = require_id(diags, summary, ENTITY, &state.id)?;

        match self.client.delete_user_group(&id).await {
            Ok(()) => {
                info!(%id, "deleted user group");
                Some(())
            }
            Err(e) => {
                api_error(diags, summary, &CoreError::from_api(e, ENTITY, &id));
                None
            }
        }
    }

    async fn import_state(&self, _diags: &mut Diagnostics, id: &str) -> Option<UserGroupModel> {
        Some(UserGroupModel {
            id: Value::known(id.to_owned()),
            name: Value::Unknown,
            ldap: Value::Unknown,
            description: Value::Unknown,
            email: Value::Unknown,
            notify: Value::Unknown,
            auto: Value::Unknown,
            ..UserGroupModel::default()
        })
    }
}

//! Resource controllers.
//!
//! A [`Resource`] drives one resource type through its lifecycle against the
//! JumpCloud API. Every operation appends to a [`Diagnostics`] collection and
//! returns `None` when it aborted. [`DynamicResource`] erases the state type
//! so the provider can dispatch on JSON documents by type name.

mod active_directory;
mod device_group;
mod user_group;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use crate::diag::Diagnostics;
use crate::error::CoreError;
use crate::schema::Schema;
use crate::value::Value;

pub use active_directory::ActiveDirectoryResource;
pub use device_group::DeviceGroupResource;
pub use user_group::UserGroupResource;

/// Type names of every resource the provider serves.
pub const RESOURCE_TYPES: [&str; 3] = [
    active_directory::TYPE_NAME,
    device_group::TYPE_NAME,
    user_group::TYPE_NAME,
];

/// Schema of a resource type, available before the provider is configured.
pub fn schema_for(type_name: &str) -> Option<Schema> {
    match type_name {
        active_directory::TYPE_NAME => Some(active_directory::schema()),
        device_group::TYPE_NAME => Some(device_group::schema()),
        user_group::TYPE_NAME => Some(user_group::schema()),
        _ => None,
    }
}

/// Result of refreshing a resource from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh<S> {
    /// The resource exists; this is its current state.
    Current(S),
    /// The resource no longer exists and should be dropped from state.
    Gone,
}

#[async_trait]
pub trait Resource: Send + Sync {
    type State: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Full type name, e.g. `jumpcloud_usergroup`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    async fn create(&self, diags: &mut Diagnostics, planned: Self::State) -> Option<Self::State>;

    async fn read(&self, diags: &mut Diagnostics, state: Self::State)
    -> Option<Refresh<Self::State>>;

    async fn update(
        &self,
        diags: &mut Diagnostics,
        prior: Self::State,
        planned: Self::State,
    ) -> Option<Self::State>;

    async fn delete(&self, diags: &mut Diagnostics, state: Self::State) -> Option<()>;

    /// Start tracking an existing resource by id. Attributes other than the
    /// id are unknown until the next read.
    async fn import_state(&self, diags: &mut Diagnostics, id: &str) -> Option<Self::State>;
}

/// A [`Resource`] operating on JSON state documents.
#[async_trait]
pub trait DynamicResource: Send + Sync {
    fn resource_type(&self) -> &'static str;

    fn resource_schema(&self) -> Schema;

    async fn create_json(&self, diags: &mut Diagnostics, planned: Json) -> Option<Json>;

    async fn read_json(&self, diags: &mut Diagnostics, state: Json) -> Option<Refresh<Json>>;

    async fn update_json(&self, diags: &mut Diagnostics, prior: Json, planned: Json)
    -> Option<Json>;

    async fn delete_json(&self, diags: &mut Diagnostics, state: Json) -> Option<()>;

    async fn import_json(&self, diags: &mut Diagnostics, id: &str) -> Option<Json>;
}

/// The id a read, update or delete needs, or an error diagnostic.
fn require_id(
    diags: &mut Diagnostics,
    summary: &str,
    entity: &str,
    id: &Value<String>,
) -> Option<String> {
    match id.as_known().filter(|id| !id.is_empty()) {
        Some(id) => Some(id.clone()),
        None => {
            diags.add_error(summary, format!("The {entity} has no id in state"));
            None
        }
    }
}

fn api_error(diags: &mut Diagnostics, summary: &str, err: &CoreError) {
    diags.add_error(summary, format!("API Error: {err}"));
}

fn decode<S: DeserializeOwned>(diags: &mut Diagnostics, document: &str, value: Json) -> Option<S> {
    match serde_json::from_value(value) {
        Ok(state) => Some(state),
        Err(e) => {
            let err = CoreError::State {
                document: document.into(),
                message: e.to_string(),
            };
            diags.add_core_error("Unable to decode resource data", &err);
            None
        }
    }
}

fn encode<S: Serialize>(diags: &mut Diagnostics, state: &S) -> Option<Json> {
    match serde_json::to_value(state) {
        Ok(value) => Some(value),
        Err(e) => {
            let err = CoreError::State {
                document: "state".into(),
                message: e.to_string(),
            };
            diags.add_core_error("Unable to encode resource state", &err);
            None
        }
    }
}

#[async_trait]
impl<R: Resource> DynamicResource for R {
    fn resource_type(&self) -> &'static str {
        Resource::type_name(self)
    }

    fn resource_schema(&self) -> Schema {
        Resource::schema(self)
    }

    async fn create_json(&self, diags: &mut Diagnostics, planned: Json) -> Option<Json> {
        let planned: R::State = decode(diags, "planned", planned)?;
        let state = Resource::create(self, diags, planned).await?;
        encode(diags, &state)
    }

    async fn read_json(&self, diags: &mut Diagnostics, state: Json) -> Option<Refresh<Json>> {
        let state: R::State = decode(diags, "state", state)?;
        match Resource::read(self, diags, state).await? {
            Refresh::Current(state) => encode(diags, &state).map(Refresh::Current),
            Refresh::Gone => Some(Refresh::Gone),
        }
    }

    async fn update_json(
        &self,
        diags: &mut Diagnostics,
        prior: Json,
        planned: Json,
    ) -> Option<Json> {
        let prior: R::State = decode(diags, "prior state", prior)?;
        let planned: R::State = decode(diags, "planned", planned)?;
        let state = Resource::update(self, diags, prior, planned).await?;
        encode(diags, &state)
    }

    async fn delete_json(&self, diags: &mut Diagnostics, state: Json) -> Option<()> {
        let state: R::State = decode(diags, "state", state)?;
        Resource::delete(self, diags, state).await
    }

    async fn import_json(&self, diags: &mut Diagnostics, id: &str) -> Option<Json> {
        let state = Resource::import_state(self, diags, id).await?;
        encode(diags, &state)
    }
}

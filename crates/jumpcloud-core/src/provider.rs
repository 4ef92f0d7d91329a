// ── Provider dispatch ──
//
// Host-facing entry points shaped like the plugin protocol calls: schema,
// configure, validate, plan, apply, read and import. Documents are JSON;
// unknown values use the sentinel from `crate::value`.
//
// `Provider` needs no credentials. `configure` builds the one API client the
// resources share and returns a `ConfiguredProvider` that can reach the API.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as Json;
use tracing::{debug, info};

use jumpcloud_api::JumpCloudClient;
use jumpcloud_config::{API_KEY_ENV, Settings, load_settings, resolve_api_key};

use crate::diag::{AttributePath, Diagnostics};
use crate::error::CoreError;
use crate::resource::{
    ActiveDirectoryResource, DeviceGroupResource, DynamicResource, RESOURCE_TYPES, Refresh,
    UserGroupResource, schema_for,
};
use crate::schema::{Attribute, Schema, ValidationMode};
use crate::value::is_unknown_json;

/// Provider type name; resource type names are prefixed with it.
pub const PROVIDER_TYPE_NAME: &str = "jumpcloud";

const API_KEY: &str = "api_key";

// ── Responses ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SchemaResponse {
    pub provider: Schema,
    pub resource_schemas: IndexMap<String, Schema>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidateResponse {
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanResponse {
    pub planned_state: Option<Json>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyResponse {
    pub new_state: Option<Json>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReadResponse {
    pub new_state: Option<Json>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResponse {
    pub imported_state: Option<Json>,
    pub diagnostics: Diagnostics,
}

fn present(document: Option<Json>) -> Option<Json> {
    document.filter(|d| !d.is_null())
}

fn unknown_resource(diags: &mut Diagnostics, type_name: &str) {
    diags.add_error(
        "Unknown resource type",
        format!("The provider does not support resource type \"{type_name}\""),
    );
}

// ── Provider ────────────────────────────────────────────────────────

/// The unconfigured provider.
#[derive(Debug, Clone)]
pub struct Provider {
    version: String,
}

impl Provider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Schema of the provider configuration block.
    pub fn schema(&self) -> Schema {
        Schema::new("JumpCloud").with_attribute(
            API_KEY,
            Attribute::string()
                .optional()
                .sensitive()
                .description(format!(
                    "JumpCloud API Key. Defaults to the {API_KEY_ENV} environment variable."
                )),
        )
    }

    pub fn resource_schemas(&self) -> IndexMap<String, Schema> {
        RESOURCE_TYPES
            .iter()
            .filter_map(|name| schema_for(name).map(|schema| ((*name).to_owned(), schema)))
            .collect()
    }

    /// Provider and resource schemas together.
    pub fn get_schema(&self) -> SchemaResponse {
        SchemaResponse {
            provider: self.schema(),
            resource_schemas: self.resource_schemas(),
        }
    }

    pub fn validate_resource_config(&self, type_name: &str, config: &Json) -> Diagnostics {
        match schema_for(type_name) {
            Some(schema) => schema.validate(config, ValidationMode::Config),
            None => {
                let mut diags = Diagnostics::new();
                unknown_resource(&mut diags, type_name);
                diags
            }
        }
    }

    /// Validate configuration and compute the planned state.
    ///
    /// A null configuration plans a destroy. Invalid configuration produces
    /// no plan.
    pub fn plan_resource_change(
        &self,
        type_name: &str,
        config: &Json,
        prior: Option<&Json>,
    ) -> PlanResponse {
        let Some(schema) = schema_for(type_name) else {
            let mut diagnostics = Diagnostics::new();
            unknown_resource(&mut diagnostics, type_name);
            return PlanResponse {
                planned_state: None,
                diagnostics,
            };
        };

        if config.is_null() {
            return PlanResponse::default();
        }

        let diagnostics = schema.validate(config, ValidationMode::Config);
        if diagnostics.has_errors() {
            return PlanResponse {
                planned_state: None,
                diagnostics,
            };
        }

        let prior = prior.filter(|p| !p.is_null());
        debug!(type_name, update = prior.is_some(), "planning resource change");
        PlanResponse {
            planned_state: Some(schema.plan(config, prior)),
            diagnostics,
        }
    }

    /// Configure from `JUMPCLOUD_*` settings and the provider block.
    pub fn configure(&self, config: &Json) -> Result<ConfiguredProvider, Diagnostics> {
        let settings = load_settings().map_err(|e| {
            let mut diags = Diagnostics::new();
            diags.add_core_error("Invalid provider settings", &e.into());
            diags
        })?;
        self.configure_with_settings(config, &settings)
    }

    /// Configure against already loaded settings.
    pub fn configure_with_settings(
        &self,
        config: &Json,
        settings: &Settings,
    ) -> Result<ConfiguredProvider, Diagnostics> {
        let mut diags = self.schema().validate(config, ValidationMode::Config);
        if diags.has_errors() {
            return Err(diags);
        }

        let api_key = config.get(API_KEY).unwrap_or(&Json::Null);
        if is_unknown_json(api_key) {
            diags.add_attribute_error(
                AttributePath::root(API_KEY),
                "Missing API Key",
                "The provider cannot create the JumpCloud API client due to a missing API Key",
            );
            return Err(diags);
        }

        let Ok(key) = resolve_api_key(api_key.as_str(), settings) else {
            diags.add_attribute_error(
                AttributePath::root(API_KEY),
                "Missing JumpCloud API Key",
                format!(
                    "The provider cannot create the JumpCloud API client due to a missing or empty \
                     value for the JumpCloud API Key. Set the api_key value in the configuration or \
                     use the {API_KEY_ENV} environment variable. If either is already set, \
                     ensure the value is not empty."
                ),
            );
            return Err(diags);
        };

        let client = settings
            .client_config(key, &self.version)
            .map_err(CoreError::from)
            .and_then(|config| JumpCloudClient::new(&config).map_err(CoreError::from));
        let client = match client {
            Ok(client) => client,
            Err(e) => {
                diags.add_core_error("Unable to Create JumpCloud API Client", &e);
                return Err(diags);
            }
        };

        info!(base_url = %client.base_url(), version = %self.version, "configured JumpCloud provider");
        Ok(ConfiguredProvider::with_client(self.clone(), Arc::new(client)))
    }
}

// ── Configured provider ─────────────────────────────────────────────

/// A provider with an API client, serving all resource types.
pub struct ConfiguredProvider {
    provider: Provider,
    resources: IndexMap<&'static str, Box<dyn DynamicResource>>,
}

impl ConfiguredProvider {
    /// Wire every resource to the same client.
    pub fn with_client(provider: Provider, client: Arc<JumpCloudClient>) -> Self {
        let resources: [Box<dyn DynamicResource>; 3] = [
            Box::new(ActiveDirectoryResource::new(Arc::clone(&client))),
            Box::new(DeviceGroupResource::new(Arc::clone(&client))),
            Box::new(UserGroupResource::new(client)),
        ];
        let resources = resources
            .into_iter()
            .map(|resource| (resource.resource_type(), resource))
            .collect();
        Self {
            provider,
            resources,
        }
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    fn resource(&self, type_name: &str, diags: &mut Diagnostics) -> Option<&dyn DynamicResource> {
        let resource = self.resources.get(type_name).map(AsRef::as_ref);
        if resource.is_none() {
            unknown_resource(diags, type_name);
        }
        resource
    }

    pub fn validate_resource_config(&self, type_name: &str, config: &Json) -> Diagnostics {
        self.provider.validate_resource_config(type_name, config)
    }

    pub fn plan_resource_change(
        &self,
        type_name: &str,
        config: &Json,
        prior: Option<&Json>,
    ) -> PlanResponse {
        self.provider.plan_resource_change(type_name, config, prior)
    }

    /// Create, update or delete depending on which of `prior` and `planned`
    /// are present.
    ///
    /// A failed create leaves no state. A failed update or delete keeps the
    /// prior state.
    pub async fn apply_resource_change(
        &self,
        type_name: &str,
        prior: Option<Json>,
        planned: Option<Json>,
    ) -> ApplyResponse {
        let mut diagnostics = Diagnostics::new();
        let prior = present(prior);
        let planned = present(planned);

        let Some(resource) = self.resource(type_name, &mut diagnostics) else {
            return ApplyResponse {
                new_state: prior,
                diagnostics,
            };
        };

        if let Some(ref planned) = planned {
            diagnostics.extend(resource.resource_schema().validate(planned, ValidationMode::Planned));
            if diagnostics.has_errors() {
                return ApplyResponse {
                    new_state: prior,
                    diagnostics,
                };
            }
        }

        let new_state = match (prior, planned) {
            (None, None) => None,
            (None, Some(planned)) => resource.create_json(&mut diagnostics, planned).await,
            (Some(prior), Some(planned)) => {
                match resource.update_json(&mut diagnostics, prior.clone(), planned).await {
                    Some(state) => Some(state),
                    None => Some(prior),
                }
            }
            (Some(prior), None) => match resource.delete_json(&mut diagnostics, prior.clone()).await {
                Some(()) => None,
                None => Some(prior),
            },
        };

        ApplyResponse {
            new_state,
            diagnostics,
        }
    }

    /// Refresh state from the API. A resource that no longer exists yields
    /// no state; any other failure keeps the prior state.
    pub async fn read_resource(&self, type_name: &str, state: Json) -> ReadResponse {
        let mut diagnostics = Diagnostics::new();
        let Some(resource) = self.resource(type_name, &mut diagnostics) else {
            return ReadResponse {
                new_state: Some(state),
                diagnostics,
            };
        };

        let new_state = match resource.read_json(&mut diagnostics, state.clone()).await {
            Some(Refresh::Current(current)) => Some(current),
            Some(Refresh::Gone) => None,
            None => Some(state),
        };

        ReadResponse {
            new_state,
            diagnostics,
        }
    }

    pub async fn import_resource_state(&self, type_name: &str, id: &str) -> ImportResponse {
        let mut diagnostics = Diagnostics::new();
        let imported_state = match self.resource(type_name, &mut diagnostics) {
            Some(resource) => resource.import_json(&mut diagnostics, id).await,
            None => None,
        };
        ImportResponse {
            imported_state,
            diagnostics,
        }
    }
}

//! Core of the JumpCloud Terraform provider.
//!
//! Schemas, tri-state resource models, model ⇄ API conversion, resource
//! controllers and the provider dispatch surface. HTTP lives in
//! `jumpcloud-api`; settings in `jumpcloud-config`.

pub mod convert;
pub mod diag;
pub mod error;
pub mod model;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod value;

pub use diag::{AttributePath, Diagnostic, Diagnostics, Severity};
pub use error::CoreError;
pub use provider::{
    ApplyResponse, ConfiguredProvider, ImportResponse, PROVIDER_TYPE_NAME, PlanResponse, Provider,
    ReadResponse, SchemaResponse, ValidateResponse,
};
pub use resource::{DynamicResource, Refresh, Resource};
pub use schema::{Schema, ValidationMode};
pub use value::Value;

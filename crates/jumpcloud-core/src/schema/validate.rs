// Configuration validation.
//
// Runs before any conversion or API call. Every problem becomes an
// attribute-scoped diagnostic; validation never stops at the first one.
// Unknown values are skipped since they can only be checked once known.

use serde_json::{Map, Value as Json};

use super::{Attribute, AttributeKind, Attributes, Schema, Validator};
use crate::diag::{AttributePath, Diagnostics};
use crate::value::is_unknown_json;

/// Which document is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// User configuration: read-only attributes must not be set.
    Config,
    /// A planned state document: computed values are expected.
    Planned,
}

impl Schema {
    /// Validate a JSON document against this schema.
    pub fn validate(&self, document: &Json, mode: ValidationMode) -> Diagnostics {
        let mut diags = Diagnostics::new();
        match document {
            Json::Object(object) => validate_object(&self.attributes, object, None, mode, &mut diags),
            Json::Null => validate_object(&self.attributes, &Map::new(), None, mode, &mut diags),
            other => diags.add_error(
                "Invalid configuration",
                format!("Expected an object, got: {other}"),
            ),
        }
        diags
    }
}

fn path_for(parent: Option<&AttributePath>, name: &str) -> AttributePath {
    match parent {
        Some(parent) => parent.attribute(name),
        None => AttributePath::root(name),
    }
}

fn validate_object(
    attributes: &Attributes,
    object: &Map<String, Json>,
    parent: Option<&AttributePath>,
    mode: ValidationMode,
    diags: &mut Diagnostics,
) {
    for key in object.keys() {
        if !attributes.contains_key(key) {
            diags.add_attribute_error(
                path_for(parent, key),
                "Unsupported argument",
                format!("An argument named \"{key}\" is not expected here."),
            );
        }
    }

    for (name, attribute) in attributes {
        let path = path_for(parent, name);
        let value = object.get(name).unwrap_or(&Json::Null);
        validate_attribute(attribute, value, &path, mode, diags);
    }
}

fn validate_attribute(
    attribute: &Attribute,
    value: &Json,
    path: &AttributePath,
    mode: ValidationMode,
    diags: &mut Diagnostics,
) {
    if is_unknown_json(value) {
        return;
    }

    if value.is_null() {
        if attribute.required {
            diags.add_attribute_error(
                path.clone(),
                "Missing required argument",
                format!("The argument \"{path}\" is required, but no definition was found."),
            );
        }
        return;
    }

    if mode == ValidationMode::Config && attribute.is_read_only() {
        diags.add_attribute_error(
            path.clone(),
            "Invalid Configuration for Read-Only Attribute",
            "Cannot set value for this attribute as the provider has marked it as read-only. \
             Remove the configuration line setting the value.",
        );
        return;
    }

    let type_ok = match (&attribute.kind, value) {
        (AttributeKind::String, Json::String(_)) | (AttributeKind::Bool, Json::Bool(_)) => true,
        (AttributeKind::Int64, Json::Number(n)) => n.is_i64(),
        (AttributeKind::SingleNested { attributes }, Json::Object(object)) => {
            validate_object(attributes, object, Some(path), mode, diags);
            true
        }
        (AttributeKind::ListNested { attributes }, Json::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                let item_path = path.index(index);
                match item {
                    Json::Object(object) => {
                        validate_object(attributes, object, Some(&item_path), mode, diags);
                    }
                    other if is_unknown_json(other) => {}
                    other => type_mismatch(&item_path, "object", other, diags),
                }
            }
            true
        }
        _ => false,
    };

    if !type_ok {
        type_mismatch(path, attribute.kind.type_name(), value, diags);
        return;
    }

    for validator in &attribute.validators {
        run_validator(validator, value, path, diags);
    }
}

fn type_mismatch(path: &AttributePath, expected: &str, value: &Json, diags: &mut Diagnostics) {
    diags.add_attribute_error(
        path.clone(),
        "Incorrect attribute value type",
        format!("Inappropriate value for attribute \"{path}\": {expected} required, got {value}."),
    );
}

fn run_validator(validator: &Validator, value: &Json, path: &AttributePath, diags: &mut Diagnostics) {
    match validator {
        Validator::OneOf(allowed) => {
            let Some(actual) = value.as_str() else {
                return;
            };
            if !allowed.iter().any(|candidate| candidate == actual) {
                let quoted: Vec<String> = allowed.iter().map(|v| format!("\"{v}\"")).collect();
                diags.add_attribute_error(
                    path.clone(),
                    "Invalid Attribute Value Match",
                    format!(
                        "Attribute {path} value must be one of: [{}], got: \"{actual}\"",
                        quoted.join(" ")
                    ),
                );
            }
        }
    }
}

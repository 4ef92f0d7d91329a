//! Resource and provider schemas.
//!
//! A [`Schema`] declares each attribute's type, whether it is required,
//! optional or computed, its validators and its plan modifiers. The same
//! declaration drives configuration validation ([`Schema::validate`]) and
//! planning ([`Schema::plan`]), and is serialized for the `schema` command.

mod plan;
mod validate;

use indexmap::IndexMap;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

pub use validate::ValidationMode;

/// Nested attribute set of a block.
pub type Attributes = IndexMap<String, Attribute>;

// ── Schema ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub description: String,
    pub version: i64,
    pub attributes: Attributes,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            version: 0,
            attributes: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }
}

// ── Attributes ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Bool,
    Int64,
    SingleNested { attributes: Attributes },
    ListNested { attributes: Attributes },
}

impl AttributeKind {
    /// Human-readable type name used in type-mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int64 => "number",
            Self::SingleNested { .. } => "object",
            Self::ListNested { .. } => "list of object",
        }
    }

    pub fn nested(&self) -> Option<&Attributes> {
        match self {
            Self::SingleNested { attributes } | Self::ListNested { attributes } => Some(attributes),
            Self::String | Self::Bool | Self::Int64 => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub kind: AttributeKind,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,
}

impl Attribute {
    fn of(kind: AttributeKind) -> Self {
        Self {
            kind,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            description: String::new(),
            validators: Vec::new(),
            plan_modifiers: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::of(AttributeKind::String)
    }

    pub fn bool() -> Self {
        Self::of(AttributeKind::Bool)
    }

    pub fn int64() -> Self {
        Self::of(AttributeKind::Int64)
    }

    pub fn single_nested(attributes: Attributes) -> Self {
        Self::of(AttributeKind::SingleNested { attributes })
    }

    pub fn list_nested(attributes: Attributes) -> Self {
        Self::of(AttributeKind::ListNested { attributes })
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    #[must_use]
    pub fn plan_modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }

    /// Computed and not settable from configuration.
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

// ── Validators & plan modifiers ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// String value must be one of the listed values.
    OneOf(Vec<String>),
}

impl Validator {
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanModifier {
    /// Plan this string when the configured value is null.
    StringDefault(String),
    /// Plan this bool when the configured value is null.
    BoolDefault(bool),
    /// Keep the prior state's value instead of planning an unknown one.
    UseStateForUnknown,
}

// ── Member query operators ───────────────────────────────────────────

/// Comparison operators accepted in a member query filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Between,
    Search,
    In,
}

impl FilterOperator {
    /// Every operator's wire name, in declaration order.
    pub fn names() -> Vec<String> {
        Self::iter().map(|op| op.to_string()).collect()
    }
}

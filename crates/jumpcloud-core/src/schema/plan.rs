// Planning.
//
// The planned document starts as the configuration with every declared
// attribute present. Computed attributes left null in configuration keep
// their prior value; if the resource changes anyway they become unknown.
// Plan modifiers run last.

use serde_json::{Map, Value as Json};

use super::{AttributeKind, Attributes, PlanModifier, Schema};
use crate::value::{is_unknown_json, unknown_json};

impl Schema {
    /// Compute the planned state from configuration and the prior state.
    ///
    /// A null configuration plans a destroy and yields null.
    pub fn plan(&self, config: &Json, prior: Option<&Json>) -> Json {
        let Json::Object(config) = config else {
            return Json::Null;
        };
        let prior = prior.and_then(Json::as_object);

        let mut planned = propose(&self.attributes, config, prior);
        let changed = prior.is_none_or(|prior| !same_object(&planned, prior));
        if changed {
            mark_unknown(&self.attributes, config, &mut planned);
        }
        apply_modifiers(&self.attributes, config, prior, &mut planned);

        Json::Object(planned)
    }
}

fn same_object(planned: &Map<String, Json>, prior: &Map<String, Json>) -> bool {
    planned
        .iter()
        .all(|(key, value)| prior.get(key).unwrap_or(&Json::Null) == value)
}

fn nested_prior<'a>(prior: Option<&'a Map<String, Json>>, name: &str) -> Option<&'a Json> {
    prior.and_then(|p| p.get(name)).filter(|v| !v.is_null())
}

/// Configuration with every attribute present; computed nulls take the prior value.
fn propose(
    attributes: &Attributes,
    config: &Map<String, Json>,
    prior: Option<&Map<String, Json>>,
) -> Map<String, Json> {
    let mut proposed = Map::new();
    for (name, attribute) in attributes {
        let configured = config.get(name).cloned().unwrap_or(Json::Null);
        let prior_value = nested_prior(prior, name);

        let value = match (&attribute.kind, configured) {
            (_, Json::Null) if attribute.computed => prior_value.cloned().unwrap_or(Json::Null),
            (AttributeKind::SingleNested { attributes }, Json::Object(object)) => {
                Json::Object(propose(attributes, &object, prior_value.and_then(Json::as_object)))
            }
            (AttributeKind::ListNested { attributes }, Json::Array(items)) => {
                let prior_items = prior_value.and_then(Json::as_array);
                Json::Array(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(index, item)| match item {
                            Json::Object(object) => {
                                let prior_item = prior_items
                                    .and_then(|p| p.get(index))
                                    .and_then(Json::as_object);
                                Json::Object(propose(attributes, &object, prior_item))
                            }
                            other => other,
                        })
                        .collect(),
                )
            }
            (_, value) => value,
        };
        proposed.insert(name.clone(), value);
    }
    proposed
}

/// Computed attributes null in configuration will only be known after apply.
fn mark_unknown(attributes: &Attributes, config: &Map<String, Json>, planned: &mut Map<String, Json>) {
    for (name, attribute) in attributes {
        let configured = config.get(name).unwrap_or(&Json::Null);
        let Some(value) = planned.get_mut(name) else {
            continue;
        };

        if configured.is_null() {
            if attribute.computed {
                *value = unknown_json();
            }
            continue;
        }

        match (&attribute.kind, configured, value) {
            (AttributeKind::SingleNested { attributes }, Json::Object(config), Json::Object(planned)) => {
                mark_unknown(attributes, config, planned);
            }
            (AttributeKind::ListNested { attributes }, Json::Array(config), Json::Array(planned)) => {
                for (item_config, item_planned) in config.iter().zip(planned.iter_mut()) {
                    if let (Json::Object(c), Json::Object(p)) = (item_config, item_planned) {
                        mark_unknown(attributes, c, p);
                    }
                }
            }
            _ => {}
        }
    }
}

fn apply_modifiers(
    attributes: &Attributes,
    config: &Map<String, Json>,
    prior: Option<&Map<String, Json>>,
    planned: &mut Map<String, Json>,
) {
    for (name, attribute) in attributes {
        let configured = config.get(name).unwrap_or(&Json::Null);
        let prior_value = nested_prior(prior, name);
        let Some(value) = planned.get_mut(name) else {
            continue;
        };

        for modifier in &attribute.plan_modifiers {
            match modifier {
                PlanModifier::StringDefault(default) if configured.is_null() => {
                    *value = Json::String(default.clone());
                }
                PlanModifier::BoolDefault(default) if configured.is_null() => {
                    *value = Json::Bool(*default);
                }
                PlanModifier::UseStateForUnknown if is_unknown_json(value) => {
                    if let Some(prior) = prior_value.filter(|p| !is_unknown_json(p)) {
                        *value = prior.clone();
                    }
                }
                _ => {}
            }
        }

        match (&attribute.kind, configured, value) {
            (AttributeKind::SingleNested { attributes }, Json::Object(config), Json::Object(planned)) => {
                apply_modifiers(attributes, config, prior_value.and_then(Json::as_object), planned);
            }
            (AttributeKind::ListNested { attributes }, Json::Array(config), Json::Array(planned)) => {
                let prior_items = prior_value.and_then(Json::as_array);
                for (index, (item_config, item_planned)) in
                    config.iter().zip(planned.iter_mut()).enumerate()
                {
                    let prior_item = prior_items.and_then(|p| p.get(index)).and_then(Json::as_object);
                    if let (Json::Object(c), Json::Object(p)) = (item_config, item_planned) {
                        apply_modifiers(attributes, c, prior_item, p);
                    }
                }
            }
            _ => {}
        }
    }
}

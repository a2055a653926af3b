//! Per-field rules for required-field checks and partial-update merging.
//!
//! Each collection declares a static table of [`FieldRule`]s. The store
//! consults the table instead of hand-written conditionals, so the
//! presence/truthiness distinction is applied the same way everywhere:
//!
//! - numeric and list fields overwrite whenever they are supplied, so `0` and
//!   `[]` are real updates
//! - text fields overwrite only with a non-empty value; an empty string in an
//!   update leaves the stored text untouched
//!
//! Fields that appear in no table (`id`, `createdDate`) are never taken from
//! caller input.

use serde_json::{Map, Value as JsonValue};

/// What a required field must look like in an insert request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Supplied and not null. `0`, `false` and `[]` satisfy it.
    Present,
    /// Supplied and truthy. Rejects `""` and `0`.
    NonEmpty,
}

/// When a supplied field overwrites the stored value during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTrigger {
    Presence,
    Truthiness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: Option<Requirement>,
    pub update: UpdateTrigger,
}

impl FieldRule {
    pub const fn required(
        name: &'static str,
        requirement: Requirement,
        update: UpdateTrigger,
    ) -> Self {
        Self {
            name,
            required: Some(requirement),
            update,
        }
    }

    pub const fn optional(name: &'static str, update: UpdateTrigger) -> Self {
        Self {
            name,
            required: None,
            update,
        }
    }

    fn is_satisfied_by(&self, value: Option<&JsonValue>) -> bool {
        match (self.required, value) {
            (None, _) => true,
            (Some(_), None) | (Some(_), Some(JsonValue::Null)) => false,
            (Some(Requirement::Present), Some(_)) => true,
            (Some(Requirement::NonEmpty), Some(v)) => is_truthy(v),
        }
    }

    fn triggers_update(&self, value: &JsonValue) -> bool {
        match self.update {
            UpdateTrigger::Presence => !value.is_null(),
            UpdateTrigger::Truthiness => is_truthy(value),
        }
    }
}

/// Truthiness as the legacy data layer judged it: `null`, `false`, `0`, `NaN`
/// and `""` are falsy, everything else (including empty arrays and objects)
/// is truthy.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Names of required fields the input fails to satisfy, in table order.
pub fn missing_required(rules: &[FieldRule], input: &Map<String, JsonValue>) -> Vec<&'static str> {
    rules
        .iter()
        .filter(|rule| !rule.is_satisfied_by(input.get(rule.name)))
        .map(|rule| rule.name)
        .collect()
}

/// Overwrites fields of `stored` with those of `patch` the table allows.
///
/// Every other field keeps its stored value. Returns the names of the fields
/// taken from the patch.
pub fn merge_patch(
    rules: &[FieldRule],
    stored: &mut Map<String, JsonValue>,
    patch: &Map<String, JsonValue>,
) -> Vec<&'static str> {
    let mut applied = Vec::new();
    for rule in rules {
        if let Some(value) = patch.get(rule.name) {
            if rule.triggers_update(value) {
                stored.insert(rule.name.to_string(), value.clone());
                applied.push(rule.name);
            }
        }
    }
    applied
}

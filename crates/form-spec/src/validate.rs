use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::answers::{ValidationError, ValidationResult};
use crate::conditional::FormValues;
use crate::progress::is_blank;
use crate::spec::field::{Constraint, FieldSpec, FieldType};
use crate::spec::form::FormSpec;
use crate::visibility::settled_visibility;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern"));

const DEFAULT_RATING_MAX: f64 = 5.0;

/// Validates answers for every field that is visible once hidden answers are
/// pruned (see [`crate::visible_values`]).
///
/// Hidden fields are never required and their answers are not checked; they
/// are listed in `hidden_fields` so callers can drop them before storing.
pub fn validate(spec: &FormSpec, values: &FormValues) -> ValidationResult {
    let visibility = settled_visibility(spec, values);

    let mut errors = Vec::new();
    let mut missing_required = Vec::new();
    let mut hidden_fields = Vec::new();

    for field in &spec.fields {
        let answer = values.get(&field.id).filter(|value| !is_blank(value));

        if !visibility.get(&field.id).copied().unwrap_or(true) {
            if answer.is_some() {
                hidden_fields.push(field.id.clone());
            }
            continue;
        }

        match answer {
            None => {
                if field.required {
                    missing_required.push(field.id.clone());
                }
            }
            Some(value) => {
                if let Some(error) = validate_value(field, value) {
                    errors.push(error);
                }
            }
        }
    }

    let unknown_fields: Vec<String> = values
        .keys()
        .filter(|key| spec.field(key).is_none())
        .cloned()
        .collect();

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
        hidden_fields,
    }
}

fn validate_value(field: &FieldSpec, value: &Value) -> Option<ValidationError> {
    if !matches_type(field.kind, value) {
        return Some(base_error(field, "type mismatch", "type_mismatch"));
    }

    match field.kind {
        FieldType::Email if !value.as_str().is_some_and(|text| EMAIL.is_match(text.trim())) => {
            return Some(base_error(field, "not a valid email address", "invalid_email"));
        }
        FieldType::Date if !value.as_str().is_some_and(|text| DATE.is_match(text)) => {
            return Some(base_error(field, "date must be YYYY-MM-DD", "invalid_date"));
        }
        FieldType::Rating => {
            let max = field
                .constraint
                .as_ref()
                .and_then(|constraint| constraint.max)
                .unwrap_or(DEFAULT_RATING_MAX);
            if let Some(rating) = value.as_f64()
                && (rating < 1.0 || rating > max)
            {
                return Some(base_error(field, "rating out of range", "out_of_range"));
            }
        }
        _ => {}
    }

    if field.kind.has_options()
        && let Some(options) = &field.options
        && !selected_labels(value).all(|label| options.iter().any(|option| option == label))
    {
        return Some(base_error(field, "invalid option", "invalid_option"));
    }

    if let Some(constraint) = &field.constraint
        && let Some(error) = enforce_constraint(field, value, constraint)
    {
        return Some(error);
    }

    None
}

fn matches_type(kind: FieldType, value: &Value) -> bool {
    match kind {
        FieldType::ShortText
        | FieldType::LongText
        | FieldType::Email
        | FieldType::Date
        | FieldType::Select
        | FieldType::Radio => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Rating => value.is_i64() || value.is_u64(),
        FieldType::YesNo => value.is_boolean(),
        FieldType::Checkbox => value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string)),
    }
}

fn selected_labels(value: &Value) -> Box<dyn Iterator<Item = &str> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter().filter_map(Value::as_str)),
        other => Box::new(other.as_str().into_iter()),
    }
}

/// Length of a text answer in characters, or the number of selections.
fn answer_len(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn enforce_constraint(
    field: &FieldSpec,
    value: &Value,
    constraint: &Constraint,
) -> Option<ValidationError> {
    if let Some(pattern) = &constraint.pattern
        && let Some(text) = value.as_str()
        && let Ok(regex) = Regex::new(pattern)
        && !regex.is_match(text)
    {
        return Some(base_error(
            field,
            "value does not match pattern",
            "pattern_mismatch",
        ));
    }

    if let Some(min_len) = constraint.min_len
        && let Some(len) = answer_len(value)
        && len < min_len
    {
        return Some(base_error(field, "answer shorter than min length", "min_length"));
    }

    if let Some(max_len) = constraint.max_len
        && let Some(len) = answer_len(value)
        && len > max_len
    {
        return Some(base_error(field, "answer longer than max length", "max_length"));
    }

    if let Some(min) = constraint.min
        && let Some(value) = value.as_f64()
        && value < min
    {
        return Some(base_error(field, "value below minimum", "min"));
    }

    if let Some(max) = constraint.max
        && let Some(value) = value.as_f64()
        && value > max
    {
        return Some(base_error(field, "value above maximum", "max"));
    }

    None
}

fn base_error(field: &FieldSpec, message: &str, code: &str) -> ValidationError {
    ValidationError {
        field_id: Some(field.id.clone()),
        path: Some(format!("/{}", field.id)),
        message: message.into(),
        code: Some(code.into()),
    }
}

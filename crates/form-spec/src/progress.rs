use serde_json::Value;

use crate::conditional::FormValues;
use crate::spec::form::FormSpec;
use crate::visibility::VisibilityMap;

/// Treats `null`, blank strings and empty selections as unanswered.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

pub fn is_answered(values: &FormValues, field_id: &str) -> bool {
    values.get(field_id).is_some_and(|value| !is_blank(value))
}

/// First visible field, in form order, that has no answer yet.
pub fn next_field(spec: &FormSpec, values: &FormValues, visibility: &VisibilityMap) -> Option<String> {
    spec.fields
        .iter()
        .filter(|field| visibility.get(&field.id).copied().unwrap_or(true))
        .find(|field| !is_answered(values, &field.id))
        .map(|field| field.id.clone())
}

pub fn answered_count(spec: &FormSpec, values: &FormValues, visibility: &VisibilityMap) -> usize {
    spec.fields
        .iter()
        .filter(|field| visibility.get(&field.id).copied().unwrap_or(true))
        .filter(|field| is_answered(values, &field.id))
        .count()
}

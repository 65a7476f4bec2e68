use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

use crate::spec::form::FormSpec;

/// Problems in a form definition that make it unsafe to publish.
#[derive(Debug, Error, PartialEq)]
pub enum FormCheckError {
    #[error("form id is required")]
    MissingFormId,
    #[error("form id '{0}' must not contain '/'")]
    InvalidFormId(String),
    #[error("form '{0}' has no fields")]
    NoFields(String),
    #[error("field id cannot be empty")]
    EmptyFieldId,
    #[error("duplicate field id '{0}'")]
    DuplicateField(String),
    #[error("field '{0}' must list at least one option")]
    MissingOptions(String),
    #[error("field '{field}': {message}")]
    InvalidConstraint { field: String, message: String },
    #[error("field '{field}' has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
    #[error("conditional logic on '{field}' references unknown field '{target}'")]
    UnknownRuleTarget { field: String, target: String },
    #[error("conditional logic on '{0}' references the field itself")]
    SelfReference(String),
}

/// Checks a form definition before it is published or used to collect answers.
pub fn check_form(spec: &FormSpec) -> Result<(), FormCheckError> {
    if spec.id.trim().is_empty() {
        return Err(FormCheckError::MissingFormId);
    }
    if spec.id.contains('/') {
        return Err(FormCheckError::InvalidFormId(spec.id.clone()));
    }
    if spec.fields.is_empty() {
        return Err(FormCheckError::NoFields(spec.id.clone()));
    }

    let mut seen = HashSet::new();
    for field in &spec.fields {
        if field.id.trim().is_empty() {
            return Err(FormCheckError::EmptyFieldId);
        }
        if !seen.insert(field.id.as_str()) {
            return Err(FormCheckError::DuplicateField(field.id.clone()));
        }

        if field.kind.has_options() {
            let has_options = field
                .options
                .as_ref()
                .is_some_and(|options| !options.is_empty());
            if !has_options {
                return Err(FormCheckError::MissingOptions(field.id.clone()));
            }
        }

        if let Some(constraint) = &field.constraint {
            if let (Some(min), Some(max)) = (constraint.min, constraint.max)
                && min > max
            {
                return Err(FormCheckError::InvalidConstraint {
                    field: field.id.clone(),
                    message: format!("min '{}' cannot exceed max '{}'", min, max),
                });
            }
            if let (Some(min_len), Some(max_len)) = (constraint.min_len, constraint.max_len)
                && min_len > max_len
            {
                return Err(FormCheckError::InvalidConstraint {
                    field: field.id.clone(),
                    message: format!("min_len '{}' cannot exceed max_len '{}'", min_len, max_len),
                });
            }
            if let Some(pattern) = &constraint.pattern {
                Regex::new(pattern).map_err(|source| FormCheckError::InvalidPattern {
                    field: field.id.clone(),
                    source,
                })?;
            }
        }
    }

    for field in &spec.fields {
        let Some(logic) = &field.conditional_logic else {
            continue;
        };
        for target in logic.referenced_fields() {
            if target == field.id {
                return Err(FormCheckError::SelfReference(field.id.clone()));
            }
            if !seen.contains(target) {
                return Err(FormCheckError::UnknownRuleTarget {
                    field: field.id.clone(),
                    target: target.to_string(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(fields: serde_json::Value) -> FormSpec {
        serde_json::from_value(json!({ "id": "f", "title": "F", "fields": fields })).expect("spec")
    }

    #[test]
    fn accepts_well_formed_form() {
        let spec = form(json!([
            { "id": "color", "type": "radio", "label": "Color", "options": ["red", "blue"] },
            {
                "id": "why",
                "type": "long_text",
                "label": "Why?",
                "conditionalLogic": {
                    "enabled": true,
                    "action": "show",
                    "rules": [{ "fieldId": "color", "operator": "equals", "value": "red" }]
                }
            }
        ]));
        assert_eq!(check_form(&spec), Ok(()));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let spec = form(json!([
            { "id": "a", "type": "short_text", "label": "A" },
            { "id": "a", "type": "short_text", "label": "A again" }
        ]));
        assert_eq!(
            check_form(&spec),
            Err(FormCheckError::DuplicateField("a".into()))
        );
    }

    #[test]
    fn rejects_choice_field_without_options() {
        let spec = form(json!([{ "id": "pick", "type": "select", "label": "Pick" }]));
        assert_eq!(
            check_form(&spec),
            Err(FormCheckError::MissingOptions("pick".into()))
        );
    }

    #[test]
    fn rejects_rules_on_unknown_or_own_field() {
        let unknown = form(json!([{
            "id": "a",
            "type": "short_text",
            "label": "A",
            "conditionalLogic": {
                "enabled": true,
                "action": "hide",
                "rules": [{ "fieldId": "ghost", "operator": "equals", "value": "x" }]
            }
        }]));
        assert!(matches!(
            check_form(&unknown),
            Err(FormCheckError::UnknownRuleTarget { target, .. }) if target == "ghost"
        ));

        let own = form(json!([{
            "id": "a",
            "type": "short_text",
            "label": "A",
            "conditionalLogic": {
                "enabled": true,
                "action": "show",
                "rules": [{ "fieldId": "a", "operator": "equals", "value": "x" }]
            }
        }]));
        assert_eq!(
            check_form(&own),
            Err(FormCheckError::SelfReference("a".into()))
        );
    }

    #[test]
    fn rejects_inverted_constraints_and_bad_patterns() {
        let inverted = form(json!([{
            "id": "n",
            "type": "number",
            "label": "N",
            "constraint": { "min": 10.0, "max": 1.0 }
        }]));
        assert!(matches!(
            check_form(&inverted),
            Err(FormCheckError::InvalidConstraint { .. })
        ));

        let pattern = form(json!([{
            "id": "code",
            "type": "short_text",
            "label": "Code",
            "constraint": { "pattern": "([a-z" }
        }]));
        assert!(matches!(
            check_form(&pattern),
            Err(FormCheckError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn rejects_slash_in_form_id() {
        let mut spec = form(json!([{ "id": "a", "type": "short_text", "label": "A" }]));
        spec.id = "team/survey".into();
        assert_eq!(
            check_form(&spec),
            Err(FormCheckError::InvalidFormId("team/survey".into()))
        );
    }
}

pub mod config;
pub mod drafts;
pub mod principal;
pub mod record;
pub mod store;
pub mod submission;

pub use config::SubmissionPolicy;
pub use drafts::{Draft, DraftStore};
pub use principal::{Principal, Role};
pub use record::FormRecord;
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use submission::{
    ResponseService, StoredAnswer, StoredResponse, SubmissionError, SubmissionReceipt,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

use form_spec::{
    FormSpec, FormValues, RenderPayload, ValidationResult, build_render_payload,
    render_json_ui as spec_render_json_ui, render_text as spec_render_text, settled_visibility,
    validate, visible_values,
};

const DEFAULT_SPEC: &str = include_str!("../../form-spec/tests/fixtures/feedback_form.json");

#[derive(Debug, Error)]
enum ComponentError {
    #[error("failed to parse config/{0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("form '{0}' is not available")]
    FormUnavailable(String),
    #[error("json encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct ComponentConfig {
    #[serde(default)]
    form_spec_json: Option<String>,
    #[serde(default)]
    policy: SubmissionPolicy,
}

fn load_config(config_json: &str) -> Result<ComponentConfig, ComponentError> {
    if config_json.trim().is_empty() {
        Ok(ComponentConfig::default())
    } else {
        serde_json::from_str(config_json).map_err(ComponentError::ConfigParse)
    }
}

fn load_form_spec(config_json: &str) -> Result<FormSpec, ComponentError> {
    let config = load_config(config_json)?;
    let spec_json = config.form_spec_json.as_deref().unwrap_or(DEFAULT_SPEC);
    serde_json::from_str(spec_json).map_err(ComponentError::ConfigParse)
}

fn ensure_form(form_id: &str, config_json: &str) -> Result<FormSpec, ComponentError> {
    let spec = load_form_spec(config_json)?;
    if spec.id != form_id {
        Err(ComponentError::FormUnavailable(form_id.to_string()))
    } else {
        Ok(spec)
    }
}

/// Malformed or non-object answers are treated as no answers at all.
fn parse_answers(answers_json: &str) -> FormValues {
    serde_json::from_str::<Value>(answers_json)
        .ok()
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default()
}

fn respond(result: Result<Value, ComponentError>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|error| {
            json!({"error": format!("json encode: {}", error)}).to_string()
        }),
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

fn respond_string(result: Result<String, ComponentError>) -> String {
    match result {
        Ok(value) => value,
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

pub fn describe(form_id: &str, config_json: &str) -> String {
    respond(
        ensure_form(form_id, config_json)
            .and_then(|spec| serde_json::to_value(spec).map_err(ComponentError::JsonEncode)),
    )
}

/// Field id to visibility flag for the given answers, after hidden answers
/// are pruned.
pub fn visibility(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|spec| {
        let answers = parse_answers(answers_json);
        serde_json::to_value(settled_visibility(&spec, &answers))
            .map_err(ComponentError::JsonEncode)
    }))
}

pub fn validate_answers(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|spec| {
        let answers: Value =
            serde_json::from_str(answers_json).map_err(ComponentError::ConfigParse)?;
        let answers = answers.as_object().cloned().unwrap_or_default();
        serde_json::to_value(validate(&spec, &answers)).map_err(ComponentError::JsonEncode)
    }))
}

pub fn next(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(ensure_form(form_id, config_json).map(|spec| {
        let answers = parse_answers(answers_json);
        let payload = build_render_payload(&spec, &answers);
        json!({
            "status": payload.status.as_str(),
            "next_field_id": payload.next_field_id,
            "progress": submission_progress(&payload),
        })
    }))
}

fn render_payload(
    form_id: &str,
    config_json: &str,
    answers_json: &str,
) -> Result<RenderPayload, ComponentError> {
    let spec = ensure_form(form_id, config_json)?;
    let answers = parse_answers(answers_json);
    Ok(build_render_payload(&spec, &answers))
}

pub fn render_text(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond_string(
        render_payload(form_id, config_json, answers_json)
            .map(|payload| spec_render_text(&payload)),
    )
}

pub fn render_json_ui(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(
        render_payload(form_id, config_json, answers_json)
            .map(|payload| spec_render_json_ui(&payload)),
    )
}

fn submission_progress(payload: &RenderPayload) -> Value {
    json!({
        "answered": payload.progress.answered,
        "total": payload.progress.total,
    })
}

fn build_error_response(
    payload: &RenderPayload,
    answers: FormValues,
    validation: &ValidationResult,
) -> Result<Value, ComponentError> {
    let validation_value = serde_json::to_value(validation).map_err(ComponentError::JsonEncode)?;
    Ok(json!({
        "status": "error",
        "next_field_id": payload.next_field_id,
        "progress": submission_progress(payload),
        "answers": answers,
        "validation": validation_value,
    }))
}

fn build_success_response(payload: &RenderPayload, answers: FormValues) -> Value {
    json!({
        "status": payload.status.as_str(),
        "next_field_id": payload.next_field_id,
        "progress": submission_progress(payload),
        "answers": answers,
    })
}

fn with_answers_mutated(answers_json: &str, field_id: &str, value: Value) -> FormValues {
    let mut map: Map<String, Value> = parse_answers(answers_json);
    map.insert(field_id.to_string(), value);
    map
}

/// Applies one answer and returns the updated answers with hidden fields pruned.
///
/// Missing required answers do not fail a patch; only malformed values and
/// unknown fields (per the configured policy) do.
pub fn submit_patch(
    form_id: &str,
    config_json: &str,
    answers_json: &str,
    field_id: &str,
    value_json: &str,
) -> String {
    respond(load_config(config_json).and_then(|config| {
        let spec = ensure_form(form_id, config_json)?;
        let value: Value = serde_json::from_str(value_json).map_err(ComponentError::ConfigParse)?;
        let answers = with_answers_mutated(answers_json, field_id, value);
        let answers = visible_values(&spec, &answers);
        let validation = validate(&spec, &answers);
        let payload = build_render_payload(&spec, &answers);

        let rejects_unknown =
            config.policy.reject_unknown_fields && !validation.unknown_fields.is_empty();
        if !validation.errors.is_empty() || rejects_unknown {
            return build_error_response(&payload, answers, &validation);
        }
        Ok(build_success_response(&payload, answers))
    }))
}

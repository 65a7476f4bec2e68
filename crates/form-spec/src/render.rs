use serde_json::{Map, Value, json};

use crate::{
    conditional::FormValues,
    progress::{answered_count, next_field},
    spec::{field::FieldType, form::FormSpec},
    visibility::settled_visibility,
};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// More input is required.
    NeedInput,
    /// All visible fields are filled.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Progress counters over visible fields.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes a single field for render outputs.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub kind: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub visible: bool,
    pub current_value: Option<Value>,
    pub options: Option<Vec<String>>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub form_id: String,
    pub form_title: String,
    pub status: RenderStatus,
    pub next_field_id: Option<String>,
    pub progress: RenderProgress,
    pub help: Option<String>,
    pub fields: Vec<RenderField>,
}

impl RenderPayload {
    pub fn field(&self, id: &str) -> Option<&RenderField> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// Build the renderer payload from the form and the current answers.
pub fn build_render_payload(spec: &FormSpec, values: &FormValues) -> RenderPayload {
    let visibility = settled_visibility(spec, values);
    let next_field_id = next_field(spec, values, &visibility);

    let answered = answered_count(spec, values, &visibility);
    let total = visibility.values().filter(|visible| **visible).count();

    let fields = spec
        .fields
        .iter()
        .map(|field| RenderField {
            id: field.id.clone(),
            label: field.label.clone(),
            description: field.description.clone(),
            kind: field.kind,
            required: field.required,
            placeholder: field.placeholder.clone(),
            visible: visibility.get(&field.id).copied().unwrap_or(true),
            current_value: values.get(&field.id).cloned(),
            options: field.options.clone(),
        })
        .collect::<Vec<_>>();

    let status = if next_field_id.is_some() {
        RenderStatus::NeedInput
    } else {
        RenderStatus::Complete
    };

    RenderPayload {
        form_id: spec.id.clone(),
        form_title: spec.title.clone(),
        status,
        next_field_id,
        progress: RenderProgress { answered, total },
        help: spec.description.clone(),
        fields,
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(field.id.clone()));
            map.insert("label".into(), Value::String(field.label.clone()));
            map.insert(
                "description".into(),
                field
                    .description
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            map.insert("type".into(), Value::String(field.kind.as_str().to_string()));
            map.insert("required".into(), Value::Bool(field.required));
            if let Some(placeholder) = &field.placeholder {
                map.insert("placeholder".into(), Value::String(placeholder.clone()));
            }
            if let Some(current_value) = &field.current_value {
                map.insert("current_value".into(), current_value.clone());
            }
            if let Some(options) = &field.options {
                map.insert(
                    "options".into(),
                    Value::Array(options.iter().cloned().map(Value::String).collect()),
                );
            }
            map.insert("visible".into(), Value::Bool(field.visible));
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "form_id": payload.form_id,
        "form_title": payload.form_title,
        "status": payload.status.as_str(),
        "next_field_id": payload.next_field_id,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "help": payload.help,
        "fields": fields,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {} ({})", payload.form_title, payload.form_id));
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));
    if let Some(help) = &payload.help {
        lines.push(format!("Help: {}", help));
    }

    if let Some(next_field) = &payload.next_field_id {
        lines.push(format!("Next field: {}", next_field));
        if let Some(field) = payload.field(next_field) {
            lines.push(format!("  Label: {}", field.label));
            if let Some(description) = &field.description {
                lines.push(format!("  Description: {}", description));
            }
            if field.required {
                lines.push("  Required: yes".to_string());
            }
            if let Some(options) = &field.options {
                lines.push(format!("  Options: {}", options.join(", ")));
            }
        }
    } else {
        lines.push("All visible fields are answered.".to_string());
    }

    lines.push("Visible fields:".to_string());
    for field in payload.fields.iter().filter(|field| field.visible) {
        let mut entry = format!(" - {} ({})", field.id, field.label);
        if field.required {
            entry.push_str(" [required]");
        }
        if let Some(current_value) = &field.current_value {
            entry.push_str(&format!(" = {}", value_to_display(current_value)));
        }
        lines.push(entry);
    }

    let hidden = payload
        .fields
        .iter()
        .filter(|field| !field.visible)
        .map(|field| field.id.as_str())
        .collect::<Vec<_>>();
    if !hidden.is_empty() {
        lines.push(format!("Hidden fields: {}", hidden.join(", ")));
    }

    lines.join("\n")
}

pub fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(num) => num.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_display)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

use std::fmt::Write;

use form_spec::AnswerSet;
use serde_json::Value;

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: field prompts only.
    Clean,
    /// Verbose output: status, visible fields, error details, help text.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints prompts and progress once the component yields a field.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
    show_answers_json: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity, show_answers_json: bool) -> Self {
        Self {
            verbosity,
            header_printed: false,
            show_answers_json,
        }
    }

    pub fn show_header(&mut self, payload: &WizardPayload) {
        if self.header_printed {
            return;
        }
        println!("Form: {}", payload.form_title);
        if self.verbosity.is_verbose()
            && let Some(help) = &payload.help
        {
            println!("Help: {}", help);
        }
        self.header_printed = true;
    }

    pub fn show_status(&self, payload: &WizardPayload) {
        if !self.verbosity.is_verbose() {
            return;
        }
        println!(
            "Status: {} ({}/{})",
            payload.status, payload.progress.answered, payload.progress.total
        );
        println!("Visible fields:");
        for field in payload.fields.iter().filter(|field| field.visible) {
            let mut entry = format!(" - {} ({})", field.id, field.label);
            if field.required {
                entry.push_str(" [required]");
            }
            println!("{}", entry);
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = if prompt.total > 0 {
            format!("{}/{} {}", prompt.index, prompt.total, prompt.label)
        } else {
            format!("{} {}", prompt.index, prompt.label)
        };
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if let Some(description) = &prompt.description {
            println!("{}", description);
        }
        if self.verbosity.is_verbose() && !prompt.options.is_empty() {
            println!("Options: {}", prompt.options.join(", "));
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if let Some(debug) = &error.debug_message {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_completion(&self, answer_set: &AnswerSet) {
        println!("Done ✅");
        match answer_set.to_cbor() {
            Ok(bytes) => {
                println!("Answers (CBOR hex): {}", encode_hex(&bytes));
            }
            Err(err) => {
                eprintln!("Failed to serialize answers to CBOR: {}", err);
            }
        }
        if self.show_answers_json {
            match answer_set.to_json_pretty() {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => {
                    eprintln!("Failed to serialize answers to JSON: {}", err);
                }
            }
        }
    }
}

/// Render payload extracted from the component output.
pub struct WizardPayload {
    pub form_title: String,
    pub help: Option<String>,
    pub status: String,
    pub progress: RenderProgress,
    pub fields: Vec<WizardField>,
}

impl WizardPayload {
    pub fn from_json(json: &Value) -> Result<Self, String> {
        let form_title = json
            .get("form_title")
            .and_then(Value::as_str)
            .ok_or_else(|| "wizard payload missing form_title".to_string())?
            .to_string();
        let help = json
            .get("help")
            .and_then(Value::as_str)
            .map(|value| value.to_string());
        let status = json
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("need_input")
            .to_string();
        let progress = json
            .get("progress")
            .and_then(Value::as_object)
            .ok_or_else(|| "wizard payload missing progress".to_string())?;
        let answered = progress
            .get("answered")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize;
        let total = progress.get("total").and_then(Value::as_u64).unwrap_or(0) as usize;
        let fields = json
            .get("fields")
            .and_then(Value::as_array)
            .ok_or_else(|| "wizard payload missing fields".to_string())?
            .iter()
            .map(WizardField::from_json)
            .collect::<Result<_, _>>()?;
        Ok(Self {
            form_title,
            help,
            status,
            progress: RenderProgress { answered, total },
            fields,
        })
    }

    /// First visible field without an answer that is not in `skipped`.
    pub fn pending_field<'a>(&'a self, skipped: &[String]) -> Option<&'a WizardField> {
        self.fields
            .iter()
            .find(|field| field.visible && !field.answered && !skipped.contains(&field.id))
    }
}

/// Progress counters from the render payload.
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Minimal view of a field used for rendering prompts.
pub struct WizardField {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Vec<String>,
    pub visible: bool,
    pub answered: bool,
}

impl WizardField {
    fn from_json(value: &Value) -> Result<Self, String> {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| "field missing id".to_string())?
            .to_string();
        let label = value
            .get("label")
            .and_then(Value::as_str)
            .ok_or_else(|| format!("field '{}' missing label", id))?
            .to_string();
        let description = value
            .get("description")
            .and_then(Value::as_str)
            .map(|value| value.to_string());
        let required = value
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let kind = FieldKind::from_label(
            value
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("short_text"),
        );
        let options = value
            .get("options")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        let visible = value
            .get("visible")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let answered = value
            .get("current_value")
            .is_some_and(|current| !form_spec::is_blank(current));
        Ok(Self {
            id,
            label,
            description,
            kind,
            required,
            options,
            visible,
            answered,
        })
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    pub hint: Option<String>,
    pub options: Vec<String>,
}

impl PromptContext {
    pub fn new(field: &WizardField, progress: &RenderProgress) -> Self {
        let index = progress.answered + 1;
        Self {
            index: index.max(1),
            total: progress.total,
            label: field.label.clone(),
            description: field.description.clone(),
            required: field.required,
            hint: field.kind.hint(&field.options),
            options: field.options.clone(),
        }
    }
}

/// Input kinds the wizard knows how to prompt for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Date,
    Number,
    Rating,
    YesNo,
    SingleChoice,
    MultiChoice,
}

impl FieldKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "email" => FieldKind::Email,
            "date" => FieldKind::Date,
            "number" => FieldKind::Number,
            "rating" => FieldKind::Rating,
            "yes_no" => FieldKind::YesNo,
            "select" | "radio" => FieldKind::SingleChoice,
            "checkbox" => FieldKind::MultiChoice,
            _ => FieldKind::Text,
        }
    }

    fn hint(&self, options: &[String]) -> Option<String> {
        match self {
            FieldKind::YesNo => Some("(yes/no, y/n, true/false)".to_string()),
            FieldKind::Number => Some("(number)".to_string()),
            FieldKind::Rating => Some("(1-5)".to_string()),
            FieldKind::Date => Some("(YYYY-MM-DD)".to_string()),
            FieldKind::Email => Some("(email)".to_string()),
            FieldKind::SingleChoice if !options.is_empty() => {
                Some(format!("({})", options.join("/")))
            }
            FieldKind::MultiChoice if !options.is_empty() => {
                Some(format!("(comma separated: {})", options.join(", ")))
            }
            _ => None,
        }
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(&mut encoded, "{:02x}", byte);
    }
    encoded
}

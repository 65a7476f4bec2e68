mod file_store;
mod wizard;

use clap::{Args, Parser, Subcommand, ValueEnum};
use file_store::FileStore;
use form_responses::{
    DraftStore, FormRecord, Principal, ResponseService, Role, SubmissionError, SubmissionPolicy,
    render_json_ui, render_text as component_render_text, submit_patch,
    visibility as component_visibility,
};
use form_spec::{AnswerSet, FormSpec, FormValues, Meta, ValidationResult, check_form, validate};
use serde_json::{Number, Value, json};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wizard::{
    AnswerParseError, FieldKind, PromptContext, Verbosity, WizardField, WizardPayload,
    WizardPresenter,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const DEFAULT_STORE_FILE: &str = "formkit-store.json";
const DEFAULT_LOG_FILTER: &str = "formkit=info";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Form filling, validation and response collection CLI",
    long_about = "Evaluates conditional field visibility, validates answers, and records drafts and responses in a local JSON store"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CliRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl From<CliRole> for Role {
    fn from(role: CliRole) -> Self {
        match role {
            CliRole::Owner => Role::Owner,
            CliRole::Admin => Role::Admin,
            CliRole::Member => Role::Member,
            CliRole::Viewer => Role::Viewer,
        }
    }
}

/// Identity of the caller for commands that act on behalf of a user.
#[derive(Args)]
struct PrincipalArgs {
    /// User id of the caller; omit to act anonymously.
    #[arg(long, value_name = "USER")]
    user: Option<String>,
    /// Team the caller belongs to.
    #[arg(long, value_name = "TEAM")]
    team: Option<String>,
    /// Team role of the caller.
    #[arg(long, value_enum, default_value_t = CliRole::Member)]
    role: CliRole,
}

impl PrincipalArgs {
    fn principal(&self) -> Option<Principal> {
        self.user.as_ref().map(|user| {
            let principal = Principal::new(user.clone(), self.role.into());
            match &self.team {
                Some(team) => principal.with_team(team.clone()),
                None => principal,
            }
        })
    }
}

/// Ownership of the form being collected.
#[derive(Args)]
struct OwnerArgs {
    /// User id that owns the form.
    #[arg(long, value_name = "OWNER", default_value = "local")]
    owner: String,
    /// Team that owns the form.
    #[arg(long, value_name = "TEAM")]
    owner_team: Option<String>,
}

impl OwnerArgs {
    fn record(&self, spec: FormSpec) -> FormRecord {
        let record = FormRecord::new(spec, self.owner.clone());
        match &self.owner_team {
            Some(team) => record.with_team(team.clone()),
            None => record,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print which fields are visible for a set of answers.
    Visibility {
        /// Path to the FormSpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Validate answers against a FormSpec.
    Validate {
        /// Path to the FormSpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Optional submission policy JSON.
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },
    /// Check a form definition for structural problems.
    Check {
        /// Path to the FormSpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
    },
    /// Render the form state for a set of answers.
    Preview {
        /// Path to the FormSpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Optional JSON file containing answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Fill a form interactively, one visible field at a time.
    Fill {
        /// Path to the FormSpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Optional JSON file containing initial answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Save progress as a draft for this respondent after every answer.
        #[arg(long, value_name = "RESPONDENT")]
        respondent: Option<String>,
        /// Store file for drafts (defaults to FORMKIT_STORE or ./formkit-store.json).
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
        /// Show verbose output (statuses, visible fields, options).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also emit answer JSON on completion.
        #[arg(long)]
        answers_json: bool,
        /// Additional render output printed before each prompt.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Submit answers as a response to a form.
    Submit {
        /// Path to the FormSpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Store file for responses (defaults to FORMKIT_STORE or ./formkit-store.json).
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
        /// Optional submission policy JSON.
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
        #[command(flatten)]
        principal: PrincipalArgs,
        #[command(flatten)]
        owner: OwnerArgs,
    },
    /// List stored responses for a form.
    Responses {
        /// Path to the FormSpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Store file for responses (defaults to FORMKIT_STORE or ./formkit-store.json).
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
        #[command(flatten)]
        principal: PrincipalArgs,
        #[command(flatten)]
        owner: OwnerArgs,
    },
    /// Manage saved drafts.
    Draft {
        #[command(subcommand)]
        action: DraftCommand,
    },
    /// Print the JSON Schema of the FormSpec format.
    Schema,
}

#[derive(Subcommand)]
enum DraftCommand {
    /// Save answers as the respondent's draft.
    Save {
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        #[arg(long, value_name = "RESPONDENT")]
        respondent: String,
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
    },
    /// Print a respondent's draft.
    Show {
        #[arg(long, value_name = "FORM_ID")]
        form: String,
        #[arg(long, value_name = "RESPONDENT")]
        respondent: String,
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
    },
    /// List drafts for a form.
    List {
        #[arg(long, value_name = "FORM_ID")]
        form: String,
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Visibility { spec, answers } => run_visibility(spec, answers),
        Command::Validate {
            spec,
            answers,
            config,
        } => run_validate(spec, answers, config),
        Command::Check { spec } => run_check(spec),
        Command::Preview {
            spec,
            answers,
            format,
        } => run_preview(spec, answers, format),
        Command::Fill {
            spec,
            answers,
            respondent,
            store,
            verbose,
            answers_json,
            format,
        } => run_fill(
            spec,
            answers,
            respondent,
            store,
            verbose,
            answers_json,
            format,
        ),
        Command::Submit {
            spec,
            answers,
            store,
            config,
            principal,
            owner,
        } => run_submit(spec, answers, store, config, &principal, &owner),
        Command::Responses {
            spec,
            store,
            principal,
            owner,
        } => run_responses(spec, store, &principal, &owner),
        Command::Draft { action } => run_draft(action),
        Command::Schema => run_schema(),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("FORMKIT_LOG")
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_spec(path: &Path) -> CliResult<(String, FormSpec)> {
    let spec_json = fs::read_to_string(path)?;
    let spec: FormSpec = serde_json::from_str(&spec_json)?;
    Ok((spec_json, spec))
}

fn read_answers(path: &Path) -> CliResult<FormValues> {
    let contents = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&contents)? {
        Value::Object(map) => Ok(map),
        _ => Err(format!("{} must contain a JSON object", path.display()).into()),
    }
}

fn load_policy(path: Option<PathBuf>) -> CliResult<SubmissionPolicy> {
    match path {
        Some(path) => Ok(SubmissionPolicy::from_json(&fs::read_to_string(path)?)?),
        None => Ok(SubmissionPolicy::default()),
    }
}

fn resolve_store_path(store: Option<PathBuf>) -> PathBuf {
    let path = store
        .or_else(|| env::var_os("FORMKIT_STORE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));
    debug!(path = %path.display(), "using store file");
    path
}

fn component_config(spec_json: &str) -> String {
    json!({ "form_spec_json": spec_json }).to_string()
}

fn run_visibility(spec_path: PathBuf, answers_path: PathBuf) -> CliResult<()> {
    let (spec_json, spec) = read_spec(&spec_path)?;
    let answers = Value::Object(read_answers(&answers_path)?);
    let visibility = parse_component_result(&component_visibility(
        &spec.id,
        &component_config(&spec_json),
        &answers.to_string(),
    ))?;
    println!("{}", serde_json::to_string_pretty(&visibility)?);
    Ok(())
}

fn run_validate(
    spec_path: PathBuf,
    answers_path: PathBuf,
    config: Option<PathBuf>,
) -> CliResult<()> {
    let (_, spec) = read_spec(&spec_path)?;
    let answers = read_answers(&answers_path)?;
    let policy = load_policy(config)?;

    let result = validate(&spec, &answers);
    let accepted = result.errors.is_empty()
        && result.missing_required.is_empty()
        && (result.unknown_fields.is_empty() || !policy.reject_unknown_fields);
    println!(
        "Validation result: {}",
        if accepted { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if accepted {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_validation(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("Errors:");
        for error in &result.errors {
            println!(
                "  {} - {}",
                error.path.as_deref().unwrap_or("<unknown>"),
                error.message
            );
        }
    }
    if !result.missing_required.is_empty() {
        println!(
            "Missing required answers: {}",
            result.missing_required.join(", ")
        );
    }
    if !result.unknown_fields.is_empty() {
        println!(
            "Unknown answer fields: {}",
            result.unknown_fields.join(", ")
        );
    }
    if !result.hidden_fields.is_empty() {
        println!(
            "Ignored answers for hidden fields: {}",
            result.hidden_fields.join(", ")
        );
    }
}

fn run_check(spec_path: PathBuf) -> CliResult<()> {
    let (_, spec) = read_spec(&spec_path)?;
    check_form(&spec)?;
    let conditional = spec
        .fields
        .iter()
        .filter(|field| field.conditional_logic.is_some())
        .count();
    println!(
        "Form '{}' is valid: {} fields, {} with conditional logic",
        spec.id,
        spec.fields.len(),
        conditional
    );
    Ok(())
}

fn run_preview(
    spec_path: PathBuf,
    answers_path: Option<PathBuf>,
    format: RenderMode,
) -> CliResult<()> {
    let (spec_json, spec) = read_spec(&spec_path)?;
    let answers = match answers_path {
        Some(path) => Value::Object(read_answers(&path)?),
        None => json!({}),
    };
    let config_json = component_config(&spec_json);
    let answers_json = answers.to_string();
    match format {
        RenderMode::Text => {
            let text = component_render_text(&spec.id, &config_json, &answers_json);
            // Text rendering reports failures as a JSON error object.
            if text.starts_with('{') {
                parse_component_result(&text)?;
            }
            println!("{}", text);
        }
        RenderMode::Json => {
            let ui = parse_component_result(&render_json_ui(&spec.id, &config_json, &answers_json))?;
            println!("{}", serde_json::to_string_pretty(&ui)?);
        }
    }
    Ok(())
}

fn run_fill(
    spec_path: PathBuf,
    answers_path: Option<PathBuf>,
    respondent: Option<String>,
    store: Option<PathBuf>,
    verbose: bool,
    answers_json: bool,
    format: RenderMode,
) -> CliResult<()> {
    let (spec_json, spec) = read_spec(&spec_path)?;
    check_form(&spec)?;
    let form_id = spec.id.clone();
    let config_json = component_config(&spec_json);

    let drafts = respondent
        .as_ref()
        .map(|_| DraftStore::new(FileStore::open(resolve_store_path(store))));

    let mut answers = match (answers_path, &drafts, &respondent) {
        (Some(path), _, _) => read_answers(&path)?,
        (None, Some(drafts), Some(respondent)) => drafts
            .load(&form_id, respondent)?
            .map(|draft| draft.values)
            .unwrap_or_default(),
        _ => FormValues::new(),
    };

    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose), answers_json);
    let mut skipped: Vec<String> = Vec::new();

    loop {
        let answers_str = Value::Object(answers.clone()).to_string();
        let ui_raw = render_json_ui(&form_id, &config_json, &answers_str);
        let ui = parse_component_result(&ui_raw)?;
        let payload =
            WizardPayload::from_json(&ui).map_err(|err| format!("wizard UI error: {}", err))?;

        let Some(field) = payload.pending_field(&skipped) else {
            let answer_set = AnswerSet {
                form_id: form_id.clone(),
                answers: answers.clone(),
                meta: respondent.clone().map(|respondent| Meta {
                    respondent: Some(respondent),
                    locale: None,
                }),
            };
            presenter.show_completion(&answer_set);
            break;
        };

        print_render_output(format, &ui_raw);
        presenter.show_header(&payload);
        presenter.show_status(&payload);

        let prompt = PromptContext::new(field, &payload.progress);
        let Some(answer) = prompt_field(&prompt, field, &presenter)? else {
            skipped.push(field.id.clone());
            continue;
        };

        let value_json = serde_json::to_string(&answer)?;
        let patched = parse_component_result(&submit_patch(
            &form_id,
            &config_json,
            &answers_str,
            &field.id,
            &value_json,
        ))?;

        if patched["status"] == "error" {
            print_validation_errors(&gather_validation_details(&patched));
            continue;
        }

        answers = patched["answers"].as_object().cloned().unwrap_or_default();
        if let (Some(drafts), Some(respondent)) = (&drafts, &respondent) {
            drafts.save(&form_id, respondent, answers.clone())?;
        }
    }

    Ok(())
}

fn run_submit(
    spec_path: PathBuf,
    answers_path: PathBuf,
    store: Option<PathBuf>,
    config: Option<PathBuf>,
    principal_args: &PrincipalArgs,
    owner: &OwnerArgs,
) -> CliResult<()> {
    let (_, spec) = read_spec(&spec_path)?;
    check_form(&spec)?;
    let answers = read_answers(&answers_path)?;
    let policy = load_policy(config)?;

    let service = ResponseService::with_policy(FileStore::open(resolve_store_path(store)), policy);
    let record = owner.record(spec);
    let principal = principal_args.principal();

    match service.submit(&record, principal.as_ref(), &answers) {
        Ok(receipt) => {
            println!(
                "Response {} recorded for form '{}' ({} answers)",
                receipt.response_id, receipt.form_id, receipt.answer_count
            );
            if let Some(message) = &receipt.confirmation_message {
                println!("{}", message);
            }
            Ok(())
        }
        Err(SubmissionError::Invalid(result)) => {
            println!("Validation result: invalid");
            describe_validation(&result);
            Err("submission rejected".into())
        }
        Err(err) => Err(err.into()),
    }
}

fn run_responses(
    spec_path: PathBuf,
    store: Option<PathBuf>,
    principal_args: &PrincipalArgs,
    owner: &OwnerArgs,
) -> CliResult<()> {
    let (_, spec) = read_spec(&spec_path)?;
    let principal = principal_args
        .principal()
        .ok_or("--user is required to list responses")?;
    let service = ResponseService::new(FileStore::open(resolve_store_path(store)));
    let responses = service.responses(&owner.record(spec), &principal)?;
    println!("{}", serde_json::to_string_pretty(&responses)?);
    Ok(())
}

fn run_draft(action: DraftCommand) -> CliResult<()> {
    match action {
        DraftCommand::Save {
            spec,
            answers,
            respondent,
            store,
        } => {
            let (_, spec) = read_spec(&spec)?;
            let answers = read_answers(&answers)?;
            let drafts = DraftStore::new(FileStore::open(resolve_store_path(store)));
            let draft = drafts.save(&spec.id, &respondent, answers)?;
            println!(
                "Draft saved for '{}' on form '{}' ({} answers)",
                draft.respondent,
                draft.form_id,
                draft.values.len()
            );
            Ok(())
        }
        DraftCommand::Show {
            form,
            respondent,
            store,
        } => {
            let drafts = DraftStore::new(FileStore::open(resolve_store_path(store)));
            let draft = drafts
                .load(&form, &respondent)?
                .ok_or_else(|| format!("no draft for '{}' on form '{}'", respondent, form))?;
            println!("{}", serde_json::to_string_pretty(&draft)?);
            Ok(())
        }
        DraftCommand::List { form, store } => {
            let drafts = DraftStore::new(FileStore::open(resolve_store_path(store)));
            let listed = drafts.list(&form)?;
            if listed.is_empty() {
                println!("No drafts for form '{}'", form);
            }
            for draft in listed {
                println!(
                    "{}\t{}\t{} answers",
                    draft.respondent,
                    draft.updated_at.to_rfc3339(),
                    draft.values.len()
                );
            }
            Ok(())
        }
    }
}

fn run_schema() -> CliResult<()> {
    let schema = schemars::schema_for!(FormSpec);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn parse_component_result(response: &str) -> CliResult<Value> {
    let value: Value = serde_json::from_str(response)?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        Err(error.into())
    } else {
        Ok(value)
    }
}

/// Returns `None` when an optional field is left blank.
fn prompt_field(
    prompt: &PromptContext,
    field: &WizardField,
    presenter: &WizardPresenter,
) -> CliResult<Option<Value>> {
    loop {
        presenter.show_prompt(prompt);
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err("input closed before the form was completed".into());
        }

        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return Err("fill aborted by user".into());
        }

        match parse_answer(field, trimmed) {
            Ok(value) => return Ok(value),
            Err(err) => presenter.show_parse_error(&err),
        }
    }
}

fn parse_answer(field: &WizardField, raw: &str) -> Result<Option<Value>, AnswerParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        if field.required {
            return Err(AnswerParseError::new("This field requires an answer.", None));
        }
        return Ok(None);
    }

    let value = match field.kind {
        FieldKind::YesNo => parse_boolean(raw)?,
        FieldKind::Number => parse_number(raw)?,
        FieldKind::Rating => parse_rating(raw)?,
        FieldKind::SingleChoice => Value::String(match_option(&field.options, raw)?),
        FieldKind::MultiChoice => parse_choices(&field.options, raw)?,
        FieldKind::Text | FieldKind::Email | FieldKind::Date => Value::String(raw.to_string()),
    };
    Ok(Some(value))
}

fn parse_boolean(raw: &str) -> Result<Value, AnswerParseError> {
    match raw.to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Ok(Value::Bool(true)),
        "false" | "f" | "no" | "n" | "0" => Ok(Value::Bool(false)),
        _ => Err(AnswerParseError::new(
            "Please enter yes or no.",
            Some("expected boolean (y/n/true/false)".to_string()),
        )),
    }
}

fn parse_rating(raw: &str) -> Result<Value, AnswerParseError> {
    raw.parse::<i64>()
        .map(Number::from)
        .map(Value::Number)
        .map_err(|_| {
            AnswerParseError::new(
                "Please enter a whole number.",
                Some("expected integer rating".to_string()),
            )
        })
}

fn parse_number(raw: &str) -> Result<Value, AnswerParseError> {
    if let Ok(whole) = raw.parse::<i64>() {
        return Ok(Value::Number(Number::from(whole)));
    }
    raw.parse::<f64>()
        .map_err(|_| {
            AnswerParseError::new(
                "Please enter a number.",
                Some("expected number".to_string()),
            )
        })
        .and_then(|value| {
            Number::from_f64(value).map(Value::Number).ok_or_else(|| {
                AnswerParseError::new(
                    "Please enter a finite number.",
                    Some("number must be finite".to_string()),
                )
            })
        })
}

fn match_option(options: &[String], raw: &str) -> Result<String, AnswerParseError> {
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(raw))
        .cloned()
        .ok_or_else(|| {
            AnswerParseError::new(
                format!("Choose one of: {}.", options.join(", ")),
                Some(format!("allowed values: {}", options.join(", "))),
            )
        })
}

fn parse_choices(options: &[String], raw: &str) -> Result<Value, AnswerParseError> {
    raw.split(',')
        .map(str::trim)
        .filter(|choice| !choice.is_empty())
        .map(|choice| match_option(options, choice).map(Value::String))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

struct ValidationDetails {
    errors: Vec<(String, String)>,
    unknown_fields: Vec<String>,
}

fn gather_validation_details(response: &Value) -> ValidationDetails {
    let validation = response.get("validation");

    let errors = validation
        .and_then(|value| value.get("errors"))
        .and_then(Value::as_array)
        .map(|array| {
            array
                .iter()
                .map(|error| {
                    let path = error
                        .get("path")
                        .and_then(Value::as_str)
                        .unwrap_or("<unknown>")
                        .to_string();
                    let message = error
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("validation failed")
                        .to_string();
                    (path, message)
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let unknown_fields = validation
        .and_then(|value| value.get("unknown_fields"))
        .and_then(Value::as_array)
        .map(|array| {
            array
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    ValidationDetails {
        errors,
        unknown_fields,
    }
}

fn print_validation_errors(details: &ValidationDetails) {
    if !details.errors.is_empty() {
        eprintln!("Validation errors:");
        for (path, message) in &details.errors {
            eprintln!("  {}: {}", path, message);
        }
    }

    if !details.unknown_fields.is_empty() {
        eprintln!(
            "Unknown answer fields: {}",
            details.unknown_fields.join(", ")
        );
    }
}

fn print_render_output(mode: RenderMode, ui: &str) {
    match mode {
        RenderMode::Text => {}
        RenderMode::Json => println!("JSON UI:\n{}", ui),
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Current answers keyed by field id.
pub type FormValues = Map<String, Value>;

/// Comparison applied by a single [`ConditionalRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    /// Any operator label this build does not recognize. Never satisfied.
    #[serde(other)]
    Unknown,
}

/// What happens to the dependent field when a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LogicAction {
    Show,
    Hide,
    /// Accepted label with no visibility effect.
    Require,
    #[serde(other)]
    Unknown,
}

/// One condition on another field's current answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    pub field_id: String,
    pub operator: RuleOperator,
    #[serde(default)]
    pub value: Value,
}

/// Visibility rule-set attached to a dependent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionalLogic {
    #[serde(default)]
    pub enabled: bool,
    pub action: LogicAction,
    #[serde(default)]
    pub rules: Vec<ConditionalRule>,
}

/// Decides whether a field guarded by `logic` should be shown for `values`.
///
/// Absent or disabled logic, and logic without rules, always shows the field.
/// Otherwise the rules are OR-ed together: `show` needs at least one satisfied
/// rule, `hide` needs none. Any other action leaves the field visible.
pub fn should_show_field(logic: Option<&ConditionalLogic>, values: &FormValues) -> bool {
    let Some(logic) = logic.filter(|logic| logic.enabled) else {
        return true;
    };
    if logic.rules.is_empty() {
        return true;
    }

    let any_satisfied = logic.rules.iter().any(|rule| rule.is_satisfied(values));
    match logic.action {
        LogicAction::Show => any_satisfied,
        LogicAction::Hide => !any_satisfied,
        LogicAction::Require | LogicAction::Unknown => true,
    }
}

impl ConditionalLogic {
    pub fn evaluate(&self, values: &FormValues) -> bool {
        should_show_field(Some(self), values)
    }

    /// Ids of the controlling fields, in rule order.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.field_id.as_str())
    }
}

impl ConditionalRule {
    /// A rule whose controlling field is unanswered (missing or `null`) is
    /// never satisfied, whatever the operator.
    pub fn is_satisfied(&self, values: &FormValues) -> bool {
        let Some(stored) = values.get(&self.field_id).filter(|value| !value.is_null()) else {
            return false;
        };

        match self.operator {
            RuleOperator::Equals => strict_equals(stored, &self.value),
            RuleOperator::NotEquals => !strict_equals(stored, &self.value),
            RuleOperator::Contains => contains(stored, &self.value),
            RuleOperator::NotContains => lacks(stored, &self.value),
            RuleOperator::GreaterThan => to_number(stored) > to_number(&self.value),
            RuleOperator::LessThan => to_number(stored) < to_number(&self.value),
            RuleOperator::Unknown => false,
        }
    }
}

fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Number(left), Value::Number(right)) => numbers_equal(left, right),
        // Arrays and objects are compared by identity, so two values are never equal.
        _ => false,
    }
}

fn numbers_equal(left: &Number, right: &Number) -> bool {
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        return left == right;
    }
    if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        return left == right;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

fn contains(stored: &Value, needle: &Value) -> bool {
    match stored {
        Value::Array(items) => items.iter().any(|item| strict_equals(item, needle)),
        other => display_string(other).contains(&display_string(needle)),
    }
}

// Kept separate from `contains`; any change there must be mirrored here.
fn lacks(stored: &Value, needle: &Value) -> bool {
    match stored {
        Value::Array(items) => items.iter().all(|item| !strict_equals(item, needle)),
        other => {
            let haystack = display_string(other);
            haystack.find(display_string(needle).as_str()).is_none()
        }
    }
}

/// String form used by substring tests: arrays join their elements with `,`
/// and objects collapse to a fixed placeholder.
fn display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_string(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Magnitudes in `[1e-6, 1e21)` print as plain decimals, others in exponent
/// form with an explicit sign (`1e+21`, `1.5e-7`).
fn number_string(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    let Some(value) = number.as_f64() else {
        return number.to_string();
    };
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        return exponent_string(value);
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn exponent_string(value: f64) -> String {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Numeric coercion for relational operators; anything unparseable is NaN.
fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_numeric(text),
        Value::Array(_) => parse_numeric(&display_string(value)),
        Value::Object(_) => f64::NAN,
    }
}

fn parse_numeric(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|digit| digit.is_digit(radix)) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix)
                .map(|parsed| parsed as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // `str::parse` also accepts spellings such as "inf" and "NaN".
    if trimmed
        .bytes()
        .any(|byte| byte.is_ascii_alphabetic() && !matches!(byte, b'e' | b'E'))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

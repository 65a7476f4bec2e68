use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::FieldSpec;

fn default_true() -> bool {
    true
}

/// Collection settings chosen by the form author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormSettings {
    #[serde(default = "default_true")]
    pub accepting_responses: bool,
    #[serde(default = "default_true")]
    pub allow_multiple_submissions: bool,
    #[serde(default)]
    pub require_login: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_message: Option<String>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            accepting_responses: true,
            allow_multiple_submissions: true,
            require_login: false,
            confirmation_message: None,
        }
    }
}

/// Top-level form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormSpec {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub settings: FormSettings,
    pub fields: Vec<FieldSpec>,
}

impl FormSpec {
    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == id)
    }
}

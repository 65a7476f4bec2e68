use form_spec::FormSpec;
use serde::{Deserialize, Serialize};

/// A form definition together with its ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub spec: FormSpec,
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl FormRecord {
    pub fn new(spec: FormSpec, owner_id: impl Into<String>) -> Self {
        Self {
            spec,
            owner_id: owner_id.into(),
            team_id: None,
        }
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }
}

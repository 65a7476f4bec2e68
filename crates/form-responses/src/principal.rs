use serde::{Deserialize, Serialize};

use crate::record::FormRecord;

/// Team role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Admin,
    Member,
    Viewer,
}

/// Authenticated caller handed to every operation that needs one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            team_id: None,
            role,
        }
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    fn in_team_of(&self, record: &FormRecord) -> bool {
        record.team_id.is_some() && self.team_id == record.team_id
    }

    pub fn can_view_responses(&self, record: &FormRecord) -> bool {
        self.user_id == record.owner_id
            || (self.in_team_of(record)
                && matches!(self.role, Role::Owner | Role::Admin | Role::Member))
    }

    pub fn can_manage_form(&self, record: &FormRecord) -> bool {
        self.user_id == record.owner_id
            || (self.in_team_of(record) && matches!(self.role, Role::Owner | Role::Admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_spec::FormSpec;
    use serde_json::json;

    fn record() -> FormRecord {
        let spec: FormSpec = serde_json::from_value(json!({
            "id": "f",
            "title": "F",
            "fields": [{ "id": "a", "type": "short_text", "label": "A" }]
        }))
        .expect("spec");
        FormRecord::new(spec, "alice").with_team("acme")
    }

    #[test]
    fn owner_can_always_view_and_manage() {
        let owner = Principal::new("alice", Role::Viewer);
        assert!(owner.can_view_responses(&record()));
        assert!(owner.can_manage_form(&record()));
    }

    #[test]
    fn team_roles_gate_access() {
        let member = Principal::new("bob", Role::Member).with_team("acme");
        let viewer = Principal::new("carol", Role::Viewer).with_team("acme");
        let admin = Principal::new("dan", Role::Admin).with_team("acme");
        let outsider = Principal::new("eve", Role::Owner).with_team("other");

        assert!(member.can_view_responses(&record()));
        assert!(!member.can_manage_form(&record()));
        assert!(!viewer.can_view_responses(&record()));
        assert!(admin.can_manage_form(&record()));
        assert!(!outsider.can_view_responses(&record()));
    }

    #[test]
    fn teamless_principal_never_matches_teamless_form() {
        let spec = record().spec;
        let personal = FormRecord::new(spec, "alice");
        let stranger = Principal::new("bob", Role::Owner);
        assert!(!stranger.can_view_responses(&personal));
    }
}

use chrono::{DateTime, Utc};
use form_spec::{FormValues, ValidationResult, is_blank, validate, visible_values};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SubmissionPolicy;
use crate::drafts::DraftStore;
use crate::principal::Principal;
use crate::record::FormRecord;
use crate::store::{KeyValueStore, StoreError, key_segment, list_json, write_json};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("form '{0}' is not accepting responses")]
    FormClosed(String),
    #[error("form '{0}' requires a signed-in respondent")]
    LoginRequired(String),
    #[error("'{respondent}' already submitted a response to form '{form_id}'")]
    AlreadySubmitted { form_id: String, respondent: String },
    #[error("submission failed validation")]
    Invalid(ValidationResult),
    #[error("not allowed to view responses for form '{0}'")]
    Forbidden(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One answered field of a stored response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnswer {
    pub field_id: String,
    pub value: Value,
}

/// A response and all of its answers, persisted as one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    pub id: Uuid,
    pub form_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<StoredAnswer>,
}

impl StoredResponse {
    pub fn answer(&self, field_id: &str) -> Option<&Value> {
        self.answers
            .iter()
            .find(|answer| answer.field_id == field_id)
            .map(|answer| &answer.value)
    }
}

/// Returned to the respondent once a response is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub response_id: Uuid,
    pub form_id: String,
    pub submitted_at: DateTime<Utc>,
    pub answer_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_message: Option<String>,
}

fn response_prefix(form_id: &str) -> String {
    format!("responses/{}/", key_segment(form_id))
}

/// Accepts submissions for forms and serves them back to authorized users.
pub struct ResponseService<S> {
    store: S,
    policy: SubmissionPolicy,
}

impl<S: KeyValueStore> ResponseService<S> {
    pub fn new(store: S) -> Self {
        Self::with_policy(store, SubmissionPolicy::default())
    }

    pub fn with_policy(store: S, policy: SubmissionPolicy) -> Self {
        Self { store, policy }
    }

    pub fn drafts(&self) -> DraftStore<&S> {
        DraftStore::new(&self.store)
    }

    /// Validates `values` against the fields visible under them and stores
    /// the response.
    ///
    /// Answers to hidden fields are dropped before validation, so a hidden
    /// required field never blocks a submission. Validation and storage both
    /// see the same pruned answers, so every stored answer belongs to a field
    /// that is visible under the stored response.
    pub fn submit(
        &self,
        record: &FormRecord,
        principal: Option<&Principal>,
        values: &FormValues,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let spec = &record.spec;
        if !spec.settings.accepting_responses {
            warn!(form_id = %spec.id, "submission to closed form rejected");
            return Err(SubmissionError::FormClosed(spec.id.clone()));
        }
        if spec.settings.require_login && principal.is_none() {
            return Err(SubmissionError::LoginRequired(spec.id.clone()));
        }
        if !spec.settings.allow_multiple_submissions
            && let Some(principal) = principal
            && self.has_submitted(&spec.id, &principal.user_id)?
        {
            warn!(form_id = %spec.id, user_id = %principal.user_id, "duplicate submission rejected");
            return Err(SubmissionError::AlreadySubmitted {
                form_id: spec.id.clone(),
                respondent: principal.user_id.clone(),
            });
        }

        let visible = visible_values(spec, values);
        let validation = validate(spec, &visible);
        let accepted = validation.errors.is_empty()
            && validation.missing_required.is_empty()
            && (validation.unknown_fields.is_empty() || !self.policy.reject_unknown_fields);
        if !accepted {
            warn!(
                form_id = %spec.id,
                errors = validation.errors.len(),
                missing = validation.missing_required.len(),
                unknown = validation.unknown_fields.len(),
                "submission failed validation"
            );
            return Err(SubmissionError::Invalid(validation));
        }

        let answers = spec
            .fields
            .iter()
            .filter_map(|field| {
                visible
                    .get(&field.id)
                    .filter(|value| !is_blank(value))
                    .map(|value| StoredAnswer {
                        field_id: field.id.clone(),
                        value: value.clone(),
                    })
            })
            .collect::<Vec<_>>();

        let response = StoredResponse {
            id: Uuid::now_v7(),
            form_id: spec.id.clone(),
            respondent: principal.map(|principal| principal.user_id.clone()),
            submitted_at: Utc::now(),
            answers,
        };
        let key = format!("{}{}", response_prefix(&spec.id), response.id);
        write_json(&self.store, &key, &response)?;
        info!(
            form_id = %spec.id,
            response_id = %response.id,
            answers = response.answers.len(),
            "response recorded"
        );

        if let Some(principal) = principal
            && let Err(err) = self.drafts().discard(&spec.id, &principal.user_id)
        {
            warn!(form_id = %spec.id, error = %err, "failed to clear draft after submission");
        }

        Ok(SubmissionReceipt {
            response_id: response.id,
            form_id: response.form_id,
            submitted_at: response.submitted_at,
            answer_count: response.answers.len(),
            confirmation_message: spec.settings.confirmation_message.clone(),
        })
    }

    /// Stored responses for a form, oldest first.
    pub fn responses(
        &self,
        record: &FormRecord,
        principal: &Principal,
    ) -> Result<Vec<StoredResponse>, SubmissionError> {
        if !principal.can_view_responses(record) {
            warn!(form_id = %record.id(), user_id = %principal.user_id, "response listing denied");
            return Err(SubmissionError::Forbidden(record.id().to_string()));
        }
        Ok(list_json(&self.store, &response_prefix(record.id()))?)
    }

    fn has_submitted(&self, form_id: &str, user_id: &str) -> Result<bool, StoreError> {
        let responses: Vec<StoredResponse> = list_json(&self.store, &response_prefix(form_id))?;
        Ok(responses
            .iter()
            .any(|response| response.respondent.as_deref() == Some(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::Role;
    use crate::store::MemoryStore;
    use form_spec::FormSpec;
    use serde_json::json;

    fn record(settings: Value) -> FormRecord {
        let spec: FormSpec = serde_json::from_value(json!({
            "id": "signup",
            "title": "Signup",
            "settings": settings,
            "fields": [
                { "id": "plan", "type": "select", "label": "Plan", "required": true, "options": ["free", "pro"] },
                {
                    "id": "company",
                    "type": "short_text",
                    "label": "Company",
                    "required": true,
                    "conditionalLogic": {
                        "enabled": true,
                        "action": "show",
                        "rules": [{ "fieldId": "plan", "operator": "equals", "value": "pro" }]
                    }
                }
            ]
        }))
        .expect("spec");
        FormRecord::new(spec, "owner").with_team("acme")
    }

    fn values(raw: Value) -> FormValues {
        raw.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn hidden_answers_are_not_stored() {
        let service = ResponseService::new(MemoryStore::new());
        let form = record(json!({ "confirmation_message": "Welcome!" }));
        let receipt = service
            .submit(&form, None, &values(json!({ "plan": "free", "company": "Acme" })))
            .expect("submit");
        assert_eq!(receipt.answer_count, 1);
        assert_eq!(receipt.confirmation_message.as_deref(), Some("Welcome!"));

        let owner = Principal::new("owner", Role::Owner);
        let stored = service.responses(&form, &owner).expect("list");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].answer("plan"), Some(&json!("free")));
        assert!(stored[0].answer("company").is_none());
    }

    #[test]
    fn visible_required_field_blocks_submission() {
        let service = ResponseService::new(MemoryStore::new());
        let form = record(json!({}));
        let err = service
            .submit(&form, None, &values(json!({ "plan": "pro" })))
            .unwrap_err();
        match err {
            SubmissionError::Invalid(result) => {
                assert_eq!(result.missing_required, vec!["company"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
        let owner = Principal::new("owner", Role::Owner);
        assert!(service.responses(&form, &owner).unwrap().is_empty());
    }

    #[test]
    fn closed_form_and_login_rules_apply() {
        let service = ResponseService::new(MemoryStore::new());
        let closed = record(json!({ "accepting_responses": false }));
        assert!(matches!(
            service.submit(&closed, None, &values(json!({ "plan": "free" }))),
            Err(SubmissionError::FormClosed(_))
        ));

        let login = record(json!({ "require_login": true }));
        assert!(matches!(
            service.submit(&login, None, &values(json!({ "plan": "free" }))),
            Err(SubmissionError::LoginRequired(_))
        ));
    }

    #[test]
    fn single_submission_forms_reject_repeat_respondent() {
        let service = ResponseService::new(MemoryStore::new());
        let form = record(json!({ "allow_multiple_submissions": false }));
        let alice = Principal::new("alice", Role::Member);
        let answers = values(json!({ "plan": "free" }));

        service.submit(&form, Some(&alice), &answers).expect("first");
        assert!(matches!(
            service.submit(&form, Some(&alice), &answers),
            Err(SubmissionError::AlreadySubmitted { .. })
        ));
        let bob = Principal::new("bob", Role::Member);
        service.submit(&form, Some(&bob), &answers).expect("other user");
    }

    #[test]
    fn submission_clears_respondent_draft() {
        let service = ResponseService::new(MemoryStore::new());
        let form = record(json!({}));
        let alice = Principal::new("alice", Role::Member);
        service
            .drafts()
            .save("signup", "alice", values(json!({ "plan": "free" })))
            .unwrap();

        service
            .submit(&form, Some(&alice), &values(json!({ "plan": "free" })))
            .expect("submit");
        assert!(service.drafts().load("signup", "alice").unwrap().is_none());
    }

    #[test]
    fn unknown_fields_follow_policy() {
        let answers = values(json!({ "plan": "free", "coupon": "XYZ" }));
        let strict = ResponseService::new(MemoryStore::new());
        assert!(matches!(
            strict.submit(&record(json!({})), None, &answers),
            Err(SubmissionError::Invalid(_))
        ));

        let lenient = ResponseService::with_policy(
            MemoryStore::new(),
            SubmissionPolicy {
                reject_unknown_fields: false,
            },
        );
        let receipt = lenient
            .submit(&record(json!({})), None, &answers)
            .expect("lenient submit");
        assert_eq!(receipt.answer_count, 1);
    }

    #[test]
    fn responses_require_authorization() {
        let service = ResponseService::new(MemoryStore::new());
        let form = record(json!({}));
        let viewer = Principal::new("vic", Role::Viewer).with_team("acme");
        assert!(matches!(
            service.responses(&form, &viewer),
            Err(SubmissionError::Forbidden(_))
        ));
        let member = Principal::new("mia", Role::Member).with_team("acme");
        assert!(service.responses(&form, &member).unwrap().is_empty());
    }

    #[test]
    fn chained_hidden_answers_are_neither_validated_nor_stored() {
        let spec: FormSpec = serde_json::from_value(json!({
            "id": "chain",
            "title": "Chain",
            "fields": [
                { "id": "a", "type": "short_text", "label": "A" },
                {
                    "id": "b",
                    "type": "short_text",
                    "label": "B",
                    "conditionalLogic": {
                        "enabled": true,
                        "action": "show",
                        "rules": [{ "fieldId": "a", "operator": "equals", "value": "yes" }]
                    }
                },
                {
                    "id": "c",
                    "type": "number",
                    "label": "C",
                    "required": true,
                    "conditionalLogic": {
                        "enabled": true,
                        "action": "show",
                        "rules": [{ "fieldId": "b", "operator": "equals", "value": "x" }]
                    }
                }
            ]
        }))
        .expect("spec");
        let form = FormRecord::new(spec, "owner");
        let owner = Principal::new("owner", Role::Owner);
        let service = ResponseService::new(MemoryStore::new());

        let receipt = service
            .submit(
                &form,
                None,
                &values(json!({ "a": "no", "b": "x", "c": "not a number" })),
            )
            .expect("submit");
        assert_eq!(receipt.answer_count, 1);

        let stored = service.responses(&form, &owner).expect("list");
        assert_eq!(stored[0].answer("a"), Some(&json!("no")));
        assert!(stored[0].answer("b").is_none());
        assert!(stored[0].answer("c").is_none());

        let stored_values: FormValues = stored[0]
            .answers
            .iter()
            .map(|answer| (answer.field_id.clone(), answer.value.clone()))
            .collect();
        let visibility = form_spec::resolve_visibility(&form.spec, &stored_values);
        assert!(stored[0]
            .answers
            .iter()
            .all(|answer| visibility[&answer.field_id]));

        let err = service
            .submit(
                &form,
                None,
                &values(json!({ "a": "yes", "b": "x", "c": "not a number" })),
            )
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Invalid(result) if result.errors[0].code.as_deref() == Some("type_mismatch")));
    }

    #[test]
    fn nested_form_id_does_not_count_as_prior_submission() {
        let service = ResponseService::new(MemoryStore::new());
        let answers = values(json!({ "plan": "free" }));
        let alice = Principal::new("alice", Role::Member);

        let mut nested = record(json!({ "allow_multiple_submissions": false }));
        nested.spec.id = "signup/beta".into();
        service.submit(&nested, Some(&alice), &answers).expect("nested");

        let parent = record(json!({ "allow_multiple_submissions": false }));
        service.submit(&parent, Some(&alice), &answers).expect("parent");

        let owner = Principal::new("owner", Role::Owner);
        assert_eq!(service.responses(&parent, &owner).unwrap().len(), 1);
    }
}

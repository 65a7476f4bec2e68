use chrono::{DateTime, Utc};
use form_spec::FormValues;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{KeyValueStore, StoreError, key_segment, list_json, read_json, write_json};

/// Partially completed answers kept between visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub form_id: String,
    pub respondent: String,
    pub values: FormValues,
    pub updated_at: DateTime<Utc>,
}

fn draft_prefix(form_id: &str) -> String {
    format!("drafts/{}/", key_segment(form_id))
}

fn draft_key(form_id: &str, respondent: &str) -> String {
    format!("{}{}", draft_prefix(form_id), key_segment(respondent))
}

pub struct DraftStore<S> {
    store: S,
}

impl<S: KeyValueStore> DraftStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Replaces any previous draft by the same respondent.
    pub fn save(
        &self,
        form_id: &str,
        respondent: &str,
        values: FormValues,
    ) -> Result<Draft, StoreError> {
        let draft = Draft {
            form_id: form_id.to_string(),
            respondent: respondent.to_string(),
            values,
            updated_at: Utc::now(),
        };
        write_json(&self.store, &draft_key(form_id, respondent), &draft)?;
        debug!(form_id, respondent, fields = draft.values.len(), "draft saved");
        Ok(draft)
    }

    pub fn load(&self, form_id: &str, respondent: &str) -> Result<Option<Draft>, StoreError> {
        read_json(&self.store, &draft_key(form_id, respondent))
    }

    pub fn list(&self, form_id: &str) -> Result<Vec<Draft>, StoreError> {
        list_json(&self.store, &draft_prefix(form_id))
    }

    pub fn discard(&self, form_id: &str, respondent: &str) -> Result<bool, StoreError> {
        let removed = self.store.remove(&draft_key(form_id, respondent))?;
        if removed {
            debug!(form_id, respondent, "draft discarded");
        }
        Ok(removed)
    }
}

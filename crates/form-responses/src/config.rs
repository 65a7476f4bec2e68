use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// How strictly submissions are checked before they are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPolicy {
    /// Reject answers keyed by ids that are not fields of the form. When
    /// disabled those keys are silently dropped.
    #[serde(default = "default_true")]
    pub reject_unknown_fields: bool,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            reject_unknown_fields: true,
        }
    }
}

impl SubmissionPolicy {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        if raw.trim().is_empty() {
            Ok(Self::default())
        } else {
            serde_json::from_str(raw)
        }
    }
}

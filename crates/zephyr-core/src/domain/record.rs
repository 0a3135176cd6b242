use crate::domain::draft::SignupDraft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What gets written to the document store: the draft plus the moment it was
/// submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub draft: SignupDraft,
    pub timestamp: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn new(draft: &SignupDraft, timestamp: DateTime<Utc>) -> Self {
        Self {
            draft: draft.clone(),
            timestamp,
        }
    }
}

/// Body of `POST /api/notify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub email: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
}

impl NotificationRequest {
    pub fn from_draft(draft: &SignupDraft) -> Self {
        Self {
            email: draft.email.clone(),
            first_name: draft.first_name.clone(),
            school: Some(draft.school.clone()),
        }
    }
}

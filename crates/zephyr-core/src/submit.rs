use crate::domain::{DocumentId, NotificationRequest, SignupField, SubmissionRecord};
use crate::form::FormState;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info};

pub const SUCCESS_MESSAGE: &str = "You're successfully signed up - please check your spam!";
pub const FAILURE_MESSAGE: &str = "There was an error. Please try again.";
pub const BLOCKED_MESSAGE: &str = "Please fill in all required fields.";

pub type SinkError = Box<dyn std::error::Error + Send + Sync>;
pub type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Write side of the document store.
pub trait RecordSink {
    fn insert_record(&self, record: &SubmissionRecord) -> Result<DocumentId, SinkError>;
}

/// Client of the notification endpoint.
pub trait NotificationSender {
    fn send_notification(&self, request: &NotificationRequest) -> Result<(), SendError>;
}

impl<T: RecordSink + ?Sized> RecordSink for &T {
    fn insert_record(&self, record: &SubmissionRecord) -> Result<DocumentId, SinkError> {
        (**self).insert_record(record)
    }
}

impl<T: NotificationSender + ?Sized> NotificationSender for &T {
    fn send_notification(&self, request: &NotificationRequest) -> Result<(), SendError> {
        (**self).send_notification(request)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("storing the signup failed: {0}")]
    StorageWriteFailed(#[source] SinkError),
    #[error("sending the welcome notification failed: {0}")]
    NotificationFailed(#[source] SendError),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted { id: DocumentId },
    Blocked { missing: Vec<SignupField> },
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted { .. })
    }

    /// Message shown to the person filling in the form. Both failure kinds
    /// read the same.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitOutcome::Submitted { .. } => SUCCESS_MESSAGE,
            SubmitOutcome::Blocked { .. } => BLOCKED_MESSAGE,
            SubmitOutcome::Failed(_) => FAILURE_MESSAGE,
        }
    }
}

/// Runs a submission: store the record, then request the welcome email.
///
/// The two steps run strictly in order. A failed store write skips the
/// notification; a failed notification leaves the stored record in place.
pub struct Submitter<S, N> {
    sink: S,
    notifier: N,
}

impl<S, N> Submitter<S, N>
where
    S: RecordSink,
    N: NotificationSender,
{
    pub fn new(sink: S, notifier: N) -> Self {
        Self { sink, notifier }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn submit(&self, form: &mut FormState, now: DateTime<Utc>) -> SubmitOutcome {
        if !form.is_valid() {
            return SubmitOutcome::Blocked {
                missing: form.draft().missing_fields(),
            };
        }

        let record = SubmissionRecord::new(form.draft(), now);
        let id = match self.sink.insert_record(&record) {
            Ok(id) => id,
            Err(err) => {
                error!(step = "store", error = %err, "signup submission failed");
                return SubmitOutcome::Failed(SubmitError::StorageWriteFailed(err));
            }
        };

        let request = NotificationRequest::from_draft(form.draft());
        if let Err(err) = self.notifier.send_notification(&request) {
            error!(step = "notify", document = %id, error = %err, "signup submission failed");
            return SubmitOutcome::Failed(SubmitError::NotificationFailed(err));
        }

        info!(document = %id, "signup submitted");
        form.reset();
        SubmitOutcome::Submitted { id }
    }
}

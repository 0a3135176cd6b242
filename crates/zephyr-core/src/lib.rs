pub mod domain;
pub mod error;
pub mod form;
pub mod submit;

pub use domain::*;
pub use error::CoreError;
pub use form::FormState;
pub use submit::{
    NotificationSender, RecordSink, SendError, SinkError, SubmitError, SubmitOutcome, Submitter,
};

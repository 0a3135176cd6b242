use chrono::Utc;
use zephyr_core::{NotificationSender, RecordSink, SubmitOutcome, Submitter};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
}

pub fn execute_action<S, N>(app: &mut App, submitter: &Submitter<S, N>, action: Action)
where
    S: RecordSink,
    N: NotificationSender,
{
    match action {
        Action::Submit => {
            let outcome = submitter.submit(&mut app.form, Utc::now());
            let message = outcome.user_message();
            match outcome {
                SubmitOutcome::Submitted { .. } => {
                    app.set_status(message);
                    app.focus_first();
                }
                SubmitOutcome::Blocked { .. } | SubmitOutcome::Failed(_) => app.set_error(message),
            }
        }
    }
}

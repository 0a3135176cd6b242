pub mod division;
pub mod draft;
pub mod ids;
pub mod phone;
pub mod record;

pub use division::UilDivision;
pub use draft::{SignupDraft, SignupField};
pub use ids::DocumentId;
pub use phone::format_phone_number;
pub use record::{NotificationRequest, SubmissionRecord};

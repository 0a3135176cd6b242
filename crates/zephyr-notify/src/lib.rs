pub mod client;
pub mod error;
pub mod provider;
pub mod server;
pub mod template;

pub use client::NotifyClient;
pub use error::{NotifyError, Result};
pub use provider::{EmailProvider, SendGridProvider, StdoutProvider};
pub use server::{router, serve, NotifyState};
pub use template::{welcome_email, OutboundEmail, Sender, TrackingSettings};

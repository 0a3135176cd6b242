use askama::Template;
use serde::Serialize;
use zephyr_core::NotificationRequest;

use crate::error::Result;

pub const SENDER: Sender = Sender {
    email: "prakul@zephyrtechnology.net",
    name: "Prakul at Zephyr Technology",
};
pub const SUBJECT: &str = "Welcome to Zephyr!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sender {
    pub email: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingSettings {
    pub click_tracking: bool,
    pub open_tracking: bool,
}

impl TrackingSettings {
    pub fn enabled() -> Self {
        Self {
            click_tracking: true,
            open_tracking: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub from: Sender,
    pub subject: String,
    pub text: String,
    pub html: String,
    pub tracking: TrackingSettings,
}

#[derive(Template)]
#[template(path = "welcome.html")]
struct WelcomeHtml<'a> {
    first_name: &'a str,
}

#[derive(Template)]
#[template(path = "welcome.txt")]
struct WelcomeText<'a> {
    first_name: &'a str,
}

/// Builds the welcome message for a new signup. Only the HTML body escapes
/// the name.
pub fn welcome_email(request: &NotificationRequest) -> Result<OutboundEmail> {
    let first_name = request.first_name.as_str();
    Ok(OutboundEmail {
        to: request.email.trim().to_string(),
        from: SENDER,
        subject: SUBJECT.to_string(),
        text: WelcomeText { first_name }.render()?,
        html: WelcomeHtml { first_name }.render()?,
        tracking: TrackingSettings::enabled(),
    })
}

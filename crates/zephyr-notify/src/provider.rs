use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::Address;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::client::join_under;
use crate::error::{NotifyError, Result};
use crate::template::{OutboundEmail, Sender};

/// Transactional email backend.
#[async_trait]
pub trait EmailProvider: Send + Sync + 'static {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// Rejects recipients that no provider would accept.
pub fn parse_recipient(raw: &str) -> Result<Address> {
    raw.trim()
        .parse::<Address>()
        .map_err(|_| NotifyError::InvalidRecipient(raw.to_string()))
}

/// SendGrid v3 `mail/send`.
#[derive(Debug, Clone)]
pub struct SendGridProvider {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl SendGridProvider {
    pub fn new(api_key: impl Into<String>, base_url: &Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("zephyr-notify")
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: join_under(base_url, "v3/mail/send")?,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl EmailProvider for SendGridProvider {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let payload = SendGridPayload::from_email(email);
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Provider {
                status: status.as_u16(),
                body,
            });
        }
        debug!(status = status.as_u16(), "sendgrid accepted message");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SendGridPayload<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Sender,
    subject: &'a str,
    content: [Content<'a>; 2],
    tracking_settings: SendGridTracking,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [EmailAddress<'a>; 1],
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct SendGridTracking {
    click_tracking: Toggle,
    open_tracking: Toggle,
}

#[derive(Debug, Serialize)]
struct Toggle {
    enable: bool,
}

impl<'a> SendGridPayload<'a> {
    pub(crate) fn from_email(email: &'a OutboundEmail) -> Self {
        Self {
            personalizations: [Personalization {
                to: [EmailAddress { email: &email.to }],
            }],
            from: email.from,
            subject: &email.subject,
            content: [
                Content {
                    kind: "text/plain",
                    value: &email.text,
                },
                Content {
                    kind: "text/html",
                    value: &email.html,
                },
            ],
            tracking_settings: SendGridTracking {
                click_tracking: Toggle {
                    enable: email.tracking.click_tracking,
                },
                open_tracking: Toggle {
                    enable: email.tracking.open_tracking,
                },
            },
        }
    }
}

/// Logs messages instead of delivering them. For local runs without a
/// provider account.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutProvider;

#[async_trait]
impl EmailProvider for StdoutProvider {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let to = parse_recipient(&email.to)?;
        let from = email
            .from
            .email
            .parse::<Address>()
            .map(|address| Mailbox::new(Some(email.from.name.to_string()), address))
            .map_err(|_| NotifyError::InvalidRecipient(email.from.email.to_string()))?;
        info!(
            %from,
            %to,
            subject = %email.subject,
            click_tracking = email.tracking.click_tracking,
            open_tracking = email.tracking.open_tracking,
            "{}",
            email.text
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        parse_recipient, EmailProvider, SendGridPayload, SendGridProvider, StdoutProvider,
    };
    use crate::error::NotifyError;
    use crate::template::{welcome_email, OutboundEmail};
    use serde_json::json;
    use url::Url;
    use zephyr_core::NotificationRequest;

    fn email(to: &str) -> OutboundEmail {
        welcome_email(&NotificationRequest {
            email: to.to_string(),
            first_name: "Jimmy".to_string(),
            school: None,
        })
        .expect("render")
    }

    #[test]
    fn payload_matches_sendgrid_shape() {
        let email = email("coach@example.com");
        let value = serde_json::to_value(SendGridPayload::from_email(&email)).expect("serialize");

        assert_eq!(
            value["personalizations"],
            json!([{ "to": [{ "email": "coach@example.com" }] }])
        );
        assert_eq!(
            value["from"],
            json!({ "email": "prakul@zephyrtechnology.net", "name": "Prakul at Zephyr Technology" })
        );
        assert_eq!(value["subject"], "Welcome to Zephyr!");
        assert_eq!(value["content"][0]["type"], "text/plain");
        assert_eq!(value["content"][1]["type"], "text/html");
        assert_eq!(
            value["tracking_settings"],
            json!({ "click_tracking": { "enable": true }, "open_tracking": { "enable": true } })
        );
    }

    #[test]
    fn parse_recipient_accepts_plain_addresses() {
        let address = parse_recipient(" coach@example.com ").expect("valid address");
        assert_eq!(address.to_string(), "coach@example.com");
    }

    #[test]
    fn parse_recipient_rejects_garbage() {
        assert!(parse_recipient("").is_err());
        assert!(parse_recipient("not an email").is_err());
    }

    #[test]
    fn sendgrid_endpoint_keeps_base_path_prefix() {
        let base = Url::parse("https://mail-proxy.example.com/sendgrid").expect("url");
        let provider = SendGridProvider::new("SG.key", &base).expect("provider");
        assert_eq!(
            provider.endpoint.as_str(),
            "https://mail-proxy.example.com/sendgrid/v3/mail/send"
        );

        let root = Url::parse("https://api.sendgrid.com").expect("url");
        let provider = SendGridProvider::new("SG.key", &root).expect("provider");
        assert_eq!(provider.endpoint.as_str(), "https://api.sendgrid.com/v3/mail/send");
    }

    #[tokio::test]
    async fn stdout_provider_accepts_welcome_email() {
        StdoutProvider
            .send(&email("coach@example.com"))
            .await
            .expect("logged");
    }

    #[tokio::test]
    async fn stdout_provider_rejects_bad_recipient() {
        let err = StdoutProvider
            .send(&email("not an address"))
            .await
            .expect_err("bad recipient");
        assert!(matches!(err, NotifyError::InvalidRecipient(_)));
    }
}

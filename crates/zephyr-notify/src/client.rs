use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;
use zephyr_core::{NotificationRequest, NotificationSender, SendError};

use crate::error::{NotifyError, Result};

/// Blocking client for `POST /api/notify`, used by the form.
#[derive(Debug, Clone)]
pub struct NotifyClient {
    client: Client,
    endpoint: Url,
}

impl NotifyClient {
    /// `base_url` is the endpoint's origin, optionally with a path prefix.
    pub fn new(base_url: &Url) -> Result<Self> {
        let endpoint = join_under(base_url, "api/notify")?;
        let client = Client::builder()
            .user_agent("zephyr")
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn send(&self, request: &NotificationRequest) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NotifyError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Joins `relative` below `base`, keeping any path prefix `base` carries.
pub(crate) fn join_under(base: &Url, relative: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(relative.trim_start_matches('/'))?)
}

impl NotificationSender for NotifyClient {
    fn send_notification(
        &self,
        request: &NotificationRequest,
    ) -> std::result::Result<(), SendError> {
        self.send(request)?;
        Ok(())
    }
}

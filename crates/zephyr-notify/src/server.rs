use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info};
use zephyr_core::NotificationRequest;

use crate::error::Result;
use crate::provider::{parse_recipient, EmailProvider};
use crate::template::welcome_email;

pub const NOTIFY_PATH: &str = "/api/notify";
pub const FAILURE_MESSAGE: &str = "Failed to send email notification";

/// Shared by every request. The provider (and its credential) is built once
/// at startup.
#[derive(Clone)]
pub struct NotifyState {
    provider: Arc<dyn EmailProvider>,
}

impl NotifyState {
    pub fn new(provider: impl EmailProvider) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    pub fn from_shared(provider: Arc<dyn EmailProvider>) -> Self {
        Self { provider }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotifySuccess {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotifyFailure {
    pub error: String,
}

pub fn router(state: NotifyState) -> Router {
    Router::new()
        .route(NOTIFY_PATH, post(notify))
        .with_state(state)
}

async fn notify(State(state): State<NotifyState>, body: Bytes) -> Response {
    match send_welcome(&state, &body).await {
        Ok(()) => (StatusCode::OK, Json(NotifySuccess { success: true })).into_response(),
        Err(err) => {
            error!(error = %err, "email notification error");
            let failure = NotifyFailure {
                error: FAILURE_MESSAGE.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(failure)).into_response()
        }
    }
}

async fn send_welcome(state: &NotifyState, body: &[u8]) -> Result<()> {
    let request: NotificationRequest = serde_json::from_slice(body)?;
    parse_recipient(&request.email)?;
    let email = welcome_email(&request)?;
    state.provider.send(&email).await?;
    info!(school = request.school.as_deref().unwrap_or(""), "welcome email sent");
    Ok(())
}

pub async fn serve(addr: SocketAddr, router: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    if let Ok(local) = listener.local_addr() {
        info!(addr = %local, "notify endpoint listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down notify endpoint");
}

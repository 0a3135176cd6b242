use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
    #[error("invalid notification request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
    #[error("invalid recipient address: {0:?}")]
    InvalidRecipient(String),
    #[error("email provider rejected the message: status {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("notify endpoint returned status {status}: {body}")]
    Endpoint { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, NotifyError>;

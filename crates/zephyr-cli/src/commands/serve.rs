use anyhow::{Context as _, Result};
use clap::Args;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use zephyr_config::{AppConfig, EmailBackend};
use zephyr_notify::{router, EmailProvider, NotifyState, SendGridProvider, StdoutProvider};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides notify.bind)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

pub fn serve(config: &AppConfig, args: ServeArgs) -> Result<()> {
    let bind = args.bind.unwrap_or(config.notify.bind);
    let provider: Arc<dyn EmailProvider> = match config.email.backend {
        EmailBackend::Sendgrid => {
            let api_key = config.email.api_key()?;
            let provider = SendGridProvider::new(api_key, &config.email.api_base_url)
                .with_context(|| "build email provider")?;
            Arc::new(provider)
        }
        EmailBackend::Stdout => Arc::new(StdoutProvider),
    };
    info!(backend = ?config.email.backend, "email provider ready");

    let state = NotifyState::from_shared(provider);
    let runtime = tokio::runtime::Runtime::new().with_context(|| "start async runtime")?;
    runtime
        .block_on(zephyr_notify::serve(bind, router(state)))
        .with_context(|| format!("serve notify endpoint on {bind}"))
}

mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, form, serve, submit, Context};
use crate::error::{exit_code_for, report_error};
use zephyr_config as config;
use zephyr_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "zephyr", version, about = "Zephyr coach signup")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the notification endpoint (POST /api/notify)
    Serve(serve::ServeArgs),
    /// Submit a signup without the interactive form
    Submit(submit::SubmitArgs),
    /// Open the interactive signup form
    Form,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let default_level = match (&cli.command, verbose) {
        (_, true) => "debug",
        (Command::Serve(_), false) => "info",
        _ => "warn",
    };
    init_logging(default_level);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Form => form::launch(db_path, config_path, verbose),
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
                    Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
                    Err(err) => debug!(error = %err, "config unavailable"),
                }
            }

            match command {
                Command::Serve(args) => serve::serve(&app_config, args),
                Command::Submit(args) => {
                    let db_path = paths::resolve_db_path(db_path.or(app_config.db_path.clone()))
                        .with_context(|| "resolve database path")?;
                    debug!(path = %db_path.display(), "database path resolved");

                    let store = Store::open(&db_path)
                        .with_context(|| format!("open database {}", db_path.display()))?;
                    store.migrate().with_context(|| "run migrations")?;

                    let ctx = Context {
                        store: &store,
                        json,
                        config: &app_config,
                    };
                    submit::submit(&ctx, args)
                }
                Command::Form | Command::Completions(_) => {
                    unreachable!("command handled before config load")
                }
            }
        }
    }
}

fn init_logging(default_level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

use anyhow::Error;
use std::process::ExitCode;
use thiserror::Error as ThisError;
use zephyr_config::ConfigError;
use zephyr_core::CoreError;
use zephyr_notify::NotifyError;
use zephyr_store::error::{StoreError, StoreErrorKind};

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    SubmissionFailed(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn submission_failed(message: impl Into<String>) -> Error {
    CliError::SubmissionFailed(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::SubmissionFailed(_) => EXIT_FAILURE,
            });
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(notify_err) = cause.downcast_ref::<NotifyError>() {
            return ExitCode::from(notify_exit_code(notify_err));
        }
        if cause.downcast_ref::<CoreError>().is_some() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::InvalidId
        | StoreErrorKind::InvalidDataPath
        | StoreErrorKind::InvalidCollection
        | StoreErrorKind::InvalidDocument => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::Sql
        | StoreErrorKind::Json
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidUrl { .. }
        | ConfigError::InvalidBind(_)
        | ConfigError::InvalidApiKeyEnv
        | ConfigError::MissingApiKey(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn notify_exit_code(err: &NotifyError) -> u8 {
    match err {
        NotifyError::Url(_) | NotifyError::InvalidRecipient(_) | NotifyError::InvalidRequest(_) => {
            EXIT_INVALID_INPUT
        }
        NotifyError::Http(_)
        | NotifyError::Template(_)
        | NotifyError::Provider { .. }
        | NotifyError::Endpoint { .. } => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_exit_three() {
        let err = invalid_input("missing required fields: email");
        assert_eq!(exit_code_for(&err), ExitCode::from(EXIT_INVALID_INPUT));
    }

    #[test]
    fn failed_submission_maps_to_exit_one() {
        let err = submission_failed("There was an error. Please try again.");
        assert_eq!(exit_code_for(&err), ExitCode::from(EXIT_FAILURE));
    }

    #[test]
    fn config_errors_are_classified_through_context() {
        let err = Error::new(ConfigError::MissingApiKey("SENDGRID_API_KEY".into()))
            .context("load config");
        assert_eq!(exit_code_for(&err), ExitCode::from(EXIT_INVALID_INPUT));

        let err = Error::new(ConfigError::MissingHomeDir).context("load config");
        assert_eq!(exit_code_for(&err), ExitCode::from(EXIT_FAILURE));
    }

    #[test]
    fn notify_errors_split_by_cause() {
        let err = Error::new(NotifyError::InvalidRecipient("nope".into()));
        assert_eq!(exit_code_for(&err), ExitCode::from(EXIT_INVALID_INPUT));

        let err = Error::new(NotifyError::Provider {
            status: 503,
            body: "unavailable".into(),
        });
        assert_eq!(exit_code_for(&err), ExitCode::from(EXIT_FAILURE));

        let err = Error::new(NotifyError::Endpoint {
            status: 500,
            body: "{}".into(),
        });
        assert_eq!(exit_code_for(&err), ExitCode::from(EXIT_FAILURE));
    }

    #[test]
    fn core_errors_are_invalid_input() {
        let err = Error::new(CoreError::InvalidDivision("7A".into()));
        assert_eq!(exit_code_for(&err), ExitCode::from(EXIT_INVALID_INPUT));
    }
}

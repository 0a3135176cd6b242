use crate::commands::{print_json, Context};
use crate::error::{invalid_input, submission_failed};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use url::Url;
use zephyr_core::{FormState, SignupField, SubmitOutcome, Submitter, UilDivision};
use zephyr_notify::NotifyClient;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub school: Option<String>,
    /// N/A, 1A, 2A, 3A, 4A, 5A or 6A
    #[arg(long)]
    pub division: Option<String>,
    /// Notify endpoint base URL (overrides notify.endpoint_url)
    #[arg(long)]
    pub endpoint_url: Option<Url>,
}

#[derive(Debug, Serialize)]
struct SubmitOutput {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<&'static str>,
    message: &'static str,
}

pub fn submit(ctx: &Context<'_>, args: SubmitArgs) -> Result<()> {
    let mut form = fill_form(&args)?;
    let endpoint = args
        .endpoint_url
        .as_ref()
        .unwrap_or(&ctx.config.notify.endpoint_url);
    let client = NotifyClient::new(endpoint)?;
    let submitter = Submitter::new(ctx.store, client);

    let outcome = submitter.submit(&mut form, Utc::now());
    let output = describe(&outcome);

    if ctx.json {
        print_json(&output)?;
    }

    match outcome {
        SubmitOutcome::Submitted { .. } => {
            if !ctx.json {
                println!("{}", output.message);
            }
            Ok(())
        }
        SubmitOutcome::Blocked { missing } => {
            let names: Vec<&str> = missing.iter().map(|field| field.wire_name()).collect();
            Err(invalid_input(format!(
                "missing required fields: {}",
                names.join(", ")
            )))
        }
        SubmitOutcome::Failed(_) => Err(submission_failed(output.message)),
    }
}

fn fill_form(args: &SubmitArgs) -> Result<FormState> {
    let mut form = FormState::new();
    let inputs = [
        (SignupField::FirstName, &args.first_name),
        (SignupField::LastName, &args.last_name),
        (SignupField::PhoneNumber, &args.phone),
        (SignupField::Email, &args.email),
        (SignupField::School, &args.school),
    ];
    for (field, value) in inputs {
        if let Some(value) = value {
            form.update_field(field, value);
        }
    }
    if let Some(raw) = &args.division {
        form.update_division(raw.parse::<UilDivision>()?);
    }
    Ok(form)
}

fn describe(outcome: &SubmitOutcome) -> SubmitOutput {
    let (status, id, missing) = match outcome {
        SubmitOutcome::Submitted { id } => ("submitted", Some(id.to_string()), Vec::new()),
        SubmitOutcome::Blocked { missing } => (
            "blocked",
            None,
            missing.iter().map(|field| field.wire_name()).collect(),
        ),
        SubmitOutcome::Failed(_) => ("failed", None, Vec::new()),
    };
    SubmitOutput {
        status,
        id,
        missing,
        message: outcome.user_message(),
    }
}

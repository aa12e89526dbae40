use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use genie::api_client::HttpJobBoardClient;
use genie::config::Config;
use genie::forms::{CandidateSignupFlow, RecruiterSignupFlow};
use genie::models::{JobId, JobPosting, SessionIdentity};
use genie::options;
use genie::session::{AuthGate, HistoryNavigator, InMemoryAuthStore, Navigator};
use genie::submission::application::JobApplicationModal;
use genie::submission::signup::{SignupFlow, SignupForm};
use genie::submission::{FormSnapshot, SubmitOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "genie",
    about = "Sign up and apply for jobs against a job-board backend",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a candidate account
    SignupCandidate(CandidateArgs),
    /// Register a recruiter account
    SignupRecruiter(RecruiterArgs),
    /// Apply to a job posting as a signed-in candidate
    Apply(ApplyArgs),
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
}

#[derive(Args, Debug)]
struct CandidateArgs {
    #[command(flatten)]
    credentials: CredentialArgs,
    /// Repeat for each skill; unknown skills are created
    #[arg(long = "skill")]
    skills: Vec<String>,
}

#[derive(Args, Debug)]
struct RecruiterArgs {
    #[command(flatten)]
    credentials: CredentialArgs,
    #[arg(long)]
    company: String,
    #[arg(long)]
    location: String,
    #[arg(long)]
    position: String,
}

#[derive(Args, Debug)]
struct ApplyArgs {
    #[arg(long)]
    job_id: String,
    /// Signed-in candidate's name
    #[arg(long)]
    name: String,
    /// Signed-in candidate's email
    #[arg(long)]
    email: String,
    #[arg(long = "skill")]
    skills: Vec<String>,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    resume_link: String,
    #[arg(long)]
    qualification: Option<String>,
}

#[derive(Serialize)]
struct Report<T> {
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    button: Option<&'static str>,
    location: Option<String>,
    snapshot: FormSnapshot<T>,
}

pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    let api = HttpJobBoardClient::new(config.api_base_url.clone(), config.request_timeout)
        .context("Failed to build HTTP client")?;
    info!("Job board backend: {}", api.base_url());

    match cli.command {
        Command::SignupCandidate(args) => {
            let nav = Arc::new(HistoryNavigator::new());
            let gate = gate(config, Arc::new(InMemoryAuthStore::new()), nav.clone());
            let form = SignupForm::new(CandidateSignupFlow, gate);
            let creds = args.credentials;
            form.edit(|f| {
                f.name = creds.name;
                f.email = creds.email;
                f.password = creds.password;
                f.confirm_password = creds.confirm_password;
                f.skills = args.skills.iter().map(|s| options::skill(s)).collect();
            })?;
            finish_signup(&form, &api, &nav).await
        }
        Command::SignupRecruiter(args) => {
            let nav = Arc::new(HistoryNavigator::new());
            let gate = gate(config, Arc::new(InMemoryAuthStore::new()), nav.clone());
            let form = SignupForm::new(RecruiterSignupFlow, gate);
            let creds = args.credentials;
            form.edit(|f| {
                f.name = creds.name;
                f.email = creds.email;
                f.password = creds.password;
                f.confirm_password = creds.confirm_password;
                f.company = args.company;
                f.location = args.location;
                f.position = args.position;
            })?;
            finish_signup(&form, &api, &nav).await
        }
        Command::Apply(args) => {
            let identity = SessionIdentity::new(args.name, args.email, args.skills);
            let job = JobPosting {
                id: JobId(args.job_id),
                position: String::new(),
                company: String::new(),
                location: String::new(),
                experience: None,
                skills: Vec::new(),
                description: String::new(),
            };
            let modal = JobApplicationModal::new(job, identity);
            modal.open(&api).await;
            modal.edit(|f| {
                f.phone = args.phone;
                f.resume_link = args.resume_link;
                f.qualification = args.qualification.as_deref().and_then(options::qualification);
            })?;

            let outcome = modal.submit(&api).await;
            report(
                &outcome,
                Report {
                    outcome: outcome.label(),
                    button: Some(modal.button_label()),
                    location: None,
                    snapshot: modal.controller().snapshot(),
                },
            )
        }
    }
}

fn gate(
    config: &Config,
    store: Arc<InMemoryAuthStore>,
    nav: Arc<HistoryNavigator>,
) -> AuthGate {
    let nav: Arc<dyn Navigator> = nav;
    AuthGate::new(store, nav, config.landing_path.clone())
}

async fn finish_signup<F>(
    form: &SignupForm<F>,
    api: &HttpJobBoardClient,
    nav: &HistoryNavigator,
) -> Result<()>
where
    F: SignupFlow,
    F::Form: Serialize,
{
    let outcome = form.submit(api).await;
    if let SubmitOutcome::Succeeded(identity) = &outcome {
        info!(
            "Registered {} as {:?}",
            identity.email,
            F::ROLE
        );
    }
    report(
        &outcome,
        Report {
            outcome: outcome.label(),
            button: None,
            location: nav.current(),
            snapshot: form.controller().snapshot(),
        },
    )
}

fn report<R, T: Serialize>(outcome: &SubmitOutcome<R>, report: Report<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&report)?);
    if !outcome.is_success() {
        bail!("submission did not succeed: {}", outcome.label());
    }
    Ok(())
}

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use fhir::terminology::AdministrativeSex;
use intake_client::{ClientConfig, IntakeClient};
use intake_core::{
    AdvanceOutcome, DuplicateGate, GateOutcome, IntakeConfig, RegistrationDraft,
    RegistrationWizard, Resolution, ResolutionOutcome, ReviewState, SessionContext, SubmitOutcome,
    WizardStep,
};
use intake_types::NonEmptyText;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Patient registration intake CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a draft template JSON to fill in
    NewDraft {
        /// Where to write the template
        path: PathBuf,
    },
    /// Run a one-shot duplicate check against the matcher
    Check {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Date of birth (YYYY-MM-DD)
        birth_date: String,
        /// Sex (female|male|other|unknown), forwarded when given
        #[arg(long)]
        sex: Option<String>,
    },
    /// Register a patient from a draft file
    Register {
        /// Draft JSON file (see new-draft)
        draft: PathBuf,
        /// Acknowledge shown candidates as non-matches and continue
        #[arg(long)]
        dismiss: bool,
        /// Force-create even if duplicates are reported
        #[arg(long)]
        bypass: bool,
        /// Abandon the draft and open this existing patient instead
        #[arg(long)]
        select: Option<String>,
    },
}

/// Settings read once from the environment.
struct Env {
    base_url: String,
    token: NonEmptyText,
    check_timeout: Option<Duration>,
    recheck_on_edit: bool,
    idle_timeout: Option<Duration>,
}

impl Env {
    fn load() -> anyhow::Result<Self> {
        let base_url = std::env::var("INTAKE_API_URL").context("INTAKE_API_URL is not set")?;
        let token = std::env::var("INTAKE_API_TOKEN").context("INTAKE_API_TOKEN is not set")?;
        let token = NonEmptyText::new(&token).context("INTAKE_API_TOKEN is empty")?;

        // 0 disables the bound; the default keeps a slow matcher from hanging
        // the wizard indefinitely.
        let check_timeout = match std::env::var("INTAKE_CHECK_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .parse()
                    .context("INTAKE_CHECK_TIMEOUT_SECS must be an integer")?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            Err(_) => Some(Duration::from_secs(10)),
        };

        let recheck_on_edit = std::env::var("INTAKE_RECHECK_ON_EDIT")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let idle_timeout = std::env::var("INTAKE_IDLE_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            base_url,
            token,
            check_timeout,
            recheck_on_edit,
            idle_timeout,
        })
    }

    fn session(&self) -> SessionContext {
        match self.idle_timeout {
            Some(timeout) => SessionContext::with_idle_timeout(self.token.clone(), timeout),
            None => SessionContext::new(self.token.clone()),
        }
    }

    fn client(&self) -> anyhow::Result<Arc<IntakeClient>> {
        let client = IntakeClient::new(ClientConfig::new(&self.base_url), self.session())
            .context("failed to build HTTP client")?;
        Ok(Arc::new(client))
    }

    fn intake_config(&self) -> IntakeConfig {
        let mut config = IntakeConfig::new()
            .with_recheck_on_demographics_change(self.recheck_on_edit);
        if let Some(timeout) = self.check_timeout {
            config = config.with_check_timeout(timeout);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::NewDraft { path } => new_draft(&path),
        Commands::Check {
            first_name,
            last_name,
            birth_date,
            sex,
        } => check(first_name, last_name, birth_date, sex).await,
        Commands::Register {
            draft,
            dismiss,
            bypass,
            select,
        } => register(&draft, dismiss, bypass, select).await,
    }
}

fn new_draft(path: &PathBuf) -> anyhow::Result<()> {
    let template = serde_json::to_string_pretty(&RegistrationDraft::default())
        .context("failed to render draft template")?;
    std::fs::write(path, template + "\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Draft template written to {}", path.display());
    println!("Fill it in and run: intake register {}", path.display());
    Ok(())
}

async fn check(
    first_name: String,
    last_name: String,
    birth_date: String,
    sex: Option<String>,
) -> anyhow::Result<()> {
    let env = Env::load()?;
    let sex = match sex {
        Some(raw) => match AdministrativeSex::from_wire(&raw) {
            Some(sex) => Some(sex),
            None => bail!("unknown sex value '{raw}' (female|male|other|unknown)"),
        },
        None => None,
    };

    let gate = DuplicateGate::new(env.client()?, env.check_timeout);
    let demographics = intake_core::draft::Demographics {
        first_name,
        last_name,
        birth_date,
        sex,
        ..intake_core::draft::Demographics::default()
    };

    match gate.check(&demographics).await {
        GateOutcome::Clear => println!("No similar patients found."),
        GateOutcome::NeedsReview(candidates) => {
            println!("{} similar patient(s) found:", candidates.len());
            for candidate in &candidates {
                println!("  {} {}", candidate.patient_id, candidate.summary());
            }
        }
    }
    Ok(())
}

fn print_candidates(review: &ReviewState) {
    println!("Similar patients on record:");
    for candidate in review.candidates() {
        println!("  {} {}", candidate.patient_id, candidate.summary());
    }
}

async fn register(
    draft_path: &PathBuf,
    dismiss: bool,
    bypass: bool,
    select: Option<String>,
) -> anyhow::Result<()> {
    let env = Env::load()?;
    let raw = std::fs::read_to_string(draft_path)
        .with_context(|| format!("failed to read {}", draft_path.display()))?;
    let draft: RegistrationDraft =
        serde_json::from_str(&raw).context("draft file is not valid draft JSON")?;

    let client = env.client()?;
    let config = env.intake_config();
    let gate = DuplicateGate::new(client.clone(), config.check_timeout());
    let mut wizard = RegistrationWizard::with_draft(draft, config);

    // Walk the wizard forward; a pending review stops the walk until the
    // flags supply a decision.
    while wizard.step() != WizardStep::ConsentReview {
        match wizard.advance(&gate).await {
            Ok(AdvanceOutcome::Advanced(step)) => {
                println!("Advanced to step {} ({}).", step.number(), step.title());
            }
            Ok(AdvanceOutcome::ReviewRequired) => {
                if let Some(review) = wizard.review() {
                    print_candidates(review);
                }

                if let Some(patient_id) = select.clone() {
                    let outcome =
                        wizard.resolve_review(Resolution::SelectExisting { patient_id })?;
                    if let ResolutionOutcome::OpenExisting { patient_id } = outcome {
                        println!("Draft discarded. Open existing patient: {patient_id}");
                    }
                    return Ok(());
                }
                if dismiss || bypass {
                    wizard.resolve_review(Resolution::Dismiss)?;
                    println!("Candidates dismissed; continuing.");
                    continue;
                }
                println!();
                println!("Not registered. Review the candidates, then re-run with one of:");
                println!("  --select <patient-id>   open the existing patient");
                println!("  --dismiss               these are not matches, continue");
                println!("  --bypass                continue and force-create at the end");
                return Ok(());
            }
            Err(intake_core::IntakeError::StepInvalid { errors }) => {
                eprintln!("Step {} has invalid fields:", wizard.step().number());
                for error in errors {
                    eprintln!("  {error}");
                }
                bail!("fix the draft file and re-run");
            }
            Err(err) => return Err(err.into()),
        }
    }

    let errors = wizard.validate_current_step();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("  {error}");
        }
        bail!("consent & review step is incomplete");
    }

    let use_bypass = bypass && wizard.bypass_available();
    if bypass && !use_bypass {
        println!("No candidates were shown for this draft; submitting normally.");
    }

    match wizard.submit(client.as_ref(), use_bypass).await {
        Ok(SubmitOutcome::Created(created)) => {
            match created.mrn {
                Some(mrn) => println!("Patient created: {} ({mrn})", created.patient_id),
                None => println!("Patient created: {}", created.patient_id),
            }
            Ok(())
        }
        Ok(SubmitOutcome::Conflict) => {
            println!("The server found matching patients:");
            if let Some(review) = wizard.review() {
                print_candidates(review);
            }

            if let Some(patient_id) = select {
                let outcome =
                    wizard.resolve_review(Resolution::SelectExisting { patient_id })?;
                if let ResolutionOutcome::OpenExisting { patient_id } = outcome {
                    println!("Draft discarded. Open existing patient: {patient_id}");
                }
                return Ok(());
            }
            if bypass {
                wizard.resolve_review(Resolution::Bypass)?;
                match wizard.submit(client.as_ref(), true).await? {
                    SubmitOutcome::Created(created) => {
                        println!("Patient created (duplicate check bypassed): {}", created.patient_id);
                        return Ok(());
                    }
                    SubmitOutcome::Conflict => bail!("server rejected the bypass submission"),
                }
            }
            println!();
            println!("Not registered. Re-run with --select <patient-id> or --bypass.");
            Ok(())
        }
        Err(err) => {
            eprintln!("Registration failed: {err}");
            eprintln!("The draft file is untouched; re-run to retry.");
            Err(err.into())
        }
    }
}

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::error;

use crate::analysis_client::AnalysisClient;
use crate::form::FormDraft;
use crate::render::{render_field_errors, render_result};
use crate::session::{self as workflow, Phase, Session};

/// Validates the draft, runs the submission workflow and prints the outcome.
pub async fn run(base_url: &str, draft_path: &Path, as_json: bool) -> Result<()> {
    let draft = FormDraft::load(draft_path)?;
    let client = AnalysisClient::new(base_url);
    let mut session = Session::new();

    workflow::submit(&mut session, &client, &draft).await;

    match session.phase() {
        Phase::DisplayingResult(result) => {
            if as_json {
                let json = serde_json::to_string_pretty(result)
                    .context("Failed to serialize analysis result")?;
                println!("{json}");
            } else {
                print!("{}", render_result(result));
            }
            Ok(())
        }
        Phase::Failed(message) => {
            error!("Analysis failed: {message}");
            bail!("{message}")
        }
        Phase::Idle if !session.field_errors().is_empty() => {
            print!("{}", render_field_errors(session.field_errors()));
            bail!("{} field(s) need attention", session.field_errors().len())
        }
        phase => bail!("Submission ended unexpectedly while {}", phase.name()),
    }
}

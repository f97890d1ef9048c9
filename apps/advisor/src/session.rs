use tracing::{info, warn};

use crate::analysis_client::AnalysisClient;
use crate::form::{validate, FieldErrors, FormDraft};
use crate::models::AnalysisResult;

/// Where the submission currently stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InFlight,
    DisplayingResult(AnalysisResult),
    Failed(String),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::InFlight => "in-flight",
            Phase::DisplayingResult(_) => "displaying-result",
            Phase::Failed(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Submit,
    Succeed(AnalysisResult),
    Fail(String),
    Reset,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Submit => "submit",
            Action::Succeed(_) => "succeed",
            Action::Fail(_) => "fail",
            Action::Reset => "reset",
        }
    }
}

/// Pure transition function. Actions that make no sense in the current
/// phase leave it unchanged.
pub fn reduce(phase: Phase, action: Action) -> Phase {
    match (phase, action) {
        (Phase::Idle, Action::Submit) => Phase::InFlight,
        (Phase::InFlight, Action::Succeed(result)) => Phase::DisplayingResult(result),
        (Phase::InFlight, Action::Fail(message)) => Phase::Failed(message),
        (Phase::DisplayingResult(_) | Phase::Failed(_), Action::Reset) => Phase::Idle,
        (phase, action) => {
            warn!("Ignoring '{}' while {}", action.name(), phase.name());
            phase
        }
    }
}

/// UI state owned by the caller: the workflow phase plus the last set of
/// field-level validation messages.
#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    field_errors: FieldErrors,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::InFlight)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::DisplayingResult(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let phase = std::mem::take(&mut self.phase);
        self.phase = reduce(phase, action);
    }

    /// Discards any held result or error and re-enables submission.
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }
}

/// Validates the draft and, if it passes, runs the submission workflow.
///
/// Validation failures are stored on the session and no request is made.
/// Submitting while a previous submission is in flight or still displayed
/// is ignored; call [`Session::reset`] first.
pub async fn submit(session: &mut Session, client: &AnalysisClient, draft: &FormDraft) {
    if !matches!(session.phase, Phase::Idle) {
        warn!("Submission ignored while {}", session.phase.name());
        return;
    }

    let form = match validate(draft) {
        Ok(form) => form,
        Err(errors) => {
            info!("Form has {} invalid field(s); not submitting", errors.len());
            session.field_errors = errors;
            return;
        }
    };
    session.field_errors = FieldErrors::default();

    session.dispatch(Action::Submit);
    let outcome = client.submit(&form.profile, &form.potential).await;
    match outcome {
        Ok(result) => {
            info!("Analysis received");
            session.dispatch(Action::Succeed(result));
        }
        Err(e) => session.dispatch(Action::Fail(e.to_string())),
    }
}

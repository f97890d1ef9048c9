use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{AnalysisResult, PersonalProfile, PotentialAnalysis};

/// Inputs received so far. Each POST replaces the previous record.
#[derive(Debug, Default)]
pub struct Submissions {
    pub potential: Option<PotentialAnalysis>,
    pub personality: Option<PersonalProfile>,
}

/// Shared state injected into the stub's route handlers via Axum extractors.
#[derive(Clone, Default)]
pub struct AppState {
    pub submissions: Arc<RwLock<Submissions>>,
    /// Served verbatim by the advice endpoint when set; otherwise a
    /// placeholder is built from the stored submissions.
    pub fixture: Option<Arc<AnalysisResult>>,
}

impl AppState {
    pub fn with_fixture(fixture: Option<AnalysisResult>) -> Self {
        Self {
            submissions: Arc::default(),
            fixture: fixture.map(Arc::new),
        }
    }
}

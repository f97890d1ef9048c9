use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::{AnalysisResult, PersonalProfile, PotentialAnalysis};
use crate::state::AppState;
use crate::stub::placeholder_result;

/// POST /input/potential
pub async fn handle_potential(
    State(state): State<AppState>,
    payload: Result<Json<PotentialAnalysis>, JsonRejection>,
) -> Result<(StatusCode, Json<PotentialAnalysis>), AppError> {
    let Json(potential) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    info!("Stored potential analysis for major '{}'", potential.major);
    state.submissions.write().await.potential = Some(potential.clone());
    Ok((StatusCode::CREATED, Json(potential)))
}

/// POST /input/personality
pub async fn handle_personality(
    State(state): State<AppState>,
    payload: Result<Json<PersonalProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<PersonalProfile>), AppError> {
    let Json(profile) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    info!("Stored personal profile ({} hobbies)", profile.hobbies.len());
    state.submissions.write().await.personality = Some(profile.clone());
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /AnalyzedData/Advices
pub async fn handle_advices(
    State(state): State<AppState>,
) -> Result<Json<AnalysisResult>, AppError> {
    let submissions = state.submissions.read().await;
    let (Some(potential), Some(profile)) = (&submissions.potential, &submissions.personality)
    else {
        return Err(AppError::NoResult);
    };

    let result = match &state.fixture {
        Some(fixture) => fixture.as_ref().clone(),
        None => placeholder_result(potential, profile),
    };
    Ok(Json(result))
}

//! Development stand-in for the analysis service.
//!
//! Speaks the same HTTP contract as the real service so the client can be
//! exercised locally. It stores the submitted records and answers the advice
//! endpoint with a fixture or a placeholder echo; it performs no analysis.

pub mod handlers;

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis_client::parse_analysis_result;
use crate::models::{AnalysisResult, PersonalProfile, PotentialAnalysis, SourceAdvice};
use crate::routes::build_router;
use crate::state::AppState;

/// Loads a canned advice body, checked with the same rules the client applies.
pub fn load_fixture(path: &Path) -> Result<AnalysisResult> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture '{}'", path.display()))?;
    parse_analysis_result(&raw)
        .with_context(|| format!("Fixture '{}' is not a usable analysis result", path.display()))
}

/// Builds the advice body served when no fixture is configured.
pub fn placeholder_result(
    potential: &PotentialAnalysis,
    profile: &PersonalProfile,
) -> AnalysisResult {
    let personality_result = format!(
        "[stub] {} learner who enjoys {} and describes themselves as {}. Brand: {}.",
        profile.study_style.label(),
        join_or_none(&profile.hobbies),
        join_or_none(&profile.personality),
        profile.unique_brand
    );
    let potential_result = format!(
        "[stub] Year {} {} student, GPA {:.2}, strengths: {}; {} achievement(s), {} language(s), mentor: {}.",
        potential.year,
        potential.major,
        potential.gpa,
        join_or_none(&potential.strengths),
        potential.achievements.len(),
        potential.language.len(),
        if potential.mentor { "yes" } else { "no" }
    );

    let topics = join_or_none(&profile.exciting_topics);
    AnalysisResult {
        personality_result,
        potential_result,
        source_advice: Some(SourceAdvice {
            advice: format!("Placeholder advice. Topics of interest: {topics}."),
            article: "No articles: the development stub does not search.".to_string(),
            books: "No books: the development stub does not search.".to_string(),
            newspaper: "No news: the development stub does not search.".to_string(),
            certification_course: "No courses: the development stub does not search.".to_string(),
        }),
        rubric: None,
        web: Default::default(),
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Development analysis service listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

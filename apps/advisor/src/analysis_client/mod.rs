//! Analysis client: the only code that talks to the analysis service.
//!
//! A submission is three calls in a fixed order: the potential-analysis
//! record, the personal profile, then the computed advice. Any failure stops
//! the sequence; nothing is retried.
use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{AnalysisResult, PersonalProfile, PotentialAnalysis, Rubric, SourceAdvice};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const POTENTIAL_PATH: &str = "/input/potential";
pub const PERSONALITY_PATH: &str = "/input/personality";
pub const ADVICES_PATH: &str = "/AnalyzedData/Advices";

/// The three calls of a submission, in the order they are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Potential,
    Personality,
    Advices,
}

impl Step {
    pub fn path(&self) -> &'static str {
        match self {
            Step::Potential => POTENTIAL_PATH,
            Step::Personality => PERSONALITY_PATH,
            Step::Advices => ADVICES_PATH,
        }
    }

    /// Message used when the service rejects a call with a JSON body that
    /// carries no `error` field.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Step::Potential => "Failed to submit potential analysis data",
            Step::Personality => "Failed to submit personal profile",
            Step::Advices => "Failed to fetch analysis results",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Potential => "potential",
            Step::Personality => "personality",
            Step::Advices => "advices",
        })
    }
}

/// Why a submission stopped. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Rejected {
        step: Step,
        status: u16,
        message: String,
    },

    #[error("Unable to reach the analysis server at {base_url}. Check that the backend is running.")]
    Unreachable {
        step: Step,
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid JSON response from server")]
    Malformed(#[source] serde_json::Error),

    #[error("Invalid response format: missing required fields")]
    Incomplete,
}

impl ClientError {
    pub fn step(&self) -> Step {
        match self {
            ClientError::Rejected { step, .. } | ClientError::Unreachable { step, .. } => *step,
            ClientError::Malformed(_) | ClientError::Incomplete => Step::Advices,
        }
    }
}

/// Parses and shape-checks an advice body.
///
/// Only a body that is not JSON at all is `Malformed`. Both narratives must
/// be non-empty strings, otherwise the result is `Incomplete`. The advice,
/// rubric and resource blocks are optional: an unreadable block is logged
/// and dropped, and a missing or null `web` becomes an empty map.
pub fn parse_analysis_result(body: &str) -> Result<AnalysisResult, ClientError> {
    let value: Value = serde_json::from_str(body).map_err(ClientError::Malformed)?;

    let narrative = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    };
    let (Some(personality_result), Some(potential_result)) =
        (narrative("personalityResult"), narrative("potentialResult"))
    else {
        return Err(ClientError::Incomplete);
    };

    Ok(AnalysisResult {
        personality_result,
        potential_result,
        source_advice: section::<SourceAdvice>(&value, "source_advice"),
        rubric: section::<Rubric>(&value, "rubricResult"),
        web: section::<BTreeMap<String, String>>(&value, "web").unwrap_or_default(),
    })
}

fn section<T: DeserializeOwned>(body: &Value, key: &str) -> Option<T> {
    let value = body.get(key).filter(|v| !v.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(section) => Some(section),
        Err(e) => {
            warn!("Ignoring unreadable '{key}' in analysis result: {e}");
            None
        }
    }
}

/// Picks the user-facing message for a rejected call.
fn rejection_message(step: Step, status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            let error = value.get("error");
            error
                .and_then(Value::as_str)
                .or_else(|| error.and_then(|e| e.get("message")).and_then(Value::as_str))
                .filter(|message| !message.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| step.fallback_message().to_string())
        }
        Err(_) => format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status")
        ),
    }
}

#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, step: Step) -> String {
        format!("{}{}", self.base_url, step.path())
    }

    /// Runs the whole submission: potential, personality, then advices.
    pub async fn submit(
        &self,
        profile: &PersonalProfile,
        potential: &PotentialAnalysis,
    ) -> Result<AnalysisResult, ClientError> {
        info!(
            "Submitting potential analysis (major: {}, year: {})",
            potential.major, potential.year
        );
        self.post(Step::Potential, potential).await?;

        info!("Submitting personal profile ({} hobbies)", profile.hobbies.len());
        self.post(Step::Personality, profile).await?;

        info!("Fetching analysis results");
        self.fetch_advices().await
    }

    async fn post<T: Serialize>(&self, step: Step, body: &T) -> Result<(), ClientError> {
        let request = self.client.post(self.url(step)).json(body);
        let response = self.send(step, request).await?;
        debug!("{step} accepted with status {}", response.status());
        Ok(())
    }

    pub async fn fetch_advices(&self) -> Result<AnalysisResult, ClientError> {
        let step = Step::Advices;
        let request = self
            .client
            .get(self.url(step))
            .header(CONTENT_TYPE, "application/json");
        let response = self.send(step, request).await?;

        let body = response
            .text()
            .await
            .map_err(|source| self.unreachable(step, source))?;

        let result = parse_analysis_result(&body).map_err(|e| {
            warn!("Advice response rejected: {e}; body: {body}");
            e
        })?;
        debug!("Received analysis with {} resources", result.web.len());
        Ok(result)
    }

    /// Sends one request and turns non-2xx responses into `Rejected`.
    async fn send(&self, step: Step, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|source| self.unreachable(step, source))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("Could not read {step} error body: {e}");
                String::new()
            }
        };
        let message = rejection_message(step, status, &body);
        warn!("{step} call returned {status}: {message}");
        Err(ClientError::Rejected {
            step,
            status: status.as_u16(),
            message,
        })
    }

    fn unreachable(&self, step: Step, source: reqwest::Error) -> ClientError {
        warn!("{step} call failed at connection level: {source}");
        ClientError::Unreachable {
            step,
            base_url: self.base_url.clone(),
            source,
        }
    }
}

pub mod potential;
pub mod profile;
pub mod result;

pub use potential::PotentialAnalysis;
pub use profile::{Goals, PersonalProfile, StudyStyle};
pub use result::{AnalysisResult, Rubric, RubricMetric, SourceAdvice};

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Computed analysis returned by `GET /AnalyzedData/Advices`.
///
/// Only built through `analysis_client::parse_analysis_result`, which
/// guarantees both narratives are non-empty and `web` is never null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "personalityResult")]
    pub personality_result: String,
    #[serde(rename = "potentialResult")]
    pub potential_result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_advice: Option<SourceAdvice>,
    #[serde(rename = "rubricResult", skip_serializing_if = "Option::is_none")]
    pub rubric: Option<Rubric>,
    /// Resource title -> URL.
    pub web: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceAdvice {
    #[serde(deserialize_with = "lenient_text")]
    pub advice: String,
    #[serde(deserialize_with = "lenient_text")]
    pub article: String,
    #[serde(deserialize_with = "lenient_text")]
    pub books: String,
    #[serde(deserialize_with = "lenient_text")]
    pub newspaper: String,
    #[serde(rename = "certificatin_course", deserialize_with = "lenient_text")]
    pub certification_course: String,
}

impl SourceAdvice {
    /// Sections in display order, paired with their tab titles.
    pub fn sections(&self) -> [(&'static str, &str); 5] {
        [
            ("Advice", self.advice.as_str()),
            ("Articles", self.article.as_str()),
            ("Books", self.books.as_str()),
            ("News", self.newspaper.as_str()),
            ("Courses", self.certification_course.as_str()),
        ]
    }
}

/// Rubric sub-scores. Maxima: academic 10, skills 20, proof 25,
/// positioning 20, goals 15, coherence 5, execution 5.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rubric {
    #[serde(deserialize_with = "lenient_score")]
    pub academic: f64,
    #[serde(deserialize_with = "lenient_score")]
    pub skills: f64,
    #[serde(deserialize_with = "lenient_score")]
    pub proof: f64,
    #[serde(deserialize_with = "lenient_score")]
    pub positioning: f64,
    #[serde(deserialize_with = "lenient_score")]
    pub goals: f64,
    #[serde(deserialize_with = "lenient_score")]
    pub coherence: f64,
    #[serde(deserialize_with = "lenient_score")]
    pub execution: f64,
}

// The service may emit null for a missing attribute or a score as text.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(text) => text.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubricMetric {
    pub name: &'static str,
    pub value: f64,
    pub max: f64,
}

impl RubricMetric {
    pub fn percentage(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.value / self.max * 100.0
    }
}

impl Rubric {
    pub fn metrics(&self) -> [RubricMetric; 7] {
        let metric = |name, value, max| RubricMetric { name, value, max };
        [
            metric("Academic", self.academic, 10.0),
            metric("Skills", self.skills, 20.0),
            metric("Proof", self.proof, 25.0),
            metric("Positioning", self.positioning, 20.0),
            metric("Goals", self.goals, 15.0),
            metric("Coherence", self.coherence, 5.0),
            metric("Execution", self.execution, 5.0),
        ]
    }

    pub fn total(&self) -> f64 {
        self.metrics().iter().map(|m| m.value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubric_maxima_sum_to_100() {
        let max: f64 = Rubric::default().metrics().iter().map(|m| m.max).sum();
        assert_eq!(max, 100.0);
    }

    #[test]
    fn test_rubric_percentage() {
        let rubric = Rubric {
            proof: 20.0,
            ..Rubric::default()
        };
        let proof = rubric.metrics()[2];
        assert_eq!(proof.name, "Proof");
        assert!((proof.percentage() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rubric_missing_scores_default_to_zero() {
        let rubric: Rubric = serde_json::from_str(r#"{"academic": 7}"#).unwrap();
        assert_eq!(rubric.academic, 7.0);
        assert_eq!(rubric.execution, 0.0);
        assert_eq!(rubric.total(), 7.0);
    }

    #[test]
    fn test_source_advice_uses_wire_spelling() {
        let advice: SourceAdvice =
            serde_json::from_str(r#"{"advice": "a", "certificatin_course": "c"}"#).unwrap();
        assert_eq!(advice.certification_course, "c");
        assert_eq!(advice.books, "");
        assert_eq!(advice.sections()[4], ("Courses", "c"));
    }

    #[test]
    fn test_null_and_text_values_are_tolerated() {
        let advice: SourceAdvice =
            serde_json::from_str(r#"{"advice": null, "books": 3, "newspaper": "n"}"#).unwrap();
        assert_eq!(advice.advice, "");
        assert_eq!(advice.books, "");
        assert_eq!(advice.newspaper, "n");

        let rubric: Rubric =
            serde_json::from_str(r#"{"academic": " 8.5 ", "skills": null, "goals": "high"}"#).unwrap();
        assert_eq!(rubric.academic, 8.5);
        assert_eq!(rubric.skills, 0.0);
        assert_eq!(rubric.goals, 0.0);
    }
}

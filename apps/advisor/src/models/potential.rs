use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /input/potential`. Field order matches the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialAnalysis {
    pub major: String,
    /// 0.0 to 4.0
    pub gpa: f64,
    /// 1 to 6
    pub year: u8,
    pub strengths: Vec<String>,
    /// Language name -> proficiency level.
    pub language: BTreeMap<String, String>,
    pub achievements: Vec<String>,
    pub mentor: bool,
}

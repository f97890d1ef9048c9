use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the user prefers to learn. Serialized with the wire names the
/// analysis service expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyStyle {
    Visual,
    Auditory,
    Reading,
    #[default]
    HandsOn,
}

impl StudyStyle {
    pub const ALL: [StudyStyle; 4] = [
        StudyStyle::Visual,
        StudyStyle::Auditory,
        StudyStyle::Reading,
        StudyStyle::HandsOn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyStyle::Visual => "visual",
            StudyStyle::Auditory => "auditory",
            StudyStyle::Reading => "reading",
            StudyStyle::HandsOn => "hands-on",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StudyStyle::Visual => "Visual Learner",
            StudyStyle::Auditory => "Auditory Learner",
            StudyStyle::Reading => "Reading/Writing",
            StudyStyle::HandsOn => "Hands-on/Kinesthetic",
        }
    }
}

impl fmt::Display for StudyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        StudyStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown study style '{s}' (expected visual, auditory, reading or hands-on)")
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

/// Body of `POST /input/personality`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalProfile {
    pub hobbies: Vec<String>,
    pub personality: Vec<String>,
    pub unique_brand: String,
    pub study_style: StudyStyle,
    pub exciting_topics: Vec<String>,
    pub goals: Goals,
}

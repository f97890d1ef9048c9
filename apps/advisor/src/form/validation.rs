use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::form::FormDraft;
use crate::models::{Goals, PersonalProfile, PotentialAnalysis};

const GPA_RANGE: std::ops::RangeInclusive<f64> = 0.0..=4.0;
const YEAR_RANGE: std::ops::RangeInclusive<i64> = 1..=6;

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Major,
    Gpa,
    Year,
    UniqueBrand,
    Hobbies,
    Personality,
    ExcitingTopics,
    Strengths,
}

impl FormField {
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Major => "major",
            FormField::Gpa => "gpa",
            FormField::Year => "year",
            FormField::UniqueBrand => "uniqueBrand",
            FormField::Hobbies => "hobbies",
            FormField::Personality => "personality",
            FormField::ExcitingTopics => "excitingTopics",
            FormField::Strengths => "strengths",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for FormField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Every violation found in one pass, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Both submission records, built from a draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub profile: PersonalProfile,
    pub potential: PotentialAnalysis,
}

/// Checks required fields and numeric ranges.
///
/// All violations are collected rather than stopping at the first one.
/// gpa and year are parsed from the raw text; text that does not parse
/// fails the same range check as an out-of-range number.
pub fn validate(draft: &FormDraft) -> Result<ValidatedForm, FieldErrors> {
    let mut errors = FieldErrors::default();

    let major = draft.major.trim();
    if major.is_empty() {
        errors.insert(FormField::Major, "Major is required");
    }

    let gpa = parse_gpa(&draft.gpa);
    if gpa.is_none() {
        errors.insert(FormField::Gpa, "GPA must be between 0 and 4");
    }

    let year = parse_year(&draft.year);
    if year.is_none() {
        errors.insert(FormField::Year, "Year must be between 1 and 6");
    }

    let unique_brand = draft.unique_brand.trim();
    if unique_brand.is_empty() {
        errors.insert(FormField::UniqueBrand, "Unique brand is required");
    }
    if draft.hobbies.is_empty() {
        errors.insert(FormField::Hobbies, "Add at least one hobby");
    }
    if draft.personality.is_empty() {
        errors.insert(FormField::Personality, "Add at least one personality trait");
    }
    if draft.exciting_topics.is_empty() {
        errors.insert(FormField::ExcitingTopics, "Add at least one topic");
    }
    if draft.strengths.is_empty() {
        errors.insert(FormField::Strengths, "Add at least one strength");
    }

    let (Some(gpa), Some(year)) = (gpa, year) else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedForm {
        profile: PersonalProfile {
            hobbies: draft.hobbies.to_vec(),
            personality: draft.personality.to_vec(),
            unique_brand: unique_brand.to_string(),
            study_style: draft.study_style,
            exciting_topics: draft.exciting_topics.to_vec(),
            goals: Goals {
                short_term: draft.short_term_goals.to_vec(),
                long_term: draft.long_term_goals.to_vec(),
            },
        },
        potential: PotentialAnalysis {
            major: major.to_string(),
            gpa,
            year,
            strengths: draft.strengths.to_vec(),
            language: draft.language_map(),
            achievements: draft.achievements.to_vec(),
            mentor: draft.mentor,
        },
    })
}

fn parse_gpa(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|gpa| GPA_RANGE.contains(gpa))
}

fn parse_year(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|year| YEAR_RANGE.contains(year))
        .and_then(|year| u8::try_from(year).ok())
}

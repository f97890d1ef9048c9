pub mod validation;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::StudyStyle;

pub use validation::{validate, FieldErrors, FormField, ValidatedForm};

/// An ordered list of short, distinct strings edited one entry at a time.
///
/// Every entry goes through [`ChipList::add`], including entries read from a
/// hand-edited draft file, so the list never holds blanks or duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ChipList(Vec<String>);

impl From<Vec<String>> for ChipList {
    fn from(items: Vec<String>) -> Self {
        Self::new(items)
    }
}

impl From<ChipList> for Vec<String> {
    fn from(chips: ChipList) -> Self {
        chips.0
    }
}

impl ChipList {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut chips = Self::default();
        for item in items {
            chips.add(item.as_ref());
        }
        chips
    }

    /// Appends the trimmed value. Blank values and duplicates are ignored.
    /// Returns whether the list changed.
    pub fn add(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || self.0.iter().any(|existing| existing == value) {
            return false;
        }
        self.0.push(value.to_string());
        true
    }

    /// Removes the entry at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRow {
    pub language: String,
    pub level: String,
}

impl LanguageRow {
    pub fn new(language: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            level: level.into(),
        }
    }
}

/// Chip-list sections of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ChipField {
    Hobbies,
    Personality,
    ExcitingTopics,
    ShortTermGoals,
    LongTermGoals,
    Strengths,
    Achievements,
}

/// Free-text and scalar sections of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ScalarField {
    UniqueBrand,
    StudyStyle,
    Major,
    Gpa,
    Year,
    Mentor,
}

fn write_value_name(value: &impl ValueEnum, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.to_possible_value() {
        Some(name) => f.write_str(name.get_name()),
        None => Ok(()),
    }
}

impl fmt::Display for ChipField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value_name(self, f)
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value_name(self, f)
    }
}

/// Everything the user has typed so far. gpa and year stay as raw text
/// until validation so that bad input can be reported rather than lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDraft {
    // Personal profile
    pub hobbies: ChipList,
    pub personality: ChipList,
    pub unique_brand: String,
    pub study_style: StudyStyle,
    pub exciting_topics: ChipList,
    pub short_term_goals: ChipList,
    pub long_term_goals: ChipList,

    // Potential analysis
    pub major: String,
    pub gpa: String,
    pub year: String,
    pub strengths: ChipList,
    pub languages: Vec<LanguageRow>,
    pub achievements: ChipList,
    pub mentor: bool,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            hobbies: ChipList::new(["Reading", "Coding"]),
            personality: ChipList::new(["Analytical", "Creative"]),
            unique_brand: "Problem solver with creative thinking".to_string(),
            study_style: StudyStyle::HandsOn,
            exciting_topics: ChipList::new(["AI", "Web Development"]),
            short_term_goals: ChipList::new(["Complete internship", "Build portfolio"]),
            long_term_goals: ChipList::new(["Senior developer role", "Tech lead position"]),
            major: "Computer Science".to_string(),
            gpa: "3.8".to_string(),
            year: "3".to_string(),
            strengths: ChipList::new(["Problem Solving", "Team Collaboration"]),
            languages: vec![
                LanguageRow::new("English", "Native"),
                LanguageRow::new("Spanish", "Intermediate"),
            ],
            achievements: ChipList::new(["Dean's List 2024", "Hackathon Winner"]),
            mentor: true,
        }
    }
}

impl FormDraft {
    pub fn chips(&self, field: ChipField) -> &ChipList {
        match field {
            ChipField::Hobbies => &self.hobbies,
            ChipField::Personality => &self.personality,
            ChipField::ExcitingTopics => &self.exciting_topics,
            ChipField::ShortTermGoals => &self.short_term_goals,
            ChipField::LongTermGoals => &self.long_term_goals,
            ChipField::Strengths => &self.strengths,
            ChipField::Achievements => &self.achievements,
        }
    }

    pub fn chips_mut(&mut self, field: ChipField) -> &mut ChipList {
        match field {
            ChipField::Hobbies => &mut self.hobbies,
            ChipField::Personality => &mut self.personality,
            ChipField::ExcitingTopics => &mut self.exciting_topics,
            ChipField::ShortTermGoals => &mut self.short_term_goals,
            ChipField::LongTermGoals => &mut self.long_term_goals,
            ChipField::Strengths => &mut self.strengths,
            ChipField::Achievements => &mut self.achievements,
        }
    }

    /// Sets a scalar field from user text. gpa and year are stored verbatim;
    /// range checks happen in [`validate`].
    pub fn set(&mut self, field: ScalarField, value: &str) -> Result<()> {
        match field {
            ScalarField::UniqueBrand => self.unique_brand = value.to_string(),
            ScalarField::Major => self.major = value.to_string(),
            ScalarField::Gpa => self.gpa = value.to_string(),
            ScalarField::Year => self.year = value.to_string(),
            ScalarField::StudyStyle => {
                self.study_style = value.parse().map_err(anyhow::Error::msg)?;
            }
            ScalarField::Mentor => {
                self.mentor = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "y" | "1" => true,
                    "false" | "no" | "n" | "0" => false,
                    other => anyhow::bail!("mentor must be true or false, got '{other}'"),
                };
            }
        }
        Ok(())
    }

    pub fn add_language(&mut self, row: LanguageRow) {
        self.languages.push(row);
    }

    /// Replaces the row at `index`. Returns false when out of range.
    pub fn update_language(&mut self, index: usize, row: LanguageRow) -> bool {
        match self.languages.get_mut(index) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    pub fn remove_language(&mut self, index: usize) -> Option<LanguageRow> {
        (index < self.languages.len()).then(|| self.languages.remove(index))
    }

    /// Collapses the language rows into the submitted map. Rows without a
    /// language name are dropped; a later row overrides an earlier one.
    pub fn language_map(&self) -> BTreeMap<String, String> {
        self.languages
            .iter()
            .filter(|row| !row.language.trim().is_empty())
            .map(|row| (row.language.trim().to_string(), row.level.trim().to_string()))
            .collect()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read draft file '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Draft file '{}' is not a valid form draft", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize draft")?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write draft file '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_add_trims_and_dedupes() {
        let mut chips = ChipList::new(["Reading"]);
        assert!(chips.add("  Chess "));
        assert!(!chips.add("Chess"));
        assert!(!chips.add("   "));
        assert_eq!(chips.as_slice(), ["Reading", "Chess"]);
    }

    #[test]
    fn test_chip_remove_out_of_range_is_noop() {
        let mut chips = ChipList::new(["a", "b"]);
        assert_eq!(chips.remove(5), None);
        assert_eq!(chips.remove(0), Some("a".to_string()));
        assert_eq!(chips.as_slice(), ["b"]);
    }

    #[test]
    fn test_default_draft_is_seeded() {
        let draft = FormDraft::default();
        assert_eq!(draft.hobbies.as_slice(), ["Reading", "Coding"]);
        assert_eq!(draft.gpa, "3.8");
        assert_eq!(draft.study_style, StudyStyle::HandsOn);
        assert!(draft.mentor);
        assert_eq!(draft.language_map().len(), 2);
    }

    #[test]
    fn test_language_map_skips_blank_and_last_wins() {
        let mut draft = FormDraft {
            languages: vec![],
            ..FormDraft::default()
        };
        draft.add_language(LanguageRow::new("English", "Intermediate"));
        draft.add_language(LanguageRow::new("  ", "Fluent"));
        draft.add_language(LanguageRow::new("English", "Native"));
        let map = draft.language_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["English"], "Native");
    }

    #[test]
    fn test_update_and_remove_language() {
        let mut draft = FormDraft::default();
        assert!(draft.update_language(1, LanguageRow::new("French", "Basic")));
        assert!(!draft.update_language(9, LanguageRow::new("German", "Basic")));
        assert_eq!(draft.remove_language(0), Some(LanguageRow::new("English", "Native")));
        assert_eq!(draft.languages, vec![LanguageRow::new("French", "Basic")]);
    }

    #[test]
    fn test_set_scalar_fields() {
        let mut draft = FormDraft::default();
        draft.set(ScalarField::Gpa, "4.5").unwrap();
        draft.set(ScalarField::StudyStyle, "visual").unwrap();
        draft.set(ScalarField::Mentor, "no").unwrap();
        assert_eq!(draft.gpa, "4.5");
        assert_eq!(draft.study_style, StudyStyle::Visual);
        assert!(!draft.mentor);
        assert!(draft.set(ScalarField::Mentor, "maybe").is_err());
        assert!(draft.set(ScalarField::StudyStyle, "osmosis").is_err());
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!(
            ChipField::from_str("exciting-topics", false).unwrap(),
            ChipField::ExcitingTopics
        );
        assert_eq!(
            ScalarField::from_str("unique-brand", false).unwrap(),
            ScalarField::UniqueBrand
        );
        assert!(ChipField::from_str("hobby", false).is_err());
        assert_eq!(ChipField::ShortTermGoals.to_string(), "short-term-goals");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        let mut draft = FormDraft::default();
        draft.chips_mut(ChipField::Hobbies).add("Chess");
        draft.save(&path).unwrap();

        let loaded = FormDraft::load(&path).unwrap();
        assert_eq!(loaded, draft);
    }

    #[test]
    fn test_partial_draft_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, r#"{"major": "Mathematics", "hobbies": []}"#).unwrap();

        let loaded = FormDraft::load(&path).unwrap();
        assert_eq!(loaded.major, "Mathematics");
        assert!(loaded.hobbies.is_empty());
        assert_eq!(loaded.year, "3");
    }

    #[test]
    fn test_hand_edited_chips_are_normalised_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(
            &path,
            r#"{"hobbies": ["   ", " Chess ", "Chess"], "strengths": [""]}"#,
        )
        .unwrap();

        let loaded = FormDraft::load(&path).unwrap();
        assert_eq!(loaded.hobbies.as_slice(), ["Chess"]);
        assert!(loaded.strengths.is_empty());
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, "not json").unwrap();
        let err = FormDraft::load(&path).unwrap_err();
        assert!(err.to_string().contains("not a valid form draft"));
    }
}

//! Plain-text views of the form state and the analysis result.

use std::fmt::Write;

use crate::form::{ChipField, FieldErrors, FormDraft};
use crate::models::{AnalysisResult, Rubric, RubricMetric};

const BAR_WIDTH: usize = 20;

pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    section(&mut out, "Personality");
    writeln!(out, "{}\n", result.personality_result.trim()).ok();

    section(&mut out, "Potential");
    writeln!(out, "{}\n", result.potential_result.trim()).ok();

    if let Some(advice) = &result.source_advice {
        section(&mut out, "Source Advice");
        for (title, text) in advice.sections() {
            writeln!(out, "[{title}]").ok();
            let text = text.trim();
            if text.is_empty() {
                writeln!(out, "  (none)").ok();
            } else {
                for line in text.lines() {
                    writeln!(out, "  {line}").ok();
                }
            }
        }
        out.push('\n');
    }

    if let Some(rubric) = &result.rubric {
        section(&mut out, "Rubric");
        out.push_str(&render_rubric(rubric));
        out.push('\n');
    }

    section(&mut out, "Resources");
    if result.web.is_empty() {
        writeln!(out, "No resources provided.").ok();
    } else {
        for (title, url) in &result.web {
            writeln!(out, "- {title} — {url}").ok();
        }
    }

    out
}

pub fn render_rubric(rubric: &Rubric) -> String {
    let metrics = rubric.metrics();
    let name_width = metrics.iter().map(|m| m.name.len()).max().unwrap_or(0);

    let mut out = String::new();
    for metric in &metrics {
        writeln!(
            out,
            "{:<name_width$} {} {}",
            metric.name,
            progress_bar(metric),
            score_label(metric)
        )
        .ok();
    }
    writeln!(out, "{:<name_width$} {}/100", "Total", format_score(rubric.total())).ok();
    out
}

fn progress_bar(metric: &RubricMetric) -> String {
    let ratio = (metric.percentage() / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn score_label(metric: &RubricMetric) -> String {
    format!(
        "{}/{} ({}%)",
        format_score(metric.value),
        format_score(metric.max),
        metric.percentage().round()
    )
}

fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

pub fn render_field_errors(errors: &FieldErrors) -> String {
    let mut out = String::from("Please fill in all required fields correctly:\n");
    for (field, message) in errors.iter() {
        writeln!(out, "  {field}: {message}").ok();
    }
    out
}

pub fn render_draft(draft: &FormDraft) -> String {
    let mut out = String::new();

    section(&mut out, "Personal Profile");
    chips(&mut out, draft, ChipField::Hobbies);
    chips(&mut out, draft, ChipField::Personality);
    writeln!(out, "unique-brand: {}", draft.unique_brand).ok();
    writeln!(
        out,
        "study-style: {} ({})",
        draft.study_style,
        draft.study_style.label()
    )
    .ok();
    chips(&mut out, draft, ChipField::ExcitingTopics);
    chips(&mut out, draft, ChipField::ShortTermGoals);
    chips(&mut out, draft, ChipField::LongTermGoals);

    out.push('\n');
    section(&mut out, "Potential Analysis");
    writeln!(out, "major: {}", draft.major).ok();
    writeln!(out, "gpa: {}", draft.gpa).ok();
    writeln!(out, "year: {}", draft.year).ok();
    chips(&mut out, draft, ChipField::Strengths);
    writeln!(out, "languages:").ok();
    for (i, row) in draft.languages.iter().enumerate() {
        writeln!(out, "  {i}. {} = {}", row.language, row.level).ok();
    }
    chips(&mut out, draft, ChipField::Achievements);
    writeln!(out, "mentor: {}", draft.mentor).ok();
    out
}

fn chips(out: &mut String, draft: &FormDraft, field: ChipField) {
    let list = draft.chips(field);
    writeln!(out, "{field}:").ok();
    for (i, chip) in list.as_slice().iter().enumerate() {
        writeln!(out, "  {i}. {chip}").ok();
    }
}

fn section(out: &mut String, title: &str) {
    writeln!(out, "== {title} ==").ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validate;
    use crate::models::SourceAdvice;
    use std::collections::BTreeMap;

    fn result() -> AnalysisResult {
        AnalysisResult {
            personality_result: "Curious".to_string(),
            potential_result: "Promising".to_string(),
            source_advice: None,
            rubric: None,
            web: BTreeMap::new(),
        }
    }

    #[test]
    fn test_empty_resources_render_placeholder() {
        let text = render_result(&result());
        assert!(text.contains("== Personality ==\nCurious"));
        assert!(text.contains("No resources provided."));
        assert!(!text.contains("== Rubric =="));
    }

    #[test]
    fn test_resources_listed() {
        let mut r = result();
        r.web.insert("Rust Book".to_string(), "https://doc.rust-lang.org/book/".to_string());
        let text = render_result(&r);
        assert!(text.contains("- Rust Book — https://doc.rust-lang.org/book/"));
        assert!(!text.contains("No resources provided."));
    }

    #[test]
    fn test_source_advice_tabs() {
        let mut r = result();
        r.source_advice = Some(SourceAdvice {
            advice: "Build projects".to_string(),
            books: "SICP\nCLRS".to_string(),
            ..SourceAdvice::default()
        });
        let text = render_result(&r);
        assert!(text.contains("[Advice]\n  Build projects"));
        assert!(text.contains("[Books]\n  SICP\n  CLRS"));
        assert!(text.contains("[Courses]\n  (none)"));
    }

    #[test]
    fn test_rubric_bars() {
        let rubric = Rubric {
            academic: 5.0,
            proof: 25.0,
            execution: 7.0,
            ..Rubric::default()
        };
        let text = render_rubric(&rubric);
        assert!(text.contains("Academic    [##########..........] 5/10 (50%)"), "{text}");
        assert!(text.contains("Proof       [####################] 25/25 (100%)"));
        assert!(text.contains("Skills      [....................] 0/20 (0%)"));
        // over-max scores keep their value but the bar stays full
        assert!(text.contains("Execution   [####################] 7/5 (140%)"));
        assert!(text.contains("Total       37/100"));
    }

    #[test]
    fn test_field_errors_listing() {
        let draft = FormDraft {
            major: String::new(),
            gpa: "9".to_string(),
            ..FormDraft::default()
        };
        let errors = validate(&draft).unwrap_err();
        let text = render_field_errors(&errors);
        assert!(text.contains("  major: Major is required\n  gpa: GPA must be between 0 and 4\n"));
    }

    #[test]
    fn test_draft_listing_has_indices() {
        let text = render_draft(&FormDraft::default());
        assert!(text.contains("hobbies:\n  0. Reading\n  1. Coding\n"));
        assert!(text.contains("  1. Spanish = Intermediate"));
        assert!(text.contains("study-style: hands-on (Hands-on/Kinesthetic)"));
    }
}

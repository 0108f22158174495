//! Splitting narrative text into its marked sections.
//!
//! A section starts at a line containing a bracketed heading such as
//! `[RISK EVALUATION]:` and runs until the next heading. Text on the heading
//! line after the colon belongs to the section.

use moodline_core::models::report::{ReportKind, ReportSection, SectionKind};

use crate::error::RemoteUnavailable;

/// Every recognized section, in order of first appearance. Repeated headings
/// are merged into the first occurrence. Text before the first heading is
/// dropped.
pub fn parse_sections(text: &str) -> Vec<ReportSection> {
    let mut sections: Vec<ReportSection> = Vec::new();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((kind, rest)) = heading(line) {
            let index = match sections.iter().position(|s| s.kind == kind) {
                Some(i) => i,
                None => {
                    sections.push(ReportSection {
                        kind,
                        body: String::new(),
                    });
                    sections.len() - 1
                }
            };
            current = Some(index);
            if !rest.is_empty() {
                append_line(&mut sections[index].body, rest);
            }
        } else if let Some(index) = current {
            append_line(&mut sections[index].body, line);
        }
    }

    sections
}

/// Validate a remote reply and return the sections of `kind` in canonical
/// order.
///
/// Blank replies are empty. A reply is malformed unless it has a non-empty
/// executive summary and non-empty bodies for a strict majority of the kind's
/// sections. The remaining sections get their default text.
pub fn parse_reply(kind: ReportKind, text: &str) -> Result<Vec<ReportSection>, RemoteUnavailable> {
    if text.trim().is_empty() {
        return Err(RemoteUnavailable::EmptyResponse);
    }
    let found = parse_sections(text);
    let has_body = |k: SectionKind| found.iter().any(|s| s.kind == k && !s.body.is_empty());

    let expected = kind.sections();
    let present = expected.iter().filter(|&&k| has_body(k)).count();
    if !has_body(SectionKind::ExecutiveSummary) || present * 2 <= expected.len() {
        return Err(RemoteUnavailable::Malformed);
    }
    Ok(complete_sections(kind, found))
}

/// Keep the sections of `kind`, fill in missing or empty ones and order them
/// canonically.
pub fn complete_sections(kind: ReportKind, found: Vec<ReportSection>) -> Vec<ReportSection> {
    kind.sections()
        .iter()
        .map(|&section| {
            let body = found
                .iter()
                .find(|s| s.kind == section && !s.body.is_empty())
                .map(|s| s.body.clone())
                .unwrap_or_else(|| default_body(section).to_string());
            ReportSection {
                kind: section,
                body,
            }
        })
        .collect()
}

/// Render sections back to marked narrative text.
pub fn render_narrative(sections: &[ReportSection]) -> String {
    sections
        .iter()
        .map(|s| {
            if s.body.contains('\n') {
                format!("[{}]:\n{}", s.kind.marker(), s.body)
            } else {
                format!("[{}]: {}", s.kind.marker(), s.body)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn default_body(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::ExecutiveSummary => {
            "The patient requires further evaluation by a mental health professional."
        }
        SectionKind::ClinicalAssessment => "A comprehensive clinical assessment is recommended.",
        SectionKind::RiskEvaluation => "Risk assessment requires professional medical judgement.",
        SectionKind::TreatmentRecommendations => {
            "- Consult a psychiatrist to develop a personalised treatment plan"
        }
        SectionKind::LifestyleRecommendations => {
            "- Maintain a regular sleep schedule and healthy lifestyle habits"
        }
        SectionKind::MonitoringPlan => "Regular follow-up and symptom monitoring are recommended.",
        SectionKind::EmergencyProtocols => {
            "In an emergency, contact a physician immediately or call emergency services."
        }
        SectionKind::ProgressAnalysis => {
            "Treatment progress requires continued monitoring and professional evaluation."
        }
        SectionKind::TrendInterpretation => {
            "Symptom trends should be interpreted together with the clinical presentation."
        }
        SectionKind::PrognosisAssessment => {
            "Prognosis depends on several factors. Regular professional evaluation is recommended."
        }
    }
}

/// Recognize a heading line, returning the section and any trailing text.
fn heading(line: &str) -> Option<(SectionKind, &str)> {
    let open = line.find('[')?;
    let close = open + line[open..].find(']')?;
    let kind = SectionKind::from_marker(&line[open + 1..close])?;
    let rest = line[close + 1..]
        .trim_start_matches(|c: char| matches!(c, ':' | '：' | '*') || c.is_whitespace());
    Some((kind, rest.trim_end()))
}

fn append_line(body: &mut String, line: &str) {
    if !body.is_empty() {
        body.push('\n');
    }
    body.push_str(line);
}

use moodline_core::models::answer::AnswerSet;
use moodline_core::models::history::HistoryRecord;
use moodline_core::models::report::{Report, ReportKind, ReportSection, ReportSource, SectionKind};
use moodline_core::models::score::{Classification, ImpactLevel, ScoredResult};
use moodline_export::error::ExportError;
use moodline_export::{render_default, render_report};
use uuid::Uuid;

fn record(source: ReportSource, model_id: Option<&str>) -> HistoryRecord {
    let scored = ScoredResult {
        questionnaire_id: "mdq".to_string(),
        symptom_count: 8,
        symptom_item_count: 13,
        threshold: 7,
        core_symptom_count: 6,
        impact_level: ImpactLevel::Serious,
        co_occurrence: true,
        classification: Classification::Positive,
        contributing_items: (1..=8).map(|i| format!("q{i}")).collect(),
        risk_percentage: 81.9,
    };
    let report = Report {
        id: Uuid::new_v4(),
        kind: ReportKind::Screening,
        narrative: String::new(),
        sections: vec![
            ReportSection {
                kind: SectionKind::ExecutiveSummary,
                body: "Screening is positive.".to_string(),
            },
            ReportSection {
                kind: SectionKind::TreatmentRecommendations,
                body: "- See a psychiatrist\n- Track sleep".to_string(),
            },
        ],
        source,
        model_id: model_id.map(str::to_string),
        scored: scored.clone(),
        generated_at: "2026-03-01T10:15:00Z".parse().unwrap(),
        processing_ms: 1250,
    };
    HistoryRecord {
        user_id: "alice".to_string(),
        submission_id: Uuid::new_v4(),
        answers: AnswerSet::new(["yes"; 15]),
        scored,
        report,
        created_at: "2026-03-01T10:15:01Z".parse().unwrap(),
    }
}

#[test]
fn default_template_renders_scores_and_sections() {
    let record = record(ReportSource::Remote, Some("anthropic.claude-model"));
    let output = render_default(&record).unwrap();

    assert!(output.starts_with("# Mood Screening Report"));
    assert!(output.contains(&record.submission_id.to_string()));
    assert!(output.contains("**Generated:** 2026-03-01 10:15:00 UTC"));
    assert!(output.contains("remote (anthropic.claude-model)"));
    assert!(output.contains("Symptom score: 8/13 (threshold 7)"));
    assert!(output.contains("Functional impact: serious problems"));
    assert!(output.contains("Classification: positive"));
    assert!(output.contains("## Executive Summary\n\nScreening is positive."));
    assert!(output.contains("## Treatment Recommendations\n\n- See a psychiatrist\n- Track sleep"));
}

#[test]
fn fallback_report_has_no_model() {
    let output = render_default(&record(ReportSource::Fallback, None)).unwrap();
    assert!(output.contains("**Narrative source:** fallback\n"));
}

#[test]
fn custom_template_sees_record_fields() {
    let output = render_report(
        "summary.txt",
        "{{ user_id }}: {{ classification }} ({{ scored.symptom_count }})",
        &record(ReportSource::Fallback, None),
    )
    .unwrap();
    assert_eq!(output, "alice: positive (8)");
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_report(
        "bad.md",
        "{% for x in %}",
        &record(ReportSource::Fallback, None),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}

#[test]
fn unknown_variable_is_a_render_error() {
    let err = render_report(
        "bad.md",
        "{{ missing.field }}",
        &record(ReportSource::Fallback, None),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::TemplateRender(_)));
}

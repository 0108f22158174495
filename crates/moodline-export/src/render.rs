use moodline_core::models::history::HistoryRecord;
use moodline_core::models::score::ScoredResult;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::error::ExportError;

pub const DEFAULT_TEMPLATE_NAME: &str = "report.md";

/// Markdown layout used by `GET /history/{id}/export`.
pub const DEFAULT_TEMPLATE: &str = r#"# Mood Screening Report

**Submission:** {{ submission_id }}
**Report ID:** {{ report_id }}
**Generated:** {{ generated_at }}
**Narrative source:** {{ source }}{% if model_id %} ({{ model_id }}){% endif %}
**Processing time:** {{ processing_ms }} ms

---

## Screening Result

- Symptom score: {{ scored.symptom_count }}/{{ scored.symptom_item_count }} (threshold {{ scored.threshold }})
- Core symptoms endorsed: {{ scored.core_symptom_count }}
- Several in the same period: {% if scored.co_occurrence %}yes{% else %}no{% endif %}
- Functional impact: {{ impact }}
- Classification: {{ classification }}
- Estimated risk: {{ scored.risk_percentage }}%
{% for section in sections %}
## {{ section.title }}

{{ section.body }}
{% endfor %}
---

*This screening is not a diagnosis. Discuss the result with a qualified clinician.*
"#;

#[derive(Serialize)]
struct SectionView<'a> {
    title: &'static str,
    body: &'a str,
}

/// Template context. Labels are pre-rendered so templates stay logic-free.
#[derive(Serialize)]
struct RecordView<'a> {
    user_id: &'a str,
    submission_id: String,
    report_id: String,
    generated_at: String,
    created_at: String,
    source: &'static str,
    model_id: Option<&'a str>,
    processing_ms: u64,
    scored: &'a ScoredResult,
    classification: &'static str,
    impact: &'static str,
    narrative: &'a str,
    sections: Vec<SectionView<'a>>,
}

impl<'a> RecordView<'a> {
    fn new(record: &'a HistoryRecord) -> Self {
        let report = &record.report;
        Self {
            user_id: &record.user_id,
            submission_id: record.submission_id.to_string(),
            report_id: report.id.to_string(),
            generated_at: report.generated_at.strftime("%Y-%m-%d %H:%M:%S UTC").to_string(),
            created_at: record.created_at.strftime("%Y-%m-%d %H:%M:%S UTC").to_string(),
            source: report.source.as_str(),
            model_id: report.model_id.as_deref(),
            processing_ms: report.processing_ms,
            scored: &record.scored,
            classification: record.scored.classification.label(),
            impact: record.scored.impact_level.label(),
            narrative: &report.narrative,
            sections: report
                .sections
                .iter()
                .map(|s| SectionView {
                    title: s.kind.title(),
                    body: &s.body,
                })
                .collect(),
        }
    }
}

/// Render a Tera template with a stored screening record.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
pub fn render_report(
    template_name: &str,
    template_content: &str,
    record: &HistoryRecord,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(RecordView::new(record))?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    debug!(submission_id = %record.submission_id, bytes = rendered.len(), "report rendered");
    Ok(rendered)
}

pub fn render_default(record: &HistoryRecord) -> Result<String, ExportError> {
    render_report(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE, record)
}

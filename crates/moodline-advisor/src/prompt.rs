//! Prompt construction for the remote strategy.
//!
//! The prompt is a pure function of the scored result, history summary and
//! timeline: the same inputs always produce byte-identical prompts. User ids
//! and request times are left out.

use moodline_core::models::context::ReportContext;
use moodline_core::models::history::HistorySummary;
use moodline_core::models::report::ReportKind;
use moodline_instruments::questionnaire::QuestionnaireDefinition;

pub const SYSTEM_PROMPT: &str = "\
You are an experienced psychiatrist and bipolar disorder specialist. Based on \
the patient's mood questionnaire screening results, write a professional \
clinical assessment report with treatment recommendations.

Use a professional, objective and caring tone. Structure the report in exactly \
these seven sections, each starting on its own line with the bracketed heading \
followed by a colon:

[EXECUTIVE SUMMARY]: 2-3 sentences on the patient's current status
[CLINICAL ASSESSMENT]: symptom presentation and severity
[RISK EVALUATION]: current risks and potential dangers
[TREATMENT RECOMMENDATIONS]: one recommendation per line, each starting with \"-\"
[LIFESTYLE RECOMMENDATIONS]: one recommendation per line, each starting with \"-\"
[MONITORING PLAN]: follow-up and reassessment plan
[EMERGENCY PROTOCOLS]: crisis management steps

A screening result is not a diagnosis. Keep every recommendation evidence-based \
and consistent with clinical practice guidelines.";

pub const HISTORY_SYSTEM_PROMPT: &str = "\
You are a psychiatrist specialising in the long-term management of bipolar \
disorder. Based on the patient's history of mood questionnaire screenings, \
analyse their progress and prognosis and give long-term recommendations.

Structure the report in exactly these five sections, each starting on its own \
line with the bracketed heading followed by a colon:

[EXECUTIVE SUMMARY]: 2-3 sentences on overall progress and current status
[PROGRESS ANALYSIS]: symptom trajectory, improvement and its consistency
[TREND INTERPRETATION]: what the pattern of scores suggests going forward
[TREATMENT RECOMMENDATIONS]: one recommendation per line, each starting with \"-\"
[PROGNOSIS ASSESSMENT]: long-term outlook, with risk and protective factors

Screening scores are not a diagnosis. Keep every recommendation evidence-based \
and consistent with long-term management guidelines.";

pub fn system_prompt(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Screening => SYSTEM_PROMPT,
        ReportKind::History => HISTORY_SYSTEM_PROMPT,
    }
}

/// Build the user prompt for one report.
pub fn build_prompt(definition: &QuestionnaireDefinition, context: &ReportContext) -> String {
    let mut prompt = String::from("Please write a screening report for the following patient.\n\n");
    prompt.push_str(&definition.to_structured_input(&context.scored));

    prompt.push('\n');
    match &context.history {
        Some(history) => prompt.push_str(&history_block(history)),
        None => prompt.push_str("## History\n\nThis is the patient's first screening.\n"),
    }

    prompt.push_str(&section_request(ReportKind::Screening));
    prompt
}

/// Build the user prompt for a history report. `context.scored` is the most
/// recent screening and `context.history` summarizes the ones before it.
pub fn build_history_prompt(
    definition: &QuestionnaireDefinition,
    context: &ReportContext,
) -> String {
    let mut prompt =
        String::from("Please write a history trend report for the following patient.\n\n");
    prompt.push_str("# Current screening\n\n");
    prompt.push_str(&definition.to_structured_input(&context.scored));

    prompt.push('\n');
    match &context.history {
        Some(history) => prompt.push_str(&history_block(history)),
        None => prompt.push_str("## History\n\nNo earlier screenings are on record.\n"),
    }

    if !context.timeline.is_empty() {
        prompt.push_str("\n## Score timeline\n\n");
        let skip = context.timeline.len().saturating_sub(TIMELINE_LIMIT);
        for point in &context.timeline[skip..] {
            prompt.push_str(&format!(
                "- {}: {}/{}\n",
                point.assessed_at.strftime("%Y-%m-%d"),
                point.symptom_count,
                context.scored.symptom_item_count,
            ));
        }
    }

    prompt.push_str(&section_request(ReportKind::History));
    prompt
}

/// Most recent timeline points included in a history prompt.
const TIMELINE_LIMIT: usize = 10;

fn section_request(kind: ReportKind) -> String {
    let markers: Vec<String> = kind
        .sections()
        .iter()
        .map(|k| format!("[{}]", k.marker()))
        .collect();
    format!("\nRespond with the sections {}, in that order.\n", markers.join(", "))
}

fn history_block(history: &HistorySummary) -> String {
    format!(
        "## History\n\n\
         - Prior screenings: {}\n\
         - Baseline score: {:.1}\n\
         - Most recent prior score: {}\n\
         - Trend: {} (confidence {:.2})\n\
         - First screening: {}\n\
         - Most recent screening: {}\n",
        history.prior_assessments,
        history.baseline_score,
        history.previous_score,
        history.trend.label(),
        history.trend_confidence,
        history.first_assessed_at.strftime("%Y-%m-%d"),
        history.last_assessed_at.strftime("%Y-%m-%d"),
    )
}

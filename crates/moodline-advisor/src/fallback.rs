//! Template narrative used whenever the remote model is unavailable.
//!
//! Built only from the scored result, the optional history summary and
//! static text keyed by classification and severity grade, so it cannot fail.

use moodline_core::models::history::{HistorySummary, Trend};
use moodline_core::models::report::{ReportKind, ReportSection, SectionKind};
use moodline_core::models::score::{Classification, ScoredResult, Severity};

use crate::sections::render_narrative;

pub const FALLBACK_NOTE: &str = "Note: this report was generated from a standard template \
because the narrative service was unavailable. A detailed evaluation by a qualified \
clinician is recommended.";

const EMERGENCY: &str = "If severe mood swings, thoughts of self-harm or suicide, or severe \
functional impairment occur, contact a medical professional immediately or call emergency \
services.";

struct Guidance {
    status: &'static str,
    assessment: &'static str,
    lifestyle: &'static [&'static str],
}

fn guidance(classification: Classification) -> Guidance {
    match classification {
        Classification::Positive => Guidance {
            status: "requires attention",
            assessment: "further professional evaluation is recommended",
            lifestyle: &[
                "Avoid excessive stress and overstimulation",
                "Engage in moderate exercise",
                "Seek support from family and friends",
            ],
        },
        Classification::Indeterminate => Guidance {
            status: "borderline",
            assessment: "the result sits close to the screening cut-off and should be \
                         reviewed by a clinician",
            lifestyle: &[
                "Maintain a regular sleep schedule",
                "Limit alcohol and stimulants",
                "Seek support from family and friends",
            ],
        },
        Classification::Negative => Guidance {
            status: "relatively stable",
            assessment: "no obvious abnormality was found, but continued monitoring is needed",
            lifestyle: &[
                "Maintain healthy lifestyle habits",
                "Schedule regular mental health assessments",
            ],
        },
    }
}

/// Risk wording, follow-up cadence and treatment steps. Graded screens use
/// their severity; ungraded ones fall back to the classification.
struct Plan {
    risk: &'static str,
    cadence: &'static str,
    treatment: &'static [&'static str],
}

fn plan(scored: &ScoredResult) -> Plan {
    match scored.severity() {
        Some(Severity::High) => Plan {
            risk: "High risk. An urgent psychiatric evaluation is needed.",
            cadence: "daily",
            treatment: &[
                "Arrange an urgent psychiatric evaluation",
                "Consider crisis support or inpatient care if safety is at risk",
                "Review medication with a psychiatrist as a priority",
                "Make sure someone can stay with the patient around the clock",
            ],
        },
        Some(Severity::Moderate) => Plan {
            risk: "Moderate risk. A specialist evaluation within 72 hours is recommended.",
            cadence: "every three days",
            treatment: &[
                "Book a specialist psychiatric evaluation within 48 to 72 hours",
                "Take a detailed clinical interview and history",
                "Discuss whether a mood stabiliser is appropriate",
                "Monitor mood and behavioural changes closely",
            ],
        },
        Some(Severity::Mild) => Plan {
            risk: "Mild risk. A specialist evaluation within two weeks is recommended.",
            cadence: "weekly",
            treatment: &[
                "Book a specialist evaluation within one to two weeks",
                "Watch closely for changes in symptoms",
                "Start psychoeducation and lifestyle support",
            ],
        },
        Some(Severity::Subclinical) => Plan {
            risk: "Low to moderate risk. Symptoms are present without functional impairment.",
            cadence: "every two weeks",
            treatment: &[
                "Arrange outpatient follow-up",
                "Consider preventive psychological support",
                "Reassess regularly in case functional impact develops",
            ],
        },
        None if scored.classification == Classification::Negative => Plan {
            risk: "Low risk. Regular follow-up is recommended.",
            cadence: "quarterly",
            treatment: &[
                "Continue monitoring mental health status",
                "Seek medical attention if symptoms change",
            ],
        },
        None => Plan {
            risk: "Uncertain risk. Clinical follow-up is needed to clarify the result.",
            cadence: "monthly",
            treatment: &[
                "Arrange a follow-up assessment with a mental health professional",
                "Keep a daily mood and sleep diary to bring to the appointment",
            ],
        },
    }
}

/// All seven screening sections for a scored result.
pub fn fallback_sections(
    scored: &ScoredResult,
    history: Option<&HistorySummary>,
) -> Vec<ReportSection> {
    let g = guidance(scored.classification);
    let p = plan(scored);
    let score = format!("{}/{}", scored.symptom_count, scored.symptom_item_count);

    let mut summary = format!(
        "Based on the screening result ({score} symptoms, {} functional impact), the patient's \
         current status is {}. Continued monitoring and professional evaluation are recommended.",
        scored.impact_level.label(),
        g.status,
    );
    if let Some(h) = history {
        summary.push_str(&format!(
            " Across {} prior screenings the trend is {} (previous score {}).",
            h.prior_assessments,
            h.trend.label(),
            h.previous_score,
        ));
    }

    let mut assessment = format!(
        "The questionnaire shows {score} endorsed symptoms ({} core), {}, with an estimated \
         risk of {:.1}%. The screening classification is {}; {}.",
        scored.core_symptom_count,
        if scored.co_occurrence {
            "several occurring in the same period"
        } else {
            "not reported as occurring in the same period"
        },
        scored.risk_percentage,
        scored.classification.label(),
        g.assessment,
    );
    if let Some(severity) = scored.severity() {
        assessment.push_str(&format!(" The severity grade is {}.", severity.label()));
    }

    vec![
        section(SectionKind::ExecutiveSummary, summary),
        section(SectionKind::ClinicalAssessment, assessment),
        section(SectionKind::RiskEvaluation, p.risk.to_string()),
        section(SectionKind::TreatmentRecommendations, bullets(p.treatment)),
        section(SectionKind::LifestyleRecommendations, bullets(g.lifestyle)),
        section(SectionKind::MonitoringPlan, monitoring(p.cadence)),
        section(SectionKind::EmergencyProtocols, EMERGENCY.to_string()),
    ]
}

/// The five history sections for the latest screening and the summary of
/// the screenings before it.
pub fn history_fallback_sections(
    scored: &ScoredResult,
    history: Option<&HistorySummary>,
) -> Vec<ReportSection> {
    let p = plan(scored);
    let current = scored.symptom_count;
    let items = scored.symptom_item_count;

    let Some(h) = history else {
        let summary = format!(
            "Only one screening is on record ({current}/{items} symptoms, classification {}), \
             so no trend can be established yet.",
            scored.classification.label(),
        );
        return vec![
            section(SectionKind::ExecutiveSummary, summary),
            section(
                SectionKind::ProgressAnalysis,
                "Progress can be assessed once a second screening is available.".to_string(),
            ),
            section(
                SectionKind::TrendInterpretation,
                "A single score does not show a trend.".to_string(),
            ),
            section(SectionKind::TreatmentRecommendations, bullets(p.treatment)),
            section(
                SectionKind::PrognosisAssessment,
                default_prognosis(scored.classification).to_string(),
            ),
        ];
    };

    let change = f64::from(current) - h.baseline_score;
    let summary = format!(
        "Across {} screenings since {}, the symptom score moved from a baseline of \
         {:.1} to {current}/{items}. The overall trend is {} and the current classification is \
         {}.",
        h.prior_assessments + 1,
        h.first_assessed_at.strftime("%Y-%m-%d"),
        h.baseline_score,
        h.trend.label(),
        scored.classification.label(),
    );

    let mut progress = format!(
        "The current score of {current} is {} the baseline and {} the previous screening ({}).",
        relation(change),
        relation(f64::from(current) - f64::from(h.previous_score)),
        h.previous_score,
    );
    if h.baseline_score > 0.0 {
        progress.push_str(&format!(
            " That is a {:.1}% change in symptom load since the baseline.",
            change / h.baseline_score * 100.0
        ));
    }

    let interpretation = format!(
        "{} The trend estimate has a confidence of {:.2}.",
        trend_reading(h.trend),
        h.trend_confidence,
    );

    let mut treatment: Vec<&str> = p.treatment.to_vec();
    treatment.push(trend_action(h.trend));

    vec![
        section(SectionKind::ExecutiveSummary, summary),
        section(SectionKind::ProgressAnalysis, progress),
        section(SectionKind::TrendInterpretation, interpretation),
        section(SectionKind::TreatmentRecommendations, bullets(&treatment)),
        section(
            SectionKind::PrognosisAssessment,
            prognosis(h.trend, scored.classification).to_string(),
        ),
    ]
}

/// Template sections for a report of `kind`.
pub fn fallback_for(
    kind: ReportKind,
    scored: &ScoredResult,
    history: Option<&HistorySummary>,
) -> Vec<ReportSection> {
    match kind {
        ReportKind::Screening => fallback_sections(scored, history),
        ReportKind::History => history_fallback_sections(scored, history),
    }
}

/// Narrative text for the fallback sections, with the template note appended.
pub fn fallback_narrative(sections: &[ReportSection]) -> String {
    format!("{}\n\n{FALLBACK_NOTE}", render_narrative(sections))
}

fn monitoring(cadence: &str) -> String {
    format!(
        "Reassess {cadence}. Seek medical attention promptly if symptoms change before the next \
         assessment."
    )
}

fn relation(delta: f64) -> &'static str {
    if delta < 0.0 {
        "below"
    } else if delta > 0.0 {
        "above"
    } else {
        "level with"
    }
}

fn trend_reading(trend: Trend) -> &'static str {
    match trend {
        Trend::SignificantImprovement | Trend::ModerateImprovement => {
            "Symptom scores have fallen clearly over time, consistent with a good response to \
             current care."
        }
        Trend::MildImprovement => {
            "Symptom scores have eased slightly; the change is small and worth confirming at the \
             next screenings."
        }
        Trend::Stable => "Symptom scores have held steady across screenings.",
        Trend::MildDeterioration => {
            "Symptom scores have risen slightly, which may be an early sign of worsening."
        }
        Trend::ModerateDeterioration | Trend::SignificantDeterioration => {
            "Symptom scores have risen clearly over time, suggesting the current approach is not \
             controlling symptoms."
        }
    }
}

fn trend_action(trend: Trend) -> &'static str {
    match trend {
        Trend::SignificantImprovement | Trend::ModerateImprovement | Trend::MildImprovement => {
            "Continue the current plan and review its effectiveness regularly"
        }
        Trend::Stable => "Review whether the current plan still matches the patient's goals",
        Trend::MildDeterioration
        | Trend::ModerateDeterioration
        | Trend::SignificantDeterioration => {
            "Review the current treatment plan with a psychiatrist"
        }
    }
}

fn prognosis(trend: Trend, classification: Classification) -> &'static str {
    match (trend, classification) {
        (
            Trend::SignificantImprovement | Trend::ModerateImprovement | Trend::MildImprovement,
            Classification::Negative,
        ) => "Favourable. Symptoms are improving and the latest screen is negative.",
        (
            Trend::SignificantImprovement | Trend::ModerateImprovement | Trend::MildImprovement,
            _,
        ) => "Cautiously favourable. Symptoms are improving but remain clinically relevant.",
        (Trend::Stable, c) => default_prognosis(c),
        (_, Classification::Negative) => {
            "Guarded. Symptoms are rising although the latest screen is still negative."
        }
        _ => "Guarded. Rising symptoms with a screen that needs follow-up call for prompt review.",
    }
}

fn default_prognosis(classification: Classification) -> &'static str {
    match classification {
        Classification::Negative => "Favourable, with routine follow-up.",
        Classification::Indeterminate => "Uncertain until a clinician has reviewed the result.",
        Classification::Positive => {
            "Depends on timely specialist care. Regular evaluation is recommended."
        }
    }
}

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn section(kind: SectionKind, body: String) -> ReportSection {
    ReportSection { kind, body }
}

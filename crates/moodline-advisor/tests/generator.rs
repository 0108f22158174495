mod common;

use std::time::Duration;

use common::{FakeModel, Step, WELL_FORMED, WELL_FORMED_HISTORY, definition, history, scored};
use jiff::Timestamp;
use moodline_advisor::{AdvisorConfig, CredentialSource, RemoteSettings, ReportGenerator};
use moodline_core::models::context::ReportContext;
use moodline_core::models::history::{HistoryPoint, HistorySummary, Trend};
use moodline_core::models::report::{ReportKind, ReportSource, SectionKind};
use moodline_core::models::score::{Classification, ImpactLevel};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn remote_config() -> AdvisorConfig {
    AdvisorConfig::default().with_remote(RemoteSettings {
        region: "us-east-1".to_string(),
        model_id: "fake-model".to_string(),
        credentials: CredentialSource::DefaultChain,
    })
}

fn context() -> ReportContext {
    ReportContext::new("user-1", scored(8, true, ImpactLevel::Serious))
}

#[tokio::test(start_paused = true)]
async fn fallback_covers_every_scored_result() {
    let generator = ReportGenerator::new(AdvisorConfig::default(), definition());
    for endorsed in 0..=13 {
        for impact in ImpactLevel::ALL {
            for co in [false, true] {
                let result = scored(endorsed, co, impact);
                let report = generator
                    .generate(ReportContext::new("user-1", result.clone()))
                    .await;
                assert_eq!(report.source, ReportSource::Fallback);
                assert_eq!(report.model_id, None);
                assert_eq!(report.scored, result);
                assert_eq!(report.kind, ReportKind::Screening);
                assert_eq!(report.sections.len(), SectionKind::SCREENING.len());
                assert!(report.sections.iter().all(|s| !s.body.is_empty()));
                assert!(!report.narrative.is_empty());
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn missing_remote_settings_never_calls_the_model() {
    let model = FakeModel::new([Step::Reply(WELL_FORMED.to_string())]);
    let generator = ReportGenerator::new(AdvisorConfig::default(), definition()).with_model(model.clone());

    let report = generator.generate(context()).await;

    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(model.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn well_formed_reply_becomes_remote_report() {
    let model = FakeModel::new([Step::Reply(WELL_FORMED.to_string())]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());

    let report = generator.generate(context()).await;

    assert_eq!(report.source, ReportSource::Remote);
    assert_eq!(report.model_id.as_deref(), Some("fake-model"));
    assert_eq!(model.calls(), 1);
    assert_eq!(
        report.section(SectionKind::RiskEvaluation),
        Some("Moderate to high risk.")
    );
    assert_eq!(
        report.section(SectionKind::TreatmentRecommendations),
        Some("- Book a psychiatric assessment\n- Review current medication")
    );
    assert!(report.narrative.starts_with("[EXECUTIVE SUMMARY]: The screening suggests"));
}

#[tokio::test(start_paused = true)]
async fn narrative_is_rebuilt_from_parsed_sections() {
    let reply = format!("Sure! Here is the report.\n\n{WELL_FORMED}\n\nHope this helps.");
    let model = FakeModel::new([Step::Reply(reply)]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());

    let report = generator.generate(context()).await;

    assert_eq!(report.source, ReportSource::Remote);
    assert!(!report.narrative.contains("Sure!"));
    assert!(report.narrative.starts_with("[EXECUTIVE SUMMARY]:"));
    assert_eq!(
        report.section(SectionKind::EmergencyProtocols),
        Some("Call emergency services if in crisis.\nHope this helps.")
    );
}

#[tokio::test(start_paused = true)]
async fn single_section_reply_is_retried_then_falls_back() {
    let model = FakeModel::new([
        Step::Reply("garbage [RISK EVALUATION]: x".to_string()),
        Step::Reply("garbage [RISK EVALUATION]: x".to_string()),
    ]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());

    let report = generator.generate(context()).await;

    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(model.calls(), 2);
    assert!(!report.narrative.contains("garbage"));
    assert_ne!(report.section(SectionKind::RiskEvaluation), Some("x"));
}

#[tokio::test(start_paused = true)]
async fn one_failure_is_retried() {
    let model = FakeModel::new([Step::Fail, Step::Reply(WELL_FORMED.to_string())]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());

    let start = Instant::now();
    let report = generator.generate(context()).await;

    assert_eq!(report.source, ReportSource::Remote);
    assert_eq!(model.calls(), 2);
    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn second_failure_falls_back() {
    let model = FakeModel::new([Step::Fail, Step::Fail, Step::Reply(WELL_FORMED.to_string())]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());

    let report = generator.generate(context()).await;

    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(report.model_id, None);
    assert_eq!(model.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn timeouts_are_bounded() {
    let model = FakeModel::new([Step::Hang, Step::Hang]);
    let config = remote_config()
        .with_timeout(Duration::from_secs(30))
        .with_retry_backoff(Duration::from_secs(1));
    let generator = ReportGenerator::new(config, definition()).with_model(model.clone());

    let start = Instant::now();
    let report = generator.generate(context()).await;

    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(model.calls(), 2);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(61));
    assert!(elapsed < Duration::from_secs(62));
}

#[tokio::test(start_paused = true)]
async fn empty_and_malformed_replies_count_as_failures() {
    let model = FakeModel::new([
        Step::Empty,
        Step::Reply("Sorry, I can't help with that.".to_string()),
    ]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());

    let report = generator.generate(context()).await;

    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(model.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancellation_mid_call_yields_fallback() {
    let model = FakeModel::new([Step::Hang]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let report = generator.generate_with_cancel(context(), &token).await;

    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(model.calls(), 1);
    assert!(start.elapsed() < Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn cancellation_during_backoff_skips_the_retry() {
    let model = FakeModel::new([Step::Fail, Step::Reply(WELL_FORMED.to_string())]);
    let config = remote_config().with_retry_backoff(Duration::from_secs(10));
    let generator = ReportGenerator::new(config, definition()).with_model(model.clone());
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let report = generator.generate_with_cancel(context(), &token).await;

    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(model.calls(), 1);
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_start_makes_no_call() {
    let model = FakeModel::new([Step::Reply(WELL_FORMED.to_string())]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());
    let token = CancellationToken::new();
    token.cancel();

    let report = generator.generate_with_cancel(context(), &token).await;

    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(model.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn fallback_mentions_history_trend() {
    let generator = ReportGenerator::new(AdvisorConfig::default(), definition());
    let history = HistorySummary {
        prior_assessments: 3,
        baseline_score: 9.0,
        previous_score: 6,
        trend: Trend::ModerateImprovement,
        trend_confidence: 0.9,
        first_assessed_at: Timestamp::UNIX_EPOCH,
        last_assessed_at: Timestamp::UNIX_EPOCH,
    };
    let ctx = context().with_history(Some(history));

    let report = generator.generate(ctx).await;

    let summary = report.section(SectionKind::ExecutiveSummary).unwrap();
    assert!(summary.contains("moderate improvement"));
    assert!(summary.contains("3 prior screenings"));
}

#[tokio::test(start_paused = true)]
async fn monitoring_cadence_follows_severity() {
    let generator = ReportGenerator::new(AdvisorConfig::default(), definition());
    let cases = [
        (scored(9, true, ImpactLevel::Serious), Classification::Positive, "Reassess daily"),
        (
            scored(8, true, ImpactLevel::Moderate),
            Classification::Positive,
            "Reassess every three days",
        ),
        (scored(7, true, ImpactLevel::Minor), Classification::Indeterminate, "Reassess weekly"),
        (
            scored(13, false, ImpactLevel::None),
            Classification::Indeterminate,
            "Reassess every two weeks",
        ),
        (
            scored(6, false, ImpactLevel::Serious),
            Classification::Indeterminate,
            "Reassess monthly",
        ),
        (scored(2, false, ImpactLevel::None), Classification::Negative, "Reassess quarterly"),
    ];
    for (result, expected, cadence) in cases {
        assert_eq!(result.classification, expected);
        let report = generator.generate(ReportContext::new("user-1", result)).await;
        let plan = report.section(SectionKind::MonitoringPlan).unwrap();
        assert!(plan.starts_with(cadence), "{expected:?}: {plan}");
    }
}

#[tokio::test(start_paused = true)]
async fn high_severity_fallback_calls_for_urgent_care() {
    let generator = ReportGenerator::new(AdvisorConfig::default(), definition());

    let report = generator.generate(context()).await;

    assert!(report.section(SectionKind::RiskEvaluation).unwrap().starts_with("High risk"));
    assert!(
        report
            .section(SectionKind::ClinicalAssessment)
            .unwrap()
            .contains("severity grade is high")
    );
    assert!(
        report
            .section(SectionKind::TreatmentRecommendations)
            .unwrap()
            .contains("urgent psychiatric evaluation")
    );
}

fn history_context() -> ReportContext {
    let timeline = [10, 8, 7, 5]
        .into_iter()
        .enumerate()
        .map(|(i, symptom_count)| HistoryPoint {
            assessed_at: Timestamp::from_second(1_767_600_000 + i as i64 * 86_400 * 28).unwrap(),
            symptom_count,
        })
        .collect();
    ReportContext::new("user-1", scored(5, false, ImpactLevel::Minor))
        .with_history(Some(history(3, 7, Trend::ModerateImprovement)))
        .with_timeline(timeline)
}

#[tokio::test(start_paused = true)]
async fn history_report_uses_history_sections() {
    let model = FakeModel::new([Step::Reply(WELL_FORMED_HISTORY.to_string())]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());

    let report = generator.generate_history(history_context()).await;

    assert_eq!(report.kind, ReportKind::History);
    assert_eq!(report.source, ReportSource::Remote);
    assert_eq!(model.calls(), 1);
    let kinds: Vec<SectionKind> = report.sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, SectionKind::HISTORY.to_vec());
    assert_eq!(report.section(SectionKind::PrognosisAssessment), Some("Favourable."));
}

#[tokio::test(start_paused = true)]
async fn history_report_rejects_a_screening_shaped_reply() {
    let model = FakeModel::new([
        Step::Reply(WELL_FORMED.to_string()),
        Step::Reply(WELL_FORMED.to_string()),
    ]);
    let generator = ReportGenerator::new(remote_config(), definition()).with_model(model.clone());

    let report = generator.generate_history(history_context()).await;

    assert_eq!(report.kind, ReportKind::History);
    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(model.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn history_fallback_describes_the_trend() {
    let generator = ReportGenerator::new(AdvisorConfig::default(), definition());

    let report = generator.generate_history(history_context()).await;

    assert_eq!(report.kind, ReportKind::History);
    assert_eq!(report.source, ReportSource::Fallback);
    assert_eq!(report.sections.len(), SectionKind::HISTORY.len());
    let summary = report.section(SectionKind::ExecutiveSummary).unwrap();
    assert!(summary.contains("Across 4 screenings since 2026-01-05"), "{summary}");
    assert!(summary.contains("moderate improvement"));
    let progress = report.section(SectionKind::ProgressAnalysis).unwrap();
    assert!(progress.contains("below the baseline"), "{progress}");
    assert!(progress.contains("-50.0%"), "{progress}");
    let treatment = report.section(SectionKind::TreatmentRecommendations).unwrap();
    assert!(treatment.contains("Continue the current plan"));
    assert!(report.narrative.ends_with(moodline_advisor::fallback::FALLBACK_NOTE));
}

#[tokio::test(start_paused = true)]
async fn history_fallback_without_priors_has_no_trend() {
    let generator = ReportGenerator::new(AdvisorConfig::default(), definition());
    let ctx = ReportContext::new("user-1", scored(4, false, ImpactLevel::None));

    let report = generator.generate_history(ctx).await;

    let summary = report.section(SectionKind::ExecutiveSummary).unwrap();
    assert!(summary.contains("Only one screening"));
    assert_eq!(report.sections.len(), SectionKind::HISTORY.len());
}

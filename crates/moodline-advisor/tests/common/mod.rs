#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use moodline_advisor::model::BoxFuture;
use moodline_advisor::{NarrativeModel, RemoteUnavailable};
use moodline_core::models::answer::AnswerSet;
use moodline_core::models::history::{HistorySummary, Trend};
use moodline_core::models::score::{ImpactLevel, ScoredResult};
use moodline_instruments::instruments::mdq;
use moodline_instruments::questionnaire::QuestionnaireDefinition;
use moodline_instruments::scoring::ScoringEngine;

pub const WELL_FORMED: &str = "\
[EXECUTIVE SUMMARY]: The screening suggests elevated mood symptoms.
[CLINICAL ASSESSMENT]: Eight symptoms were endorsed with serious impact.
[RISK EVALUATION]: Moderate to high risk.
[TREATMENT RECOMMENDATIONS]:
- Book a psychiatric assessment
- Review current medication
[LIFESTYLE RECOMMENDATIONS]:
- Keep a regular sleep schedule
[MONITORING PLAN]: Reassess monthly.
[EMERGENCY PROTOCOLS]: Call emergency services if in crisis.";

pub const WELL_FORMED_HISTORY: &str = "\
[EXECUTIVE SUMMARY]: Symptoms have eased steadily over four screenings.
[PROGRESS ANALYSIS]: The score fell from 10 to 5.
[TREND INTERPRETATION]: Consistent improvement.
[TREATMENT RECOMMENDATIONS]:
- Continue the current plan
[PROGNOSIS ASSESSMENT]: Favourable.";

/// What the fake model does on its next call.
#[derive(Debug, Clone)]
pub enum Step {
    Reply(String),
    Fail,
    Hang,
    Empty,
}

/// A scripted stand-in for the remote model. Runs out of script → fails.
pub struct FakeModel {
    script: Mutex<VecDeque<Step>>,
    calls: AtomicU32,
}

impl FakeModel {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(steps.into_iter().collect()),
            calls: AtomicU32::new(0),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NarrativeModel for FakeModel {
    fn model_id(&self) -> &str {
        "fake-model"
    }

    fn converse<'a>(
        &'a self,
        _system_prompt: &'a str,
        _prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, RemoteUnavailable>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self.script.lock().unwrap().pop_front().unwrap_or(Step::Fail);
            match step {
                Step::Reply(text) => Ok(text),
                Step::Fail => Err(RemoteUnavailable::Invocation("service unavailable".to_string())),
                Step::Hang => std::future::pending().await,
                Step::Empty => Ok("   \n".to_string()),
            }
        })
    }
}

pub fn history(prior_assessments: u32, previous_score: u32, trend: Trend) -> HistorySummary {
    HistorySummary {
        prior_assessments,
        baseline_score: 10.0,
        previous_score,
        trend,
        trend_confidence: 0.9,
        first_assessed_at: "2026-01-05T09:00:00Z".parse().unwrap(),
        last_assessed_at: "2026-03-02T09:00:00Z".parse().unwrap(),
    }
}

pub fn definition() -> Arc<QuestionnaireDefinition> {
    Arc::new(mdq::definition())
}

/// Score an answer set endorsing the first `endorsed` symptom items.
pub fn scored(endorsed: usize, co_occurrence: bool, impact: ImpactLevel) -> ScoredResult {
    let mut responses: Vec<&str> = (0..13)
        .map(|i| if i < endorsed { "yes" } else { "no" })
        .collect();
    responses.push(if co_occurrence { "yes" } else { "no" });
    responses.push(impact.response());
    ScoringEngine::new(definition())
        .score(&AnswerSet::new(responses))
        .unwrap()
}

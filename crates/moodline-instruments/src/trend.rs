//! Trend analysis over a user's prior screenings.
//!
//! Symptom counts going down over time is improvement. With two points the
//! relative change between them decides the trend; with three or more the
//! first-to-last change decides it and the linear correlation between
//! position and score sets the confidence.

use moodline_core::models::history::{HistoryPoint, HistorySummary, Trend};

/// Summarize prior screenings. Points may arrive in any order.
///
/// Returns `None` when there is no history.
pub fn summarize_history(points: &[HistoryPoint]) -> Option<HistorySummary> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.assessed_at);

    let first = sorted.first()?;
    let last = sorted.last()?;
    let scores: Vec<f64> = sorted.iter().map(|p| f64::from(p.symptom_count)).collect();
    let (trend, trend_confidence) = improvement_trend(&scores);

    Some(HistorySummary {
        prior_assessments: sorted.len() as u32,
        baseline_score: baseline(&scores),
        previous_score: last.symptom_count,
        trend,
        trend_confidence,
        first_assessed_at: first.assessed_at,
        last_assessed_at: last.assessed_at,
    })
}

/// Mean of the earliest `min(3, n / 2)` scores, or the first score when that
/// window is empty.
fn baseline(scores: &[f64]) -> f64 {
    let window = 3.min(scores.len() / 2);
    if window == 0 {
        return scores.first().copied().unwrap_or(0.0);
    }
    scores[..window].iter().sum::<f64>() / window as f64
}

/// Classify the trend of chronologically ordered scores.
pub fn improvement_trend(scores: &[f64]) -> (Trend, f64) {
    match scores {
        [] | [_] => (Trend::Stable, 0.5),
        [earliest, latest] => {
            let change = (latest - earliest) / earliest.max(1.0) * 100.0;
            if change.abs() <= 15.0 {
                (Trend::Stable, 0.6)
            } else if change <= -30.0 {
                (Trend::MildImprovement, 0.7)
            } else if change >= 30.0 {
                (Trend::MildDeterioration, 0.7)
            } else if change < 0.0 {
                (Trend::MildImprovement, 0.6)
            } else {
                (Trend::MildDeterioration, 0.6)
            }
        }
        [earliest, .., latest] => {
            let change = if *earliest > 0.0 {
                (earliest - latest) / earliest * 100.0
            } else {
                0.0
            };
            let trend = if change.abs() < 20.0 {
                Trend::Stable
            } else if change >= 50.0 {
                Trend::SignificantImprovement
            } else if change >= 30.0 {
                Trend::ModerateImprovement
            } else if change >= 20.0 {
                Trend::MildImprovement
            } else if change <= -50.0 {
                Trend::SignificantDeterioration
            } else if change <= -30.0 {
                Trend::ModerateDeterioration
            } else {
                Trend::MildDeterioration
            };
            let confidence = (position_correlation(scores).abs() + 0.1).min(0.95);
            (trend, confidence)
        }
    }
}

/// Pearson correlation between each score and its position in the series.
/// A flat series correlates perfectly with "no change".
fn position_correlation(scores: &[f64]) -> f64 {
    let n = scores.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = scores.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (i, y) in scores.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_y == 0.0 || var_x == 0.0 {
        return 1.0;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

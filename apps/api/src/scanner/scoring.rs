use crate::scanner::checks::count_raw_tokens;
use crate::scanner::models::{Issue, Severity, Warning};

const BASE_SCORE: i32 = 100;
const EMAIL_BONUS: i32 = 5;
const LENGTH_BONUS: i32 = 5;
/// Raw token threshold for the length bonus (see `count_raw_tokens`).
const LENGTH_BONUS_TOKENS: usize = 300;
/// Only this many warnings make it into the top-level recommendations.
const MAX_WARNING_RECOMMENDATIONS: usize = 2;

fn issue_penalty(severity: Severity) -> i32 {
    match severity {
        Severity::High => 15,
        Severity::Medium => 8,
        Severity::Low => 3,
    }
}

fn warning_penalty(severity: Severity) -> i32 {
    match severity {
        Severity::Medium => 5,
        Severity::High | Severity::Low => 2,
    }
}

/// Computes the 0–100 compatibility score.
///
/// Starts at 100, subtracts per-finding penalties, adds +5 when the text
/// contains `@` and +5 when it has at least 300 raw whitespace-split tokens,
/// then clamps.
pub fn compute_score(issues: &[Issue], warnings: &[Warning], text: &str) -> u8 {
    let mut score = BASE_SCORE;

    score -= issues.iter().map(|i| issue_penalty(i.severity)).sum::<i32>();
    score -= warnings.iter().map(|w| warning_penalty(w.severity)).sum::<i32>();

    if text.contains('@') {
        score += EMAIL_BONUS;
    }
    if count_raw_tokens(text) >= LENGTH_BONUS_TOKENS {
        score += LENGTH_BONUS;
    }

    score.clamp(0, 100) as u8
}

/// High-severity issue recommendations, then medium-severity ones, then the
/// first two warnings in detection order. Low-severity issues are left out.
pub fn build_recommendations(issues: &[Issue], warnings: &[Warning]) -> Vec<String> {
    let by_severity = |severity: Severity| {
        issues
            .iter()
            .filter(move |i| i.severity == severity)
            .map(|i| i.recommendation.clone())
    };

    by_severity(Severity::High)
        .chain(by_severity(Severity::Medium))
        .chain(
            warnings
                .iter()
                .take(MAX_WARNING_RECOMMENDATIONS)
                .map(|w| w.recommendation.clone()),
        )
        .collect()
}

//! Password strength evaluator - main evaluation logic.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::rules::{MAX_SCORE, RULES};
use crate::types::{EvaluatedRule, PasswordAssessment};

/// Evaluates a password against the rule table.
///
/// Total and deterministic: any input, including the empty string, yields an
/// assessment with `0 <= score <= MAX_SCORE`.
pub fn evaluate(password: &SecretString) -> PasswordAssessment {
    evaluate_str(password.expose_secret())
}

/// Same as [`evaluate`] for a plain string slice.
pub fn evaluate_str(password: &str) -> PasswordAssessment {
    let mut evaluated_rules = Vec::with_capacity(RULES.len());
    let mut score = 0.0;

    for rule in &RULES {
        let outcome = (rule.predicate)(password);
        score += outcome.credit() * f64::from(rule.weight);
        evaluated_rules.push(EvaluatedRule {
            label: rule.label,
            passed: outcome.passed(),
        });
    }

    PasswordAssessment {
        evaluated_rules,
        score: score.min(f64::from(MAX_SCORE)),
    }
}

/// True only when every rule is fully satisfied.
pub fn is_strong(password: &SecretString) -> bool {
    is_strong_str(password.expose_secret())
}

pub fn is_strong_str(password: &str) -> bool {
    evaluate_str(password).score == f64::from(MAX_SCORE)
}

/// Debounced evaluation that sends the assessment via channel.
///
/// Nothing is sent if `token` is cancelled during the debounce, which is how a
/// newer keystroke supersedes this one.
#[cfg(feature = "async")]
pub async fn evaluate_password_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<PasswordAssessment>,
) {
    use std::time::Duration;

    tokio::select! {
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::debug!("password evaluation cancelled before debounce elapsed");
            return;
        }
        _ = tokio::time::sleep(Duration::from_millis(300)) => {}
    }

    let assessment = evaluate(password);

    if let Err(e) = tx.send(assessment).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password assessment: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}

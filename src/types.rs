//! Assessment types produced by the evaluator.

use crate::rules::MAX_SCORE;

/// Pass/fail state of one rule, as shown in the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedRule {
    pub label: &'static str,
    pub passed: bool,
}

/// Coarse strength level derived from the score ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Below 0.4 is weak, exactly 1 is strong, anything between is medium.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.4 {
            PasswordStrength::Weak
        } else if ratio == 1.0 {
            PasswordStrength::Strong
        } else {
            PasswordStrength::Medium
        }
    }
}

impl std::fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PasswordStrength::Weak => "weak",
            PasswordStrength::Medium => "medium",
            PasswordStrength::Strong => "strong",
        };
        f.write_str(s)
    }
}

/// Result of scoring one password. Rules are kept in rule-table order.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordAssessment {
    pub evaluated_rules: Vec<EvaluatedRule>,
    pub score: f64,
}

impl PasswordAssessment {
    /// `score / MAX_SCORE`, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        self.score / f64::from(MAX_SCORE)
    }

    pub fn strength(&self) -> PasswordStrength {
        PasswordStrength::from_ratio(self.ratio())
    }

    pub fn is_strong(&self) -> bool {
        self.score == f64::from(MAX_SCORE)
    }

    /// Rules for display: failed rules first, relative order preserved.
    pub fn sorted_rules(&self) -> Vec<EvaluatedRule> {
        let mut rules = self.evaluated_rules.clone();
        rules.sort_by_key(|rule| rule.passed);
        rules
    }
}

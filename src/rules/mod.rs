//! Password strength rules
//!
//! Each rule inspects one aspect of the password and reports a
//! [`RuleOutcome`]. The rule table is fixed for the lifetime of the process.

mod length;
mod variety;

pub use length::{MIN_LENGTH, length_rule};
pub use variety::{
    digit_rule, has_digit, has_lowercase, has_special, has_uppercase, lowercase_rule, special_rule,
    uppercase_rule,
};

/// Result of a single rule predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleOutcome {
    /// The rule either holds or it does not.
    Boolean(bool),
    /// Fractional credit, clamped to `[0, 1]` when scored.
    Partial(f64),
}

impl RuleOutcome {
    /// Fraction of the rule weight this outcome earns.
    pub fn credit(self) -> f64 {
        match self {
            RuleOutcome::Boolean(true) => 1.0,
            RuleOutcome::Boolean(false) => 0.0,
            RuleOutcome::Partial(fraction) if fraction.is_nan() => 0.0,
            RuleOutcome::Partial(fraction) => fraction.clamp(0.0, 1.0),
        }
    }

    /// A partial outcome only passes once it reaches full credit.
    pub fn passed(self) -> bool {
        match self {
            RuleOutcome::Boolean(passed) => passed,
            RuleOutcome::Partial(_) => self.credit() >= 1.0,
        }
    }
}

/// A scoring rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub label: &'static str,
    pub weight: u32,
    pub predicate: fn(&str) -> RuleOutcome,
}

/// The rule table, in display order.
pub const RULES: [Rule; 5] = [
    Rule {
        label: "At least one lowercase letter",
        weight: 1,
        predicate: lowercase_rule,
    },
    Rule {
        label: "At least one uppercase letter",
        weight: 1,
        predicate: uppercase_rule,
    },
    Rule {
        label: "At least one digit",
        weight: 1,
        predicate: digit_rule,
    },
    Rule {
        label: "At least one special character",
        weight: 1,
        predicate: special_rule,
    },
    Rule {
        label: "At least 8 characters",
        weight: 2,
        predicate: length_rule,
    },
];

/// Highest score an assessment can reach.
pub const MAX_SCORE: u32 = max_score(&RULES);

const fn max_score(rules: &[Rule]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < rules.len() {
        total += rules[i].weight;
        i += 1;
    }
    total
}

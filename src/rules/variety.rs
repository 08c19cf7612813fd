//! Character variety checks - lowercase, uppercase, digits, special chars.
//!
//! Classes are ASCII: anything outside `[a-zA-Z0-9]` counts as special,
//! including accented letters.

use super::RuleOutcome;

pub fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

pub fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

pub fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

pub fn has_special(password: &str) -> bool {
    password.chars().any(|c| !c.is_ascii_alphanumeric())
}

pub fn lowercase_rule(password: &str) -> RuleOutcome {
    RuleOutcome::Boolean(has_lowercase(password))
}

pub fn uppercase_rule(password: &str) -> RuleOutcome {
    RuleOutcome::Boolean(has_uppercase(password))
}

pub fn digit_rule(password: &str) -> RuleOutcome {
    RuleOutcome::Boolean(has_digit(password))
}

pub fn special_rule(password: &str) -> RuleOutcome {
    RuleOutcome::Boolean(has_special(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variety_missing_uppercase() {
        let pwd = "lowercase123!";
        assert!(has_lowercase(pwd));
        assert!(!has_uppercase(pwd));
    }

    #[test]
    fn test_variety_missing_lowercase() {
        let pwd = "UPPERCASE123!";
        assert!(has_uppercase(pwd));
        assert!(!has_lowercase(pwd));
    }

    #[test]
    fn test_variety_missing_digit() {
        assert!(!has_digit("NoNumbers!"));
    }

    #[test]
    fn test_variety_missing_special() {
        assert!(!has_special("NoSpecial123"));
    }

    #[test]
    fn test_variety_all_categories() {
        let pwd = "HasAll123!@#";
        assert!(has_lowercase(pwd) && has_uppercase(pwd) && has_digit(pwd) && has_special(pwd));
    }

    #[test]
    fn test_variety_non_ascii_letters_are_special() {
        assert!(has_special("motdepassé"));
        assert!(!has_uppercase("É"));
        assert!(has_special(" "));
    }
}

// File: slipclean-core/src/validators.rs
//! Content-policy validation of sanitized text.
//!
//! Validation runs after sanitization and either hands the text back
//! unchanged or rejects it with a client-visible reason. Rules are checked
//! in order and the first failure wins.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::errors::Rejection;
use crate::sanitizers::compiler::CompiledRules;

/// Applies the empty-input check followed by the compiled pattern rules.
#[derive(Debug, Default)]
pub struct Validator {
    rules: CompiledRules,
}

impl Validator {
    pub fn new(rules: CompiledRules) -> Self {
        Self { rules }
    }

    /// Returns `text` unchanged, or the first rule it violates.
    ///
    /// # Errors
    ///
    /// * `Rejection::Empty` if `text` is empty.
    /// * `Rejection::DisallowedContent` for the first pattern rule matching
    ///   anywhere in `text`.
    pub fn validate(&self, text: String) -> Result<String, Rejection> {
        if text.is_empty() {
            debug!("Rejected: empty input.");
            return Err(Rejection::Empty);
        }

        if let Some(rule) = self.rules.rules.iter().find(|r| r.regex.is_match(&text)) {
            debug!("Rejected by rule '{}'.", rule.name);
            return Err(Rejection::DisallowedContent {
                rule: rule.name.clone(),
                reason: rule.reason.clone(),
            });
        }

        Ok(text)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationRule;
    use crate::sanitizers::compiler::compile_rules;

    fn default_validator() -> Validator {
        Validator::new(compile_rules(&[ValidationRule::timestamp()]).unwrap())
    }

    #[test]
    fn empty_text_is_rejected_first() {
        assert_eq!(default_validator().validate(String::new()), Err(Rejection::Empty));
        assert_eq!(Validator::default().validate(String::new()), Err(Rejection::Empty));
    }

    #[test]
    fn timestamps_are_rejected_anywhere() {
        let result = default_validator().validate("posted at 2024-01-02T03:04:05Z ok".to_string());
        assert_eq!(
            result,
            Err(Rejection::DisallowedContent {
                rule: "timestamp".to_string(),
                reason: "disallowed timestamp-like content".to_string(),
            })
        );
    }

    #[test]
    fn near_misses_are_accepted() {
        let validator = default_validator();
        for text in ["2024-01-02 03:04:05", "2024-01-02T03:04", "hello", "24-01-02T03:04:05"] {
            assert_eq!(validator.validate(text.to_string()), Ok(text.to_string()));
        }
    }

    #[test]
    fn non_ascii_digits_do_not_count() {
        let text = "\u{0662}\u{0660}\u{0662}\u{0664}-01-02T03:04:05".to_string();
        assert_eq!(default_validator().validate(text.clone()), Ok(text));
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![
            ValidationRule {
                name: "first".to_string(),
                pattern: "x".to_string(),
                reason: "first reason".to_string(),
                ..ValidationRule::default()
            },
            ValidationRule {
                name: "second".to_string(),
                pattern: "x".to_string(),
                ..ValidationRule::default()
            },
        ];
        let validator = Validator::new(compile_rules(&rules).unwrap());
        assert_eq!(validator.rule_count(), 2);
        let rejection = validator.validate("x".to_string()).unwrap_err();
        assert_eq!(rejection.rule(), Some("first"));
        assert_eq!(rejection.to_string(), "first reason");
    }
}

// slipclean-core/src/engines/allowlist_engine.rs
//! A `SanitizationEngine` that keeps an allowlist of formatting tags,
//! balances them, autolinks bare URLs and escapes everything else.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;
use slipclean_markup::Tokenizer;

use crate::config::{validate_config, SanitizerConfig, TagPolicy};
use crate::engine::SanitizationEngine;
use crate::errors::Rejection;
use crate::sanitizers::balancer::TagBalancer;
use crate::sanitizers::compiler::compile_rules;
use crate::sanitizers::strip::strip_control_chars;
use crate::validators::Validator;

#[derive(Debug)]
pub struct AllowlistEngine {
    config: SanitizerConfig,
    validator: Validator,
}

impl AllowlistEngine {
    /// Builds an engine from the embedded default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(SanitizerConfig::load_default()?)
    }

    /// Validates `config`, compiles its rules and takes ownership of it.
    pub fn with_config(config: SanitizerConfig) -> Result<Self> {
        validate_config(&config).context("Invalid sanitizer configuration")?;
        let rules = compile_rules(&config.validation)
            .context("Failed to compile validation rules for AllowlistEngine")?;
        debug!(
            "AllowlistEngine ready: {} allowed tags, {} active validation rules.",
            config.policy.allowed_tags.len(),
            rules.rules.len()
        );

        Ok(Self {
            config,
            validator: Validator::new(rules),
        })
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }
}

impl SanitizationEngine for AllowlistEngine {
    fn sanitize(&self, input: &str) -> String {
        let stripped = strip_control_chars(input);
        TagBalancer::balance(&self.config.policy, Tokenizer::new(&stripped))
    }

    fn validate(&self, sanitized: String) -> Result<String, Rejection> {
        self.validator.validate(sanitized)
    }

    fn policy(&self) -> &TagPolicy {
        &self.config.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationRule;
    use std::collections::BTreeMap;

    #[test]
    fn builds_from_defaults() {
        let engine = AllowlistEngine::new().unwrap();
        assert_eq!(engine.policy(), &TagPolicy::default());
        assert_eq!(engine.sanitize("<b>hi</b>"), "<b>hi</b>");
    }

    #[test]
    fn control_characters_are_stripped_before_tokenizing() {
        let engine = AllowlistEngine::new().unwrap();
        assert_eq!(engine.sanitize("<\0b>x</b\x7f>"), "<b>x</b>");
    }

    #[test]
    fn custom_policy_changes_what_survives() {
        let mut config = SanitizerConfig::default();
        config.policy.allowed_tags.insert("p".to_string());
        config.policy.allowed_tags.remove("b");
        config.policy.allowed_attributes = BTreeMap::from([(
            "a".to_string(),
            vec!["href".to_string(), "title".to_string()],
        )]);
        let engine = AllowlistEngine::with_config(config).unwrap();

        assert_eq!(engine.sanitize("<p>x</p><b>y</b>"), "<p>x</p>&lt;b&gt;y&lt;/b&gt;");
        assert_eq!(
            engine.sanitize(r#"<a title="t" href="h">l</a>"#),
            r#"<a href="h" title="t">l</a>"#
        );
    }

    #[test]
    fn disabled_rules_do_not_reject() {
        let mut config = SanitizerConfig::default();
        config.disable_rules(&["timestamp".to_string()]);
        let engine = AllowlistEngine::with_config(config).unwrap();
        assert_eq!(
            engine.sanitize_and_validate("2024-01-02T03:04:05"),
            Ok("2024-01-02T03:04:05".to_string())
        );
        assert_eq!(engine.sanitize_and_validate(""), Err(Rejection::Empty));
    }

    #[test]
    fn invalid_configuration_is_refused() {
        let mut config = SanitizerConfig::default();
        config.validation.push(ValidationRule {
            name: "broken".to_string(),
            pattern: "[".to_string(),
            ..ValidationRule::default()
        });
        let err = AllowlistEngine::with_config(config).unwrap_err();
        assert!(format!("{err:#}").contains("broken"));
    }
}

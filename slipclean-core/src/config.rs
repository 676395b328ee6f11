//! Configuration management for `slipclean-core`.
//!
//! This module defines the tag allowlist (`TagPolicy`), the content rules
//! applied by the validator (`ValidationRule`), and the `SanitizerConfig`
//! that bundles them. Configurations are plain data: an engine is built
//! from one and only ever borrows it afterwards.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;

/// Maximum allowed length for a validation pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Tags that may survive sanitization as structural markup.
const DEFAULT_ALLOWED_TAGS: &[&str] = &["a", "b", "i", "s", "tt", "em", "u"];

/// Which tags survive as markup, and which attribute names each may keep.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TagPolicy {
    pub allowed_tags: BTreeSet<String>,
    /// Tag name to the ordered list of attribute names it retains.
    pub allowed_attributes: BTreeMap<String, Vec<String>>,
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self {
            allowed_tags: DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
            allowed_attributes: BTreeMap::from([("a".to_string(), vec!["href".to_string()])]),
        }
    }
}

impl TagPolicy {
    pub fn allows_tag(&self, name: &str) -> bool {
        self.allowed_tags.contains(name)
    }

    /// The retained attribute names for `tag`, in rendering order.
    pub fn attributes_for(&self, tag: &str) -> &[String] {
        self.allowed_attributes
            .get(tag)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// A content rule: sanitized text matching `pattern` is rejected with `reason`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationRule {
    /// Unique identifier for the rule (e.g., "timestamp").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string, matched anywhere in the text.
    pub pattern: String,
    /// The client-visible rejection reason.
    pub reason: String,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl Default for ValidationRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: String::new(),
            reason: "disallowed content".to_string(),
            enabled: None,
        }
    }
}

impl ValidationRule {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// The built-in rule rejecting ISO-8601-looking timestamps.
    pub fn timestamp() -> Self {
        Self {
            name: "timestamp".to_string(),
            description: Some("Matches ISO-8601 style date-times such as 2024-01-02T03:04:05".to_string()),
            pattern: "[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}".to_string(),
            reason: "disallowed timestamp-like content".to_string(),
            enabled: None,
        }
    }
}

/// Represents the top-level configuration structure for slipclean.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub policy: TagPolicy,
    /// Validation rules, applied in order after the empty-input check.
    pub validation: Vec<ValidationRule>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            policy: TagPolicy::default(),
            validation: vec![ValidationRule::timestamp()],
        }
    }
}

impl SanitizerConfig {
    /// Loads the built-in configuration embedded in the binary.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default sanitizer configuration from embedded string...");
        let default_yaml = include_str!("../config/default_policy.yaml");
        let config: SanitizerConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default sanitizer configuration")?;

        debug!(
            "Loaded {} allowed tags and {} default validation rules.",
            config.policy.allowed_tags.len(),
            config.validation.len()
        );
        Ok(config)
    }

    /// Loads a configuration from a YAML file and validates it.
    ///
    /// Sections missing from the file take their built-in defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading sanitizer configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SanitizerConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        info!(
            "Loaded {} allowed tags and {} validation rules from {}.",
            config.policy.allowed_tags.len(),
            config.validation.len(),
            path.display()
        );
        Ok(config)
    }

    /// Serializes the configuration as YAML, the same format `load_from_file` reads.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yml::to_string(self).context("Failed to serialize sanitizer configuration")
    }

    /// Disables the named validation rules, warning about unknown names.
    pub fn disable_rules(&mut self, names: &[String]) {
        let known: HashSet<&str> = self.validation.iter().map(|r| r.name.as_str()).collect();
        for name in names.iter().filter(|n| !known.contains(n.as_str())) {
            warn!("Rule '{}' in disable list does not exist.", name);
        }

        for rule in self.validation.iter_mut() {
            if names.contains(&rule.name) {
                debug!("Disabling validation rule '{}'.", rule.name);
                rule.enabled = Some(false);
            }
        }
    }
}

/// Overlays a user configuration on the defaults.
///
/// User rules replace default rules of the same name and are otherwise
/// appended; default rule order is kept. The user's policy replaces the
/// default policy.
pub fn merge_config(
    default_config: SanitizerConfig,
    user_config: Option<SanitizerConfig>,
) -> SanitizerConfig {
    let Some(user) = user_config else {
        debug!("No user config provided; using defaults.");
        return default_config;
    };
    debug!(
        "Merging {} user rules over {} default rules.",
        user.validation.len(),
        default_config.validation.len()
    );

    let mut overrides: HashMap<String, ValidationRule> = user
        .validation
        .iter()
        .map(|rule| (rule.name.clone(), rule.clone()))
        .collect();

    let mut validation: Vec<ValidationRule> = default_config
        .validation
        .into_iter()
        .map(|rule| overrides.remove(&rule.name).unwrap_or(rule))
        .collect();
    validation.extend(
        user.validation
            .into_iter()
            .filter(|rule| overrides.contains_key(&rule.name)),
    );

    SanitizerConfig {
        policy: user.policy,
        validation,
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Validates policy names and rule integrity (uniqueness, length, compilation).
///
/// Attribute lists for tags that are not allowed are harmless and only logged.
pub fn validate_config(config: &SanitizerConfig) -> Result<()> {
    let mut errors = Vec::new();

    for tag in &config.policy.allowed_tags {
        if !is_valid_name(tag) {
            errors.push(format!(
                "Allowed tag '{}' must be non-empty lowercase ASCII letters, digits or '-'.",
                tag
            ));
        }
    }

    for (tag, attributes) in &config.policy.allowed_attributes {
        if !config.policy.allows_tag(tag) {
            warn!("Attributes are listed for tag '{}', which is not an allowed tag; they are ignored.", tag);
        }
        for attribute in attributes {
            if !is_valid_name(attribute) {
                errors.push(format!(
                    "Attribute '{}' on tag '{}' must be non-empty lowercase ASCII letters, digits or '-'.",
                    attribute, tag
                ));
            }
        }
    }

    let mut rule_names = HashSet::new();
    for rule in &config.validation {
        if rule.name.is_empty() {
            errors.push("A validation rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        if rule.pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }
        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                rule.pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }
        if let Err(e) = Regex::new(&rule.pattern) {
            errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, pattern: &str) -> ValidationRule {
        ValidationRule {
            name: name.to_string(),
            pattern: pattern.to_string(),
            ..ValidationRule::default()
        }
    }

    #[test]
    fn default_policy_matches_the_builtin_allowlist() {
        let policy = TagPolicy::default();
        for tag in ["a", "b", "i", "s", "tt", "em", "u"] {
            assert!(policy.allows_tag(tag), "{tag} should be allowed");
        }
        assert!(!policy.allows_tag("script"));
        assert_eq!(policy.attributes_for("a"), ["href".to_string()]);
        assert!(policy.attributes_for("b").is_empty());
    }

    #[test]
    fn embedded_defaults_match_builtin_defaults() {
        assert_eq!(SanitizerConfig::load_default().unwrap(), SanitizerConfig::default());
    }

    #[test]
    fn default_config_is_valid() {
        validate_config(&SanitizerConfig::default()).unwrap();
    }

    #[test]
    fn validate_collects_every_problem() {
        let mut config = SanitizerConfig::default();
        config.policy.allowed_tags.insert("Bad Tag".to_string());
        config.policy.allowed_attributes.insert("p".to_string(), vec!["class".to_string()]);
        config.validation.push(rule("timestamp", "x"));
        config.validation.push(rule("broken", "("));
        config.validation.push(rule("", "y"));

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("'Bad Tag'"));
        assert!(!message.contains("tag 'p'"));
        assert!(message.contains("Duplicate rule name found: 'timestamp'"));
        assert!(message.contains("'broken' has an invalid regex"));
        assert!(message.contains("empty `name`"));
    }

    #[test]
    fn validate_rejects_overlong_patterns() {
        let mut config = SanitizerConfig::default();
        config.validation = vec![rule("long", &"a".repeat(MAX_PATTERN_LENGTH + 1))];
        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("exceeds maximum allowed"));
    }

    #[test]
    fn merge_overrides_by_name_and_appends_new_rules() {
        let mut replaced = ValidationRule::timestamp();
        replaced.enabled = Some(false);
        let user = SanitizerConfig {
            policy: TagPolicy::default(),
            validation: vec![rule("shouting", "[A-Z]{20}"), replaced.clone()],
        };

        let merged = merge_config(SanitizerConfig::default(), Some(user));
        assert_eq!(merged.validation.len(), 2);
        assert_eq!(merged.validation[0], replaced);
        assert_eq!(merged.validation[1].name, "shouting");
    }

    #[test]
    fn merge_without_user_config_keeps_defaults() {
        assert_eq!(merge_config(SanitizerConfig::default(), None), SanitizerConfig::default());
    }

    #[test]
    fn disable_rules_marks_known_rules_only() {
        let mut config = SanitizerConfig::default();
        config.disable_rules(&["timestamp".to_string(), "missing".to_string()]);
        assert_eq!(config.validation.len(), 1);
        assert!(!config.validation[0].is_enabled());
    }

    #[test]
    fn yaml_round_trip_preserves_defaults() {
        let yaml = SanitizerConfig::default().to_yaml().unwrap();
        let parsed: SanitizerConfig = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, SanitizerConfig::default());
    }
}

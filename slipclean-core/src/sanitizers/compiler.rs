//! compiler.rs - Compiles validation rules into regexes.
//!
//! Rules are compiled once when an engine is built; the resulting
//! `CompiledRules` are immutable and shared by every sanitization call.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{ValidationRule, MAX_PATTERN_LENGTH};
use crate::errors::SlipcleanError;

/// A single compiled validation rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression, matched anywhere in the text.
    pub regex: Regex,
    /// The unique name of the rule.
    pub name: String,
    /// The rejection reason reported when the rule matches.
    pub reason: String,
}

/// The enabled rules of a configuration, in configuration order.
#[derive(Debug, Default)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

/// Compiles every enabled rule, reporting all failures together.
pub fn compile_rules(rules: &[ValidationRule]) -> Result<CompiledRules, SlipcleanError> {
    debug!("Starting compilation of {} validation rules.", rules.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules {
        if !rule.is_enabled() {
            debug!("Skipping disabled rule '{}'.", rule.name);
            continue;
        }

        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(SlipcleanError::PatternLengthExceeded(
                rule.name.clone(),
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(&rule.pattern)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                debug!("Rule '{}' compiled successfully.", rule.name);
                compiled_rules.push(CompiledRule {
                    regex,
                    name: rule.name.clone(),
                    reason: rule.reason.clone(),
                });
            }
            Err(e) => {
                compilation_errors.push(SlipcleanError::RuleCompilationError(rule.name.clone(), e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(SlipcleanError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
    Ok(CompiledRules { rules: compiled_rules })
}

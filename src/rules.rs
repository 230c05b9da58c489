use anyhow::{Context, Result};
use glob::Pattern;
use serde_json::Value;

use crate::config::{Rule, RuleSet};

/// Result of evaluating a single rule
#[derive(Debug)]
pub struct RuleMatch<'a> {
    pub rule: &'a Rule,
    pub reason: String,
}

/// Evaluate rules in order against a tool call. The first matching rule wins.
pub fn evaluate<'a>(
    rules: &'a RuleSet,
    tool_name: &str,
    tool_input: &Value,
) -> Result<Option<RuleMatch<'a>>> {
    for rule in &rules.rules {
        if rule_matches(rule, tool_name, tool_input)? {
            let reason = rule
                .reason
                .clone()
                .unwrap_or_else(|| default_reason(rule, tool_name));
            return Ok(Some(RuleMatch { rule, reason }));
        }
    }
    Ok(None)
}

fn default_reason(rule: &Rule, tool_name: &str) -> String {
    format!(
        "[{}] tool '{}' is blocked by hook policy",
        rule.name, tool_name
    )
}

fn rule_matches(rule: &Rule, tool_name: &str, tool_input: &Value) -> Result<bool> {
    let pattern = Pattern::new(&rule.when.tool_name).with_context(|| {
        format!(
            "Invalid glob pattern '{}' in rule '{}'",
            rule.when.tool_name, rule.name
        )
    })?;

    if !pattern.matches(tool_name) {
        return Ok(false);
    }

    let Some(needle) = &rule.when.input_contains else {
        return Ok(true);
    };

    let matched = match &rule.when.input_field {
        Some(field) => tool_input
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| s.contains(needle.as_str())),
        None => any_string_contains(tool_input, needle),
    };
    Ok(matched)
}

/// Search every string leaf of a JSON value
fn any_string_contains(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.contains(needle),
        Value::Array(items) => items.iter().any(|v| any_string_contains(v, needle)),
        Value::Object(map) => map.values().any(|v| any_string_contains(v, needle)),
        _ => false,
    }
}

use anyhow::Result;

use super::Handler;
use crate::config::{self, RuleSet};
use crate::decision::Decision;
use crate::event::HookEvent;
use crate::input::InvocationRecord;
use crate::rules;

/// Runs before a tool call. The only handler that may deny.
///
/// Rules come either from a fixed set (tests, embedding) or are resolved per
/// invocation from `$HOOK_RULES` / the nearest `hook-rules.yaml`. No rules
/// means no opinion.
pub struct PreToolUse {
    rules: Option<RuleSet>,
}

impl PreToolUse {
    /// Resolve rules from the environment on every call
    pub fn from_env() -> Self {
        Self { rules: None }
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules: Some(rules) }
    }

    fn evaluate(&self, rule_set: &RuleSet, record: &InvocationRecord) -> Result<Option<Decision>> {
        let tool_name = record.tool_name();
        let tool_input = record.tool_input();

        match rules::evaluate(rule_set, tool_name, tool_input)? {
            Some(matched) => {
                tracing::info!(
                    session_id = record.session_id(),
                    tool = tool_name,
                    rule = %matched.rule.name,
                    "denying tool call"
                );
                Ok(Some(Decision::deny(matched.reason)))
            }
            None => {
                tracing::debug!(tool = tool_name, rules = rule_set.rules.len(), "no rule matched");
                Ok(None)
            }
        }
    }
}

impl Handler for PreToolUse {
    fn event(&self) -> HookEvent {
        HookEvent::PreToolUse
    }

    fn handle(&self, record: &InvocationRecord) -> Result<Option<Decision>> {
        match &self.rules {
            Some(rule_set) => self.evaluate(rule_set, record),
            None => {
                let resolved = config::resolve(record)?;
                self.evaluate(&resolved, record)
            }
        }
    }
}

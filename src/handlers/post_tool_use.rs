use anyhow::Result;

use super::Handler;
use crate::decision::Decision;
use crate::event::HookEvent;
use crate::input::InvocationRecord;

/// Runs after a tool call completed. Informational only.
pub struct PostToolUse;

impl Handler for PostToolUse {
    fn event(&self) -> HookEvent {
        HookEvent::PostToolUse
    }

    fn handle(&self, record: &InvocationRecord) -> Result<Option<Decision>> {
        tracing::debug!(
            session_id = record.session_id(),
            tool = record.tool_name(),
            input = %record.tool_input(),
            response = %record.tool_response(),
            "tool completed"
        );
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_decides() {
        let record = InvocationRecord::parse(
            br#"{"hook_event_name":"PostToolUse","tool_name":"delete_file","tool_input":{},"tool_response":{"ok":true}}"#,
        );
        assert!(PostToolUse.handle(&record).unwrap().is_none());
    }
}

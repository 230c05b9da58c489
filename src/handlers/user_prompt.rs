use anyhow::Result;

use super::Handler;
use crate::decision::Decision;
use crate::event::HookEvent;
use crate::input::InvocationRecord;

/// Runs when the user submits a prompt, before the model sees it.
/// Reads `prompt`; pass-through until filled in.
pub struct UserPromptSubmit;

impl Handler for UserPromptSubmit {
    fn event(&self) -> HookEvent {
        HookEvent::UserPromptSubmit
    }

    fn handle(&self, record: &InvocationRecord) -> Result<Option<Decision>> {
        let prompt = record.prompt();
        tracing::debug!(
            session_id = record.session_id(),
            prompt_chars = prompt.chars().count(),
            "prompt submitted"
        );
        Ok(None)
    }
}

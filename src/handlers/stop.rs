use anyhow::Result;

use super::Handler;
use crate::decision::Decision;
use crate::event::HookEvent;
use crate::input::InvocationRecord;

/// Runs when the session stops. Put teardown and cleanup here.
pub struct Stop;

impl Handler for Stop {
    fn event(&self) -> HookEvent {
        HookEvent::Stop
    }

    fn handle(&self, record: &InvocationRecord) -> Result<Option<Decision>> {
        tracing::debug!(session_id = record.session_id(), "session stopped");
        Ok(None)
    }
}

use anyhow::Result;

use super::Handler;
use crate::decision::Decision;
use crate::event::HookEvent;
use crate::input::InvocationRecord;

/// Runs when the host raises a notification (e.g. waiting for input)
pub struct Notification;

impl Handler for Notification {
    fn event(&self) -> HookEvent {
        HookEvent::Notification
    }

    fn handle(&self, record: &InvocationRecord) -> Result<Option<Decision>> {
        match record.notification() {
            Some(notification) => tracing::debug!(
                session_id = record.session_id(),
                %notification,
                "notification"
            ),
            None => tracing::debug!(session_id = record.session_id(), "empty notification"),
        }
        Ok(None)
    }
}

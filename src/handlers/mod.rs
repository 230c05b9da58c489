use anyhow::Result;

use crate::decision::Decision;
use crate::event::HookEvent;
use crate::input::InvocationRecord;

pub mod notification;
pub mod post_tool_use;
pub mod pre_tool_use;
pub mod stop;
pub mod user_prompt;

pub use notification::Notification;
pub use post_tool_use::PostToolUse;
pub use pre_tool_use::PreToolUse;
pub use stop::Stop;
pub use user_prompt::UserPromptSubmit;

/// One handler per lifecycle event.
///
/// A handler consumes the full invocation record and may return a decision.
/// Returning an error is fine: it is swallowed at the top level and the
/// host sees a hook that did nothing.
pub trait Handler {
    /// Event this handler is registered under
    fn event(&self) -> HookEvent;

    fn handle(&self, record: &InvocationRecord) -> Result<Option<Decision>>;
}

/// The five built-in handlers, in event order
pub fn standard() -> Vec<Box<dyn Handler>> {
    vec![
        Box::new(UserPromptSubmit),
        Box::new(PreToolUse::from_env()),
        Box::new(PostToolUse),
        Box::new(Notification),
        Box::new(Stop),
    ]
}

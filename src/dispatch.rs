use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::{Read, Write};

use crate::decision::Decision;
use crate::event::HookEvent;
use crate::handlers::{self, Handler};
use crate::input::InvocationRecord;

/// Lookup table from event to handler
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<HookEvent, Box<dyn Handler>>,
}

impl Dispatcher {
    /// Empty table: every event is a no-op
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the five built-in handlers
    pub fn standard() -> Self {
        let mut dispatcher = Self::new();
        for handler in handlers::standard() {
            dispatcher.register(handler);
        }
        dispatcher
    }

    /// Register a handler under its event, replacing any previous one
    pub fn register(&mut self, handler: Box<dyn Handler>) -> &mut Self {
        self.handlers.insert(handler.event(), handler);
        self
    }

    /// Route the record to its handler.
    ///
    /// Unknown or missing event names are a silent no-op. Decisions from
    /// events other than PreToolUse are dropped.
    pub fn dispatch(&self, record: &InvocationRecord) -> Result<Option<Decision>> {
        let name = record.event_name();
        let Some(event) = HookEvent::from_name(name) else {
            tracing::debug!(event = name, "unhandled event");
            return Ok(None);
        };
        let Some(handler) = self.handlers.get(&event) else {
            tracing::debug!(%event, "no handler registered");
            return Ok(None);
        };

        let decision = handler
            .handle(record)
            .with_context(|| format!("{} handler failed", event))?;

        match decision {
            Some(decision) if !event.may_decide() => {
                tracing::warn!(
                    %event,
                    reason = %decision.reason,
                    "dropping decision from non-deciding event"
                );
                Ok(None)
            }
            other => Ok(other),
        }
    }
}

/// Read the whole input, dispatch once, write the decision if there is one.
///
/// The decision is only written after the handler returned, so a failing
/// handler never leaves partial output behind.
pub fn run<R: Read, W: Write>(
    dispatcher: &Dispatcher,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let mut raw = Vec::new();
    input.read_to_end(&mut raw).context("read hook input")?;

    let record = InvocationRecord::parse(&raw);
    if let Some(decision) = dispatcher.dispatch(&record)? {
        decision.write_line(out)?;
    }
    Ok(())
}

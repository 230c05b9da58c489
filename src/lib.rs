pub mod config;
pub mod decision;
pub mod dispatch;
pub mod event;
pub mod handlers;
pub mod input;
pub mod logging;
pub mod presets;
pub mod rules;

use anyhow::Result;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use dispatch::Dispatcher;

/// Run the hook: read JSON from stdin, dispatch, maybe write a decision.
///
/// This is the binary entry point. Whatever happens inside, the host sees
/// exit status 0; a broken hook must never break the host's tool pipeline.
pub fn run_hook() -> ExitCode {
    logging::init();
    silence_panics();

    let dispatcher = Dispatcher::standard();
    guarded(|| {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        dispatch::run(&dispatcher, &mut stdin, &mut stdout)
    });

    ExitCode::SUCCESS
}

/// The single guarded region: errors and panics both end here.
/// Returns whether `f` completed cleanly.
pub fn guarded<F>(f: F) -> bool
where
    F: FnOnce() -> Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            tracing::debug!(error = %format!("{:#}", err), "hook failed, ignoring");
            false
        }
        Err(_) => {
            tracing::debug!("hook panicked, ignoring");
            false
        }
    }
}

/// Replace the default panic hook so nothing reaches stderr unless logging
/// is enabled.
fn silence_panics() {
    panic::set_hook(Box::new(|info| {
        tracing::debug!(panic = %info, "panic in hook");
    }));
}

use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `HOOK_LOG=debug`. Unset means silent.
pub const LOG_ENV: &str = "HOOK_LOG";

/// Install a stderr subscriber. stdout belongs to the decision channel.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

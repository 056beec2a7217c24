use std::env;
use std::io::{stdout, IsTerminal};
use tracing_subscriber::EnvFilter;

/// ANSI output on a terminal, JSON lines otherwise. Safe to call twice;
/// the second call leaves the first subscriber in place.
pub fn setup_logging() {
    let is_terminal = stdout().is_terminal();
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let installed = if is_terminal {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .try_init()
    };

    if installed.is_ok() {
        tracing::info!("Logging initialized with level: {:?}", log_level);
    }
}

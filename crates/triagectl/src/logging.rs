//! Logging setup for triagectl
//!
//! Logs go to stderr so they never mix with rendered output. Level
//! priority: --verbose, then RUST_LOG, then the config file.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given inputs
pub fn filter_directive(verbose: bool, env: Option<&str>, config_level: &str) -> String {
    if verbose {
        return "debug".to_string();
    }
    match env {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ => config_level.to_string(),
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool, config_level: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(verbose, env.as_deref(), config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

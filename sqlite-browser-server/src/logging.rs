// Logging setup, powered by tracing-subscriber
//
// RUST_LOG takes precedence. Without it the configured base level applies,
// with chatty dependencies held at warn.

use tracing_subscriber::EnvFilter;

/// Dependencies that log too much at info level
const NOISY_TARGETS: &[(&str, &str)] = &[("sqlx", "warn"), ("hyper", "warn")];

/// Build the `EnvFilter` from the base level and the noisy-crate overrides
fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let mut directives = vec![level.to_string()];
    for (target, target_level) in NOISY_TARGETS {
        directives.push(format!("{}={}", target, target_level));
    }

    let filter_string = directives.join(",");
    EnvFilter::try_new(&filter_string)
        .map_err(|error| anyhow::anyhow!("Invalid tracing filter '{}': {}", filter_string, error))
}

/// Install the global console subscriber
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_env_filter(level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|error| anyhow::anyhow!("Failed to initialize logging: {}", error))
}

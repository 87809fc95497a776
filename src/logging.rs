use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "BUILDPLAN_LOG";

/// Install the global subscriber. `BUILDPLAN_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        eprintln!("Warning: logging already initialised: {e}");
    }
}

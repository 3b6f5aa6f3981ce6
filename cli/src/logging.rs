use tracing_forest::{ForestLayer, printer::PrettyPrinter};
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter, e.g. `spreadprops=debug`.
pub const LOG_ENV: &str = "SPREADPROPS_LOG";

/// Logs go to stderr, stdout only carries the per-file status lines.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(ForestLayer::from(PrettyPrinter::new().writer(std::io::stderr)))
        .init();
}

//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global subscriber.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// `LOG_FORMAT=json` switches to one JSON object per event.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

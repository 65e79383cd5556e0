//! Process-wide log setup.
//!
//! Library code logs through the `log` macros; [`init`] forwards those
//! records into a `tracing` subscriber that writes to stderr.

use std::sync::Once;

use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

static INIT: Once = Once::new();

/// Installs the global subscriber with human-readable output.
///
/// `RUST_LOG` takes precedence over `default_filter`. Only the first call
/// has any effect.
pub fn init(default_filter: &str) {
    init_with_format(default_filter, LogFormat::Text);
}

pub fn init_with_format(default_filter: &str, format: LogFormat) {
    INIT.call_once(|| {
        // Fails only if another logger was installed first.
        LogTracer::init().ok();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let registry = Registry::default().with(filter);

        let result = match format {
            LogFormat::Text => tracing::subscriber::set_global_default(
                registry.with(fmt::layer().with_writer(std::io::stderr)),
            ),
            LogFormat::Json => tracing::subscriber::set_global_default(
                registry.with(fmt::layer().json().with_writer(std::io::stderr)),
            ),
        };
        if let Err(e) = result {
            eprintln!("tracing subscriber already installed: {}", e);
        }
    });
}

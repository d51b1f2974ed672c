//!
//! Setup logging subsystem.
//!

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config;

/// Outcome of [`setup`]: whether this call installed the global subscriber.
#[derive(Debug)]
pub struct LoggerInit {
    installed: bool,
}

impl LoggerInit {
    pub fn is_installed(&self) -> bool {
        self.installed
    }
}

///
/// Setup logging sub-system.
/// `RUST_LOG` takes precedence over the configured level for this crate.
///
pub fn setup(conf: &config::Log) -> LoggerInit {
    if !conf.enabled {
        return LoggerInit { installed: false };
    }

    let mut directives = format!(
        "{}={}",
        env!("CARGO_CRATE_NAME"),
        conf.level.into_level()
    );
    if let Some(extra) = conf.filtering_directive.as_deref() {
        directives.push(',');
        directives.push_str(extra);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let console_layer = match conf.log_format {
        config::LogFormat::Default => fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed(),
        config::LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
    };

    let installed = tracing_subscriber::registry()
        .with(console_layer.with_filter(filter))
        .try_init()
        .is_ok();

    LoggerInit { installed }
}

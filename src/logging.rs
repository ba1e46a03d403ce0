use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{self, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize logging")]
pub struct LoggingError;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured targets. The
/// [`ErrorLayer`] is required for HTTP errors to capture span traces.
pub fn init(cfg: &config::Logging) -> Result<(), LoggingError> {
  let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
    Ok(directives) => EnvFilter::try_new(directives),
    Err(..) => EnvFilter::try_new(&cfg.targets),
  }
  .change_context(LoggingError)
  .attach_printable("invalid logging targets")?;

  let layer = match cfg.style {
    LoggingStyle::Compact => fmt::layer().compact().boxed(),
    LoggingStyle::Full => fmt::layer().boxed(),
    LoggingStyle::Pretty => fmt::layer().pretty().boxed(),
  };

  tracing_subscriber::registry()
    .with(filter)
    .with(layer)
    .with(ErrorLayer::default())
    .try_init()
    .change_context(LoggingError)
}

#[cfg(test)]
pub(crate) fn init_for_tests() {
  tracing_subscriber::registry()
    .with(EnvFilter::new("debug"))
    .with(fmt::layer().with_test_writer())
    .with(ErrorLayer::default())
    .try_init()
    .ok();
}

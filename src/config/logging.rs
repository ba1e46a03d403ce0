use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Logging {
  /// **Environment variables**:
  /// - `DAILYDIET_LOGGING_STYLE`
  ///
  /// There are three styles to choose:
  /// - `compact` - compacts logs but it is readable enough
  /// - `full` - default formatter from [`tracing_subscriber`].
  /// - `pretty` - makes logs pretty
  #[serde(default)]
  pub style: LoggingStyle,

  /// **Environment variables**:
  /// - `DAILYDIET_LOGGING_TARGETS`
  ///
  /// Filters logging events with [`EnvFilter`] directives. `RUST_LOG`
  /// takes precedence over this value if it is set.
  ///
  /// [`EnvFilter`]: tracing_subscriber::EnvFilter
  #[serde(default = "Logging::default_targets")]
  pub targets: String,
}

impl Logging {
  fn default_targets() -> String {
    "info".into()
  }
}

impl Default for Logging {
  fn default() -> Self {
    Self {
      style: LoggingStyle::default(),
      targets: Self::default_targets(),
    }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingStyle {
  Compact,
  #[default]
  Full,
  Pretty,
}

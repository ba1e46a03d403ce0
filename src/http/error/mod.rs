use crate::types;
use error_stack::{Context, Report};
use thiserror::Error;
use tracing_error::SpanTrace;

mod impls;

pub type Result<T> = std::result::Result<T, Error>;

/// Uniform context every underlying report is changed into, so
/// reports of unrelated contexts can be stored in one type.
#[derive(Debug, Error)]
#[error("Failed to handle request")]
pub struct RequestError;

pub struct Error {
  error_type: types::Error,
  report: Report<RequestError>,
  trace: SpanTrace,
}

impl Error {
  #[must_use]
  pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
    Self::from_report(error_type, Report::new(context))
  }

  #[must_use]
  pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
    Self {
      error_type,
      report: report.change_context(RequestError),
      trace: SpanTrace::capture(),
    }
  }

  /// Shorthand for the 405 "User not found." failure.
  #[must_use]
  pub fn user_not_found(user_name: &str) -> Self {
    #[derive(Debug, Error)]
    #[error("User not found")]
    struct MissingUser;

    Self::from_report(
      types::Error::UserNotFound,
      Report::new(MissingUser).attach_printable(format!("user_name: {user_name:?}")),
    )
  }
}

impl Error {
  #[must_use]
  pub fn as_type(&self) -> &types::Error {
    &self.error_type
  }
}

impl std::fmt::Debug for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Error")
      .field("type", &self.error_type)
      .field("report", &self.report)
      .field("trace", &self.trace)
      .finish()
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{:?}", self.report)?;
    std::fmt::Display::fmt(&self.trace, f)
  }
}

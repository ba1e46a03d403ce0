use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;
use serde::Serialize;

use super::Error;
use crate::{database, types::Error as ErrorType};

#[derive(Serialize)]
struct ErrorBody<'a> {
  #[serde(flatten)]
  error: &'a ErrorType,
  message: String,
}

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::InvalidFormBody(..) => StatusCode::BAD_REQUEST,
      ErrorType::NotFound => StatusCode::NOT_FOUND,
      ErrorType::UserNotFound => StatusCode::METHOD_NOT_ALLOWED,
      ErrorType::Conflict => StatusCode::CONFLICT,
      ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    tracing::warn!(error = %self, "request failed");
    HttpResponse::build(self.status_code()).json(ErrorBody {
      error: &self.error_type,
      message: self.error_type.to_string(),
    })
  }
}

impl From<Report<database::Error>> for Error {
  fn from(value: Report<database::Error>) -> Self {
    let error_type = match value.current_context() {
      database::Error::Readonly => ErrorType::ReadonlyMode,
      database::Error::UniqueViolation => ErrorType::Conflict,
      database::Error::NotFound => ErrorType::NotFound,
      _ => ErrorType::Internal,
    };
    Error::from_report(error_type, value)
  }
}

impl From<validator::ValidateError> for Error {
  fn from(value: validator::ValidateError) -> Self {
    #[derive(Debug, thiserror::Error)]
    #[error("Validation error occurred")]
    struct ValidateError;
    Error::from_context(ErrorType::InvalidFormBody(value), ValidateError)
  }
}

use serde::Serialize;
use std::fmt::Display;

/// Every failure a client can observe from the API.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Error {
  Internal,
  InvalidFormBody(validator::ValidateError),
  NotFound,
  UserNotFound,
  Conflict,
  ReadonlyMode,
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::Internal => f.write_str("Failed to perform request"),
      Error::InvalidFormBody(..) => f.write_str("User performed request with invalid body"),
      Error::NotFound => f.write_str("Meal not found."),
      Error::UserNotFound => f.write_str("User not found."),
      Error::Conflict => f.write_str("This user name is already taken."),
      Error::ReadonlyMode => f.write_str("Attempt to write read-only database"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::Token;
  use validator::ValidateError;

  #[track_caller]
  fn assert_unit_variant(value: Error, variant: &'static str) {
    serde_test::assert_ser_tokens(
      &value,
      &[
        Token::Struct {
          name: "Error",
          len: 1,
        },
        Token::Str("type"),
        Token::Str(variant),
        Token::StructEnd,
      ],
    );
  }

  #[test]
  fn test_serde_impl() {
    assert_unit_variant(Error::Internal, "internal");
    assert_unit_variant(Error::NotFound, "not_found");
    assert_unit_variant(Error::UserNotFound, "user_not_found");
    assert_unit_variant(Error::Conflict, "conflict");
    assert_unit_variant(Error::ReadonlyMode, "readonly_mode");
  }

  #[test]
  fn test_invalid_form_body_json() {
    let error = Error::InvalidFormBody(ValidateError::field("user_name", "Must not be empty"));
    assert_eq!(
      serde_json::json!({
        "type": "invalid_form_body",
        "user_name": { "_errors": ["Must not be empty"] },
      }),
      serde_json::to_value(&error).unwrap(),
    );
  }

  #[test]
  fn test_user_not_found_message() {
    assert_eq!(Error::UserNotFound.to_string(), "User not found.");
  }
}

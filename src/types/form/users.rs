use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::schema::User;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateRequest {
  pub name: String,
  pub user_name: String,
}

impl Validate for CreateRequest {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("name", {
      let mut error = ValidateError::msg_builder();
      if !validator::extras::validate_non_empty(self.name.as_str()) {
        error.insert("Name must not be empty");
      }
      error.build()
    });
    fields.insert("user_name", {
      let mut error = ValidateError::msg_builder();
      if !validator::extras::validate_non_empty(self.user_name.as_str()) {
        error.insert("User name must not be empty");
      }
      error.build()
    });
    fields.build().into_result()
  }
}

#[derive(Debug, Deserialize)]
pub struct UserNamePath {
  pub user_name: String,
}

// Any string names a user, absent ones are handled by the operation.
impl Validate for UserNamePath {
  fn validate(&self) -> Result<(), ValidateError> {
    Ok(())
  }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
  pub user: Option<User>,
}

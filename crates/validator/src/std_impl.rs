use crate::{HasLength, Validate, ValidateError};

impl HasLength for str {
  fn length(&self) -> usize {
    self.len()
  }
}

/// Absent values are always valid.
impl<T: Validate> Validate for Option<T> {
  fn validate(&self) -> Result<(), ValidateError> {
    match self {
      Some(value) => value.validate(),
      None => Ok(()),
    }
  }
}

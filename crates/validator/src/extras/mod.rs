mod datetime;
mod url;
mod uuid;

pub use self::datetime::validate_rfc3339;
pub use self::url::validate_url;
pub use self::uuid::validate_uuid;

use crate::HasLength;

#[must_use]
pub fn validate_non_empty<T: HasLength + ?Sized>(value: &T) -> bool {
  value.length() > 0
}

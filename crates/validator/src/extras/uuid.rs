use uuid::Uuid;

/// Accepts only the hyphenated `8-4-4-4-12` form, of any version.
/// Simple, braced and URN encodings are rejected.
#[must_use]
pub fn validate_uuid(value: &str) -> bool {
  value.len() == 36 && Uuid::try_parse(value).is_ok()
}

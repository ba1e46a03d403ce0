use chrono::DateTime;

#[must_use]
pub fn validate_rfc3339(value: &str) -> bool {
  DateTime::parse_from_rfc3339(value).is_ok()
}

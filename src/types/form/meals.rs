use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::schema::{Meal, MealChanges};
use crate::types::id::MealId;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateRequest {
  pub description: String,
  pub name: String,
  pub is_diet: bool,
  pub user_name: String,
}

// The shape is fully enforced while deserializing, any string is accepted.
impl Validate for CreateRequest {
  fn validate(&self) -> Result<(), ValidateError> {
    Ok(())
  }
}

/// Full replacement of a meal's editable fields.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateRequest {
  pub name: String,
  pub description: String,
  pub is_diet: bool,
  pub created_at: String,
}

impl UpdateRequest {
  pub fn into_changes(self) -> Result<MealChanges, ValidateError> {
    let created_at = DateTime::parse_from_rfc3339(&self.created_at)
      .map_err(|_| ValidateError::field("created_at", INVALID_DATETIME))?
      .with_timezone(&Utc);

    Ok(MealChanges {
      name: self.name,
      description: self.description,
      is_diet: self.is_diet,
      created_at,
    })
  }
}

const INVALID_DATETIME: &str = "Invalid date-time, expected RFC 3339 format";
const INVALID_UUID: &str = "Invalid UUID";

impl Validate for UpdateRequest {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("created_at", {
      let mut error = ValidateError::msg_builder();
      if !validator::extras::validate_rfc3339(&self.created_at) {
        error.insert(INVALID_DATETIME);
      }
      error.build()
    });
    fields.build().into_result()
  }
}

/// `/meals/{user_name}/meal/{id}`
#[derive(Debug, Deserialize)]
pub struct UserMealPath {
  pub user_name: String,
  pub id: String,
}

impl UserMealPath {
  pub fn meal_id(&self) -> Result<MealId, ValidateError> {
    self
      .id
      .parse()
      .map_err(|_| ValidateError::field("id", INVALID_UUID))
  }
}

impl Validate for UserMealPath {
  fn validate(&self) -> Result<(), ValidateError> {
    validate_id(&self.id)
  }
}

fn validate_id(id: &str) -> Result<(), ValidateError> {
  let mut fields = ValidateError::field_builder();
  fields.insert("id", {
    let mut error = ValidateError::msg_builder();
    if !validator::extras::validate_uuid(id) {
      error.insert(INVALID_UUID);
    }
    error.build()
  });
  fields.build().into_result()
}

/// `/meals/{id}` as used for deleting a meal.
#[derive(Debug, Deserialize)]
pub struct MealIdPath {
  pub id: String,
}

impl MealIdPath {
  pub fn meal_id(&self) -> Result<MealId, ValidateError> {
    self
      .id
      .parse()
      .map_err(|_| ValidateError::field("id", INVALID_UUID))
  }
}

impl Validate for MealIdPath {
  fn validate(&self) -> Result<(), ValidateError> {
    validate_id(&self.id)
  }
}

/// `/meals/{id}` as used for updating a meal. The id is not
/// required to be a UUID here; one that is not simply matches
/// no meal.
#[derive(Debug, Deserialize)]
pub struct PatchPath {
  pub id: String,
}

impl Validate for PatchPath {
  fn validate(&self) -> Result<(), ValidateError> {
    Ok(())
  }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
  pub meals_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInDietResponse {
  pub meals_in_diet: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsInDietResponse {
  pub metrics_of_diet: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSequenceResponse {
  pub best_sequence: u64,
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn update_request(created_at: &str) -> UpdateRequest {
    UpdateRequest {
      name: "Salad".into(),
      description: "Green salad with olive oil".into(),
      is_diet: true,
      created_at: created_at.into(),
    }
  }

  #[test]
  fn test_update_request() {
    let form = update_request("2023-11-02T08:30:00-03:00");
    assert!(form.validate().is_ok());

    let changes = form.into_changes().unwrap();
    assert_eq!(changes.name, "Salad");
    assert!(changes.is_diet);
    assert_eq!(
      changes.created_at,
      Utc.with_ymd_and_hms(2023, 11, 2, 11, 30, 0).unwrap()
    );
  }

  #[test]
  fn test_update_request_invalid_created_at() {
    let form = update_request("last tuesday");
    assert_eq!(
      form.validate().unwrap_err(),
      ValidateError::field("created_at", INVALID_DATETIME)
    );
    assert!(form.into_changes().is_err());
  }

  #[test]
  fn test_update_request_is_full_replace() {
    let result = serde_json::from_str::<UpdateRequest>(
      r#"{ "name": "Salad", "description": "", "is_diet": true }"#,
    );
    let error = result.unwrap_err().to_string();
    assert!(error.contains("missing field `created_at`"), "{error}");
  }

  #[test]
  fn test_create_request_rejects_wrong_types() {
    let result = serde_json::from_str::<CreateRequest>(
      r#"{ "description": "", "name": "Salad", "is_diet": "yes", "user_name": "alice" }"#,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_meal_paths() {
    let path = UserMealPath {
      user_name: "alice".into(),
      id: "67e55044-10b1-426f-9247-bb680e5fe0c8".into(),
    };
    assert!(path.validate().is_ok());

    let path = UserMealPath {
      user_name: "alice".into(),
      id: "42".into(),
    };
    assert_eq!(
      path.validate().unwrap_err(),
      ValidateError::field("id", INVALID_UUID)
    );

    let path = MealIdPath { id: "42".into() };
    assert!(path.validate().is_err());

    let path = MealIdPath {
      id: "67e5504410b1426f9247bb680e5fe0c8".into(),
    };
    assert_eq!(
      path.validate().unwrap_err(),
      ValidateError::field("id", INVALID_UUID)
    );
  }

  #[test]
  fn test_response_keys() {
    assert_eq!(
      serde_json::json!({ "mealsCount": 4 }),
      serde_json::to_value(SummaryResponse { meals_count: 4 }).unwrap()
    );
    assert_eq!(
      serde_json::json!({ "mealsInDiet": 3 }),
      serde_json::to_value(SummaryInDietResponse { meals_in_diet: 3 }).unwrap()
    );
    assert_eq!(
      serde_json::json!({ "metricsOfDiet": 0.75 }),
      serde_json::to_value(MetricsInDietResponse { metrics_of_diet: 0.75 }).unwrap()
    );
    assert_eq!(
      serde_json::json!({ "bestSequence": 2 }),
      serde_json::to_value(BestSequenceResponse { best_sequence: 2 }).unwrap()
    );
  }

  #[test]
  fn test_nan_ratio_serializes_as_null() {
    assert_eq!(
      serde_json::json!({ "metricsOfDiet": null }),
      serde_json::to_value(MetricsInDietResponse { metrics_of_diet: f64::NAN }).unwrap()
    );
  }
}

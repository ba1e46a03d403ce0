use chrono::{DateTime, Utc};
use error_stack::Report;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, Error, ErrorExt, Result},
  types::id::{MealId, UserId},
};

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct Meal {
  pub id: MealId,
  pub name: String,
  pub description: String,
  pub is_diet: bool,
  pub created_at: DateTime<Utc>,
  pub user_id: UserId,
}

/// Replacement values for every editable column of a meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealChanges {
  pub name: String,
  pub description: String,
  pub is_diet: bool,
  pub created_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, name, description, is_diet, created_at, user_id";

impl Meal {
  #[tracing::instrument(skip(conn), name = "db.meals.insert")]
  pub async fn insert(&self, conn: &mut Connection) -> Result<()> {
    sqlx::query(
      r#"INSERT INTO "meals" (id, name, description, is_diet, created_at, user_id)
         VALUES ($1, $2, $3, $4, $5, $6)"#,
    )
    .bind(self.id)
    .bind(&self.name)
    .bind(&self.description)
    .bind(self.is_diet)
    .bind(self.created_at)
    .bind(self.user_id)
    .execute(conn)
    .await
    .into_db_error()?;

    Ok(())
  }

  #[tracing::instrument(skip(conn), name = "db.meals.by_user")]
  pub async fn by_user(conn: &mut Connection, user_id: UserId) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(&format!(
      r#"SELECT {COLUMNS} FROM "meals" WHERE user_id = $1 ORDER BY position"#
    ))
    .bind(user_id)
    .fetch_all(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn), name = "db.meals.by_user_and_id")]
  pub async fn by_user_and_id(
    conn: &mut Connection,
    user_id: UserId,
    id: MealId,
  ) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(&format!(
      r#"SELECT {COLUMNS} FROM "meals" WHERE user_id = $1 AND id = $2 ORDER BY position"#
    ))
    .bind(user_id)
    .bind(id)
    .fetch_all(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn), name = "db.meals.count_by_user")]
  pub async fn count_by_user(conn: &mut Connection, user_id: UserId) -> Result<u64> {
    let count = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM "meals" WHERE user_id = $1"#)
      .bind(user_id)
      .fetch_one(conn)
      .await
      .into_db_error()?;

    Ok(u64::try_from(count).unwrap_or_default())
  }

  #[tracing::instrument(skip(conn), name = "db.meals.count_diet_by_user")]
  pub async fn count_diet_by_user(conn: &mut Connection, user_id: UserId) -> Result<u64> {
    let count = sqlx::query_scalar::<_, i64>(
      r#"SELECT COUNT(*) FROM "meals" WHERE user_id = $1 AND is_diet"#,
    )
    .bind(user_id)
    .fetch_one(conn)
    .await
    .into_db_error()?;

    Ok(u64::try_from(count).unwrap_or_default())
  }

  /// Overwrites the meal; fails with [`Error::NotFound`] if no row
  /// was affected.
  #[tracing::instrument(skip(conn), name = "db.meals.update")]
  pub async fn update(conn: &mut Connection, id: MealId, changes: &MealChanges) -> Result<()> {
    let result = sqlx::query(
      r#"UPDATE "meals"
         SET name = $2, description = $3, is_diet = $4, created_at = $5
         WHERE id = $1"#,
    )
    .bind(id)
    .bind(&changes.name)
    .bind(&changes.description)
    .bind(changes.is_diet)
    .bind(changes.created_at)
    .execute(conn)
    .await
    .into_db_error()?;

    if result.rows_affected() == 0 {
      return Err(Report::new(Error::NotFound));
    }
    Ok(())
  }

  #[tracing::instrument(skip(conn), name = "db.meals.delete")]
  pub async fn delete(conn: &mut Connection, id: MealId) -> Result<()> {
    let result = sqlx::query(r#"DELETE FROM "meals" WHERE id = $1"#)
      .bind(id)
      .execute(conn)
      .await
      .into_db_error()?;

    if result.rows_affected() == 0 {
      return Err(Report::new(Error::NotFound));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_serialize() {
    let meal = Meal {
      id: MealId::generate(),
      name: "Salad".into(),
      description: "Green salad".into(),
      is_diet: true,
      created_at: Utc.with_ymd_and_hms(2023, 11, 2, 11, 30, 0).unwrap(),
      user_id: UserId::generate(),
    };

    assert_eq!(
      serde_json::json!({
        "id": meal.id.to_string(),
        "name": "Salad",
        "description": "Green salad",
        "is_diet": true,
        "created_at": "2023-11-02T11:30:00Z",
        "user_id": meal.user_id.to_string(),
      }),
      serde_json::to_value(&meal).unwrap()
    );
  }
}

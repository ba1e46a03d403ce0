use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::UserId,
};

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct User {
  pub id: UserId,
  pub name: String,
  pub user_name: String,
}

impl User {
  #[must_use]
  pub fn new(name: String, user_name: String) -> Self {
    Self {
      id: UserId::generate(),
      name,
      user_name,
    }
  }

  #[tracing::instrument(skip(conn), name = "db.users.insert")]
  pub async fn insert(&self, conn: &mut Connection) -> Result<()> {
    sqlx::query(r#"INSERT INTO "users" (id, name, user_name) VALUES ($1, $2, $3)"#)
      .bind(self.id)
      .bind(&self.name)
      .bind(&self.user_name)
      .execute(conn)
      .await
      .into_db_error()?;

    Ok(())
  }

  #[tracing::instrument(skip(conn), name = "db.users.list")]
  pub async fn list(conn: &mut Connection) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT id, name, user_name FROM "users" ORDER BY position"#)
      .fetch_all(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn), name = "db.users.by_user_name")]
  pub async fn by_user_name(conn: &mut Connection, user_name: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT id, name, user_name FROM "users" WHERE user_name = $1"#)
      .bind(user_name)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }
}

use async_trait::async_trait;
use error_stack::Report;

use super::{Error, ErrorExt2, Pool, PoolConnection, Result, Store};
use crate::config;
use crate::schema::{Meal, MealChanges, User};
use crate::types::id::{MealId, UserId};

/// [`Store`] backed by a primary Postgres pool and an optional
/// read replica.
#[derive(Debug, Clone)]
pub struct PgStore {
  primary: Pool,
  replica: Option<Pool>,
}

impl PgStore {
  #[tracing::instrument(skip_all)]
  pub async fn connect(cfg: &config::Database) -> Result<Self> {
    let primary = Pool::new(cfg, &cfg.primary).await?;
    let replica = if let Some(replica) = cfg.replica.as_ref() {
      Some(Pool::new(cfg, replica).await?)
    } else {
      None
    };

    Ok(Self { primary, replica })
  }

  /// Runs pending migrations against the primary pool.
  pub async fn migrate(&self) -> Result<()> {
    if self.primary.is_readonly() {
      tracing::warn!("primary database is read-only, skipping migrations");
      return Ok(());
    }
    self.primary.migrate().await
  }

  #[tracing::instrument(skip_all)]
  async fn db_write(&self) -> Result<PoolConnection> {
    if self.primary.is_readonly() {
      return Err(Report::new(Error::Readonly));
    }
    self.primary.get().await
  }

  #[tracing::instrument(skip_all)]
  async fn db_read(&self) -> Result<PoolConnection> {
    if let Some(replica) = self.replica.as_ref() {
      match replica.get().await {
        Ok(conn) => return Ok(conn),
        // fallback
        Err(err) if err.is_unhealthy() => {
          tracing::warn!("replica database is unhealthy, falling back to primary");
        }
        Err(err) => return Err(err),
      }
    }
    self.primary.get().await
  }
}

#[async_trait]
impl Store for PgStore {
  async fn insert_user(&self, user: &User) -> Result<()> {
    let mut conn = self.db_write().await?;
    user.insert(&mut conn).await
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let mut conn = self.db_read().await?;
    User::list(&mut conn).await
  }

  async fn user_by_name(&self, user_name: &str) -> Result<Option<User>> {
    let mut conn = self.db_read().await?;
    User::by_user_name(&mut conn, user_name).await
  }

  async fn insert_meal(&self, meal: &Meal) -> Result<()> {
    let mut conn = self.db_write().await?;
    meal.insert(&mut conn).await
  }

  async fn meals_by_user(&self, user_id: UserId) -> Result<Vec<Meal>> {
    let mut conn = self.db_read().await?;
    Meal::by_user(&mut conn, user_id).await
  }

  async fn meals_by_user_and_id(&self, user_id: UserId, meal_id: MealId) -> Result<Vec<Meal>> {
    let mut conn = self.db_read().await?;
    Meal::by_user_and_id(&mut conn, user_id, meal_id).await
  }

  async fn count_meals(&self, user_id: UserId) -> Result<u64> {
    let mut conn = self.db_read().await?;
    Meal::count_by_user(&mut conn, user_id).await
  }

  async fn count_diet_meals(&self, user_id: UserId) -> Result<u64> {
    let mut conn = self.db_read().await?;
    Meal::count_diet_by_user(&mut conn, user_id).await
  }

  async fn update_meal(&self, meal_id: MealId, changes: &MealChanges) -> Result<()> {
    let mut conn = self.db_write().await?;
    Meal::update(&mut conn, meal_id, changes).await
  }

  async fn delete_meal(&self, meal_id: MealId) -> Result<()> {
    let mut conn = self.db_write().await?;
    Meal::delete(&mut conn, meal_id).await
  }
}

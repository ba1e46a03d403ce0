use async_trait::async_trait;

use super::Result;
use crate::schema::{Meal, MealChanges, User};
use crate::types::id::{MealId, UserId};

/// Persistence seam for users and meals.
///
/// Listing operations must return records in insertion order.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
  /// Fails with [`UniqueViolation`](super::Error::UniqueViolation) if
  /// the user name is already taken.
  async fn insert_user(&self, user: &User) -> Result<()>;

  async fn list_users(&self) -> Result<Vec<User>>;

  async fn user_by_name(&self, user_name: &str) -> Result<Option<User>>;

  async fn insert_meal(&self, meal: &Meal) -> Result<()>;

  async fn meals_by_user(&self, user_id: UserId) -> Result<Vec<Meal>>;

  async fn meals_by_user_and_id(&self, user_id: UserId, meal_id: MealId) -> Result<Vec<Meal>>;

  async fn count_meals(&self, user_id: UserId) -> Result<u64>;

  async fn count_diet_meals(&self, user_id: UserId) -> Result<u64>;

  /// Fails with [`NotFound`](super::Error::NotFound) if no meal
  /// has the given id.
  async fn update_meal(&self, meal_id: MealId, changes: &MealChanges) -> Result<()>;

  /// Fails with [`NotFound`](super::Error::NotFound) if no meal
  /// has the given id.
  async fn delete_meal(&self, meal_id: MealId) -> Result<()>;
}

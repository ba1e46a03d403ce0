use async_trait::async_trait;
use error_stack::Report;
use std::sync::{Mutex, MutexGuard};

use super::{Error, Result, Store};
use crate::schema::{Meal, MealChanges, User};
use crate::types::id::{MealId, UserId};

/// In-process [`Store`] used by tests that do not need Postgres.
#[derive(Debug, Default)]
pub struct MemoryStore {
  state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
  users: Vec<User>,
  meals: Vec<Meal>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Every stored meal, in insertion order.
  pub fn meals(&self) -> Vec<Meal> {
    self.state().meals.clone()
  }

  fn state(&self) -> MutexGuard<'_, State> {
    self
      .state
      .lock()
      .unwrap_or_else(std::sync::PoisonError::into_inner)
  }
}

#[async_trait]
impl Store for MemoryStore {
  async fn insert_user(&self, user: &User) -> Result<()> {
    let mut state = self.state();
    if state.users.iter().any(|v| v.user_name == user.user_name) {
      return Err(Report::new(Error::UniqueViolation));
    }
    state.users.push(user.clone());
    Ok(())
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    Ok(self.state().users.clone())
  }

  async fn user_by_name(&self, user_name: &str) -> Result<Option<User>> {
    let state = self.state();
    Ok(state.users.iter().find(|v| v.user_name == user_name).cloned())
  }

  async fn insert_meal(&self, meal: &Meal) -> Result<()> {
    self.state().meals.push(meal.clone());
    Ok(())
  }

  async fn meals_by_user(&self, user_id: UserId) -> Result<Vec<Meal>> {
    let state = self.state();
    Ok(
      state
        .meals
        .iter()
        .filter(|v| v.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn meals_by_user_and_id(&self, user_id: UserId, meal_id: MealId) -> Result<Vec<Meal>> {
    let state = self.state();
    Ok(
      state
        .meals
        .iter()
        .filter(|v| v.user_id == user_id && v.id == meal_id)
        .cloned()
        .collect(),
    )
  }

  async fn count_meals(&self, user_id: UserId) -> Result<u64> {
    let state = self.state();
    Ok(state.meals.iter().filter(|v| v.user_id == user_id).count() as u64)
  }

  async fn count_diet_meals(&self, user_id: UserId) -> Result<u64> {
    let state = self.state();
    Ok(
      state
        .meals
        .iter()
        .filter(|v| v.user_id == user_id && v.is_diet)
        .count() as u64,
    )
  }

  async fn update_meal(&self, meal_id: MealId, changes: &MealChanges) -> Result<()> {
    let mut state = self.state();
    let meal = state
      .meals
      .iter_mut()
      .find(|v| v.id == meal_id)
      .ok_or_else(|| Report::new(Error::NotFound))?;

    meal.name = changes.name.clone();
    meal.description = changes.description.clone();
    meal.is_diet = changes.is_diet;
    meal.created_at = changes.created_at;
    Ok(())
  }

  async fn delete_meal(&self, meal_id: MealId) -> Result<()> {
    let mut state = self.state();
    let before = state.meals.len();
    state.meals.retain(|v| v.id != meal_id);
    if state.meals.len() == before {
      return Err(Report::new(Error::NotFound));
    }
    Ok(())
  }
}

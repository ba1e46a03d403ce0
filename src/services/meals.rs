use chrono::Utc;
use thiserror::Error;

use crate::{
  http::{Error, Result},
  schema::{Meal, MealChanges, User},
  types::{self, id::MealId},
  App,
};

#[tracing::instrument(skip(app))]
async fn resolve_user(app: &App, user_name: &str) -> Result<User> {
  match app.store.user_by_name(user_name).await? {
    Some(user) => Ok(user),
    None => Err(Error::user_not_found(user_name)),
  }
}

#[derive(Debug)]
pub struct CreateMeal<'a> {
  pub name: &'a str,
  pub description: &'a str,
  pub is_diet: bool,
  pub user_name: &'a str,
}

impl CreateMeal<'_> {
  #[tracing::instrument(skip(app), name = "services.meals.create")]
  pub async fn perform(self, app: &App) -> Result<Meal> {
    let user = resolve_user(app, self.user_name).await?;
    let meal = Meal {
      id: MealId::generate(),
      name: self.name.to_string(),
      description: self.description.to_string(),
      is_diet: self.is_diet,
      created_at: Utc::now(),
      user_id: user.id,
    };

    app.store.insert_meal(&meal).await?;
    Ok(meal)
  }
}

#[derive(Debug)]
pub struct ListMeals<'a> {
  pub user_name: &'a str,
}

impl ListMeals<'_> {
  #[tracing::instrument(skip(app), name = "services.meals.list")]
  pub async fn perform(self, app: &App) -> Result<Vec<Meal>> {
    let user = resolve_user(app, self.user_name).await?;
    Ok(app.store.meals_by_user(user.id).await?)
  }
}

/// Yields every meal of the user with the given id, at most one.
/// A meal owned by somebody else yields nothing.
#[derive(Debug)]
pub struct GetMeal<'a> {
  pub user_name: &'a str,
  pub id: MealId,
}

impl GetMeal<'_> {
  #[tracing::instrument(skip(app), name = "services.meals.get")]
  pub async fn perform(self, app: &App) -> Result<Vec<Meal>> {
    let user = resolve_user(app, self.user_name).await?;
    Ok(app.store.meals_by_user_and_id(user.id, self.id).await?)
  }
}

#[derive(Debug)]
pub struct CountMeals<'a> {
  pub user_name: &'a str,
}

impl CountMeals<'_> {
  #[tracing::instrument(skip(app), name = "services.meals.count")]
  pub async fn perform(self, app: &App) -> Result<u64> {
    let user = resolve_user(app, self.user_name).await?;
    Ok(app.store.count_meals(user.id).await?)
  }
}

#[derive(Debug)]
pub struct CountDietMeals<'a> {
  pub user_name: &'a str,
}

impl CountDietMeals<'_> {
  #[tracing::instrument(skip(app), name = "services.meals.count_diet")]
  pub async fn perform(self, app: &App) -> Result<u64> {
    let user = resolve_user(app, self.user_name).await?;
    Ok(app.store.count_diet_meals(user.id).await?)
  }
}

/// Share of the user's meals that are on diet. A user without
/// meals yields `NaN`.
#[derive(Debug)]
pub struct DietRatio<'a> {
  pub user_name: &'a str,
}

impl DietRatio<'_> {
  #[tracing::instrument(skip(app), name = "services.meals.diet_ratio")]
  #[allow(clippy::cast_precision_loss)]
  pub async fn perform(self, app: &App) -> Result<f64> {
    let user = resolve_user(app, self.user_name).await?;
    let in_diet = app.store.count_diet_meals(user.id).await?;
    let total = app.store.count_meals(user.id).await?;
    Ok(in_diet as f64 / total as f64)
  }
}

#[derive(Debug)]
pub struct BestSequence<'a> {
  pub user_name: &'a str,
}

impl BestSequence<'_> {
  #[tracing::instrument(skip(app), name = "services.meals.best_sequence")]
  pub async fn perform(self, app: &App) -> Result<u64> {
    let user = resolve_user(app, self.user_name).await?;
    let meals = app.store.meals_by_user(user.id).await?;
    Ok(best_sequence(meals.iter().map(|v| v.is_diet)))
  }
}

/// Length of the longest run of consecutive `true` values.
pub fn best_sequence(is_diet: impl IntoIterator<Item = bool>) -> u64 {
  let mut best = 0;
  let mut current = 0;
  for value in is_diet {
    if value {
      current += 1;
      best = best.max(current);
    } else {
      current = 0;
    }
  }
  best
}

/// Replaces every editable field of a meal.
#[derive(Debug)]
pub struct UpdateMeal<'a> {
  /// Raw id from the request. One that is not a UUID cannot name
  /// any meal and fails like a missing one.
  pub id: &'a str,
  pub changes: MealChanges,
}

impl UpdateMeal<'_> {
  #[tracing::instrument(skip(app), name = "services.meals.update")]
  pub async fn perform(self, app: &App) -> Result<()> {
    #[derive(Debug, Error)]
    #[error("Meal id is not a UUID")]
    struct MalformedId;

    let Ok(id) = self.id.parse::<MealId>() else {
      return Err(Error::from_context(types::Error::NotFound, MalformedId));
    };
    app.store.update_meal(id, &self.changes).await?;
    Ok(())
  }
}

#[derive(Debug)]
pub struct DeleteMeal {
  pub id: MealId,
}

impl DeleteMeal {
  #[tracing::instrument(skip(app), name = "services.meals.delete")]
  pub async fn perform(self, app: &App) -> Result<()> {
    app.store.delete_meal(self.id).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils;
  use chrono::TimeZone;

  #[test]
  fn test_best_sequence() {
    assert_eq!(best_sequence([]), 0);
    assert_eq!(best_sequence([true]), 1);
    assert_eq!(best_sequence([false]), 0);
    assert_eq!(best_sequence([true, true, false, true]), 2);
    assert_eq!(best_sequence([true, false, true, true, true]), 3);
    assert_eq!(best_sequence([false, false, true, false]), 1);
  }

  #[test]
  fn test_best_sequence_matches_longest_run() {
    // every sequence of up to 10 meals
    for len in 0..=10u32 {
      for bits in 0..(1u32 << len) {
        let seq = (0..len).map(|i| bits & (1 << i) != 0).collect::<Vec<_>>();
        let longest = seq
          .split(|v| !v)
          .map(<[bool]>::len)
          .max()
          .unwrap_or_default() as u64;
        assert_eq!(best_sequence(seq.iter().copied()), longest, "{seq:?}");
      }
    }
  }

  #[tokio::test]
  async fn should_reject_meal_for_unknown_user() {
    let (app, store) = test_utils::build_test_app_with_store();
    test_utils::create_user(&app, "alice").await;

    let error = CreateMeal {
      name: "Salad",
      description: "Green salad",
      is_diet: true,
      user_name: "nobody",
    }
    .perform(&app)
    .await
    .unwrap_err();

    assert_eq!(error.as_type(), &types::Error::UserNotFound);
    assert!(store.meals().is_empty());
  }

  #[tokio::test]
  async fn should_list_meals_in_insertion_order() {
    let app = test_utils::build_test_app();
    let alice = test_utils::create_user(&app, "alice").await;
    let bob = test_utils::create_user(&app, "bob").await;

    let first = test_utils::create_meal(&app, &alice, true).await;
    test_utils::create_meal(&app, &bob, true).await;
    let second = test_utils::create_meal(&app, &alice, false).await;

    let meals = ListMeals { user_name: "alice" }
      .perform(&app)
      .await
      .unwrap();
    assert_eq!(meals, vec![first, second]);
  }

  #[tokio::test]
  async fn should_get_meal_only_for_its_owner() {
    let app = test_utils::build_test_app();
    let alice = test_utils::create_user(&app, "alice").await;
    test_utils::create_user(&app, "bob").await;
    let meal = test_utils::create_meal(&app, &alice, true).await;

    let found = GetMeal {
      user_name: "alice",
      id: meal.id,
    }
    .perform(&app)
    .await
    .unwrap();
    assert_eq!(found, vec![meal.clone()]);

    let found = GetMeal {
      user_name: "bob",
      id: meal.id,
    }
    .perform(&app)
    .await
    .unwrap();
    assert!(found.is_empty());
  }

  #[tokio::test]
  async fn should_compute_metrics() {
    let app = test_utils::build_test_app();
    let alice = test_utils::create_user(&app, "alice").await;
    for is_diet in [true, true, false, true] {
      test_utils::create_meal(&app, &alice, is_diet).await;
    }

    let count = CountMeals { user_name: "alice" }.perform(&app).await.unwrap();
    let in_diet = CountDietMeals { user_name: "alice" }
      .perform(&app)
      .await
      .unwrap();
    let ratio = DietRatio { user_name: "alice" }.perform(&app).await.unwrap();
    let best = BestSequence { user_name: "alice" }
      .perform(&app)
      .await
      .unwrap();

    assert_eq!(count, 4);
    assert_eq!(in_diet, 3);
    assert!((ratio - 0.75).abs() < f64::EPSILON);
    assert_eq!(best, 2);
  }

  #[tokio::test]
  async fn should_yield_nan_ratio_without_meals() {
    let app = test_utils::build_test_app();
    test_utils::create_user(&app, "alice").await;

    let ratio = DietRatio { user_name: "alice" }.perform(&app).await.unwrap();
    assert!(ratio.is_nan());
  }

  #[tokio::test]
  async fn should_require_user_for_metrics() {
    let app = test_utils::build_test_app();
    let error = BestSequence { user_name: "nobody" }
      .perform(&app)
      .await
      .unwrap_err();
    assert_eq!(error.as_type(), &types::Error::UserNotFound);
  }

  #[tokio::test]
  async fn should_update_meal() {
    let app = test_utils::build_test_app();
    let alice = test_utils::create_user(&app, "alice").await;
    let meal = test_utils::create_meal(&app, &alice, false).await;

    let changes = MealChanges {
      name: "Soup".into(),
      description: "Vegetable soup".into(),
      is_diet: true,
      created_at: Utc.with_ymd_and_hms(2023, 11, 2, 12, 0, 0).unwrap(),
    };
    UpdateMeal {
      id: &meal.id.to_string(),
      changes: changes.clone(),
    }
    .perform(&app)
    .await
    .unwrap();

    let meals = ListMeals { user_name: "alice" }
      .perform(&app)
      .await
      .unwrap();
    assert_eq!(meals[0].name, changes.name);
    assert_eq!(meals[0].description, changes.description);
    assert!(meals[0].is_diet);
    assert_eq!(meals[0].created_at, changes.created_at);
    assert_eq!(meals[0].user_id, alice.id);
  }

  #[tokio::test]
  async fn should_fail_updating_unknown_meal() {
    let app = test_utils::build_test_app();
    let changes = MealChanges {
      name: "Soup".into(),
      description: String::new(),
      is_diet: true,
      created_at: Utc::now(),
    };

    let unknown = MealId::generate().to_string();
    for id in [unknown.as_str(), "not-a-uuid"] {
      let error = UpdateMeal {
        id,
        changes: changes.clone(),
      }
      .perform(&app)
      .await
      .unwrap_err();
      assert_eq!(error.as_type(), &types::Error::NotFound);
    }
  }

  #[tokio::test]
  async fn should_delete_only_the_given_meal() {
    let app = test_utils::build_test_app();
    let alice = test_utils::create_user(&app, "alice").await;
    let doomed = test_utils::create_meal(&app, &alice, true).await;
    let kept = test_utils::create_meal(&app, &alice, true).await;

    DeleteMeal { id: doomed.id }.perform(&app).await.unwrap();
    let error = DeleteMeal { id: doomed.id }
      .perform(&app)
      .await
      .unwrap_err();
    assert_eq!(error.as_type(), &types::Error::NotFound);

    let meals = ListMeals { user_name: "alice" }
      .perform(&app)
      .await
      .unwrap();
    assert_eq!(meals, vec![kept]);
  }
}

use std::sync::Arc;

use crate::{
  config,
  database::memory::MemoryStore,
  schema::{Meal, User},
  services::{meals::CreateMeal, users::CreateUser},
  App,
};

pub fn test_config() -> config::Server {
  crate::logging::init_for_tests();

  serde_json::from_value(serde_json::json!({
    "db": { "primary": { "url": "postgres://localhost/dailydiet" } },
  }))
  .unwrap()
}

/// Builds an [`App`] backed by an empty in-memory store.
pub fn build_test_app() -> App {
  build_test_app_with_store().0
}

/// Same as [`build_test_app`] but also hands out the store so
/// tests can inspect what was persisted.
pub fn build_test_app_with_store() -> (App, Arc<MemoryStore>) {
  let store = Arc::new(MemoryStore::new());
  let app = App::with_store(test_config(), store.clone());
  (app, store)
}

/// Creates a user whose display name is the capitalized handle.
pub async fn create_user(app: &App, user_name: &str) -> User {
  let mut name = user_name.to_string();
  if let Some(first) = name.get_mut(..1) {
    first.make_ascii_uppercase();
  }

  CreateUser {
    name: &name,
    user_name,
  }
  .perform(app)
  .await
  .unwrap()
}

pub async fn create_meal(app: &App, user: &User, is_diet: bool) -> Meal {
  CreateMeal {
    name: if is_diet { "Salad" } else { "Burger" },
    description: "Lunch",
    is_diet,
    user_name: &user.user_name,
  }
  .perform(app)
  .await
  .unwrap()
}

/// Initializes the actix service with every route mounted over
/// the given [`App`].
macro_rules! init_service {
  ($app:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($app.clone()))
        .configure($crate::http::controllers::configure),
    )
    .await
  };
}

pub(crate) use init_service;

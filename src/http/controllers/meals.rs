use actix_web::{web, HttpResponse};

use crate::{
  http::{
    extract::{Json, Path},
    Error,
  },
  services::meals::{
    BestSequence, CountDietMeals, CountMeals, CreateMeal, DeleteMeal, DietRatio, GetMeal,
    ListMeals, UpdateMeal,
  },
  types::form::{meals, users::UserNamePath},
  App,
};

#[tracing::instrument]
pub async fn create(
  app: web::Data<App>,
  form: Json<meals::CreateRequest>,
) -> Result<HttpResponse, Error> {
  CreateMeal {
    name: &form.name,
    description: &form.description,
    is_diet: form.is_diet,
    user_name: &form.user_name,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Created().finish())
}

#[tracing::instrument]
pub async fn list(app: web::Data<App>, path: Path<UserNamePath>) -> Result<HttpResponse, Error> {
  let meals = ListMeals {
    user_name: &path.user_name,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(meals::ListResponse { meals }))
}

#[tracing::instrument]
pub async fn get(
  app: web::Data<App>,
  path: Path<meals::UserMealPath>,
) -> Result<HttpResponse, Error> {
  let meals = GetMeal {
    user_name: &path.user_name,
    id: path.meal_id()?,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(meals::ListResponse { meals }))
}

#[tracing::instrument]
pub async fn summary(
  app: web::Data<App>,
  path: Path<UserNamePath>,
) -> Result<HttpResponse, Error> {
  let meals_count = CountMeals {
    user_name: &path.user_name,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(meals::SummaryResponse { meals_count }))
}

#[tracing::instrument]
pub async fn summary_in_diet(
  app: web::Data<App>,
  path: Path<UserNamePath>,
) -> Result<HttpResponse, Error> {
  let meals_in_diet = CountDietMeals {
    user_name: &path.user_name,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(meals::SummaryInDietResponse { meals_in_diet }))
}

#[tracing::instrument]
pub async fn metrics_in_diet(
  app: web::Data<App>,
  path: Path<UserNamePath>,
) -> Result<HttpResponse, Error> {
  let metrics_of_diet = DietRatio {
    user_name: &path.user_name,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(meals::MetricsInDietResponse { metrics_of_diet }))
}

#[tracing::instrument]
pub async fn best_sequence(
  app: web::Data<App>,
  path: Path<UserNamePath>,
) -> Result<HttpResponse, Error> {
  let best_sequence = BestSequence {
    user_name: &path.user_name,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(meals::BestSequenceResponse { best_sequence }))
}

#[tracing::instrument]
pub async fn update(
  app: web::Data<App>,
  path: Path<meals::PatchPath>,
  form: Json<meals::UpdateRequest>,
) -> Result<HttpResponse, Error> {
  UpdateMeal {
    id: &path.id,
    changes: form.into_inner().into_changes()?,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Created().finish())
}

#[tracing::instrument]
pub async fn delete(
  app: web::Data<App>,
  path: Path<meals::MealIdPath>,
) -> Result<HttpResponse, Error> {
  DeleteMeal {
    id: path.meal_id()?,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Created().finish())
}

use actix_web::{web, HttpResponse};

use crate::{
  http::{
    extract::{Json, Path},
    Error,
  },
  services::users::{CreateUser, GetUser, ListUsers},
  types::form::users,
  App,
};

#[tracing::instrument]
pub async fn create(
  app: web::Data<App>,
  form: Json<users::CreateRequest>,
) -> Result<HttpResponse, Error> {
  CreateUser {
    name: &form.name,
    user_name: &form.user_name,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Created().finish())
}

#[tracing::instrument]
pub async fn list(app: web::Data<App>) -> Result<HttpResponse, Error> {
  let users = ListUsers.perform(&app).await?;
  Ok(HttpResponse::Ok().json(users::ListResponse { users }))
}

#[tracing::instrument]
pub async fn profile(
  app: web::Data<App>,
  path: Path<users::UserNamePath>,
) -> Result<HttpResponse, Error> {
  let user = GetUser {
    user_name: &path.user_name,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(users::ProfileResponse { user }))
}

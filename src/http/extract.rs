use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, LocalBoxFuture, Ready};
use serde::de::DeserializeOwned;
use std::ops::Deref;
use validator::{Validate, ValidateError};

use super::Error;

/// Local version of [`web::Json`] that reports deserialization
/// failures as `invalid_form_body` and validates the value before
/// the handler runs.
#[derive(Debug)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Deref for Json<T> {
  type Target = T;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl<T> FromRequest for Json<T>
where
  T: DeserializeOwned + Validate + 'static,
{
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
    let body = web::Json::<T>::from_request(req, payload);
    Box::pin(async move {
      let value = body.await.map_err(|e| rejected(&e))?.into_inner();
      value.validate()?;
      Ok(Json(value))
    })
  }
}

/// Local version of [`web::Path`] that validates the matched
/// segments before the handler runs.
#[derive(Debug)]
pub struct Path<T>(pub T);

impl<T> Deref for Path<T> {
  type Target = T;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl<T> FromRequest for Path<T>
where
  T: DeserializeOwned + Validate,
{
  type Error = Error;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(
      req
        .match_info()
        .load::<T>()
        .map_err(|e| rejected(&e))
        .and_then(|value| {
          value.validate()?;
          Ok(Path(value))
        }),
    )
  }
}

fn rejected(error: &impl std::fmt::Display) -> Error {
  let mut message = ValidateError::msg_builder();
  message.insert(error.to_string());
  message.build().into()
}

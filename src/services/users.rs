use crate::{http::Result, schema::User, App};

#[derive(Debug)]
pub struct CreateUser<'a> {
  pub name: &'a str,
  pub user_name: &'a str,
}

impl CreateUser<'_> {
  #[tracing::instrument(skip(app), name = "services.users.create")]
  pub async fn perform(self, app: &App) -> Result<User> {
    let user = User::new(self.name.to_string(), self.user_name.to_string());
    // the unique constraint surfaces as `conflict`
    app.store.insert_user(&user).await?;
    Ok(user)
  }
}

#[derive(Debug)]
pub struct ListUsers;

impl ListUsers {
  #[tracing::instrument(skip(app), name = "services.users.list")]
  pub async fn perform(self, app: &App) -> Result<Vec<User>> {
    Ok(app.store.list_users().await?)
  }
}

/// Looks up a user; a missing one is not an error.
#[derive(Debug)]
pub struct GetUser<'a> {
  pub user_name: &'a str,
}

impl GetUser<'_> {
  #[tracing::instrument(skip(app), name = "services.users.get")]
  pub async fn perform(self, app: &App) -> Result<Option<User>> {
    Ok(app.store.user_by_name(self.user_name).await?)
  }
}

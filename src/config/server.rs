use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use validator::{Validate, ValidateError};

use super::ParseError;
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

#[derive(Debug, Deserialize)]
pub struct Server {
  pub db: super::Database,
  #[serde(default)]
  pub http: super::Http,
  #[serde(default)]
  pub logging: super::Logging,
}

impl Server {
  pub fn load() -> Result<Self, ParseError> {
    dotenvy::dotenv().ok();

    let config = Self::figment()
      .extract::<Self>()
      .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

    config
      .validate()
      .into_validator_report()
      .change_context(ParseError)?;

    Ok(config)
  }
}

impl Validate for Server {
  fn validate(&self) -> std::result::Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if let Err(error) = self.db.validate() {
      fields.insert("db", error);
    }
    if let Err(error) = self.http.validate() {
      fields.insert("http", error);
    }
    fields.build().into_result()
  }
}

impl Server {
  const DEFAULT_CONFIG_FILE: &'static str = "dailydiet.toml";

  /// Creates a default [`Figment`] object to load server
  /// configuration. It is separated from [`Server::load`]
  /// so tests can extract without validating.
  ///
  /// [`Figment`]: figment::Figment
  pub(crate) fn figment() -> figment::Figment {
    use figment::{
      providers::{Env, Format, Toml},
      Figment,
    };

    Figment::new()
      .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
      // Environment variable aliases. Prefixed variables below
      // take precedence over them.
      .merge(
        Env::raw()
          .only(&["DATABASE_URL", "PORT"])
          .map(|v| match v.as_str() {
            "DATABASE_URL" => "db.primary.url".into(),
            "PORT" => "http.port".into(),
            _ => v.into(),
          }),
      )
      // Fields with underscores in their names cannot be split
      // on `_` blindly, so they are mapped by hand.
      .merge(Env::prefixed("DAILYDIET_").map(|v| match v.as_str() {
        "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
        "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),

        "DB_REPLICA_MIN_IDLE" => "db.replica.min_idle".into(),
        "DB_REPLICA_POOL_SIZE" => "db.replica.pool_size".into(),

        "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
        "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

        _ => v.as_str().replace('_', ".").into(),
      }))
  }
}

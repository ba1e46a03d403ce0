use error_stack::{Report, ResultExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::str::FromStr;

use crate::config;

mod error;
mod postgres;
mod store;

#[cfg(test)]
pub(crate) mod memory;

pub use error::*;
pub use postgres::PgStore;
pub use store::Store;

pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;
pub type Connection = sqlx::PgConnection;

pub(crate) static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// A Postgres database connection pool.
///
/// [Global database config](config::Database) will be applied in common
/// configurations such as `timeout_secs`. Meanwhile, [pool config](config::DbPoolConfig)
/// will be applied specifically for database connection pool.
#[derive(Clone)]
pub struct Pool {
  pool: sqlx::PgPool,
  readonly: bool,
}

impl Pool {
  /// Creates and tests a database from a database global
  /// and pool configuration.
  pub async fn new(
    global_cfg: &config::Database,
    pool_cfg: &config::DbPoolConfig,
  ) -> Result<Self> {
    let mut pool_opts = PgPoolOptions::new()
      .acquire_timeout(global_cfg.timeout())
      .max_connections(pool_cfg.pool_size.get());

    if let Some(min_idle) = pool_cfg.min_idle {
      pool_opts = pool_opts.min_connections(min_idle.get());
    }

    let mut connect_opts =
      PgConnectOptions::from_str(pool_cfg.url.as_str()).change_context(Error::InvalidUrl)?;

    if global_cfg.enforce_tls {
      connect_opts = connect_opts.ssl_mode(PgSslMode::Prefer);
    }

    let pool = Self {
      pool: pool_opts.connect_lazy_with(connect_opts),
      readonly: pool_cfg.readonly,
    };

    match pool.wait_until_healthy().await {
      Ok(..) => {}
      Err(err) if err.is_unhealthy() => {}
      Err(err) => return Err(err),
    }

    Ok(pool)
  }
}

impl std::fmt::Debug for Pool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.pool.fmt(f)
  }
}

impl Pool {
  /// Writes are rejected on a read-only pool before reaching
  /// the database.
  #[inline(always)]
  pub fn is_readonly(&self) -> bool {
    self.readonly
  }

  /// It attempts to get an active database connection.
  #[tracing::instrument(name = "db.connect", skip(self))]
  pub async fn get(&self) -> Result<PoolConnection> {
    if let Some(inner) = self.pool.try_acquire() {
      return Ok(inner);
    }

    match self.pool.acquire().await {
      Ok(conn) => Ok(conn),
      Err(e @ sqlx::Error::PoolTimedOut) => Err(e).change_context(Error::UnhealthyPool),
      Err(e) => Err(Report::new(Error::Internal(e))),
    }
  }

  /// This function will try to wait for a database connection
  /// to be successfully established until there's a timeout
  /// (can be configured through [`config.timeout_secs`](config::Database)).
  #[tracing::instrument(skip(self))]
  pub async fn wait_until_healthy(&self) -> Result<()> {
    match self.pool.acquire().await {
      Ok(..) => Ok(()),
      Err(e @ sqlx::Error::PoolTimedOut) => Err(e).change_context(Error::UnhealthyPool),
      Err(err) => Err(Report::new(Error::Internal(err))),
    }
  }

  /// Applies every pending migration embedded from `migrations/`.
  #[tracing::instrument(name = "db.migrate", skip(self))]
  pub async fn migrate(&self) -> Result<()> {
    let now = std::time::Instant::now();
    tracing::info!("Performing database migrations...");

    let mut conn = self.get().await?;
    MIGRATOR
      .run(&mut *conn)
      .await
      .change_context(Error::Migration)?;

    tracing::info!("Database migrations took {:.2?}", now.elapsed());
    Ok(())
  }
}

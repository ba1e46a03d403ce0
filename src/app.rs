use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::{
  config,
  database::{PgStore, Store},
};

/// Shared state handed to every request handler and service.
#[derive(Debug, Clone)]
pub struct App {
  pub config: Arc<config::Server>,
  pub store: Arc<dyn Store>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
  /// Connects to the configured databases and applies pending
  /// migrations.
  #[tracing::instrument(skip_all)]
  pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
    let store = PgStore::connect(&cfg.db).await.change_context(AppError)?;
    store.migrate().await.change_context(AppError)?;

    Ok(Self::with_store(cfg, Arc::new(store)))
  }

  #[must_use]
  pub fn with_store(cfg: config::Server, store: Arc<dyn Store>) -> Self {
    Self {
      config: Arc::new(cfg),
      store,
    }
  }
}

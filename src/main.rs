use actix_web::{web, HttpServer};
use dailydiet::{config, http, logging, App};
use error_stack::{Result, ResultExt};
use std::process;
use thiserror::Error;
use tracing_actix_web::TracingLogger;

#[derive(Debug, Error)]
#[error("Failed to start the server")]
struct StartupError;

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    eprintln!("{error:?}");
    process::exit(1);
  }
}

async fn run() -> Result<(), StartupError> {
  let config = config::Server::load().change_context(StartupError)?;
  logging::init(&config.logging).change_context(StartupError)?;

  let addr = (config.http.ip, config.http.port);
  let workers = config.http.workers;
  let app = App::new(config).await.change_context(StartupError)?;

  let mut server = HttpServer::new(move || {
    actix_web::App::new()
      .app_data(web::Data::new(app.clone()))
      .wrap(TracingLogger::default())
      .configure(http::controllers::configure)
  });
  if let Some(workers) = workers {
    server = server.workers(workers.get());
  }

  let server = server
    .bind(addr)
    .change_context(StartupError)
    .attach_printable_lazy(|| format!("could not bind to {}:{}", addr.0, addr.1))?;

  tracing::info!("listening on {}:{}", addr.0, addr.1);
  server.run().await.change_context(StartupError)
}

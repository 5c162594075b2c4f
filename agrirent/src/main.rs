// agrirent/src/main.rs

use actix_web::{web, App, HttpServer};
use agrirent::config::AppConfig;
use agrirent::seed;
use agrirent::state::AppState;
use agrirent::web::configure_app;
use tracing::Level;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting AgriRent server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  let seed_db = app_config.seed_db;
  let max_upload_bytes = app_config.max_upload_bytes;

  let app_state = match AppState::from_config(app_config).await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialise backends.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };
  tracing::info!(flows = app_state.flows.len(), "Form flows registered.");

  if seed_db {
    match seed::seed_if_empty(&app_state).await {
      Ok(count) => tracing::info!(count, "Demo data seeded."),
      Err(e) => tracing::error!(error = %e, "Failed to seed demo data."),
    }
  }

  tracing::info!("Binding server to {}...", server_address);
  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .wrap(TracingLogger::default())
      .configure(configure_app(max_upload_bytes))
  })
  .bind(&server_address)?
  .run()
  .await
}

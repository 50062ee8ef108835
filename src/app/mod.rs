use actix_web::{middleware, web, App, HttpServer};
use actix_cors::Cors;
use color_eyre::Result;
use eyre::WrapErr;
use log::{debug, info};
use crate::config::Config;
use crate::db::{FactStore, PostgrestClient};
use error::Error;
mod dtos;
mod error;
mod handlers;

// Declare app state struct:
pub struct AppState {
  pub store: Box<dyn FactStore>
}

// Function to start the server.
// Has to be async because there should be a .await at the end.
pub async fn run() -> Result<()> {
  let config = Config::from_env()
    .context("Configuration (environment or .env file) is missing")?;
  debug!("Current config: {:?}", config);

  let store = PostgrestClient::new(
    &config.supabase_url,
    config.service_key()?,
    &config.facts_table,
    config.db_timeout()
  ).context("Creating the database client")?;

  let bind_address = config.bind_address();

  let app_state = web::Data::new(
    AppState {
      store: Box::new(store)
    }
  );

  info!("Server is running on http://{}", bind_address);

  HttpServer::new(move|| {
    App::new()
      .app_data(app_state.clone())
      .app_data(json_config())
      .app_data(web::QueryConfig::default().error_handler(|e, _| {
        Error::BadRequest(e.to_string()).into()
      }))
      .wrap(Cors::permissive())
      .wrap(middleware::Logger::default())
      .configure(api_endpoints_config)
      .default_service(web::route().to(handlers::not_found))
  })
  .bind(bind_address)?
  .run()
  .await
  .context("Start Actix web server")

}

// Malformed bodies get the same {"error": ...} shape
// as everything else.
pub(crate) fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|e, _| {
    Error::BadRequest(e.to_string()).into()
  })
}

// Route configuration:
pub(crate) fn api_endpoints_config(cfg: &mut web::ServiceConfig) {
  cfg.route("/api/test", web::get().to(handlers::backend_test))
    .route("/api/facts", web::get().to(handlers::facts))
    .route("/api/facts", web::post().to(handlers::post_fact));
}

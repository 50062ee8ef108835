use actix_web::{
  web,
  HttpResponse,
  Result
};
use log::info;
use super::dtos::*;
use super::error::{Error, map_db_error};
use super::AppState;

// Module with all the API handler functions.
// They don't do anything except forwarding to the
// database and sending back what it says.

pub async fn backend_test() -> HttpResponse {
  HttpResponse::Ok().json(MessageDto {
    message: String::from("Backend is working!")
  })
}

// Default response when no route matched the request:
pub async fn not_found() -> Result<HttpResponse, Error> {
  Err(Error::NotFound(String::from("Endpoint doesn't exist")))
}

pub async fn facts(
  app_state: web::Data<AppState>,
  query: web::Query<FactsQuery>
) -> Result<HttpResponse, Error> {
  let facts = app_state.store
    .select_facts(&query.to_fact_query())
    .await
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(facts))
}

pub async fn post_fact(
  app_state: web::Data<AppState>,
  form: web::Json<FactForm>
) -> Result<HttpResponse, Error> {
  info!("Inserting a fact with {}", describe(&form));
  let inserted = app_state.store
    .insert_fact(&form)
    .await
    .map_err(map_db_error)?;
  Ok(HttpResponse::Ok().json(inserted))
}

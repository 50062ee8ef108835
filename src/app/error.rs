use actix_web::{
  error::ResponseError,
  http::StatusCode,
  HttpResponse
};
use derive_more::Display;
use log::error;
use crate::db::DbError;
use super::dtos::ErrorDto;

// Unlike what you'd usually do, database messages are
// shown to the caller as-is. The relay is supposed to
// pass them through.
#[derive(Debug, Display)]
pub enum Error {
  #[display(fmt = "{}", _0)]
  DatabaseError(String),
  #[display(fmt = "{}", _0)]
  NotFound(String),
  #[display(fmt = "{}", _0)]
  BadRequest(String)
}

impl ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self {
      Error::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST
    }
  }

  fn error_response(&self) -> HttpResponse {
    HttpResponse::build(self.status_code())
      .json(ErrorDto::new(&self.to_string()))
  }
}

pub fn map_db_error(e: DbError) -> Error {
  error!("Database error - {:?}", e);
  Error::DatabaseError(e.to_string())
}

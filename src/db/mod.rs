use async_trait::async_trait;
use derive_more::Display;
pub mod entities;
pub mod queries;
mod postgrest;
#[cfg(test)]
pub mod memory;
use entities::*;
pub use postgrest::PostgrestClient;
pub use queries::{FactQuery, Order, OrderBy, MAX_FACTS};

/**
 * Everything goes to the hosted database, there is no
 * local storage at all. Both the relay and the client
 * talk to it through this trait.
 */
#[async_trait]
pub trait FactStore: Send + Sync {
  async fn select_facts(&self, query: &FactQuery) -> Result<Vec<Fact>, DbError>;

  // Returns the inserted row(s) as the database sees them.
  async fn insert_fact(&self, fact: &NewFact) -> Result<Vec<Fact>, DbError>;

  // Sets a single vote column on the row with that id
  // and returns the updated row(s).
  async fn update_votes(
    &self,
    id: i64,
    kind: VoteKind,
    value: i64
  ) -> Result<Vec<Fact>, DbError>;
}

// Display is the message that gets relayed to the
// caller, so for Api it's the database message and
// nothing else.
#[derive(Debug, Display)]
pub enum DbError {
  #[display(fmt = "{}", message)]
  Api { status: u16, message: String },
  #[display(fmt = "{}", _0)]
  Transport(String),
  #[display(fmt = "Invalid database URL: {}", _0)]
  InvalidUrl(String)
}

impl std::error::Error for DbError {}

impl From<reqwest::Error> for DbError {
  fn from(e: reqwest::Error) -> Self {
    DbError::Transport(e.to_string())
  }
}

impl From<url::ParseError> for DbError {
  fn from(e: url::ParseError) -> Self {
    DbError::InvalidUrl(e.to_string())
  }
}

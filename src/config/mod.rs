// Adding the context method to errors:
use eyre::{WrapErr, eyre};
use color_eyre::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
pub struct Config {
  pub supabase_url: String,
  // The relay needs the service key, the CLI is
  // happy with the anon key (same as the browser).
  pub supabase_service_key: Option<String>,
  pub supabase_anon_key: Option<String>,
  pub bind_host: String,
  pub port: u16,
  pub facts_table: String,
  // In seconds:
  pub db_timeout: u64
}

// Keys should never show up in logs, so no derive.
impl std::fmt::Debug for Config {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Config")
      .field("supabase_url", &self.supabase_url)
      .field("bind_host", &self.bind_host)
      .field("port", &self.port)
      .field("facts_table", &self.facts_table)
      .field("db_timeout", &self.db_timeout)
      .finish()
  }
}

impl Config {

  pub fn from_env() -> Result<Config> {
    Self::from_environment(::config::Environment::default())
  }

  fn from_environment(env: ::config::Environment) -> Result<Config> {
    // RUST_LOG is already set in main.rs if it
    // was absent.
    // You have to use lowercase when compared to
    // what's in the .env file.
    ::config::Config::builder()
      .set_default("bind_host", "0.0.0.0")?
      // Same port the old node server used:
      .set_default("port", 5000_i64)?
      .set_default("facts_table", "facts")?
      .set_default("db_timeout", 30_i64)?
      .add_source(env)
      .build()?
      // The error has to be given a context for
      // color_eyre to work here:
      .try_deserialize()
      .context("Loading configuration from env")
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.bind_host, self.port)
  }

  pub fn db_timeout(&self) -> Duration {
    Duration::from_secs(self.db_timeout)
  }

  pub fn service_key(&self) -> Result<&str> {
    self.supabase_service_key.as_deref()
      .ok_or_else(|| eyre!("SUPABASE_SERVICE_KEY is missing from the environment"))
  }

  pub fn client_key(&self) -> Result<&str> {
    self.supabase_anon_key.as_deref()
      .or_else(|| self.supabase_service_key.as_deref())
      .ok_or_else(|| eyre!("Neither SUPABASE_ANON_KEY nor SUPABASE_SERVICE_KEY are set"))
  }

}

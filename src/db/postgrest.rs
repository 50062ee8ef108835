use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;
use log::debug;
use super::entities::*;
use super::queries::{self, FactQuery};
use super::{DbError, FactStore};

// Without that header PostgREST answers inserts and
// updates with an empty body.
const PREFER_RETURN: (&str, &str) = ("Prefer", "return=representation");

// Shape of the errors PostgREST sends back. Only the
// message is relayed, the rest is there for the logs.
#[derive(Debug, Deserialize)]
struct PostgrestError {
  message: String,
  code: Option<String>,
  details: Option<String>,
  hint: Option<String>
}

/**
 * Talks to the hosted database (Supabase) through its
 * REST interface. One instance per key: the relay uses
 * the service key, the CLI the anon key.
 */
pub struct PostgrestClient {
  http: Client,
  table_url: Url,
  key: String
}

impl PostgrestClient {

  pub fn new(
    base_url: &str,
    key: &str,
    table: &str,
    timeout: Duration
  ) -> Result<Self, DbError> {
    // Url::join drops the last path segment when there's
    // no trailing slash.
    let base = if base_url.ends_with('/') {
      Url::parse(base_url)?
    } else {
      Url::parse(&format!("{}/", base_url))?
    };
    let table_url = base.join(&format!("rest/v1/{}", table))?;
    let http = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("facts-backend/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self {
      http,
      table_url,
      key: key.to_string()
    })
  }

  fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
    request
      .header("apikey", &self.key)
      .bearer_auth(&self.key)
  }

  fn select_request(&self, query: &FactQuery) -> RequestBuilder {
    self.authorized(self.http.get(self.table_url.clone()))
      .query(&query.to_params())
  }

  fn insert_request(&self, fact: &NewFact) -> RequestBuilder {
    self.authorized(self.http.post(self.table_url.clone()))
      .query(&[("select", "*")])
      .header(PREFER_RETURN.0, PREFER_RETURN.1)
      .json(&[fact])
  }

  fn update_request(&self, id: i64, kind: VoteKind, value: i64) -> RequestBuilder {
    let mut body = serde_json::Map::new();
    body.insert(kind.column().to_string(), value.into());
    self.authorized(self.http.patch(self.table_url.clone()))
      .query(&[
        ("id", queries::eq(&id.to_string())),
        ("select", "*".to_string())
      ])
      .header(PREFER_RETURN.0, PREFER_RETURN.1)
      .json(&body)
  }

}

async fn rows(request: RequestBuilder) -> Result<Vec<Fact>, DbError> {
  let response = request.send().await?;
  let status = response.status();
  if status.is_success() {
    Ok(response.json::<Vec<Fact>>().await?)
  } else {
    // Don't care if the body can't be read, the status
    // reason is used then.
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
  }
}

fn api_error(status: StatusCode, body: &str) -> DbError {
  let message = match serde_json::from_str::<PostgrestError>(body) {
    Ok(e) if !e.message.is_empty() => {
      debug!(
        "Database error {} - code: {:?}, details: {:?}, hint: {:?}",
        status, e.code, e.details, e.hint
      );
      e.message
    },
    _ if !body.trim().is_empty() => body.trim().to_string(),
    _ => status.canonical_reason()
      .unwrap_or("Unknown database error")
      .to_string()
  };
  DbError::Api {
    status: status.as_u16(),
    message
  }
}

#[async_trait]
impl FactStore for PostgrestClient {

  async fn select_facts(&self, query: &FactQuery) -> Result<Vec<Fact>, DbError> {
    rows(self.select_request(query)).await
  }

  async fn insert_fact(&self, fact: &NewFact) -> Result<Vec<Fact>, DbError> {
    rows(self.insert_request(fact)).await
  }

  async fn update_votes(
    &self,
    id: i64,
    kind: VoteKind,
    value: i64
  ) -> Result<Vec<Fact>, DbError> {
    rows(self.update_request(id, kind, value)).await
  }

}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::entities::{Category, CategoryFilter};

  fn client(base_url: &str) -> PostgrestClient {
    PostgrestClient::new(base_url, "some-key", "facts", Duration::from_secs(5))
      .unwrap()
  }

  fn body_json(request: &reqwest::Request) -> serde_json::Value {
    let bytes = request.body()
      .and_then(|b| b.as_bytes())
      .unwrap();
    serde_json::from_slice(bytes).unwrap()
  }

  #[test]
  fn table_url_with_or_without_trailing_slash() {
    assert_eq!(
      "https://abc.supabase.co/rest/v1/facts",
      client("https://abc.supabase.co").table_url.as_str()
    );
    assert_eq!(
      "http://localhost:54321/rest/v1/facts",
      client("http://localhost:54321/").table_url.as_str()
    );
  }

  #[test]
  fn invalid_base_url() {
    let result = PostgrestClient::new(
      "not a url",
      "k",
      "facts",
      Duration::from_secs(1)
    );
    assert!(matches!(result, Err(DbError::InvalidUrl(_))));
  }

  #[test]
  fn select_request_carries_listing_and_keys() {
    let request = client("https://abc.supabase.co")
      .select_request(&FactQuery::listing(CategoryFilter::Only(Category::News)))
      .build()
      .unwrap();
    assert_eq!(&reqwest::Method::GET, request.method());
    assert_eq!(
      "https://abc.supabase.co/rest/v1/facts?select=*&category=eq.news&order=votesInteresting.desc&limit=1000",
      request.url().as_str()
    );
    assert_eq!("some-key", request.headers()["apikey"]);
    assert_eq!("Bearer some-key", request.headers()["authorization"]);
  }

  #[test]
  fn insert_request_sends_one_row_and_asks_for_it_back() {
    let fact = NewFact::new("Water boils at 100C", "https://a.org", Category::Science);
    let request = client("https://abc.supabase.co")
      .insert_request(&fact)
      .build()
      .unwrap();
    assert_eq!(&reqwest::Method::POST, request.method());
    assert_eq!("return=representation", request.headers()["prefer"]);
    let body = body_json(&request);
    assert_eq!(1, body.as_array().unwrap().len());
    assert_eq!("science", body[0]["category"]);
  }

  #[test]
  fn update_request_sets_a_single_column() {
    let request = client("https://abc.supabase.co")
      .update_request(42, VoteKind::Mindblowing, 7)
      .build()
      .unwrap();
    assert_eq!(&reqwest::Method::PATCH, request.method());
    assert_eq!(Some("id=eq.42&select=*"), request.url().query());
    let body = body_json(&request);
    assert_eq!(serde_json::json!({"votesMindblowing": 7}), body);
  }

  #[test]
  fn api_error_uses_the_database_message() {
    let body = r#"{"code":"42P01","details":null,"hint":null,
      "message":"relation \"public.facts\" does not exist"}"#;
    let error = api_error(StatusCode::NOT_FOUND, body);
    assert_eq!("relation \"public.facts\" does not exist", error.to_string());
  }

  #[test]
  fn api_error_falls_back_to_body_then_reason() {
    assert_eq!(
      "upstream down",
      api_error(StatusCode::BAD_GATEWAY, "upstream down\n").to_string()
    );
    assert_eq!(
      "Service Unavailable",
      api_error(StatusCode::SERVICE_UNAVAILABLE, "").to_string()
    );
  }
}

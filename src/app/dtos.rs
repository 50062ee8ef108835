use serde::{Deserialize, Serialize};
use crate::db::entities::{value_to_text, CategoryFilter, NewFact};
use crate::db::FactQuery;

// Body of POST /api/facts. Nothing is checked, every
// field goes to the database the way it came in,
// numbers and all.
pub use crate::db::entities::NewFact as FactForm;

// Query string of GET /api/facts.
#[derive(Debug, Deserialize)]
pub struct FactsQuery {
  pub category: Option<String>
}

impl FactsQuery {
  // "all" and empty both mean no filter. Anything else is
  // forwarded even if it's not one of the categories.
  pub fn to_fact_query(&self) -> FactQuery {
    let query = FactQuery::listing(CategoryFilter::All);
    match self.category.as_deref().map(str::trim) {
      None | Some("") | Some("all") => query,
      Some(label) => query.category_label(label)
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
  pub error: String
}

impl ErrorDto {
  pub fn new(message: &str) -> Self {
    Self {
      error: String::from(message)
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageDto {
  pub message: String
}

// Lets the handler log what it's forwarding without
// dumping whole fact texts in there.
pub fn describe(form: &NewFact) -> String {
  format!(
    "category {:?}, source {:?}",
    form.category.as_ref().map_or_else(|| "<none>".to_string(), value_to_text),
    form.source.as_ref().map_or_else(|| "<none>".to_string(), value_to_text)
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_or_empty_category_is_no_filter() {
    for category in &[None, Some(""), Some("all"), Some(" all ")] {
      let sut = FactsQuery { category: category.map(String::from) };
      assert_eq!(None, sut.to_fact_query().category);
    }
  }

  #[test]
  fn unknown_categories_are_forwarded() {
    let sut = FactsQuery { category: Some("sports".to_string()) };
    assert_eq!(Some("sports".to_string()), sut.to_fact_query().category);
  }

  #[test]
  fn form_accepts_partial_bodies() {
    let sut: FactForm = serde_json::from_str(r#"{"text": "only text"}"#).unwrap();
    assert_eq!(Some(serde_json::Value::from("only text")), sut.text);
    assert_eq!(None, sut.category);
    assert_eq!("category \"<none>\", source \"<none>\"", describe(&sut));
  }

  #[test]
  fn form_accepts_any_json_value() {
    let sut: FactForm = serde_json::from_str(
      r#"{"text": 123, "source": null, "category": 7}"#
    ).unwrap();
    assert_eq!(Some(serde_json::Value::from(123)), sut.text);
    assert_eq!(None, sut.source);
    assert_eq!("category \"7\", source \"<none>\"", describe(&sut));
  }
}

use url::Url;
use crate::db::entities::{Category, NewFact};
use crate::utils::text_utils;

pub const MAX_TEXT_LENGTH: usize = 200;

pub fn is_valid_http_url(s: &str) -> bool {
  match Url::parse(s) {
    Ok(url) => url.scheme() == "http" || url.scheme() == "https",
    Err(_) => false
  }
}

/**
 * The "share a fact" form. Fields are whatever the user
 * typed, nothing gets checked until submission.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewFactForm {
  pub text: String,
  pub source: String,
  pub category: String
}

impl NewFactForm {

  pub fn remaining_chars(&self) -> i64 {
    text_utils::remaining_chars(&self.text, MAX_TEXT_LENGTH)
  }

  // Gives back the fact to insert, or nothing at all.
  // Nobody is told which field was wrong.
  pub fn validate(&self) -> Option<NewFact> {
    let category: Category = self.category.parse().ok()?;
    if self.text.is_empty()
      || text_utils::char_length(&self.text) > MAX_TEXT_LENGTH
      || !is_valid_http_url(&self.source) {
      return None;
    }
    Some(NewFact::new(&self.text, &self.source, category))
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }

}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use derive_more::Display;
use chrono::{DateTime, Utc};
use std::str::FromStr;
use crate::utils::serde_utils;

// Rows come back from the hosted database exactly as
// they were inserted, and nothing on the server checks
// them. Nulls are turned into empty strings or zero
// votes and unknown categories are kept as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
  pub id: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default, deserialize_with = "serde_utils::null_to_default")]
  pub text: String,
  #[serde(default, deserialize_with = "serde_utils::null_to_default")]
  pub source: String,
  #[serde(default, deserialize_with = "serde_utils::null_to_default")]
  pub category: String,
  #[serde(
    rename = "votesInteresting",
    default,
    deserialize_with = "serde_utils::null_to_default"
  )]
  pub votes_interesting: i64,
  #[serde(
    rename = "votesMindblowing",
    default,
    deserialize_with = "serde_utils::null_to_default"
  )]
  pub votes_mindblowing: i64,
  #[serde(
    rename = "votesFalse",
    default,
    deserialize_with = "serde_utils::null_to_default"
  )]
  pub votes_false: i64
}

impl Fact {
  pub fn votes(&self, kind: VoteKind) -> i64 {
    match kind {
      VoteKind::Interesting => self.votes_interesting,
      VoteKind::Mindblowing => self.votes_mindblowing,
      VoteKind::False => self.votes_false
    }
  }

  pub fn set_votes(&mut self, kind: VoteKind, value: i64) {
    match kind {
      VoteKind::Interesting => self.votes_interesting = value,
      VoteKind::Mindblowing => self.votes_mindblowing = value,
      VoteKind::False => self.votes_false = value
    }
  }

  // Counters can hold anything the database accepts,
  // so the sum is done in i128.
  pub fn is_disputed(&self) -> bool {
    i128::from(self.votes_interesting) + i128::from(self.votes_mindblowing)
      < i128::from(self.votes_false)
  }
}

// What gets inserted. Missing fields are left out of
// the JSON entirely so the database applies whatever
// it does for absent columns. Values are kept as raw
// JSON: the relay forwards whatever it was given and
// it's up to the database to accept it or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFact {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub text: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<Value>
}

impl NewFact {
  pub fn new(text: &str, source: &str, category: Category) -> Self {
    Self {
      text: Some(Value::from(text)),
      source: Some(Value::from(source)),
      category: Some(Value::from(category.to_string()))
    }
  }
}

// Strings as they are, anything else as its JSON text.
pub fn value_to_text(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string()
  }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Category {
  #[display(fmt = "technology")]
  Technology,
  #[display(fmt = "science")]
  Science,
  #[display(fmt = "finance")]
  Finance,
  #[display(fmt = "society")]
  Society,
  #[display(fmt = "entertainment")]
  Entertainment,
  #[display(fmt = "health")]
  Health,
  #[display(fmt = "history")]
  History,
  #[display(fmt = "news")]
  News
}

impl Category {
  pub const ALL: [Category; 8] = [
    Category::Technology,
    Category::Science,
    Category::Finance,
    Category::Society,
    Category::Entertainment,
    Category::Health,
    Category::History,
    Category::News
  ];

  pub fn color(&self) -> &'static str {
    match self {
      Category::Technology => "#475174",
      Category::Science => "#7BA352",
      Category::Finance => "#E66968",
      Category::Society => "#eab308",
      Category::Entertainment => "#5688C7",
      Category::Health => "#14b8a6",
      Category::History => "#D16F2F",
      Category::News => "#BEA7E5"
    }
  }
}

#[derive(Debug, Display, PartialEq)]
#[display(fmt = "Unknown category: {}", _0)]
pub struct UnknownCategory(pub String);

impl std::error::Error for UnknownCategory {}

// Labels are compared as-is, "Science" is not a category.
impl FromStr for Category {
  type Err = UnknownCategory;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Category::ALL.iter()
      .find(|c| c.to_string() == s)
      .copied()
      .ok_or_else(|| UnknownCategory(s.to_string()))
  }
}

// The category list has an "all" button on top of
// the eight real categories.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
  #[display(fmt = "all")]
  All,
  #[display(fmt = "{}", _0)]
  Only(Category)
}

impl Default for CategoryFilter {
  fn default() -> Self {
    CategoryFilter::All
  }
}

impl FromStr for CategoryFilter {
  type Err = UnknownCategory;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "all" => Ok(CategoryFilter::All),
      _ => s.parse().map(CategoryFilter::Only)
    }
  }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum VoteKind {
  #[display(fmt = "interesting")]
  Interesting,
  #[display(fmt = "mindblowing")]
  Mindblowing,
  #[display(fmt = "false")]
  False
}

impl VoteKind {
  pub fn column(&self) -> FactColumn {
    match self {
      VoteKind::Interesting => FactColumn::VotesInteresting,
      VoteKind::Mindblowing => FactColumn::VotesMindblowing,
      VoteKind::False => FactColumn::VotesFalse
    }
  }
}

impl FromStr for VoteKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "interesting" => Ok(VoteKind::Interesting),
      "mindblowing" => Ok(VoteKind::Mindblowing),
      "false" => Ok(VoteKind::False),
      _ => Err(format!("Unknown vote kind: {}", s))
    }
  }
}

// Columns we can sort on. The names are the
// actual database column names.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum FactColumn {
  #[display(fmt = "id")]
  Id,
  #[display(fmt = "created_at")]
  CreatedAt,
  #[display(fmt = "votesInteresting")]
  VotesInteresting,
  #[display(fmt = "votesMindblowing")]
  VotesMindblowing,
  #[display(fmt = "votesFalse")]
  VotesFalse
}

// Stand-in for the hosted database in tests. It does
// the few things PostgREST does for us: filtering,
// ordering, limits and handing out ids.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use super::entities::*;
use super::queries::{FactQuery, Order};
use super::{DbError, FactStore};

pub const FAILURE_MESSAGE: &str = "connection to the database was lost";

#[derive(Default)]
pub struct MemoryStore {
  rows: Mutex<Vec<Fact>>,
  failing: AtomicBool,
  returning_nothing: AtomicBool,
  calls: AtomicUsize
}

impl MemoryStore {

  pub fn with_facts(facts: Vec<Fact>) -> Self {
    Self {
      rows: Mutex::new(facts),
      ..Default::default()
    }
  }

  pub fn set_failing(&self, failing: bool) {
    self.failing.store(failing, AtomicOrdering::SeqCst);
  }

  // Writes still happen but no row comes back, like
  // a table whose select policy hides the new rows.
  pub fn set_returning_nothing(&self, returning_nothing: bool) {
    self.returning_nothing.store(returning_nothing, AtomicOrdering::SeqCst);
  }

  fn returned(&self, rows: Vec<Fact>) -> Vec<Fact> {
    if self.returning_nothing.load(AtomicOrdering::SeqCst) {
      Vec::new()
    } else {
      rows
    }
  }

  // Every call counts, failed ones too.
  pub fn calls(&self) -> usize {
    self.calls.load(AtomicOrdering::SeqCst)
  }

  pub fn rows(&self) -> Vec<Fact> {
    self.rows.lock().unwrap().clone()
  }

  fn call(&self) -> Result<(), DbError> {
    self.calls.fetch_add(1, AtomicOrdering::SeqCst);
    if self.failing.load(AtomicOrdering::SeqCst) {
      Err(DbError::Api {
        status: 503,
        message: FAILURE_MESSAGE.to_string()
      })
    } else {
      Ok(())
    }
  }

}

pub fn fact(id: i64, text: &str, category: &str, interesting: i64) -> Fact {
  Fact {
    id,
    created_at: None,
    text: text.to_string(),
    source: format!("https://example.com/{}", id),
    category: category.to_string(),
    votes_interesting: interesting,
    votes_mindblowing: 0,
    votes_false: 0
  }
}

fn sort_key(fact: &Fact, column: FactColumn) -> i64 {
  match column {
    FactColumn::Id => fact.id,
    FactColumn::CreatedAt => fact.created_at
      .map(|d| d.timestamp())
      .unwrap_or_default(),
    FactColumn::VotesInteresting => fact.votes_interesting,
    FactColumn::VotesMindblowing => fact.votes_mindblowing,
    FactColumn::VotesFalse => fact.votes_false
  }
}

#[async_trait]
impl FactStore for MemoryStore {

  async fn select_facts(&self, query: &FactQuery) -> Result<Vec<Fact>, DbError> {
    self.call()?;
    let mut facts: Vec<Fact> = self.rows.lock().unwrap()
      .iter()
      .filter(|f| query.category.as_ref().map_or(true, |c| &f.category == c))
      .cloned()
      .collect();
    if let Some(order) = query.order {
      facts.sort_by_key(|f| sort_key(f, order.field));
      if order.order == Order::Desc {
        facts.reverse();
      }
    }
    if let Some(limit) = query.limit {
      facts.truncate(limit);
    }
    Ok(facts)
  }

  async fn insert_fact(&self, new_fact: &NewFact) -> Result<Vec<Fact>, DbError> {
    self.call()?;
    let mut rows = self.rows.lock().unwrap();
    let id = rows.iter().map(|f| f.id).max().unwrap_or(0) + 1;
    let inserted = Fact {
      id,
      created_at: None,
      text: new_fact.text.as_ref().map(value_to_text).unwrap_or_default(),
      source: new_fact.source.as_ref().map(value_to_text).unwrap_or_default(),
      category: new_fact.category.as_ref().map(value_to_text).unwrap_or_default(),
      votes_interesting: 0,
      votes_mindblowing: 0,
      votes_false: 0
    };
    rows.push(inserted.clone());
    Ok(self.returned(vec![inserted]))
  }

  async fn update_votes(
    &self,
    id: i64,
    kind: VoteKind,
    value: i64
  ) -> Result<Vec<Fact>, DbError> {
    self.call()?;
    let mut rows = self.rows.lock().unwrap();
    let updated = rows.iter_mut()
      .filter(|f| f.id == id)
      .map(|f| {
        f.set_votes(kind, value);
        f.clone()
      })
      .collect();
    Ok(self.returned(updated))
  }

}

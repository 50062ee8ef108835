use log::{debug, error};
use crate::db::entities::*;
use crate::db::{DbError, FactQuery, FactStore};
use super::validation::NewFactForm;

pub const LOAD_ERROR: &str = "There was a problem getting data";
pub const SUBMIT_ERROR: &str = "There was a problem sharing the fact";
pub const VOTE_ERROR: &str = "There was a problem saving the vote";

// How the user hears about failed calls.
pub trait Notifier {
  fn notify(&self, message: &str);
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
  // Validation failed, nothing was sent:
  Blocked,
  Posted(i64),
  Failed
}

/**
 * Everything the fact page shows: the list, which
 * category is selected and the "share a fact" form.
 * Each operation is one call to the store, followed by
 * replacing local state with whatever came back.
 */
pub struct FactBoard<S: FactStore, N: Notifier> {
  store: S,
  notifier: N,
  facts: Vec<Fact>,
  category: CategoryFilter,
  show_form: bool,
  pub form: NewFactForm
}

impl<S: FactStore, N: Notifier> FactBoard<S, N> {

  pub fn new(store: S, notifier: N) -> Self {
    Self {
      store,
      notifier,
      facts: Vec::new(),
      category: CategoryFilter::All,
      show_form: false,
      form: NewFactForm::default()
    }
  }

  pub fn facts(&self) -> &[Fact] {
    &self.facts
  }

  pub fn category(&self) -> CategoryFilter {
    self.category
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn is_form_shown(&self) -> bool {
    self.show_form
  }

  pub fn toggle_form(&mut self) {
    self.show_form = !self.show_form;
  }

  // Label of the header button:
  pub fn form_button_label(&self) -> &'static str {
    if self.show_form { "Close" } else { "Share a fact" }
  }

  fn report(&self, message: &str, e: &DbError) {
    error!("{} - {}", message, e);
    self.notifier.notify(message);
  }

  pub async fn set_category(&mut self, category: CategoryFilter) -> bool {
    self.category = category;
    self.reload().await
  }

  pub async fn reload(&mut self) -> bool {
    match self.store.select_facts(&FactQuery::listing(self.category)).await {
      Ok(facts) => {
        debug!("Loaded {} facts for category {}", facts.len(), self.category);
        self.facts = facts;
        true
      },
      Err(e) => {
        self.report(LOAD_ERROR, &e);
        false
      }
    }
  }

  pub async fn submit(&mut self) -> SubmitOutcome {
    let new_fact = match self.form.validate() {
      Some(f) => f,
      None => return SubmitOutcome::Blocked
    };
    match self.store.insert_fact(&new_fact).await {
      Ok(rows) => match rows.into_iter().next() {
        Some(fact) => {
          let id = fact.id;
          self.facts.insert(0, fact);
          self.form.reset();
          self.show_form = false;
          SubmitOutcome::Posted(id)
        },
        None => {
          self.notifier.notify(SUBMIT_ERROR);
          SubmitOutcome::Failed
        }
      },
      Err(e) => {
        self.report(SUBMIT_ERROR, &e);
        SubmitOutcome::Failed
      }
    }
  }

  // Reads the counter we're displaying and writes that
  // plus one. Two people voting at once can lose a vote.
  pub async fn vote(&mut self, id: i64, kind: VoteKind) -> bool {
    let current = match self.facts.iter().find(|f| f.id == id) {
      Some(fact) => fact.votes(kind),
      None => {
        self.notifier.notify(VOTE_ERROR);
        return false;
      }
    };
    let next = match current.checked_add(1) {
      Some(n) => n,
      None => {
        error!("Vote counter of fact {} is already at its maximum", id);
        self.notifier.notify(VOTE_ERROR);
        return false;
      }
    };
    match self.store.update_votes(id, kind, next).await {
      Ok(rows) => match rows.into_iter().next() {
        Some(updated) => {
          for f in self.facts.iter_mut().filter(|f| f.id == id) {
            *f = updated.clone();
          }
          true
        },
        None => {
          self.notifier.notify(VOTE_ERROR);
          false
        }
      },
      Err(e) => {
        self.report(VOTE_ERROR, &e);
        false
      }
    }
  }

}

use std::fmt::Write;
use crate::db::entities::{Category, Fact};
use crate::utils::time_utils;

pub fn render_fact(fact: &Fact) -> String {
  let mut line = format!("#{} ", fact.id);
  if fact.is_disputed() {
    line.push_str("[DISPUTED] ");
  }
  // write! on a String can't fail.
  let _ = write!(
    line,
    "{} (Source: {}) [{}] ❤️ {} 🤯 {} 👎 {}",
    fact.text,
    fact.source,
    fact.category,
    fact.votes_interesting,
    fact.votes_mindblowing,
    fact.votes_false
  );
  if let Some(date) = &fact.created_at {
    let _ = write!(line, " - {}", time_utils::datetime_to_date_string(date));
  }
  line
}

pub fn render_list(facts: &[Fact]) -> String {
  let mut out = String::new();
  for fact in facts {
    out.push_str(&render_fact(fact));
    out.push('\n');
  }
  let _ = write!(
    out,
    "There are {} facts in the database. Add your own!",
    facts.len()
  );
  out
}

// The category sidebar, "all" first.
pub fn render_categories() -> String {
  let mut out = String::from("all\n");
  for category in Category::ALL.iter() {
    let _ = writeln!(out, "{} {}", category, category.color());
  }
  out
}

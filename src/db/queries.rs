// Query building for the hosted database. It speaks
// PostgREST, so a query ends up as URL parameters
// instead of SQL.

use super::entities::{Category, CategoryFilter, FactColumn};

// The listing never asks for more than that:
pub const MAX_FACTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Order {
  Asc,
  Desc
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderBy {
  pub order: Order,
  pub field: FactColumn
}

impl OrderBy {
  pub fn new(order: Order, field: FactColumn) -> Self {
    OrderBy {
      order,
      field
    }
  }
}

// Decided to use the "builder pattern"
// they talk about in Rust docs for
// query building.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactQuery {
  pub category: Option<String>,
  pub order: Option<OrderBy>,
  pub limit: Option<usize>
}

impl FactQuery {

  pub fn new() -> Self {
    Self::default()
  }

  // What the fact list shows: most interesting first,
  // capped at MAX_FACTS rows.
  pub fn listing(filter: CategoryFilter) -> Self {
    let query = FactQuery::new()
      .order(OrderBy::new(Order::Desc, FactColumn::VotesInteresting))
      .limit(MAX_FACTS);
    match filter {
      CategoryFilter::All => query,
      CategoryFilter::Only(category) => query.category(category)
    }
  }

  pub fn category(self, category: Category) -> Self {
    self.category_label(&category.to_string())
  }

  // The relay doesn't check labels so it filters
  // on raw strings.
  pub fn category_label(mut self, label: &str) -> Self {
    self.category = Some(label.to_string());
    self
  }

  pub fn order(mut self, order: OrderBy) -> Self {
    self.order = Some(order);
    self
  }

  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = Some(limit);
    self
  }

  // Parameters in the order PostgREST docs write them.
  pub fn to_params(&self) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    if let Some(category) = &self.category {
      params.push(("category".to_string(), eq(category)));
    }
    if let Some(order) = &self.order {
      params.push((
        "order".to_string(),
        format!(
          "{}.{}",
          order.field,
          match order.order {
            Order::Asc => "asc",
            Order::Desc => "desc"
          }
        )
      ));
    }
    if let Some(lim) = self.limit {
      params.push(("limit".to_string(), lim.to_string()));
    }
    params
  }

}

pub fn eq(value: &str) -> String {
  format!("eq.{}", value)
}

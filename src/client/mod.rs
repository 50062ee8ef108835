// The view side: what a user of the fact page sees and
// does. It talks to the hosted database directly, the
// relay is not involved.
mod board;
pub mod render;
pub mod validation;
pub use board::{FactBoard, Notifier, SubmitOutcome, LOAD_ERROR, SUBMIT_ERROR, VOTE_ERROR};
pub use validation::{NewFactForm, MAX_TEXT_LENGTH};

use chrono::{DateTime, Local, Utc};

// Very specific date format: dd/MM/yyyy
// chrono formatting reference:
// https://docs.rs/chrono/0.4.19/chrono/format/strftime/index.html
const DATE_FORMAT_STANDARD: &'static str = "%d/%m/%Y";

pub fn datetime_to_date_string(date: &DateTime<Utc>) -> String {
  date.with_timezone(&Local).format(DATE_FORMAT_STANDARD).to_string()
}

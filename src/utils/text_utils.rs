// Counted in chars, not bytes. A fact in Japanese
// gets the same budget as one in English.
pub fn char_length(s: &str) -> usize {
  s.chars().count()
}

// How many characters are left before hitting max,
// goes negative when the text is already too long.
pub fn remaining_chars(s: &str, max: usize) -> i64 {
  max as i64 - char_length(s) as i64
}

use serde::{Deserialize, Deserializer};

// The hosted database happily stores NULL in any
// column since nothing checks what gets inserted.
// To be used with annotation:
// #[serde(default, deserialize_with = "serde_utils::null_to_default")]
pub fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::BuildError;

/// Keys that a field definition uses itself and that therefore cannot carry
/// user metadata.
const RESERVED_KEYS: &[&str] = &["aliases", "default", "doc", "name", "order", "type"];

/// String-to-string metadata attached to a record field.
///
/// Opaque to the schema graph. Insertion order is preserved.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomAttributes {
  attributes: IndexMap<String, String>,
}

impl CustomAttributes {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_attribute(&mut self, key: &str, value: &str) -> Result<(), BuildError> {
    if RESERVED_KEYS.contains(&key) {
      return Err(BuildError::ReservedAttribute(key.to_string()));
    }
    if self.attributes.contains_key(key) {
      return Err(BuildError::DuplicateAttribute(key.to_string()));
    }
    self.attributes.insert(key.to_string(), value.to_string());
    Ok(())
  }

  pub fn attribute(&self, key: &str) -> Option<&str> {
    self.attributes.get(key).map(|x| x.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .attributes
      .iter()
      .map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.attributes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.attributes.is_empty()
  }
}

/// A field's default value.
///
/// The value is carried through untouched; it is not checked against the
/// field's schema here. `DefaultValue::none()` means "no default", which is
/// distinct from a JSON `null` default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultValue(Slot);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
enum Slot {
  Absent,
  Present(serde_json::Value),
}

impl DefaultValue {
  pub fn none() -> Self {
    Self(Slot::Absent)
  }

  pub fn new(value: serde_json::Value) -> Self {
    Self(Slot::Present(value))
  }

  pub fn value(&self) -> Option<&serde_json::Value> {
    match &self.0 {
      Slot::Absent => None,
      Slot::Present(x) => Some(x),
    }
  }

  pub fn is_none(&self) -> bool {
    self.value().is_none()
  }
}

impl Default for DefaultValue {
  fn default() -> Self {
    Self::none()
  }
}

impl From<serde_json::Value> for DefaultValue {
  fn from(that: serde_json::Value) -> Self {
    Self::new(that)
  }
}

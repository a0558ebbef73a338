use thiserror::Error;

use super::name::Name;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum BuildError {
  #[error("duplicate name `{name}` in `{scope}`")]
  DuplicateName { name: String, scope: Name },

  #[error("cannot add a union to a union")]
  InvalidUnion,

  #[error("union already has a record branch named `{0}`")]
  DuplicateBranch(Name),

  #[error("invalid name `{0}`")]
  InvalidName(String),

  #[error("`{0}` is a reserved attribute key")]
  ReservedAttribute(String),

  #[error("duplicate attribute `{0}`")]
  DuplicateAttribute(String),

  #[error("`{0}` would contain itself without a symbolic reference")]
  OwningCycle(String),
}

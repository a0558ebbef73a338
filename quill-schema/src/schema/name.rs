use std::{convert::TryFrom, fmt::Display};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::BuildError;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// A qualified type name: optional dotted namespace plus a short name.
///
/// Names are kept normalized: the short name never contains a dot and an
/// empty namespace is stored as `None`, so two names are equal exactly when
/// their fully-qualified forms are.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name {
  namespace: Option<String>,
  name: String,
}

impl Name {
  /// Parses a fully-qualified name such as `com.example.Person`.
  pub fn new(fullname: &str) -> Result<Self, BuildError> {
    let x = match fullname.rfind('.') {
      Some(i) => Self {
        namespace: normalize_namespace(&fullname[..i]),
        name: fullname[i + 1..].to_string(),
      },
      None => Self {
        namespace: None,
        name: fullname.to_string(),
      },
    };
    x.check()?;
    Ok(x)
  }

  /// Builds a name relative to `namespace`. A `name` that already contains a
  /// dot is fully qualified and `namespace` is ignored.
  pub fn with_namespace(name: &str, namespace: &str) -> Result<Self, BuildError> {
    if name.contains('.') {
      return Self::new(name);
    }
    let x = Self {
      namespace: normalize_namespace(namespace),
      name: name.to_string(),
    };
    x.check()?;
    Ok(x)
  }

  pub fn namespace(&self) -> Option<&str> {
    self.namespace.as_deref()
  }

  pub fn simple_name(&self) -> &str {
    &self.name
  }

  pub fn fullname(&self) -> String {
    match &self.namespace {
      Some(ns) => format!("{}.{}", ns, self.name),
      None => self.name.clone(),
    }
  }

  fn check(&self) -> Result<(), BuildError> {
    let valid = self
      .namespace
      .iter()
      .flat_map(|ns| ns.split('.'))
      .chain(std::iter::once(self.name.as_str()))
      .all(|part| IDENTIFIER.is_match(part));
    if valid {
      Ok(())
    } else {
      Err(BuildError::InvalidName(self.fullname()))
    }
  }
}

fn normalize_namespace(ns: &str) -> Option<String> {
  let ns = ns.trim_start_matches('.');
  if ns.is_empty() {
    None
  } else {
    Some(ns.to_string())
  }
}

impl Display for Name {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.namespace {
      Some(ns) => write!(f, "{}.{}", ns, self.name),
      None => write!(f, "{}", self.name),
    }
  }
}

impl TryFrom<String> for Name {
  type Error = BuildError;

  fn try_from(that: String) -> Result<Self, Self::Error> {
    Self::new(&that)
  }
}

impl TryFrom<&str> for Name {
  type Error = BuildError;

  fn try_from(that: &str) -> Result<Self, Self::Error> {
    Self::new(that)
  }
}

impl From<Name> for String {
  fn from(that: Name) -> Self {
    that.fullname()
  }
}

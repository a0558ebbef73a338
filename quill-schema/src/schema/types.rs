use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Kind tag of a schema node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Type {
  Null,
  Boolean,
  Int,
  Long,
  Float,
  Double,
  String,
  Bytes,
  Record,
  Enum,
  Array,
  Map,
  Union,
  Fixed,
  Symbolic,
}

impl Type {
  pub fn is_primitive(self) -> bool {
    self.as_primitive().is_some()
  }

  pub fn is_compound(self) -> bool {
    !self.is_primitive()
  }

  /// Kinds that carry a [`Name`](super::name::Name).
  pub fn is_named(self) -> bool {
    match self {
      Self::Record | Self::Enum | Self::Fixed | Self::Symbolic => true,
      _ => false,
    }
  }

  pub fn as_primitive(self) -> Option<PrimitiveType> {
    match self {
      Self::Null => Some(PrimitiveType::Null),
      Self::Boolean => Some(PrimitiveType::Boolean),
      Self::Int => Some(PrimitiveType::Int),
      Self::Long => Some(PrimitiveType::Long),
      Self::Float => Some(PrimitiveType::Float),
      Self::Double => Some(PrimitiveType::Double),
      Self::String => Some(PrimitiveType::String),
      Self::Bytes => Some(PrimitiveType::Bytes),
      _ => None,
    }
  }
}

impl Display for Type {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.as_primitive() {
      Some(x) => write!(f, "{}", x),
      None => write!(
        f,
        "{}",
        match self {
          Self::Record => "record",
          Self::Enum => "enum",
          Self::Array => "array",
          Self::Map => "map",
          Self::Union => "union",
          Self::Fixed => "fixed",
          _ => "symbolic",
        }
      ),
    }
  }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
  Null,
  Boolean,
  Int,
  Long,
  Float,
  Double,
  String,
  Bytes,
}

pub(crate) const PRIMITIVE_COUNT: usize = 8;

static PRIMITIVE_TYPES: phf::Map<&'static str, PrimitiveType> = phf::phf_map! {
  "null" => PrimitiveType::Null,
  "boolean" => PrimitiveType::Boolean,
  "int" => PrimitiveType::Int,
  "long" => PrimitiveType::Long,
  "float" => PrimitiveType::Float,
  "double" => PrimitiveType::Double,
  "string" => PrimitiveType::String,
  "bytes" => PrimitiveType::Bytes,
};

impl PrimitiveType {
  /// Looks up a primitive by its schema keyword (`"int"`, `"string"`, ...).
  pub fn from_name(name: &str) -> Option<Self> {
    PRIMITIVE_TYPES.get(name).copied()
  }

  pub fn ty(self) -> Type {
    match self {
      Self::Null => Type::Null,
      Self::Boolean => Type::Boolean,
      Self::Int => Type::Int,
      Self::Long => Type::Long,
      Self::Float => Type::Float,
      Self::Double => Type::Double,
      Self::String => Type::String,
      Self::Bytes => Type::Bytes,
    }
  }

  pub(crate) fn slot(self) -> usize {
    self as usize
  }
}

impl Display for PrimitiveType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Self::Null => "null",
        Self::Boolean => "boolean",
        Self::Int => "int",
        Self::Long => "long",
        Self::Float => "float",
        Self::Double => "double",
        Self::String => "string",
        Self::Bytes => "bytes",
      }
    )
  }
}

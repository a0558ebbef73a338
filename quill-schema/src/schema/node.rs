use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{
  attributes::{CustomAttributes, DefaultValue},
  error::BuildError,
  name::Name,
  types::{PrimitiveType, Type},
};

/// Index of a node inside its arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// One element of the schema graph.
///
/// Owning edges are the leaf sequences of records, arrays, maps and unions.
/// The target of a [`SymbolicNode`] is a back-reference and is never treated
/// as an owning edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
  Primitive(PrimitiveType),
  Record(RecordNode),
  Enum(EnumNode),
  Array(ArrayNode),
  Map(MapNode),
  Union(UnionNode),
  Fixed(FixedNode),
  Symbolic(SymbolicNode),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordNode {
  name: Name,
  doc: Option<String>,
  field_names: Vec<String>,
  fields: Vec<NodeId>,
  field_attributes: Vec<CustomAttributes>,
  field_defaults: Vec<DefaultValue>,
}

impl RecordNode {
  pub fn name(&self) -> &Name {
    &self.name
  }

  pub fn doc(&self) -> Option<&str> {
    self.doc.as_deref()
  }

  pub fn field_names(&self) -> &[String] {
    &self.field_names
  }

  pub fn fields(&self) -> &[NodeId] {
    &self.fields
  }

  pub fn field_attributes(&self) -> &[CustomAttributes] {
    &self.field_attributes
  }

  pub fn field_defaults(&self) -> &[DefaultValue] {
    &self.field_defaults
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnumNode {
  name: Name,
  symbols: Vec<String>,
}

impl EnumNode {
  pub fn name(&self) -> &Name {
    &self.name
  }

  pub fn symbols(&self) -> &[String] {
    &self.symbols
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayNode {
  items: Option<NodeId>,
}

impl ArrayNode {
  pub fn items(&self) -> Option<NodeId> {
    self.items
  }
}

/// Map keys are always strings and have no node of their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
  values: Option<NodeId>,
}

impl MapNode {
  pub fn values(&self) -> Option<NodeId> {
    self.values
  }
}

/// Branch order is the discriminant order used on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnionNode {
  branches: SmallVec<[NodeId; 4]>,
}

impl UnionNode {
  pub fn branches(&self) -> &[NodeId] {
    &self.branches
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedNode {
  name: Name,
  size: usize,
}

impl FixedNode {
  pub fn name(&self) -> &Name {
    &self.name
  }

  pub fn size(&self) -> usize {
    self.size
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolicNode {
  name: Name,
  target: NodeId,
}

impl SymbolicNode {
  pub fn name(&self) -> &Name {
    &self.name
  }

  pub fn target(&self) -> NodeId {
    self.target
  }
}

impl Node {
  pub(crate) fn record(name: Name) -> Self {
    Self::Record(RecordNode {
      name,
      doc: None,
      field_names: vec![],
      fields: vec![],
      field_attributes: vec![],
      field_defaults: vec![],
    })
  }

  pub(crate) fn enumeration(name: Name) -> Self {
    Self::Enum(EnumNode {
      name,
      symbols: vec![],
    })
  }

  pub(crate) fn array() -> Self {
    Self::Array(ArrayNode { items: None })
  }

  pub(crate) fn map() -> Self {
    Self::Map(MapNode { values: None })
  }

  pub(crate) fn union() -> Self {
    Self::Union(UnionNode {
      branches: SmallVec::new(),
    })
  }

  pub(crate) fn fixed(name: Name, size: usize) -> Self {
    Self::Fixed(FixedNode { name, size })
  }

  pub(crate) fn symbolic(name: Name, target: NodeId) -> Self {
    Self::Symbolic(SymbolicNode { name, target })
  }

  pub fn ty(&self) -> Type {
    match self {
      Self::Primitive(x) => x.ty(),
      Self::Record(_) => Type::Record,
      Self::Enum(_) => Type::Enum,
      Self::Array(_) => Type::Array,
      Self::Map(_) => Type::Map,
      Self::Union(_) => Type::Union,
      Self::Fixed(_) => Type::Fixed,
      Self::Symbolic(_) => Type::Symbolic,
    }
  }

  pub fn name(&self) -> Option<&Name> {
    match self {
      Self::Record(x) => Some(&x.name),
      Self::Enum(x) => Some(&x.name),
      Self::Fixed(x) => Some(&x.name),
      Self::Symbolic(x) => Some(&x.name),
      _ => None,
    }
  }

  /// Owning children, in construction order.
  pub fn leaf_ids(&self) -> &[NodeId] {
    match self {
      Self::Record(x) => &x.fields,
      Self::Union(x) => &x.branches,
      Self::Array(ArrayNode { items: Some(x) }) => std::slice::from_ref(x),
      Self::Map(MapNode { values: Some(x) }) => std::slice::from_ref(x),
      _ => &[],
    }
  }

  /// Field names of a record or symbols of an enum.
  pub fn names(&self) -> &[String] {
    match self {
      Self::Record(x) => &x.field_names,
      Self::Enum(x) => &x.symbols,
      _ => &[],
    }
  }

  pub fn fixed_size(&self) -> Option<usize> {
    match self {
      Self::Fixed(x) => Some(x.size),
      _ => None,
    }
  }

  pub fn doc(&self) -> &str {
    match self {
      Self::Record(x) => x.doc.as_deref().unwrap_or(""),
      _ => "",
    }
  }

  /// Registers a record field name or an enum symbol.
  ///
  /// Must succeed before the matching leaf is appended.
  pub(crate) fn add_name(&mut self, candidate: &str) -> Result<(), BuildError> {
    let (scope, names) = match self {
      Self::Record(x) => (&x.name, &mut x.field_names),
      Self::Enum(x) => (&x.name, &mut x.symbols),
      _ => panic!("add_name called on a {} node", self.ty()),
    };
    if names.iter().any(|x| x == candidate) {
      return Err(BuildError::DuplicateName {
        name: candidate.to_string(),
        scope: scope.clone(),
      });
    }
    names.push(candidate.to_string());
    Ok(())
  }

  pub(crate) fn add_leaf(&mut self, child: NodeId) {
    match self {
      Self::Record(x) => x.fields.push(child),
      Self::Union(x) => x.branches.push(child),
      Self::Array(ArrayNode { items: slot }) | Self::Map(MapNode { values: slot }) => {
        if slot.is_some() {
          panic!("single-leaf node already has its leaf");
        }
        *slot = Some(child);
      }
      _ => panic!("add_leaf called on a {} node", self.ty()),
    }
  }

  pub(crate) fn add_custom_attributes_for_field(&mut self, attributes: CustomAttributes) {
    match self {
      Self::Record(x) => x.field_attributes.push(attributes),
      _ => panic!("field attributes added to a {} node", self.ty()),
    }
  }

  pub(crate) fn add_default_for_field(&mut self, value: DefaultValue) {
    match self {
      Self::Record(x) => x.field_defaults.push(value),
      _ => panic!("field default added to a {} node", self.ty()),
    }
  }

  pub(crate) fn set_doc(&mut self, doc: &str) {
    match self {
      Self::Record(x) => x.doc = Some(doc.to_string()),
      _ => panic!("set_doc called on a {} node", self.ty()),
    }
  }

  /// Clones this node with every outgoing edge, including the symbolic
  /// target, passed through `f`.
  pub(crate) fn remap<F: Fn(NodeId) -> NodeId>(&self, f: F) -> Self {
    let mut x = self.clone();
    match &mut x {
      Self::Record(x) => x.fields.iter_mut().for_each(|id| *id = f(*id)),
      Self::Union(x) => x.branches.iter_mut().for_each(|id| *id = f(*id)),
      Self::Array(ArrayNode { items: slot }) | Self::Map(MapNode { values: slot }) => {
        *slot = slot.map(&f);
      }
      Self::Symbolic(x) => x.target = f(x.target),
      Self::Primitive(_) | Self::Enum(_) | Self::Fixed(_) => {}
    }
    x
  }
}

use super::{
  attributes::{CustomAttributes, DefaultValue},
  graph::NodeArena,
  name::Name,
  node::{Node, NodeId},
  types::Type,
};

/// Read-only window onto one node of an arena.
///
/// This is the surface the codec and the resolver read the graph through.
/// Child order is always construction order.
#[derive(Copy, Clone)]
pub struct NodeView<'a> {
  arena: &'a NodeArena,
  id: NodeId,
}

impl<'a> std::fmt::Debug for NodeView<'a> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.name() {
      Some(name) => write!(f, "{}#{}({})", self.ty(), self.id.0, name),
      None => write!(f, "{}#{}", self.ty(), self.id.0),
    }
  }
}

impl<'a> NodeView<'a> {
  pub(crate) fn new(arena: &'a NodeArena, id: NodeId) -> Self {
    Self { arena, id }
  }

  pub fn id(&self) -> NodeId {
    self.id
  }

  pub fn node(&self) -> &'a Node {
    self.arena.get(self.id)
  }

  pub fn ty(&self) -> Type {
    self.node().ty()
  }

  pub fn name(&self) -> Option<&'a Name> {
    self.node().name()
  }

  /// Number of owning children.
  pub fn leaves(&self) -> usize {
    self.node().leaf_ids().len()
  }

  pub fn leaf_at(&self, i: usize) -> Option<NodeView<'a>> {
    self
      .node()
      .leaf_ids()
      .get(i)
      .map(|&x| Self::new(self.arena, x))
  }

  pub fn leaf_iter(&self) -> impl Iterator<Item = NodeView<'a>> + 'a {
    let arena = self.arena;
    self
      .node()
      .leaf_ids()
      .iter()
      .map(move |&x| NodeView::new(arena, x))
  }

  /// Number of record field names or enum symbols.
  pub fn names(&self) -> usize {
    self.node().names().len()
  }

  pub fn name_at(&self, i: usize) -> Option<&'a str> {
    self.node().names().get(i).map(|x| x.as_str())
  }

  /// Position of a record field or enum symbol.
  pub fn name_index(&self, name: &str) -> Option<usize> {
    self.node().names().iter().position(|x| x == name)
  }

  pub fn symbols(&self) -> &'a [String] {
    match self.node() {
      Node::Enum(x) => x.symbols(),
      _ => &[],
    }
  }

  pub fn fixed_size(&self) -> Option<usize> {
    self.node().fixed_size()
  }

  pub fn doc(&self) -> &'a str {
    self.node().doc()
  }

  pub fn custom_attributes_at(&self, i: usize) -> Option<&'a CustomAttributes> {
    match self.node() {
      Node::Record(x) => x.field_attributes().get(i),
      _ => None,
    }
  }

  pub fn default_at(&self, i: usize) -> Option<&'a DefaultValue> {
    match self.node() {
      Node::Record(x) => x.field_defaults().get(i),
      _ => None,
    }
  }

  /// Follows a symbolic back-reference; any other node resolves to itself.
  pub fn resolve(&self) -> NodeView<'a> {
    match self.node() {
      Node::Symbolic(x) => Self::new(self.arena, x.target()),
      _ => *self,
    }
  }

  /// Node identity, as opposed to structural equality.
  pub fn same_node(&self, that: &NodeView<'_>) -> bool {
    std::ptr::eq(self.arena, that.arena) && self.id == that.id
  }
}

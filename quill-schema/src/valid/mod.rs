//! Published schemas.
//!
//! A [`ValidSchema`] is produced once, by [`SchemaGraph::finish`] or by
//! deserializing a [`GraphSnapshot`], and is never mutated afterwards. Clones
//! share the node storage and can be read from any thread.
//!
//! [`SchemaGraph::finish`]: crate::schema::SchemaGraph::finish

pub mod analysis;
pub mod json;
pub mod validate;
pub mod walk;

use std::{convert::TryFrom, fmt::Display, sync::Arc};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{
  graph::{GraphId, NodeArena},
  name::Name,
  node::{Node, NodeId},
  types::Type,
  view::NodeView,
};

use self::walk::Visitor;

#[derive(Error, Debug)]
pub enum ValidationError {
  #[error("node index {0} is out of bounds")]
  DanglingReference(u32),

  #[error("fields of record `{0}` are misaligned")]
  MisalignedFields(Name),

  #[error("duplicate field `{field}` in record `{record}`")]
  DuplicateField { field: String, record: Name },

  #[error("enum `{0}` has no symbols")]
  EmptyEnum(Name),

  #[error("duplicate symbol `{symbol}` in enum `{name}`")]
  DuplicateSymbol { symbol: String, name: Name },

  #[error("{0} node has no child")]
  MissingLeaf(Type),

  #[error("union has no branches")]
  EmptyUnion,

  #[error("union contains a union")]
  NestedUnion,

  #[error("union has two record branches named `{0}`")]
  DuplicateBranch(Name),

  #[error("symbolic reference `{symbol}` points at {target}")]
  SymbolMismatch { symbol: Name, target: String },

  #[error("symbolic reference `{0}` points outside the schema")]
  UnresolvedSymbol(Name),

  #[error("type `{0}` is defined more than once")]
  Redefinition(Name),

  #[error("`{0}` contains itself without a symbolic reference")]
  OwningCycle(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "GraphSnapshot", into = "GraphSnapshot")]
pub struct ValidSchema {
  arena: Arc<NodeArena>,
  root: NodeId,
}

/// Flat serialized form of a [`ValidSchema`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphSnapshot {
  pub nodes: Vec<Node>,
  pub root: NodeId,
}

impl ValidSchema {
  pub(crate) fn new(arena: NodeArena, root: NodeId) -> Self {
    Self {
      arena: Arc::new(arena),
      root,
    }
  }

  pub fn id(&self) -> GraphId {
    self.arena.id
  }

  pub fn root(&self) -> NodeView<'_> {
    NodeView::new(&self.arena, self.root)
  }

  pub fn node(&self, id: NodeId) -> Option<NodeView<'_>> {
    if id.index() < self.arena.nodes.len() {
      Some(NodeView::new(&self.arena, id))
    } else {
      None
    }
  }

  /// All nodes, in depth-first pre-order from the root.
  pub fn nodes(&self) -> impl Iterator<Item = NodeView<'_>> {
    let arena = &*self.arena;
    (0..arena.nodes.len()).map(move |i| NodeView::new(arena, NodeId(i as u32)))
  }

  pub fn len(&self) -> usize {
    self.arena.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.arena.nodes.is_empty()
  }

  /// Whether both handles share the same node storage.
  pub fn ptr_eq(&self, that: &ValidSchema) -> bool {
    Arc::ptr_eq(&self.arena, &that.arena)
  }

  pub fn walk<'a, V: Visitor<'a>>(&'a self, visitor: &mut V) -> Result<()> {
    walk::walk(self.root(), visitor)
  }

  pub fn to_json(&self) -> Result<serde_json::Value> {
    json::to_json(self.root())
  }
}

/// Pretty JSON. A schema too deep to render prints the render error instead.
impl Display for ValidSchema {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.to_json() {
      Ok(x) => {
        let text = serde_json::to_string_pretty(&x).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", text)
      }
      Err(e) => write!(f, "<{}>", e),
    }
  }
}

impl TryFrom<GraphSnapshot> for ValidSchema {
  type Error = anyhow::Error;

  fn try_from(that: GraphSnapshot) -> Result<Self> {
    let arena = NodeArena {
      id: GraphId::next(),
      nodes: that.nodes,
    };
    validate::publish(&arena, that.root)
  }
}

impl From<ValidSchema> for GraphSnapshot {
  fn from(that: ValidSchema) -> Self {
    Self {
      nodes: that.arena.nodes.clone(),
      root: that.root,
    }
  }
}

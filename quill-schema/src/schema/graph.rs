use std::{
  collections::HashSet,
  convert::TryFrom,
  sync::atomic::{AtomicU64, Ordering},
};

use anyhow::Result;

use crate::valid::{validate::publish, ValidSchema};

use super::{
  node::{Node, NodeId},
  types::{PrimitiveType, PRIMITIVE_COUNT},
  view::NodeView,
};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GraphId(u64);

impl GraphId {
  pub(crate) fn next() -> Self {
    Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
  }
}

/// Node storage shared by the mutable [`SchemaGraph`] and the published
/// [`ValidSchema`].
#[derive(Debug)]
pub struct NodeArena {
  pub(crate) id: GraphId,
  pub(crate) nodes: Vec<Node>,
}

impl NodeArena {
  pub(crate) fn new() -> Self {
    Self {
      id: GraphId::next(),
      nodes: vec![],
    }
  }

  pub(crate) fn get(&self, id: NodeId) -> &Node {
    &self.nodes[id.index()]
  }

  pub(crate) fn push(&mut self, node: Node) -> NodeId {
    let id = u32::try_from(self.nodes.len())
      .map(NodeId)
      .unwrap_or_else(|_| panic!("schema graph exceeds {} nodes", u32::MAX));
    self.nodes.push(node);
    id
  }

  /// Whether `to` is reachable from `from` through owning edges.
  ///
  /// Cost is bounded by the subtree under `from`, not by the arena size.
  pub(crate) fn reaches(&self, from: NodeId, to: NodeId) -> bool {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![from];
    while let Some(x) = stack.pop() {
      if x == to {
        return true;
      }
      if !seen.insert(x) {
        continue;
      }
      stack.extend_from_slice(self.get(x).leaf_ids());
    }
    false
  }
}

/// Handle to the root node of a schema.
///
/// Copying a `Schema` shares the node; it never duplicates the subtree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Schema {
  pub(crate) graph: GraphId,
  pub(crate) root: NodeId,
}

impl Schema {
  pub fn root(&self) -> NodeId {
    self.root
  }

  pub fn graph(&self) -> GraphId {
    self.graph
  }
}

/// Arena in which a schema is built.
///
/// Builders mutate nodes in place without locking; use one graph per thread.
/// [`SchemaGraph::finish`] turns it into an immutable [`ValidSchema`].
#[derive(Debug)]
pub struct SchemaGraph {
  arena: NodeArena,
  primitives: [Option<NodeId>; PRIMITIVE_COUNT],
}

impl Default for SchemaGraph {
  fn default() -> Self {
    Self::new()
  }
}

impl SchemaGraph {
  pub fn new() -> Self {
    Self {
      arena: NodeArena::new(),
      primitives: [None; PRIMITIVE_COUNT],
    }
  }

  pub fn id(&self) -> GraphId {
    self.arena.id
  }

  pub fn len(&self) -> usize {
    self.arena.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.arena.nodes.is_empty()
  }

  /// Handle to the node of a primitive kind. Each kind gets one node per graph.
  pub fn primitive(&mut self, ty: PrimitiveType) -> Schema {
    let root = match self.primitives[ty.slot()] {
      Some(x) => x,
      None => {
        let x = self.arena.push(Node::Primitive(ty));
        self.primitives[ty.slot()] = Some(x);
        x
      }
    };
    self.handle(root)
  }

  pub fn view(&self, schema: Schema) -> NodeView<'_> {
    self.check_owned(schema);
    NodeView::new(&self.arena, schema.root)
  }

  /// Validates the graph reachable from `root` and publishes it.
  ///
  /// Nodes not reachable from `root` are dropped.
  pub fn finish(self, root: Schema) -> Result<ValidSchema> {
    self.check_owned(root);
    publish(&self.arena, root.root)
  }

  pub(crate) fn insert(&mut self, node: Node) -> Schema {
    let id = self.arena.push(node);
    self.handle(id)
  }

  pub(crate) fn node_mut(&mut self, schema: Schema) -> &mut Node {
    self.check_owned(schema);
    &mut self.arena.nodes[schema.root.index()]
  }

  pub(crate) fn node(&self, schema: Schema) -> &Node {
    self.check_owned(schema);
    self.arena.get(schema.root)
  }

  pub(crate) fn reaches(&self, from: Schema, to: Schema) -> bool {
    self.check_owned(from);
    self.check_owned(to);
    self.arena.reaches(from.root, to.root)
  }

  pub(crate) fn check_owned(&self, schema: Schema) {
    if schema.graph != self.arena.id {
      panic!(
        "schema handle {:?} does not belong to graph {:?}",
        schema, self.arena.id
      );
    }
  }

  fn handle(&self, root: NodeId) -> Schema {
    Schema {
      graph: self.arena.id,
      root,
    }
  }
}

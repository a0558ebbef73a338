use petgraph::{
  algo::tarjan_scc,
  graph::{DiGraph, NodeIndex},
};

use crate::schema::node::{Node, NodeId};

use super::ValidSchema;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EdgeKind {
  /// Record field, array item, map value or union branch.
  Owning,

  /// Symbolic back-reference.
  Symbolic,
}

/// The schema as a petgraph digraph. Node weights are the schema's node ids,
/// and graph index `i` holds `NodeId` `i`.
pub fn dependency_graph(schema: &ValidSchema) -> DiGraph<NodeId, EdgeKind> {
  let mut g = DiGraph::with_capacity(schema.len(), schema.len());
  for view in schema.nodes() {
    g.add_node(view.id());
  }
  for view in schema.nodes() {
    let from = NodeIndex::new(view.id().index());
    for child in view.leaf_iter() {
      g.add_edge(from, NodeIndex::new(child.id().index()), EdgeKind::Owning);
    }
    if let Node::Symbolic(x) = view.node() {
      g.add_edge(from, NodeIndex::new(x.target().index()), EdgeKind::Symbolic);
    }
  }
  g
}

/// Strongly connected components that contain a cycle, each sorted by id.
///
/// In a valid schema every cycle passes through a symbolic edge.
pub fn cycles(schema: &ValidSchema) -> Vec<Vec<NodeId>> {
  let g = dependency_graph(schema);
  let mut out = tarjan_scc(&g)
    .into_iter()
    .filter(|scc| scc.len() > 1 || g.contains_edge(scc[0], scc[0]))
    .map(|scc| {
      let mut ids = scc.iter().map(|&i| g[i]).collect::<Vec<_>>();
      ids.sort();
      ids
    })
    .collect::<Vec<_>>();
  out.sort();
  out
}

use std::collections::HashMap;

use anyhow::Result;

use crate::{
  schema::{
    graph::NodeArena,
    name::Name,
    node::{Node, NodeId},
    types::Type,
  },
  util::first_duplicate,
};

use super::{ValidSchema, ValidationError};

#[derive(Copy, Clone, Eq, PartialEq)]
enum Mark {
  Unvisited,
  OnStack,
  Done,
}

/// Checks the graph reachable from `root` and copies it into a fresh arena,
/// root first, in depth-first pre-order.
pub(crate) fn publish(arena: &NodeArena, root: NodeId) -> Result<ValidSchema> {
  let order = reachable_checked(arena, root)?;

  let mut remap: Vec<Option<NodeId>> = vec![None; arena.nodes.len()];
  for (i, old) in order.iter().enumerate() {
    remap[old.index()] = Some(NodeId(i as u32));
  }
  let nodes = order
    .iter()
    .map(|&old| {
      arena.get(old).remap(|x| {
        remap[x.index()].unwrap_or_else(|| panic!("edge to unvalidated node {:?}", x))
      })
    })
    .collect::<Vec<_>>();

  let dropped = arena.nodes.len() - nodes.len();
  if dropped != 0 {
    log::warn!("dropping {} node(s) unreachable from the root", dropped);
  }
  log::debug!("published schema with {} node(s)", nodes.len());

  let mut published = NodeArena::new();
  published.nodes = nodes;
  Ok(ValidSchema::new(published, NodeId(0)))
}

fn reachable_checked(arena: &NodeArena, root: NodeId) -> Result<Vec<NodeId>> {
  check_bounds(arena, root)?;

  let mut marks = vec![Mark::Unvisited; arena.nodes.len()];
  let mut definitions: HashMap<&Name, NodeId> = HashMap::new();
  let mut symbolic: Vec<(&Name, NodeId)> = vec![];
  let mut order = vec![];

  // (node, next child to visit)
  let mut stack: Vec<(NodeId, usize)> = vec![];

  check_node(arena, root, &mut definitions, &mut symbolic)?;
  marks[root.index()] = Mark::OnStack;
  order.push(root);
  stack.push((root, 0));

  while let Some(&(id, next)) = stack.last() {
    let leaves = arena.get(id).leaf_ids();
    if next == leaves.len() {
      marks[id.index()] = Mark::Done;
      stack.pop();
      continue;
    }
    if let Some(top) = stack.last_mut() {
      top.1 += 1;
    }

    let child = leaves[next];
    match marks[child.index()] {
      Mark::Unvisited => {
        check_node(arena, child, &mut definitions, &mut symbolic)?;
        marks[child.index()] = Mark::OnStack;
        order.push(child);
        stack.push((child, 0));
      }
      Mark::OnStack => {
        return Err(ValidationError::OwningCycle(describe(arena.get(child))).into());
      }
      Mark::Done => {}
    }
  }

  for (name, target) in symbolic {
    if marks[target.index()] == Mark::Unvisited {
      return Err(ValidationError::UnresolvedSymbol(name.clone()).into());
    }
  }

  Ok(order)
}

fn check_bounds(arena: &NodeArena, id: NodeId) -> Result<()> {
  if id.index() < arena.nodes.len() {
    Ok(())
  } else {
    Err(ValidationError::DanglingReference(id.0).into())
  }
}

fn describe(node: &Node) -> String {
  match node.name() {
    Some(x) => x.fullname(),
    None => node.ty().to_string(),
  }
}

/// Well-formedness of a single node. Also rechecks the construction-time
/// invariants, since a deserialized snapshot never went through a builder.
fn check_node<'a>(
  arena: &'a NodeArena,
  id: NodeId,
  definitions: &mut HashMap<&'a Name, NodeId>,
  symbolic: &mut Vec<(&'a Name, NodeId)>,
) -> Result<()> {
  let node = arena.get(id);
  for &leaf in node.leaf_ids() {
    check_bounds(arena, leaf)?;
  }

  match node {
    Node::Primitive(_) => {}
    Node::Record(x) => {
      let n = x.field_names().len();
      if x.fields().len() != n || x.field_attributes().len() != n || x.field_defaults().len() != n
      {
        return Err(ValidationError::MisalignedFields(x.name().clone()).into());
      }
      if let Some(field) = first_duplicate(x.field_names()) {
        return Err(
          ValidationError::DuplicateField {
            field: field.clone(),
            record: x.name().clone(),
          }
          .into(),
        );
      }
    }
    Node::Enum(x) => {
      if x.symbols().is_empty() {
        return Err(ValidationError::EmptyEnum(x.name().clone()).into());
      }
      if let Some(symbol) = first_duplicate(x.symbols()) {
        return Err(
          ValidationError::DuplicateSymbol {
            symbol: symbol.clone(),
            name: x.name().clone(),
          }
          .into(),
        );
      }
    }
    Node::Array(x) => {
      if x.items().is_none() {
        return Err(ValidationError::MissingLeaf(Type::Array).into());
      }
    }
    Node::Map(x) => {
      if x.values().is_none() {
        return Err(ValidationError::MissingLeaf(Type::Map).into());
      }
    }
    Node::Union(x) => {
      if x.branches().is_empty() {
        return Err(ValidationError::EmptyUnion.into());
      }
      let branches = x.branches().iter().map(|&b| arena.get(b));
      if branches.clone().any(|b| b.ty() == Type::Union) {
        return Err(ValidationError::NestedUnion.into());
      }
      let records = branches
        .filter(|b| b.ty() == Type::Record)
        .filter_map(|b| b.name());
      if let Some(name) = first_duplicate(records) {
        return Err(ValidationError::DuplicateBranch(name.clone()).into());
      }
    }
    Node::Fixed(_) => {}
    Node::Symbolic(x) => {
      check_bounds(arena, x.target())?;
      let target = arena.get(x.target());
      let matches = match target {
        Node::Record(_) | Node::Enum(_) | Node::Fixed(_) => target.name() == Some(x.name()),
        _ => false,
      };
      if !matches {
        return Err(
          ValidationError::SymbolMismatch {
            symbol: x.name().clone(),
            target: format!("{} `{}`", target.ty(), describe(target)),
          }
          .into(),
        );
      }
      symbolic.push((x.name(), x.target()));
    }
  }

  match node {
    Node::Record(_) | Node::Enum(_) | Node::Fixed(_) => {
      if let Some(name) = node.name() {
        if let Some(&prev) = definitions.get(name) {
          if prev != id {
            return Err(ValidationError::Redefinition(name.clone()).into());
          }
        }
        definitions.insert(name, id);
      }
    }
    _ => {}
  }

  Ok(())
}

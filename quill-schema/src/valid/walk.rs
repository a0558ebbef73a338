use anyhow::Result;

use crate::schema::{types::Type, view::NodeView};

/// Callbacks for [`walk`].
pub trait Visitor<'a> {
  fn enter(&mut self, node: NodeView<'a>, depth: usize) -> Result<()>;

  fn leave(&mut self, _node: NodeView<'a>, _depth: usize) -> Result<()> {
    Ok(())
  }
}

impl<'a, F> Visitor<'a> for F
where
  F: FnMut(NodeView<'a>, usize) -> Result<()>,
{
  fn enter(&mut self, node: NodeView<'a>, depth: usize) -> Result<()> {
    self(node, depth)
  }
}

/// Depth-first traversal over owning edges.
///
/// Symbolic nodes are entered and left but never followed, so recursive
/// schemas terminate. A node shared by several parents is visited once per
/// parent. The walk uses an explicit stack; deeply nested schemas do not grow
/// the call stack.
pub fn walk<'a, V: Visitor<'a> + ?Sized>(root: NodeView<'a>, visitor: &mut V) -> Result<()> {
  visitor.enter(root, 0)?;
  let mut stack: Vec<(NodeView<'a>, usize)> = vec![(root, 0)];

  while let Some(&(node, next)) = stack.last() {
    let depth = stack.len() - 1;
    let child = match node.ty() {
      Type::Symbolic => None,
      _ => node.leaf_at(next),
    };
    match child {
      Some(child) => {
        if let Some(top) = stack.last_mut() {
          top.1 += 1;
        }
        visitor.enter(child, depth + 1)?;
        stack.push((child, 0));
      }
      None => {
        stack.pop();
        visitor.leave(node, depth)?;
      }
    }
  }
  Ok(())
}

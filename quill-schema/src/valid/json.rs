use std::collections::HashSet;

use anyhow::Result;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{name::Name, node::Node, view::NodeView};

/// Nesting limit for rendering. The renderer and the `Value` it returns are
/// both recursive, so the call stack needs a bound.
pub const MAX_RENDER_DEPTH: usize = 128;

#[derive(Error, Debug)]
pub enum RenderError {
  #[error("schema is nested deeper than {0} levels")]
  TooDeep(usize),
}

/// Renders the graph under `root` in the usual JSON schema notation.
///
/// A named type is spelled out on its first occurrence and referenced by its
/// full name afterwards. A symbolic reference met before its target is
/// replaced by the target's full definition, so every name is defined before
/// it is used.
pub fn to_json(root: NodeView<'_>) -> Result<Value> {
  let mut seen = HashSet::new();
  render(root, &mut seen, 0)
}

fn render<'a>(view: NodeView<'a>, seen: &mut HashSet<&'a Name>, depth: usize) -> Result<Value> {
  if depth >= MAX_RENDER_DEPTH {
    return Err(RenderError::TooDeep(MAX_RENDER_DEPTH).into());
  }
  let node = view.node();
  if let Node::Record(_) | Node::Enum(_) | Node::Fixed(_) = node {
    if let Some(name) = node.name() {
      if !seen.insert(name) {
        return Ok(Value::String(name.fullname()));
      }
    }
  }

  Ok(match node {
    Node::Primitive(x) => Value::String(x.to_string()),
    Node::Symbolic(x) => {
      let target = view.resolve();
      match target.name() {
        Some(name) if name == x.name() && !seen.contains(name) => {
          log::trace!("`{}` is referenced before its definition", name);
          render(target, seen, depth + 1)?
        }
        _ => Value::String(x.name().fullname()),
      }
    }
    Node::Record(x) => {
      let mut obj = Map::new();
      obj.insert("type".into(), "record".into());
      obj.insert("name".into(), x.name().fullname().into());
      if let Some(doc) = x.doc().filter(|x| !x.is_empty()) {
        obj.insert("doc".into(), doc.into());
      }
      let mut fields = vec![];
      for (i, field_name) in x.field_names().iter().enumerate() {
        let mut field = Map::new();
        field.insert("name".into(), field_name.as_str().into());
        if let Some(leaf) = view.leaf_at(i) {
          field.insert("type".into(), render(leaf, seen, depth + 1)?);
        }
        if let Some(value) = view.default_at(i).and_then(|x| x.value()) {
          field.insert("default".into(), value.clone());
        }
        if let Some(attributes) = view.custom_attributes_at(i) {
          for (k, v) in attributes.iter() {
            field.insert(k.into(), v.into());
          }
        }
        fields.push(Value::Object(field));
      }
      obj.insert("fields".into(), Value::Array(fields));
      Value::Object(obj)
    }
    Node::Enum(x) => {
      let mut obj = Map::new();
      obj.insert("type".into(), "enum".into());
      obj.insert("name".into(), x.name().fullname().into());
      obj.insert(
        "symbols".into(),
        Value::Array(x.symbols().iter().map(|s| s.as_str().into()).collect()),
      );
      Value::Object(obj)
    }
    Node::Array(_) => {
      let mut obj = Map::new();
      obj.insert("type".into(), "array".into());
      if let Some(items) = view.leaf_at(0) {
        obj.insert("items".into(), render(items, seen, depth + 1)?);
      }
      Value::Object(obj)
    }
    Node::Map(_) => {
      let mut obj = Map::new();
      obj.insert("type".into(), "map".into());
      if let Some(values) = view.leaf_at(0) {
        obj.insert("values".into(), render(values, seen, depth + 1)?);
      }
      Value::Object(obj)
    }
    Node::Union(_) => Value::Array(
      view
        .leaf_iter()
        .map(|x| render(x, seen, depth + 1))
        .collect::<Result<_>>()?,
    ),
    Node::Fixed(x) => {
      let mut obj = Map::new();
      obj.insert("type".into(), "fixed".into());
      obj.insert("name".into(), x.name().fullname().into());
      obj.insert("size".into(), x.size().into());
      Value::Object(obj)
    }
  })
}

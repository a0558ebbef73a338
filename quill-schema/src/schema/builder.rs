//! Builders, one per composite kind.
//!
//! Every builder wraps a freshly created node and only ever appends to it.
//! A failing call leaves the graph exactly as it was.

use super::{
  attributes::{CustomAttributes, DefaultValue},
  error::BuildError,
  graph::{Schema, SchemaGraph},
  name::Name,
  node::Node,
  types::Type,
};

fn ensure_acyclic(g: &SchemaGraph, parent: Schema, child: Schema) -> Result<(), BuildError> {
  if g.reaches(child, parent) {
    let parent = g.node(parent);
    let label = match parent.name() {
      Some(x) => x.fullname(),
      None => parent.ty().to_string(),
    };
    return Err(BuildError::OwningCycle(label));
  }
  Ok(())
}

#[derive(Debug)]
pub struct RecordSchema {
  schema: Schema,
}

impl RecordSchema {
  pub fn new(g: &mut SchemaGraph, name: &str) -> Result<Self, BuildError> {
    Ok(Self::with_name(g, Name::new(name)?))
  }

  pub fn with_name(g: &mut SchemaGraph, name: Name) -> Self {
    Self {
      schema: g.insert(Node::record(name)),
    }
  }

  pub fn add_field(
    &mut self,
    g: &mut SchemaGraph,
    name: &str,
    field: Schema,
  ) -> Result<(), BuildError> {
    self.add_field_with_default(g, name, field, CustomAttributes::new(), DefaultValue::none())
  }

  pub fn add_field_with_attributes(
    &mut self,
    g: &mut SchemaGraph,
    name: &str,
    field: Schema,
    attributes: CustomAttributes,
  ) -> Result<(), BuildError> {
    self.add_field_with_default(g, name, field, attributes, DefaultValue::none())
  }

  pub fn add_field_with_default(
    &mut self,
    g: &mut SchemaGraph,
    name: &str,
    field: Schema,
    attributes: CustomAttributes,
    default: DefaultValue,
  ) -> Result<(), BuildError> {
    ensure_acyclic(g, self.schema, field)?;

    // The name goes in first. Nothing else is touched if it is a duplicate,
    // which keeps the per-field arrays parallel.
    let node = g.node_mut(self.schema);
    node.add_name(name)?;
    node.add_leaf(field.root);
    node.add_custom_attributes_for_field(attributes);
    node.add_default_for_field(default);
    log::trace!("record `{}`: added field `{}`", self.name(g), name);
    Ok(())
  }

  pub fn name<'a>(&self, g: &'a SchemaGraph) -> &'a Name {
    match g.node(self.schema) {
      Node::Record(x) => x.name(),
      x => panic!("record builder points at a {} node", x.ty()),
    }
  }

  pub fn doc<'a>(&self, g: &'a SchemaGraph) -> &'a str {
    g.node(self.schema).doc()
  }

  pub fn set_doc(&mut self, g: &mut SchemaGraph, doc: &str) {
    g.node_mut(self.schema).set_doc(doc);
  }

  pub fn schema(&self) -> Schema {
    self.schema
  }
}

#[derive(Debug)]
pub struct EnumSchema {
  schema: Schema,
}

impl EnumSchema {
  pub fn new(g: &mut SchemaGraph, name: &str) -> Result<Self, BuildError> {
    Ok(Self::with_name(g, Name::new(name)?))
  }

  pub fn with_name(g: &mut SchemaGraph, name: Name) -> Self {
    Self {
      schema: g.insert(Node::enumeration(name)),
    }
  }

  pub fn add_symbol(&mut self, g: &mut SchemaGraph, symbol: &str) -> Result<(), BuildError> {
    g.node_mut(self.schema).add_name(symbol)?;
    log::trace!("enum {:?}: added symbol `{}`", self.schema.root, symbol);
    Ok(())
  }

  pub fn schema(&self) -> Schema {
    self.schema
  }
}

#[derive(Debug)]
pub struct ArraySchema {
  schema: Schema,
}

impl ArraySchema {
  pub fn new(g: &mut SchemaGraph, items: Schema) -> Self {
    g.check_owned(items);
    let schema = g.insert(Node::array());
    g.node_mut(schema).add_leaf(items.root);
    Self { schema }
  }

  /// A new array whose items are the array `that`, shared rather than copied.
  pub fn from_array(g: &mut SchemaGraph, that: &ArraySchema) -> Self {
    Self::new(g, that.schema)
  }

  pub fn items(&self, g: &SchemaGraph) -> Schema {
    match g.node(self.schema) {
      Node::Array(x) => Schema {
        graph: self.schema.graph,
        root: x.items().unwrap_or_else(|| panic!("array without items")),
      },
      x => panic!("array builder points at a {} node", x.ty()),
    }
  }

  pub fn schema(&self) -> Schema {
    self.schema
  }
}

#[derive(Debug)]
pub struct MapSchema {
  schema: Schema,
}

impl MapSchema {
  pub fn new(g: &mut SchemaGraph, values: Schema) -> Self {
    g.check_owned(values);
    let schema = g.insert(Node::map());
    g.node_mut(schema).add_leaf(values.root);
    Self { schema }
  }

  /// A new map whose values are the map `that`, shared rather than copied.
  pub fn from_map(g: &mut SchemaGraph, that: &MapSchema) -> Self {
    Self::new(g, that.schema)
  }

  pub fn values(&self, g: &SchemaGraph) -> Schema {
    match g.node(self.schema) {
      Node::Map(x) => Schema {
        graph: self.schema.graph,
        root: x.values().unwrap_or_else(|| panic!("map without values")),
      },
      x => panic!("map builder points at a {} node", x.ty()),
    }
  }

  pub fn schema(&self) -> Schema {
    self.schema
  }
}

#[derive(Debug)]
pub struct UnionSchema {
  schema: Schema,
}

impl UnionSchema {
  pub fn new(g: &mut SchemaGraph) -> Self {
    Self {
      schema: g.insert(Node::union()),
    }
  }

  /// Appends a branch. Unions do not nest, and two record branches may not
  /// share a name. Other branches are never reordered or deduplicated.
  pub fn add_type(&mut self, g: &mut SchemaGraph, branch: Schema) -> Result<(), BuildError> {
    let candidate = g.node(branch);
    match candidate.ty() {
      Type::Union => return Err(BuildError::InvalidUnion),
      Type::Record => {
        let name = candidate.name();
        let node = g.node(self.schema);
        let duplicate = node.leaf_ids().iter().any(|&x| {
          let leaf = g.node(Schema {
            graph: self.schema.graph,
            root: x,
          });
          leaf.ty() == Type::Record && leaf.name() == name
        });
        if duplicate {
          if let Some(name) = name {
            return Err(BuildError::DuplicateBranch(name.clone()));
          }
        }
      }
      _ => {}
    }
    ensure_acyclic(g, self.schema, branch)?;

    g.node_mut(self.schema).add_leaf(branch.root);
    log::trace!("union {:?}: added {:?}", self.schema.root, branch.root);
    Ok(())
  }

  pub fn schema(&self) -> Schema {
    self.schema
  }
}

#[derive(Debug)]
pub struct FixedSchema {
  schema: Schema,
}

impl FixedSchema {
  /// The size is not bounded here; the codec rejects absurd sizes.
  pub fn new(g: &mut SchemaGraph, size: usize, name: &str) -> Result<Self, BuildError> {
    let name = Name::new(name)?;
    Ok(Self {
      schema: g.insert(Node::fixed(name, size)),
    })
  }

  pub fn size(&self, g: &SchemaGraph) -> usize {
    g.node(self.schema).fixed_size().unwrap_or_default()
  }

  pub fn schema(&self) -> Schema {
    self.schema
  }
}

/// A named back-reference used to close recursive definitions.
///
/// `link` is not owned: the symbolic node never keeps its target alive and is
/// never walked as a child.
#[derive(Debug)]
pub struct SymbolicSchema {
  schema: Schema,
}

impl SymbolicSchema {
  pub fn new(g: &mut SchemaGraph, name: Name, link: Schema) -> Self {
    g.check_owned(link);
    Self {
      schema: g.insert(Node::symbolic(name, link.root)),
    }
  }

  pub fn schema(&self) -> Schema {
    self.schema
  }
}

macro_rules! impl_into_schema {
  ($($t:ty),*) => {
    $(
      impl From<$t> for Schema {
        fn from(that: $t) -> Schema {
          that.schema
        }
      }

      impl From<&$t> for Schema {
        fn from(that: &$t) -> Schema {
          that.schema
        }
      }
    )*
  };
}

impl_into_schema!(
  RecordSchema,
  EnumSchema,
  ArraySchema,
  MapSchema,
  UnionSchema,
  FixedSchema,
  SymbolicSchema
);

use crate::schema::{ArraySchema, PrimitiveType, RecordSchema, SchemaGraph, SymbolicSchema};

/// `record Person { name: string, age: int }`
pub fn person(g: &mut SchemaGraph) -> RecordSchema {
  let string = g.primitive(PrimitiveType::String);
  let int = g.primitive(PrimitiveType::Int);
  let mut r = RecordSchema::new(g, "Person").unwrap();
  r.add_field(g, "name", string).unwrap();
  r.add_field(g, "age", int).unwrap();
  r
}

/// `record Tree { children: array<Tree> }`, closed through a symbolic node.
pub fn tree(g: &mut SchemaGraph) -> RecordSchema {
  let mut tree = RecordSchema::new(g, "Tree").unwrap();
  let name = tree.name(g).clone();
  let back = SymbolicSchema::new(g, name, tree.schema());
  let children = ArraySchema::new(g, back.schema());
  tree.add_field(g, "children", children.schema()).unwrap();
  tree
}

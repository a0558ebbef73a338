pub mod attributes;
pub mod builder;
pub mod error;
pub mod graph;
pub mod name;
pub mod node;
pub mod types;
pub mod view;

pub use attributes::{CustomAttributes, DefaultValue};
pub use builder::{
  ArraySchema, EnumSchema, FixedSchema, MapSchema, RecordSchema, SymbolicSchema, UnionSchema,
};
pub use error::BuildError;
pub use graph::{GraphId, Schema, SchemaGraph};
pub use name::Name;
pub use node::{Node, NodeId};
pub use types::{PrimitiveType, Type};
pub use view::NodeView;



#[cfg(test)]
mod builder_test;

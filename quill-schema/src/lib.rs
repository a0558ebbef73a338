//! Schema object model for Quill.
//!
//! Schemas are assembled in a [`SchemaGraph`](schema::SchemaGraph) through the
//! builders in [`schema::builder`], then published as an immutable
//! [`ValidSchema`](valid::ValidSchema) for the codec and the resolver.

mod util;
pub mod schema;
pub mod valid;

#[cfg(test)]
mod test_util;

use serde_json::json;

use crate::test_util::{person, tree};

use super::{
  ArraySchema, BuildError, CustomAttributes, DefaultValue, EnumSchema, FixedSchema, MapSchema,
  Name, PrimitiveType, RecordSchema, SchemaGraph, SymbolicSchema, Type, UnionSchema,
};

fn assert_aligned(g: &SchemaGraph, r: &RecordSchema) {
  let view = g.view(r.schema());
  let n = view.names();
  assert_eq!(view.leaves(), n);
  for i in 0..n {
    assert!(view.custom_attributes_at(i).is_some());
    assert!(view.default_at(i).is_some());
  }
  assert!(view.custom_attributes_at(n).is_none());
  assert!(view.default_at(n).is_none());
}

#[test]
fn test_person_record() {
  let _ = pretty_env_logger::try_init();
  let mut g = SchemaGraph::new();
  let r = person(&mut g);
  let view = g.view(r.schema());
  assert_eq!(view.ty(), Type::Record);
  assert_eq!(view.name().unwrap().fullname(), "Person");
  assert_eq!(view.leaves(), 2);
  assert_eq!(view.leaf_at(0).unwrap().ty(), Type::String);
  assert_eq!(view.leaf_at(1).unwrap().ty(), Type::Int);
  assert!(view.leaf_at(2).is_none());
  assert_eq!(view.name_at(0), Some("name"));
  assert_eq!(view.name_index("age"), Some(1));
  assert_eq!(view.name_index("email"), None);
  assert_eq!(view.doc(), "");
  assert_eq!(r.doc(&g), "");
  assert_aligned(&g, &r);
}

#[test]
fn test_duplicate_field_leaves_record_unchanged() {
  let _ = pretty_env_logger::try_init();
  let mut g = SchemaGraph::new();
  let mut r = person(&mut g);
  let long = g.primitive(PrimitiveType::Long);
  let mut attrs = CustomAttributes::new();
  attrs.add_attribute("x-note", "should not land").unwrap();

  let err = r
    .add_field_with_default(&mut g, "age", long, attrs, DefaultValue::new(json!(1)))
    .unwrap_err();
  match err {
    BuildError::DuplicateName { name, scope } => {
      assert_eq!(name, "age");
      assert_eq!(scope.fullname(), "Person");
    }
    x => panic!("unexpected error: {:?}", x),
  }

  let view = g.view(r.schema());
  assert_eq!(view.names(), 2);
  assert_eq!(view.leaves(), 2);
  assert_eq!(view.leaf_at(1).unwrap().ty(), Type::Int);
  assert_aligned(&g, &r);

  // A corrected name goes through.
  r.add_field(&mut g, "age_in_days", long).unwrap();
  assert_eq!(g.view(r.schema()).leaves(), 3);
  assert_aligned(&g, &r);
}

#[test]
fn test_field_metadata_is_parallel() {
  let mut g = SchemaGraph::new();
  let string = g.primitive(PrimitiveType::String);
  let int = g.primitive(PrimitiveType::Int);
  let mut r = RecordSchema::new(&mut g, "com.example.Account").unwrap();

  let mut attrs = CustomAttributes::new();
  attrs.add_attribute("x-pii", "true").unwrap();
  r.add_field(&mut g, "id", string).unwrap();
  r.add_field_with_attributes(&mut g, "email", string, attrs)
    .unwrap();
  assert!(r.add_field(&mut g, "id", int).is_err());
  r.add_field_with_default(
    &mut g,
    "balance",
    int,
    CustomAttributes::new(),
    DefaultValue::new(json!(0)),
  )
  .unwrap();
  assert!(r.add_field(&mut g, "email", int).is_err());
  assert_aligned(&g, &r);

  let view = g.view(r.schema());
  assert_eq!(view.names(), 3);
  assert!(view.custom_attributes_at(0).unwrap().is_empty());
  assert_eq!(
    view.custom_attributes_at(1).unwrap().attribute("x-pii"),
    Some("true")
  );
  assert!(view.default_at(0).unwrap().is_none());
  assert!(view.default_at(1).unwrap().is_none());
  assert_eq!(view.default_at(2).unwrap().value(), Some(&json!(0)));
}

#[test]
fn test_record_doc() {
  let mut g = SchemaGraph::new();
  let mut r = person(&mut g);
  r.set_doc(&mut g, "A human being.");
  assert_eq!(r.doc(&g), "A human being.");
  assert_eq!(g.view(r.schema()).doc(), "A human being.");
}

#[test]
fn test_enum_duplicate_symbol() {
  let _ = pretty_env_logger::try_init();
  let mut g = SchemaGraph::new();
  let mut e = EnumSchema::new(&mut g, "Color").unwrap();
  e.add_symbol(&mut g, "RED").unwrap();
  e.add_symbol(&mut g, "GREEN").unwrap();
  let err = e.add_symbol(&mut g, "RED").unwrap_err();
  assert_eq!(
    err,
    BuildError::DuplicateName {
      name: "RED".into(),
      scope: Name::new("Color").unwrap(),
    }
  );

  let view = g.view(e.schema());
  assert_eq!(view.ty(), Type::Enum);
  assert_eq!(view.names(), 2);
  assert_eq!(view.symbols(), &["RED".to_string(), "GREEN".to_string()][..]);
  assert_eq!(view.name_index("GREEN"), Some(1));
  assert_eq!(view.leaves(), 0);
}

#[test]
fn test_nested_union_rejected() {
  let mut g = SchemaGraph::new();
  let mut outer = UnionSchema::new(&mut g);
  let empty = UnionSchema::new(&mut g);
  assert_eq!(
    outer.add_type(&mut g, empty.schema()),
    Err(BuildError::InvalidUnion)
  );

  let mut populated = UnionSchema::new(&mut g);
  let null = g.primitive(PrimitiveType::Null);
  populated.add_type(&mut g, null).unwrap();
  assert_eq!(
    outer.add_type(&mut g, populated.schema()),
    Err(BuildError::InvalidUnion)
  );
  assert_eq!(g.view(outer.schema()).leaves(), 0);
}

#[test]
fn test_union_record_dedup() {
  let mut g = SchemaGraph::new();
  let a1 = RecordSchema::new(&mut g, "A").unwrap();
  let a2 = RecordSchema::new(&mut g, "A").unwrap();
  let b = RecordSchema::new(&mut g, "B").unwrap();
  let int = g.primitive(PrimitiveType::Int);

  let mut u = UnionSchema::new(&mut g);
  u.add_type(&mut g, a1.schema()).unwrap();
  u.add_type(&mut g, b.schema()).unwrap();
  assert_eq!(
    u.add_type(&mut g, a2.schema()),
    Err(BuildError::DuplicateBranch(Name::new("A").unwrap()))
  );
  assert_eq!(
    u.add_type(&mut g, a1.schema()),
    Err(BuildError::DuplicateBranch(Name::new("A").unwrap()))
  );

  // Only records are deduplicated.
  u.add_type(&mut g, int).unwrap();
  u.add_type(&mut g, int).unwrap();

  let view = g.view(u.schema());
  let kinds = view.leaf_iter().map(|x| x.ty()).collect::<Vec<_>>();
  assert_eq!(kinds, vec![Type::Record, Type::Record, Type::Int, Type::Int]);
  assert_eq!(view.leaf_at(1).unwrap().name().unwrap().fullname(), "B");
}

#[test]
fn test_union_dedup_uses_fullname() {
  let mut g = SchemaGraph::new();
  let x1 = RecordSchema::new(&mut g, "a.X").unwrap();
  let x2 = RecordSchema::new(&mut g, "b.X").unwrap();
  let x3 = RecordSchema::with_name(&mut g, Name::with_namespace("X", "a").unwrap());
  let mut u = UnionSchema::new(&mut g);
  u.add_type(&mut g, x1.schema()).unwrap();
  u.add_type(&mut g, x2.schema()).unwrap();
  assert!(u.add_type(&mut g, x3.schema()).is_err());
  assert_eq!(g.view(u.schema()).leaves(), 2);
}

#[test]
fn test_arrays_share_their_item() {
  let mut g = SchemaGraph::new();
  let item = RecordSchema::new(&mut g, "Item").unwrap();
  let a = ArraySchema::new(&mut g, item.schema());
  let b = ArraySchema::new(&mut g, item.schema());

  let ia = g.view(a.schema()).leaf_at(0).unwrap();
  let ib = g.view(b.schema()).leaf_at(0).unwrap();
  assert!(ia.same_node(&ib));
  assert!(!g.view(a.schema()).same_node(&g.view(b.schema())));

  let mut item = item;
  item.set_doc(&mut g, "shared");
  assert_eq!(g.view(a.schema()).leaf_at(0).unwrap().doc(), "shared");
  assert_eq!(g.view(b.schema()).leaf_at(0).unwrap().doc(), "shared");
}

#[test]
fn test_from_array_and_from_map_wrap_the_source() {
  let mut g = SchemaGraph::new();
  let long = g.primitive(PrimitiveType::Long);

  let a = ArraySchema::new(&mut g, long);
  let a2 = ArraySchema::from_array(&mut g, &a);
  assert_ne!(a.schema(), a2.schema());
  assert_eq!(a2.items(&g), a.schema());
  let outer = g.view(a2.schema());
  assert_eq!(outer.ty(), Type::Array);
  let inner = outer.leaf_at(0).unwrap();
  assert!(inner.same_node(&g.view(a.schema())));
  assert_eq!(inner.ty(), Type::Array);
  assert_eq!(inner.leaf_at(0).unwrap().ty(), Type::Long);

  let m = MapSchema::new(&mut g, long);
  let m2 = MapSchema::from_map(&mut g, &m);
  assert_ne!(m.schema(), m2.schema());
  assert_eq!(m2.values(&g), m.schema());
  let outer = g.view(m2.schema());
  assert_eq!(outer.ty(), Type::Map);
  assert_eq!(outer.leaves(), 1);
  assert_eq!(outer.leaf_at(0).unwrap().ty(), Type::Map);
  assert_eq!(
    outer.leaf_at(0).unwrap().leaf_at(0).unwrap().ty(),
    Type::Long
  );
}

#[test]
fn test_fixed() {
  let mut g = SchemaGraph::new();
  let f = FixedSchema::new(&mut g, 16, "org.acme.Md5").unwrap();
  assert_eq!(f.size(&g), 16);
  let view = g.view(f.schema());
  assert_eq!(view.ty(), Type::Fixed);
  assert_eq!(view.fixed_size(), Some(16));
  assert_eq!(view.name().unwrap().namespace(), Some("org.acme"));
  assert_eq!(view.leaves(), 0);

  let empty = FixedSchema::new(&mut g, 0, "Empty").unwrap();
  assert_eq!(empty.size(&g), 0);
  assert!(FixedSchema::new(&mut g, 4, "not a name").is_err());
}

#[test]
fn test_primitives_are_interned() {
  let mut g = SchemaGraph::new();
  let a = g.primitive(PrimitiveType::Bytes);
  let b = g.primitive(PrimitiveType::Bytes);
  let c = g.primitive(PrimitiveType::String);
  assert_eq!(a, b);
  assert_ne!(a, c);
  assert_eq!(g.len(), 2);
}

#[test]
fn test_recursive_tree() {
  let mut g = SchemaGraph::new();
  let t = tree(&mut g);
  let view = g.view(t.schema());
  let children = view.leaf_at(0).unwrap();
  assert_eq!(children.ty(), Type::Array);
  let back = children.leaf_at(0).unwrap();
  assert_eq!(back.ty(), Type::Symbolic);
  assert_eq!(back.leaves(), 0);
  assert_eq!(back.name().unwrap().fullname(), "Tree");
  assert!(back.resolve().same_node(&view));
  assert!(view.resolve().same_node(&view));
}

#[test]
fn test_owning_cycles_rejected() {
  let mut g = SchemaGraph::new();
  let mut r = RecordSchema::new(&mut g, "Loop").unwrap();
  assert_eq!(
    r.add_field(&mut g, "me", r.schema()),
    Err(BuildError::OwningCycle("Loop".into()))
  );

  let wrapper = ArraySchema::new(&mut g, r.schema());
  let mut u = UnionSchema::new(&mut g);
  u.add_type(&mut g, wrapper.schema()).unwrap();
  assert!(matches!(
    r.add_field(&mut g, "items", u.schema()),
    Err(BuildError::OwningCycle(_))
  ));
  assert_eq!(g.view(r.schema()).names(), 0);
  assert_eq!(g.view(r.schema()).leaves(), 0);

  // The same shape closed through a symbolic node is fine.
  let name = r.name(&g).clone();
  let back = SymbolicSchema::new(&mut g, name, r.schema());
  r.add_field(&mut g, "me", back.schema()).unwrap();
}

#[test]
fn test_wide_record_in_large_graph() {
  let mut g = SchemaGraph::new();
  let int = g.primitive(PrimitiveType::Int);
  for i in 0..20_000 {
    EnumSchema::new(&mut g, &format!("Unused{}", i)).unwrap();
  }
  let mut wide = RecordSchema::new(&mut g, "Wide").unwrap();
  for i in 0..20_000 {
    wide.add_field(&mut g, &format!("f{}", i), int).unwrap();
  }
  assert_eq!(g.view(wide.schema()).leaves(), 20_000);

  let mut outer = RecordSchema::new(&mut g, "Outer").unwrap();
  outer.add_field(&mut g, "wide", wide.schema()).unwrap();
  assert!(matches!(
    wide.add_field(&mut g, "back", outer.schema()),
    Err(BuildError::OwningCycle(_))
  ));
  assert_eq!(g.view(wide.schema()).leaves(), 20_000);
}

#[test]
fn test_invalid_type_names() {
  let mut g = SchemaGraph::new();
  assert!(matches!(
    RecordSchema::new(&mut g, "1st"),
    Err(BuildError::InvalidName(_))
  ));
  assert!(matches!(
    EnumSchema::new(&mut g, "a..b"),
    Err(BuildError::InvalidName(_))
  ));
  assert!(g.is_empty());
}

#[test]
#[should_panic]
fn test_doc_on_enum_is_a_contract_violation() {
  let mut g = SchemaGraph::new();
  let e = EnumSchema::new(&mut g, "E").unwrap();
  g.node_mut(e.schema()).set_doc("nope");
}

#[test]
#[should_panic]
fn test_second_array_leaf_is_a_contract_violation() {
  let mut g = SchemaGraph::new();
  let int = g.primitive(PrimitiveType::Int);
  let a = ArraySchema::new(&mut g, int);
  g.node_mut(a.schema()).add_leaf(int.root());
}

#[test]
#[should_panic]
fn test_foreign_handle_is_a_contract_violation() {
  let mut g1 = SchemaGraph::new();
  let mut g2 = SchemaGraph::new();
  let int = g1.primitive(PrimitiveType::Int);
  ArraySchema::new(&mut g2, int);
}

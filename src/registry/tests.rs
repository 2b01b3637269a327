use proptest::prelude::*;

use super::*;

#[test]
fn test_create_is_idempotent_for_same_tag() {
    let mut registry = ColumnRegistry::new();
    registry.create("score", TypeTag::Float32).unwrap();
    registry.create("score", TypeTag::Float32).unwrap();

    assert_eq!(registry.len(), 1);
    let column = registry.get("score").unwrap();
    assert_eq!(column.type_tag(), TypeTag::Float32);
    assert!(column.is_empty());
    assert!(!column.export_flag());
}

#[test]
fn test_create_collision_fails_loudly() {
    let mut registry = ColumnRegistry::new();
    registry.create("score", TypeTag::Float32).unwrap();

    let err = registry.create("score", TypeTag::Int32).unwrap_err();
    assert_eq!(
        err,
        RegistryError::TypeMismatch {
            name: "score".to_string(),
            existing: TypeTag::Float32,
            requested: TypeTag::Int32,
        }
    );

    // The original column is untouched
    assert_eq!(registry.get("score").unwrap().type_tag(), TypeTag::Float32);
}

#[test]
fn test_append_requires_existing_column() {
    let mut registry = ColumnRegistry::new();
    let err = registry.append("missing", 1.0f32).unwrap_err();
    assert_eq!(err, RegistryError::ColumnMissing("missing".to_string()));
}

#[test]
fn test_append_rejects_mismatched_type() {
    let mut registry = ColumnRegistry::new();
    registry.create("count", TypeTag::UInt16).unwrap();

    let err = registry.append("count", 1.0f32).unwrap_err();
    assert!(matches!(err, RegistryError::TypeMismatch { .. }));
    assert!(!registry.get("count").unwrap().export_flag());
}

#[test]
fn test_first_append_sets_export_flag() {
    let mut registry = ColumnRegistry::new();
    registry.create("count", TypeTag::UInt16).unwrap();
    assert!(!registry.get("count").unwrap().export_flag());

    registry.append("count", 7u16).unwrap();
    assert!(registry.get("count").unwrap().export_flag());

    registry.append("count", 9u16).unwrap();
    assert_eq!(registry.lookup_typed::<u16>("count"), Some(&[7, 9][..]));
}

#[test]
fn test_get_or_create_returns_existing() {
    let mut registry = ColumnRegistry::new();
    registry.create("score", TypeTag::Float32).unwrap();
    registry.append("score", 0.5f32).unwrap();

    let column = registry.get_or_create::<f32>("score").unwrap();
    assert_eq!(column.len(), 1);

    let err = registry.get_or_create::<i8>("score").unwrap_err();
    assert!(matches!(err, RegistryError::TypeMismatch { .. }));
}

#[test]
fn test_lookup_typed_is_typed_or_absent() {
    let mut registry = ColumnRegistry::new();
    registry.create("label", TypeTag::String).unwrap();
    registry.append("label", "alpha".to_string()).unwrap();

    assert_eq!(
        registry.lookup_typed::<String>("label"),
        Some(&["alpha".to_string()][..])
    );
    // Wrong type: absent, not a panic or a cast
    assert_eq!(registry.lookup_typed::<f32>("label"), None);
    // Missing name: absent
    assert_eq!(registry.lookup_typed::<f32>("nope"), None);
}

#[test]
fn test_iteration_is_key_ordered() {
    let mut registry = ColumnRegistry::new();
    registry.create("zeta", TypeTag::Int8).unwrap();
    registry.create("alpha", TypeTag::Int8).unwrap();
    registry.create("mid", TypeTag::Int8).unwrap();

    let names: Vec<_> = registry.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_bool_columns_are_storable() {
    let mut registry = ColumnRegistry::new();
    registry.create("converged", TypeTag::Bool).unwrap();
    registry.append("converged", true).unwrap();
    registry.append("converged", false).unwrap();

    assert_eq!(
        registry.lookup_typed::<bool>("converged"),
        Some(&[true, false][..])
    );
}

proptest! {
    /// Once a column is created with a tag, no sequence of appends of any
    /// type ever changes that tag: mismatched appends fail, matching ones
    /// grow the column.
    #[test]
    fn prop_type_tag_is_immutable(ops in prop::collection::vec((0u8..4, any::<i32>()), 0..64)) {
        let mut registry = ColumnRegistry::new();
        registry.create("col", TypeTag::Int32).unwrap();
        let mut expected_len = 0usize;

        for (kind, value) in ops {
            match kind {
                0 => {
                    registry.append("col", value).unwrap();
                    expected_len += 1;
                }
                1 => {
                    prop_assert!(registry.append("col", value as f32).is_err());
                }
                2 => {
                    prop_assert!(registry.create("col", TypeTag::Float32).is_err());
                }
                _ => {
                    // Same-tag create stays a no-op mid-run
                    registry.create("col", TypeTag::Int32).unwrap();
                }
            }
            prop_assert_eq!(registry.get("col").unwrap().type_tag(), TypeTag::Int32);
        }

        prop_assert_eq!(registry.get("col").unwrap().len(), expected_len);
    }
}

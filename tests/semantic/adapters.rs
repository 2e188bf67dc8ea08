//! Integration tests for type adapters
//!
//! Tests adapter registration, adapted types, and duplicate policies.

use dungeon_foundation::{ErrorKind, Value};
use dungeon_semantic::{
    AdapterPolicy, BuilderConfig, HostType, ScopeId, Shape, SymbolKind, SymbolTable, TypeAdapter, TypeBuilder,
    TypeKind, TypeRef,
};

use crate::fixtures::{Sprite, sprite_adapter};

// =============================================================================
// Registration
// =============================================================================

#[test]
fn register_binds_adapted_type() {
    let mut builder = TypeBuilder::new();
    let mut table = SymbolTable::new();
    let ty = builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap()
        .unwrap();

    assert_eq!(table.kind(ty), TypeKind::AggregateAdapted);
    assert_eq!(table.resolve_type(ScopeId::GLOBAL, "sprite"), ty);

    let params: Vec<(&str, TypeRef)> = table
        .members(ty)
        .iter()
        .map(|id| (table.symbol(*id).name(), table.symbol(*id).data_type()))
        .collect();
    assert_eq!(params, vec![("path", TypeRef::STRING), ("scale", TypeRef::INT)]);
    assert_eq!(table.symbol(table.member(ty, "path")).kind(), SymbolKind::Parameter);
}

#[test]
fn lookup_by_target_type() {
    let mut builder = TypeBuilder::new();
    let mut table = SymbolTable::new();
    let host = HostType::external::<Sprite>();
    assert!(builder.get_registered_type_adapter(&host).is_none());

    builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap();
    let adapter = builder.get_registered_type_adapter(&host).unwrap();
    assert_eq!(adapter.name(), "load_sprite");
    assert_eq!(adapter.arity(), 2);
}

#[test]
fn deferred_binding_builds_on_demand() {
    let mut builder = TypeBuilder::with_config(BuilderConfig::default().with_bind_adapted_types(false));
    let mut table = SymbolTable::new();
    let bound = builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap();
    assert!(bound.is_none());
    assert!(table.resolve(ScopeId::GLOBAL, "sprite").is_null());

    let ty = builder
        .create_type_from_class(&mut table, ScopeId::GLOBAL, HostType::external::<Sprite>())
        .unwrap();
    assert_eq!(table.kind(ty), TypeKind::AggregateAdapted);
}

#[test]
fn renamed_adapted_type() {
    let mut builder = TypeBuilder::new();
    let mut table = SymbolTable::new();
    let ty = builder
        .register_type_adapter(&mut table, sprite_adapter().named("image"), ScopeId::GLOBAL)
        .unwrap()
        .unwrap();
    assert_eq!(table.type_name(ty), "image");
    assert!(table.resolve(ScopeId::GLOBAL, "sprite").is_null());
}

// =============================================================================
// Duplicate Policies
// =============================================================================

#[test]
fn replace_policy_swaps_builder() {
    let mut builder = TypeBuilder::new();
    let mut table = SymbolTable::new();
    builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap();

    let other = TypeAdapter::new("blank_sprite", |_| {
        Ok(Sprite {
            path: String::new(),
            scale: 1,
        })
    });
    let level = table.create_scope("level", Some(ScopeId::GLOBAL)).unwrap();
    builder.register_type_adapter(&mut table, other, level).unwrap();

    let host = HostType::external::<Sprite>();
    assert_eq!(builder.get_registered_type_adapter(&host).unwrap().name(), "blank_sprite");
    assert_eq!(builder.adapters().len(), 1);
}

#[test]
fn reject_policy_refuses_second_adapter() {
    let mut builder = TypeBuilder::with_config(BuilderConfig::strict());
    let mut table = SymbolTable::new();
    builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap();

    let err = builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateAdapter(ref name) if name == "Sprite"));
    assert_eq!(builder.config().adapter_policy, AdapterPolicy::Reject);
}

// =============================================================================
// Parameter Shapes
// =============================================================================

#[test]
fn function_parameter_is_unsupported() {
    let mut builder = TypeBuilder::new();
    let mut table = SymbolTable::new();
    let adapter = TypeAdapter::new("with_hook", |_| Ok(7_u32)).param("hook", Shape::function(vec![]));

    let err = builder
        .register_type_adapter(&mut table, adapter, ScopeId::GLOBAL)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedMemberType { ref member, .. } if member == "hook"));
    assert!(table.resolve(ScopeId::GLOBAL, "u32").is_null());
}

fn hooked_sprite_adapter() -> TypeAdapter {
    TypeAdapter::new("load_hooked_sprite", |_| {
        Ok(Sprite {
            path: String::new(),
            scale: 1,
        })
    })
    .param("hook", Shape::function(vec![]))
}

#[test]
fn failed_registration_leaves_no_adapter() {
    let mut builder = TypeBuilder::with_config(BuilderConfig::strict());
    let mut table = SymbolTable::new();
    let host = HostType::external::<Sprite>();

    assert!(
        builder
            .register_type_adapter(&mut table, hooked_sprite_adapter(), ScopeId::GLOBAL)
            .is_err()
    );
    assert!(builder.get_registered_type_adapter(&host).is_none());
    assert!(builder.adapters().is_empty());

    let ty = builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap()
        .unwrap();
    assert_eq!(table.kind(ty), TypeKind::AggregateAdapted);
    assert_eq!(builder.get_registered_type_adapter(&host).unwrap().name(), "load_sprite");
}

#[test]
fn failed_replacement_restores_previous_adapter() {
    let mut builder = TypeBuilder::new();
    let mut table = SymbolTable::new();
    builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap();

    let level = table.create_scope("level", Some(ScopeId::GLOBAL)).unwrap();
    assert!(
        builder
            .register_type_adapter(&mut table, hooked_sprite_adapter(), level)
            .is_err()
    );

    let host = HostType::external::<Sprite>();
    assert_eq!(builder.get_registered_type_adapter(&host).unwrap().name(), "load_sprite");
    assert!(table.resolve_local(level, "sprite").is_null());
}

#[test]
fn invoke_runs_builder_positionally() {
    let adapter = sprite_adapter();
    let obj = adapter
        .invoke(&[Value::from("hero.png"), Value::from(2_i64)])
        .unwrap();
    assert_eq!(
        obj.extract::<Sprite>(),
        Some(Sprite {
            path: "hero.png".to_string(),
            scale: 2
        })
    );
    assert!(matches!(
        adapter.invoke(&[]).unwrap_err().kind,
        ErrorKind::ArityMismatch { expected: 2, actual: 0 }
    ));
}

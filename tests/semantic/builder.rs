//! Integration tests for the type builder
//!
//! Tests aggregate construction, member shapes, memoization, cycles, and
//! rollback of failed builds.

use dungeon_foundation::ErrorKind;
use dungeon_semantic::{
    DslType, HostType, IType, ScopeId, Shape, SymbolKind, SymbolTable, TypeBuilder, TypeDescriptor, TypeForm,
    TypeKind, TypeRef, render,
};

use crate::fixtures::{Actor, ChainClass, Door, Room, TestComponent, TestRecord, WithGraph, sprite_adapter};

fn setup() -> (TypeBuilder, SymbolTable) {
    (TypeBuilder::new(), SymbolTable::new())
}

// =============================================================================
// Aggregates
// =============================================================================

#[test]
fn aggregate_registered_under_converted_name() {
    let (builder, mut table) = setup();
    let ty = builder.create_type::<TestComponent>(&mut table, ScopeId::GLOBAL).unwrap();

    assert_eq!(table.kind(ty), TypeKind::Aggregate);
    assert_eq!(table.type_name(ty), "test_component");
    assert_eq!(table.resolve_type(ScopeId::GLOBAL, "test_component"), ty);

    let symbol = table.symbol(table.resolve(ScopeId::GLOBAL, "test_component"));
    assert_eq!(symbol.kind(), SymbolKind::Type);
    assert_eq!(symbol.host_name(), Some("TestComponent"));
}

#[test]
fn members_match_declared_shapes() {
    let (builder, mut table) = setup();
    let ty = builder.create_type::<TestComponent>(&mut table, ScopeId::GLOBAL).unwrap();

    let int_member = table.member(ty, "int_member");
    let string_member = table.member(ty, "string_member");
    assert_eq!(table.symbol(int_member).data_type(), TypeRef::INT);
    assert_eq!(table.symbol(string_member).data_type(), TypeRef::STRING);
    assert_eq!(table.symbol(int_member).host_name(), Some("intMember"));
    assert_eq!(table.members(ty).len(), 2);
}

#[test]
fn nested_type_resolves_to_aggregate() {
    let (builder, mut table) = setup();
    let chain = builder.create_type::<ChainClass>(&mut table, ScopeId::GLOBAL).unwrap();

    let member = table.member(chain, "test_component_member");
    let nested = table.symbol(member).data_type();
    assert_eq!(table.kind(nested), TypeKind::Aggregate);
    assert_eq!(table.type_name(nested), "test_component");
    // Nested types are registered in the same scope.
    assert_eq!(table.resolve_type(ScopeId::GLOBAL, "test_component"), nested);
}

#[test]
fn chain_class_end_to_end() {
    let (builder, mut table) = setup();
    let scope = table.create_scope("level", Some(ScopeId::GLOBAL)).unwrap();
    builder.create_type::<ChainClass>(&mut table, scope).unwrap();

    let chain = table.symbol(table.resolve(scope, "chain_class")).data_type();
    let member = table.symbol(table.member(chain, "test_component_member")).data_type();
    let int_member = table.symbol(table.member(member, "int_member"));
    assert_eq!(int_member.data_type(), TypeRef::INT);

    let by_path = table.resolve_path(scope, "chain_class.test_component_member.int_member");
    assert_eq!(table.symbol(by_path).data_type(), TypeRef::INT);
}

#[test]
fn record_members_in_order() {
    let (builder, mut table) = setup();
    let ty = builder.create_type::<TestRecord>(&mut table, ScopeId::GLOBAL).unwrap();

    let types: Vec<TypeRef> = table
        .members(ty)
        .iter()
        .map(|id| table.symbol(*id).data_type())
        .collect();
    assert_eq!(types, vec![TypeRef::INT, TypeRef::STRING, TypeRef::FLOAT]);
}

#[test]
fn graph_container_of_string() {
    let (builder, mut table) = setup();
    let ty = builder.create_type::<WithGraph>(&mut table, ScopeId::GLOBAL).unwrap();

    let graph = table.symbol(table.member(ty, "task_graph")).data_type();
    assert_eq!(table.kind(graph), TypeKind::Graph);
    assert_eq!(table.ty(graph).element(), Some(TypeRef::STRING));

    let tags = table.symbol(table.member(ty, "tags")).data_type();
    assert_eq!(table.kind(tags), TypeKind::Set);
    assert_eq!(table.type_name(tags), "set<string>");
}

// =============================================================================
// Memoization and Cycles
// =============================================================================

#[test]
fn building_twice_returns_same_type() {
    let (builder, mut table) = setup();
    let first = builder.create_type::<TestComponent>(&mut table, ScopeId::GLOBAL).unwrap();
    let types = table.type_count();
    let second = builder.create_type::<TestComponent>(&mut table, ScopeId::GLOBAL).unwrap();

    assert_eq!(first, second);
    assert_eq!(table.type_count(), types);
}

#[test]
fn separate_scopes_build_separately() {
    let (builder, mut table) = setup();
    let a = table.create_scope("a", Some(ScopeId::GLOBAL)).unwrap();
    let b = table.create_scope("b", Some(ScopeId::GLOBAL)).unwrap();
    let in_a = builder.create_type::<TestComponent>(&mut table, a).unwrap();
    let in_b = builder.create_type::<TestComponent>(&mut table, b).unwrap();

    assert_ne!(in_a, in_b);
    assert!(table.resolve(ScopeId::GLOBAL, "test_component").is_null());
}

#[test]
fn mutual_reference_terminates() {
    let (builder, mut table) = setup();
    let room = builder.create_type::<Room>(&mut table, ScopeId::GLOBAL).unwrap();

    let door = table.symbol(table.member(room, "door")).data_type();
    let back = table.symbol(table.member(door, "leads_to")).data_type();
    assert_eq!(back, room);
    assert_eq!(table.resolve_type(ScopeId::GLOBAL, "door"), door);

    let Some(agg) = table.ty(room).as_aggregate() else {
        panic!("room is not an aggregate");
    };
    assert!(agg.is_complete());
    assert_eq!(builder.create_type::<Door>(&mut table, ScopeId::GLOBAL).unwrap(), door);
}

// =============================================================================
// Roles
// =============================================================================

#[test]
fn context_and_callback_members() {
    let (mut builder, mut table) = setup();
    builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap();
    let actor = builder.create_type::<Actor>(&mut table, ScopeId::GLOBAL).unwrap();

    let context = table.context_parameters(actor);
    assert_eq!(context.len(), 1);
    assert_eq!(table.symbol(context[0]).name(), "entity");
    assert_eq!(table.symbol(context[0]).kind(), SymbolKind::Context);
    assert!(table.member(actor, "entity").is_null());

    let on_hit = table.symbol(table.member(actor, "on_hit"));
    assert_eq!(on_hit.kind(), SymbolKind::Callback);
    assert_eq!(table.kind(on_hit.data_type()), TypeKind::Function);
    assert_eq!(table.type_name(on_hit.data_type()), "fn(entity, int)");
}

#[test]
fn adapter_covered_member_is_adapted() {
    let (mut builder, mut table) = setup();
    builder
        .register_type_adapter(&mut table, sprite_adapter(), ScopeId::GLOBAL)
        .unwrap();
    let actor = builder.create_type::<Actor>(&mut table, ScopeId::GLOBAL).unwrap();

    let sprite = table.symbol(table.member(actor, "sprite")).data_type();
    assert_eq!(table.kind(sprite), TypeKind::AggregateAdapted);
    assert!(matches!(table.ty(sprite), IType::Adapted(a) if a.builder() == "load_sprite"));
}

struct StrictCallback;

impl DslType for StrictCallback {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class::<StrictCallback>().member("onUse", Shape::function(vec![Shape::Int]))
    }
}

#[test]
fn function_literal_member_rejected_when_strict() {
    let (builder, mut table) = setup();
    let err = builder
        .create_type::<StrictCallback>(&mut table, ScopeId::GLOBAL)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedMemberType { ref member, .. } if member == "onUse"));
}

#[test]
fn function_literal_member_becomes_callback_when_lenient() {
    let builder = TypeBuilder::with_config(dungeon_semantic::BuilderConfig::lenient());
    let mut table = SymbolTable::new();
    let ty = builder.create_type::<StrictCallback>(&mut table, ScopeId::GLOBAL).unwrap();
    assert_eq!(table.symbol(table.member(ty, "on_use")).kind(), SymbolKind::Callback);
}

// =============================================================================
// Errors and Rollback
// =============================================================================

struct Unmirrored;

struct HasUnmirrored;

impl DslType for HasUnmirrored {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class::<HasUnmirrored>()
            .member("inner", Shape::host::<TestComponent>())
            .member("blob", Shape::external::<Unmirrored>())
    }
}

#[test]
fn unsupported_member_aborts_and_rolls_back() {
    let (builder, mut table) = setup();
    let symbols = table.symbol_count();
    let types = table.type_count();

    let err = builder
        .create_type::<HasUnmirrored>(&mut table, ScopeId::GLOBAL)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedMemberType { ref owner, .. } if owner == "has_unmirrored"));
    let context = err.context.unwrap();
    assert_eq!(context.scope.as_deref(), Some("global"));
    assert!(context.stack.iter().any(|frame| frame.contains("has_unmirrored")));

    // The nested aggregate built along the way is discarded too.
    assert!(table.resolve(ScopeId::GLOBAL, "has_unmirrored").is_null());
    assert!(table.resolve(ScopeId::GLOBAL, "test_component").is_null());
    assert_eq!(table.symbol_count(), symbols);
    assert_eq!(table.type_count(), types);
}

#[test]
fn failed_build_can_be_followed_by_good_one() {
    let (builder, mut table) = setup();
    assert!(builder.create_type::<HasUnmirrored>(&mut table, ScopeId::GLOBAL).is_err());
    let ty = builder.create_type::<TestComponent>(&mut table, ScopeId::GLOBAL).unwrap();
    assert_eq!(table.resolve_type(ScopeId::GLOBAL, "test_component"), ty);
}

struct Collides;

impl DslType for Collides {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class::<Collides>()
            .member("maxHealth", Shape::Int)
            .member("max_health", Shape::Float)
    }
}

#[test]
fn duplicate_member_names_report_both_sources() {
    let (builder, mut table) = setup();
    let err = builder.create_type::<Collides>(&mut table, ScopeId::GLOBAL).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("maxHealth"));
    assert!(msg.contains("max_health"));
    assert!(table.resolve(ScopeId::GLOBAL, "collides").is_null());
}

struct Taken;

impl DslType for Taken {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class::<Taken>().named("int").member("x", Shape::Int)
    }
}

#[test]
fn type_name_shadowing_global_builtin_is_allowed_in_child() {
    let (builder, mut table) = setup();
    let scope = table.create_scope("level", Some(ScopeId::GLOBAL)).unwrap();
    let ty = builder.create_type::<Taken>(&mut table, scope).unwrap();
    assert_eq!(table.resolve_type(scope, "int"), ty);
    assert_eq!(table.resolve_type(ScopeId::GLOBAL, "int"), TypeRef::INT);
}

#[test]
fn build_into_foreign_scope_fails() {
    let (builder, mut table) = setup();
    let mut other = SymbolTable::new();
    let foreign = other.create_scope("elsewhere", Some(ScopeId::GLOBAL)).unwrap();

    let err = builder.create_type::<TestComponent>(&mut table, foreign).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownScope(index) if index == foreign.index()));
    assert!(table.resolve(ScopeId::GLOBAL, "test_component").is_null());

    // Nothing was memoized under the foreign handle.
    let scope = table.create_scope("level", Some(ScopeId::GLOBAL)).unwrap();
    assert_eq!(scope, foreign);
    let ty = builder.create_type::<TestComponent>(&mut table, scope).unwrap();
    assert_eq!(table.resolve_type(scope, "test_component"), ty);
}

struct Lamp;

impl DslType for Lamp {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::record::<Lamp>()
            .member("brightness", Shape::Int)
            .context("owner", Shape::Entity)
    }
}

struct Switch;

impl DslType for Switch {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::record::<Switch>().member("onToggle", Shape::function(vec![Shape::Bool]))
    }
}

#[test]
fn record_rejects_non_literal_components() {
    let (builder, mut table) = setup();
    let err = builder.create_type::<Lamp>(&mut table, ScopeId::GLOBAL).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnsupportedMemberType { ref member, ref shape, .. }
            if member == "owner" && shape == "context entity"
    ));
    assert!(table.resolve(ScopeId::GLOBAL, "lamp").is_null());

    // Lenient mode would make this a callback on a class.
    let err = builder.create_type::<Switch>(&mut table, ScopeId::GLOBAL).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedMemberType { ref member, .. } if member == "onToggle"));
}

#[test]
fn record_form_is_kept_on_the_aggregate() {
    let (builder, mut table) = setup();
    let record = builder.create_type::<TestRecord>(&mut table, ScopeId::GLOBAL).unwrap();
    let class = builder.create_type::<TestComponent>(&mut table, ScopeId::GLOBAL).unwrap();

    assert_eq!(table.ty(record).as_aggregate().unwrap().form(), TypeForm::Record);
    assert_eq!(table.ty(class).as_aggregate().unwrap().form(), TypeForm::Class);
    assert!(render(&table, record).starts_with("test_record (record, host TestRecord)\n"));
    assert!(render(&table, class).starts_with("test_component (aggregate, host TestComponent)\n"));
}

#[test]
fn type_name_clashing_in_same_scope_fails() {
    let (builder, mut table) = setup();
    let err = builder.create_type::<Taken>(&mut table, ScopeId::GLOBAL).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateSymbol { ref name, .. } if name == "int"));
    assert_eq!(table.resolve_type(ScopeId::GLOBAL, "int"), TypeRef::INT);
}

#[test]
fn unexposable_host_type_is_unsupported() {
    let (builder, mut table) = setup();
    let err = builder
        .create_type_from_class(&mut table, ScopeId::GLOBAL, HostType::external::<Unmirrored>())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedType(_)));
}

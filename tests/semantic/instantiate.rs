//! Integration tests for instance construction
//!
//! Tests named and positional construction, context values, callbacks, and
//! type checking of field values.

use dungeon_foundation::{Callback, EntityId, ErrorKind, Value};
use dungeon_semantic::DslEnvironment;

use crate::fixtures::{Actor, ActorState, ChainClass, Sprite, TestComponent, TestRecord, sprite_adapter};

fn environment() -> DslEnvironment {
    let mut env = DslEnvironment::new();
    env.register_adapter(sprite_adapter()).unwrap();
    env.register::<ChainClass>().unwrap();
    env.register::<TestRecord>().unwrap();
    env.register::<Actor>().unwrap();
    env
}

fn sprite(env: &DslEnvironment) -> Value {
    env.instantiate("sprite", &[("path", Value::from("hero.png"))], &[])
        .unwrap()
}

// =============================================================================
// Aggregates
// =============================================================================

#[test]
fn instantiate_with_named_fields() {
    let env = environment();
    let value = env
        .instantiate(
            "test_component",
            &[("int_member", Value::Int(4)), ("string_member", Value::from("four"))],
            &[],
        )
        .unwrap();

    let component = value.as_object().and_then(|obj| obj.extract::<TestComponent>()).unwrap();
    assert_eq!(component.int_member, 4);
    assert_eq!(component.string_member, "four");
}

#[test]
fn instantiate_record_positionally() {
    let env = environment();
    let value = env
        .instantiate_positional(
            "test_record",
            &[Value::Int(3), Value::from("crate"), Value::Int(2)],
            &[],
        )
        .unwrap();

    let record = value.as_object().and_then(|obj| obj.extract::<TestRecord>()).unwrap();
    assert_eq!(record.count, 3);
    assert_eq!(record.label, "crate");
    assert!((record.weight - 2.0).abs() < f64::EPSILON);
}

#[test]
fn too_many_positional_values() {
    let env = environment();
    let err = env
        .instantiate_positional("test_component", &[Value::Int(1), Value::from("a"), Value::Nil], &[])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ArityMismatch { expected: 2, actual: 3 }));
}

#[test]
fn unknown_field_is_missing_member() {
    let env = environment();
    let err = env
        .instantiate("test_component", &[("intMember", Value::Int(1))], &[])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingMember { ref name, .. } if name == "intMember"));
}

#[test]
fn repeated_field_is_rejected() {
    let env = environment();
    let err = env
        .instantiate(
            "test_component",
            &[("int_member", Value::Int(1)), ("int_member", Value::Int(2))],
            &[],
        )
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateMember { ref first, ref dsl_name, .. }
            if first == "intMember" && dsl_name == "int_member"
    ));

    let err = env
        .instantiate(
            "sprite",
            &[("path", Value::from("a.png")), ("path", Value::from("b.png"))],
            &[],
        )
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateMember { ref dsl_name, .. } if dsl_name == "path"));
}

#[test]
fn unknown_type_is_missing_member() {
    let env = environment();
    let err = env.instantiate("dragon", &[], &[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingMember { ref name, .. } if name == "dragon"));
}

#[test]
fn wrong_field_type_is_mismatch() {
    let env = environment();
    let err = env
        .instantiate("test_component", &[("int_member", Value::from("four"))], &[])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { ref expected, .. } if expected == "int"));
    let frames = err.context.map(|c| c.stack).unwrap_or_default();
    assert_eq!(frames, vec!["while setting `int_member`".to_string()]);
}

#[test]
fn type_without_constructor_is_not_constructible() {
    let env = environment();
    let err = env.instantiate("chain_class", &[], &[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotConstructible(ref name) if name == "chain_class"));
}

#[test]
fn builtin_is_not_constructible() {
    let env = environment();
    let err = env.instantiate("int", &[], &[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotConstructible(_)));
}

// =============================================================================
// Adapted Types
// =============================================================================

#[test]
fn adapted_type_calls_builder() {
    let env = environment();
    let value = sprite(&env);
    let sprite = value.as_object().and_then(|obj| obj.extract::<Sprite>()).unwrap();
    assert_eq!(sprite.path, "hero.png");
    assert_eq!(sprite.scale, 1);
}

#[test]
fn adapted_builder_errors_carry_frame() {
    let env = environment();
    let err = env
        .instantiate(
            "sprite",
            &[("path", Value::from("x.png")), ("scale", Value::Int(0))],
            &[],
        )
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    let frames = err.context.map(|c| c.stack).unwrap_or_default();
    assert_eq!(frames, vec!["while calling `load_sprite`".to_string()]);
}

#[test]
fn adapted_positional_requires_every_parameter() {
    let env = environment();
    let err = env
        .instantiate_positional("sprite", &[Value::from("x.png")], &[])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ArityMismatch { expected: 2, actual: 1 }));
}

// =============================================================================
// Context and Callbacks
// =============================================================================

#[test]
fn context_value_reaches_constructor() {
    let env = environment();
    let sprite = sprite(&env);
    let hook = Callback::new("hit", 2, |_| Ok(Value::Nil));
    let value = env
        .instantiate(
            "actor",
            &[("sprite", sprite), ("on_hit", Value::Func(hook))],
            &[("entity", Value::Entity(EntityId::new(12))), ("unused", Value::Int(0))],
        )
        .unwrap();

    let actor = value.as_object().and_then(|obj| obj.extract::<ActorState>()).unwrap();
    assert_eq!(actor.entity, EntityId::new(12));
    assert_eq!(actor.sprite.path, "hero.png");
    assert!(actor.has_hit_handler);
}

#[test]
fn missing_context_value() {
    let env = environment();
    let err = env
        .instantiate("actor", &[("sprite", sprite(&env))], &[])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingContext { ref name, .. } if name == "entity"));
}

#[test]
fn context_value_of_wrong_type() {
    let env = environment();
    let err = env
        .instantiate("actor", &[("sprite", sprite(&env))], &[("entity", Value::Int(12))])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { ref expected, .. } if expected == "entity"));
}

#[test]
fn callback_arity_is_checked() {
    let env = environment();
    let hook = Callback::new("hit", 1, |_| Ok(Value::Nil));
    let err = env
        .instantiate(
            "actor",
            &[("sprite", sprite(&env)), ("on_hit", Value::Func(hook))],
            &[("entity", Value::Entity(EntityId::new(1)))],
        )
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { ref expected, .. } if expected == "fn(entity, int)"));
}

#[test]
fn callback_slot_is_optional() {
    let env = environment();
    let value = env
        .instantiate(
            "actor",
            &[("sprite", sprite(&env))],
            &[("entity", Value::Entity(EntityId::new(1)))],
        )
        .unwrap();
    let actor = value.as_object().and_then(|obj| obj.extract::<ActorState>()).unwrap();
    assert!(!actor.has_hit_handler);
}

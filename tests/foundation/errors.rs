//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use dungeon_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_unsupported_member() {
    let err = Error::unsupported_member("test_component", "texture", "Texture");
    assert!(matches!(err.kind, ErrorKind::UnsupportedMemberType { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("texture"));
    assert!(msg.contains("Texture"));
    assert!(msg.contains("test_component"));
}

#[test]
fn error_missing_member() {
    let err = Error::missing_member("chain_class", "no_such_member");
    assert!(matches!(err.kind, ErrorKind::MissingMember { .. }));
    assert!(format!("{err}").contains("no_such_member"));
}

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch("int", "string");
    let msg = format!("{err}");
    assert!(msg.contains("expected int"));
    assert!(msg.contains("got string"));
}

#[test]
fn error_parse_position() {
    let err = Error::parse("expected node name", 3, 7);
    assert_eq!(format!("{err}"), "parse error at 3:7: expected node name");
}

#[test]
fn error_duplicate_adapter() {
    let err = Error::new(ErrorKind::DuplicateAdapter("Animation".to_string()));
    assert!(format!("{err}").contains("Animation"));
}

#[test]
fn error_missing_context() {
    let err = Error::new(ErrorKind::MissingContext {
        owner: "velocity_component".to_string(),
        name: "entity".to_string(),
    });
    let msg = format!("{err}");
    assert!(msg.contains("entity"));
    assert!(msg.contains("velocity_component"));
}

#[test]
fn error_internal() {
    let err = Error::internal("unreachable state");
    assert!(matches!(err.kind, ErrorKind::Internal(_)));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_without_context() {
    let err = Error::missing_member("quest", "x");
    assert!(err.context.is_none());
}

#[test]
fn error_in_scope_keeps_frames() {
    let err = Error::unsupported_member("a", "b", "c")
        .with_frame("while building `a`")
        .in_scope("global");
    let ctx = err.context.unwrap();
    assert_eq!(ctx.scope.as_deref(), Some("global"));
    assert_eq!(ctx.stack, vec!["while building `a`".to_string()]);
}

#[test]
fn error_with_explicit_context() {
    let ctx = ErrorContext::new().with_scope("level_1");
    let err = Error::internal("x").with_context(ctx);
    assert_eq!(err.context.and_then(|c| c.scope), Some("level_1".to_string()));
}

#[test]
fn unknown_scope_display() {
    let err = Error::unknown_scope(4);
    assert!(matches!(err.kind, ErrorKind::UnknownScope(4)));
    assert_eq!(err.to_string(), "unknown scope #4");
}

//! Translation of host identifiers into DSL identifiers.
//!
//! Host code names things in mixed case (`moveLeftAnimation`,
//! `VelocityComponent`); the DSL uses lower-case words joined by underscores
//! (`move_left_animation`, `velocity_component`).

/// Converts a mixed-case host identifier into a DSL identifier.
///
/// A word boundary is placed wherever a lower-case letter is followed by an
/// upper-case letter. Every character is then lower-cased.
///
/// ```
/// use dungeon_semantic::to_dsl_name;
///
/// assert_eq!(to_dsl_name("helloWorldW"), "hello_world_w");
/// assert_eq!(to_dsl_name("VelocityComponent"), "velocity_component");
/// assert_eq!(to_dsl_name("comp1"), "comp1");
/// ```
#[must_use]
pub fn to_dsl_name(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut after_lower = false;

    for ch in identifier.chars() {
        if ch.is_uppercase() {
            if after_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            after_lower = false;
        } else {
            out.push(ch);
            after_lower = ch.is_lowercase();
        }
    }

    out
}

/// Returns true if `name` is already in DSL form (no upper-case characters).
#[must_use]
pub fn is_dsl_name(name: &str) -> bool {
    !name.chars().any(char::is_uppercase)
}

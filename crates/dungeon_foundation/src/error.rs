//! Error types for the dungeon DSL type bridge.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result type alias for type bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for type bridge operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Appends a frame to this error's context, creating the context if needed.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Records the scope an operation ran in.
    #[must_use]
    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_scope(scope));
        self
    }

    /// Creates an unsupported member type error.
    #[must_use]
    pub fn unsupported_member(
        owner: impl Into<String>,
        member: impl Into<String>,
        shape: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::UnsupportedMemberType {
            owner: owner.into(),
            member: member.into(),
            shape: shape.into(),
        })
    }

    /// Creates a missing member error.
    #[must_use]
    pub fn missing_member(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingMember {
            owner: owner.into(),
            name: name.into(),
        })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch { expected, actual })
    }

    /// Creates a parse error at the given position.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(ErrorKind::ParseError {
            message: message.into(),
            line,
            column,
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Creates an unknown scope error from a raw scope index.
    #[must_use]
    pub fn unknown_scope(index: u32) -> Self {
        Self::new(ErrorKind::UnknownScope(index))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A member's declared shape has no DSL counterpart.
    #[error("unsupported type `{shape}` for member `{member}` of `{owner}`")]
    UnsupportedMemberType {
        /// The type declaring the member.
        owner: String,
        /// The host name of the member.
        member: String,
        /// The declared shape that could not be mirrored.
        shape: String,
    },

    /// The requested host type is neither exposable nor adapter-covered.
    #[error("type `{0}` is not exposed to the DSL")]
    UnsupportedType(String),

    /// Two host members convert to the same DSL identifier.
    #[error("members `{first}` and `{second}` of `{owner}` both map to `{dsl_name}`")]
    DuplicateMember {
        /// The type declaring the members.
        owner: String,
        /// Host name of the member registered first.
        first: String,
        /// Host name of the conflicting member.
        second: String,
        /// The shared DSL name.
        dsl_name: String,
    },

    /// A different symbol is already bound under this name.
    #[error("symbol `{name}` is already defined in scope `{scope}`")]
    DuplicateSymbol {
        /// The scope holding the existing binding.
        scope: String,
        /// The conflicting name.
        name: String,
    },

    /// An adapter for this target type is already registered.
    #[error("an adapter for `{0}` is already registered")]
    DuplicateAdapter(String),

    /// No builder is registered for an adapted type.
    #[error("no adapter registered for `{0}`")]
    MissingAdapter(String),

    /// A required member or type could not be resolved.
    #[error("`{owner}` has no member `{name}`")]
    MissingMember {
        /// The type or scope that was searched.
        owner: String,
        /// The name that was not found.
        name: String,
    },

    /// A builder parameter received no argument.
    #[error("missing argument `{name}` for `{owner}`")]
    MissingArgument {
        /// The adapted type being constructed.
        owner: String,
        /// The parameter name.
        name: String,
    },

    /// A context-supplied member was not provided at instantiation.
    #[error("context value `{name}` required by `{owner}` was not supplied")]
    MissingContext {
        /// The type being instantiated.
        owner: String,
        /// The context member name.
        name: String,
    },

    /// The host type declares no constructor.
    #[error("type `{0}` cannot be constructed from the DSL")]
    NotConstructible(String),

    /// A value does not fit the declared type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: String,
        /// The actual type encountered.
        actual: String,
    },

    /// Wrong number of arguments to a builder or callback.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Number of parameters declared.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// Malformed textual input to a builder.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
    },

    /// A scope handle does not belong to the table it was used with.
    #[error("unknown scope #{0}")]
    UnknownScope(u32),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the scope the operation ran in.
    pub scope: Option<String>,
    /// Construction stack, innermost frame first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scope name.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scope) = &self.scope {
            write!(f, "in scope {scope}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  {frame}")?;
            }
        }
        Ok(())
    }
}

//! Configuration for the type builder.

/// What the adapter registry does when a second adapter targets the same type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdapterPolicy {
    /// The newer adapter replaces the older one.
    #[default]
    Replace,
    /// Registration fails with `DuplicateAdapter`.
    Reject,
}

/// Configuration for a [`TypeBuilder`](crate::TypeBuilder).
#[derive(Clone, Debug)]
pub struct BuilderConfig {
    /// Duplicate adapter handling.
    pub adapter_policy: AdapterPolicy,

    /// Bind an adapted type into the registering scope as soon as its adapter
    /// is registered, instead of waiting for a member to reference it.
    pub bind_adapted_types: bool,

    /// Reject function-shaped members that are not declared as callback slots.
    /// When false they are treated as callback slots.
    pub strict_callbacks: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            adapter_policy: AdapterPolicy::Replace,
            bind_adapted_types: true,
            strict_callbacks: true,
        }
    }
}

impl BuilderConfig {
    /// Creates a configuration that rejects every ambiguity.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            adapter_policy: AdapterPolicy::Reject,
            bind_adapted_types: true,
            strict_callbacks: true,
        }
    }

    /// Creates a configuration that binds adapted types only on demand and
    /// accepts undeclared function members as callbacks.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            adapter_policy: AdapterPolicy::Replace,
            bind_adapted_types: false,
            strict_callbacks: false,
        }
    }

    /// Builder method to set the duplicate adapter policy.
    #[must_use]
    pub fn with_adapter_policy(mut self, policy: AdapterPolicy) -> Self {
        self.adapter_policy = policy;
        self
    }

    /// Builder method to set eager binding of adapted types.
    #[must_use]
    pub fn with_bind_adapted_types(mut self, bind: bool) -> Self {
        self.bind_adapted_types = bind;
        self
    }

    /// Builder method to set strict callback checking.
    #[must_use]
    pub fn with_strict_callbacks(mut self, strict: bool) -> Self {
        self.strict_callbacks = strict;
        self
    }
}

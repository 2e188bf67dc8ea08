//! Checked arguments handed to constructors and adapter builders.

use std::any::Any;

use dungeon_foundation::{Callback, EntityId, Error, ErrorKind, Graph, LtVec, Result, Value};

/// Named argument values for one instantiation.
///
/// Values have already been checked against the declared member types by the
/// time a constructor sees them; the typed accessors still report mismatches
/// so builders can be called directly with unchecked data.
#[derive(Clone, Debug, Default)]
pub struct InstanceArgs {
    owner: String,
    values: Vec<(String, Value)>,
    context: Vec<(String, Value)>,
}

impl InstanceArgs {
    /// Creates an empty argument set for the named type.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            values: Vec::new(),
            context: Vec::new(),
        }
    }

    /// Adds or replaces a named argument.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Adds or replaces a context value.
    #[must_use]
    pub fn with_context(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_context(name, value);
        self
    }

    /// Adds or replaces a named argument in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        upsert(&mut self.values, name.into(), value.into());
    }

    /// Adds or replaces a context value in place.
    pub fn set_context(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        upsert(&mut self.context, name.into(), value.into());
    }

    /// Returns the DSL name of the type being constructed.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Number of named arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no named arguments were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the named arguments in the order they were supplied.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns an argument if it was supplied and is not nil.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .filter(|value| !value.is_nil())
    }

    /// Returns true if the argument was supplied.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns a required argument.
    ///
    /// # Errors
    ///
    /// Returns `MissingArgument` if the argument was not supplied.
    pub fn value(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| {
            Error::new(ErrorKind::MissingArgument {
                owner: self.owner.clone(),
                name: name.to_string(),
            })
        })
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Returns a required integer argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not an integer.
    pub fn int(&self, name: &str) -> Result<i64> {
        let value = self.value(name)?;
        value.as_int().ok_or_else(|| mismatch("int", value))
    }

    /// Returns a required float argument. Integers are widened.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not a number.
    pub fn float(&self, name: &str) -> Result<f64> {
        let value = self.value(name)?;
        value.as_number().ok_or_else(|| mismatch("float", value))
    }

    /// Returns a required string argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not a string.
    pub fn string(&self, name: &str) -> Result<&str> {
        let value = self.value(name)?;
        value.as_str().ok_or_else(|| mismatch("string", value))
    }

    /// Returns a required boolean argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not a boolean.
    pub fn bool(&self, name: &str) -> Result<bool> {
        let value = self.value(name)?;
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }

    /// Returns a required entity argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not an entity.
    pub fn entity(&self, name: &str) -> Result<EntityId> {
        let value = self.value(name)?;
        value.as_entity().ok_or_else(|| mismatch("entity", value))
    }

    /// Returns the elements of a required list or set argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not a collection.
    pub fn list(&self, name: &str) -> Result<&LtVec<Value>> {
        let value = self.value(name)?;
        value
            .as_list()
            .or_else(|| value.as_set())
            .ok_or_else(|| mismatch("list", value))
    }

    /// Returns a required list of strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing, not a collection, or
    /// holds a non-string element.
    pub fn strings(&self, name: &str) -> Result<Vec<String>> {
        self.list(name)?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| mismatch("string", item))
            })
            .collect()
    }

    /// Returns a required graph argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not a graph.
    pub fn graph(&self, name: &str) -> Result<&Graph> {
        let value = self.value(name)?;
        value.as_graph().ok_or_else(|| mismatch("graph", value))
    }

    /// Returns a clone of a required host object argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or holds another type.
    pub fn object<T: Any + Clone>(&self, name: &str) -> Result<T> {
        let value = self.value(name)?;
        value
            .as_object()
            .and_then(|obj| obj.extract::<T>())
            .ok_or_else(|| mismatch(dungeon_foundation::short_type_name::<T>(), value))
    }

    /// Returns clones of every host object in a required list argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing, not a collection, or
    /// holds an element of another type.
    pub fn objects<T: Any + Clone>(&self, name: &str) -> Result<Vec<T>> {
        let expected = dungeon_foundation::short_type_name::<T>();
        self.list(name)?
            .iter()
            .map(|item| {
                item.as_object()
                    .and_then(|obj| obj.extract::<T>())
                    .ok_or_else(|| mismatch(expected, item))
            })
            .collect()
    }

    /// Returns the callback assigned to a slot, if any.
    ///
    /// Callback slots are optional; an unassigned slot is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is not a function value.
    pub fn callback(&self, name: &str) -> Result<Option<Callback>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_func()
                .cloned()
                .map(Some)
                .ok_or_else(|| mismatch("function", value)),
        }
    }

    // =========================================================================
    // Defaults
    // =========================================================================

    /// Returns an integer argument or `default` if it was not supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is present but not an integer.
    pub fn int_or(&self, name: &str, default: i64) -> Result<i64> {
        if self.contains(name) { self.int(name) } else { Ok(default) }
    }

    /// Returns a float argument or `default` if it was not supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is present but not a number.
    pub fn float_or(&self, name: &str, default: f64) -> Result<f64> {
        if self.contains(name) { self.float(name) } else { Ok(default) }
    }

    /// Returns a string argument or `default` if it was not supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is present but not a string.
    pub fn string_or<'a>(&'a self, name: &str, default: &'a str) -> Result<&'a str> {
        if self.contains(name) { self.string(name) } else { Ok(default) }
    }

    /// Returns a boolean argument or `default` if it was not supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is present but not a boolean.
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool> {
        if self.contains(name) { self.bool(name) } else { Ok(default) }
    }

    // =========================================================================
    // Context
    // =========================================================================

    /// Returns a context value.
    ///
    /// # Errors
    ///
    /// Returns `MissingContext` if the interpreter did not supply it.
    pub fn context(&self, name: &str) -> Result<&Value> {
        self.context
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| {
                Error::new(ErrorKind::MissingContext {
                    owner: self.owner.clone(),
                    name: name.to_string(),
                })
            })
    }

    /// Returns a context-supplied entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the context value is missing or not an entity.
    pub fn context_entity(&self, name: &str) -> Result<EntityId> {
        let value = self.context(name)?;
        value.as_entity().ok_or_else(|| mismatch("entity", value))
    }
}

fn upsert(entries: &mut Vec<(String, Value)>, name: String, value: Value) {
    match entries.iter_mut().find(|(key, _)| *key == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name, value)),
    }
}

fn mismatch(expected: &str, actual: &Value) -> Error {
    Error::type_mismatch(expected, actual.kind().to_string())
}

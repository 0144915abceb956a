//! Function table and value bindings consulted during evaluation.
//!
//! An `Environment` is built by the caller for one `compile` call and only
//! read during it. Functions live in the same map as plain values:
//! call heads must resolve to a `Value::Function`, bare symbols may
//! resolve to anything.

use rustc_hash::FxHashMap;

use crate::errors::EvalResult;
use crate::value::{FunctionValue, Value};

#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Bind `name` to a plain value, replacing any previous binding.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Bind `name` to a host function.
    pub fn define_fn(&mut self, name: &str, func: impl Fn(&[Value]) -> EvalResult + 'static) {
        self.bindings
            .insert(name.to_string(), Value::Function(FunctionValue::new(name, func)));
    }

    /// Builder form of [`define_fn`](Self::define_fn).
    #[must_use]
    pub fn with_fn(mut self, name: &str, func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        self.define_fn(name, func);
        self
    }

    /// Builder form of [`define`](Self::define).
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.define(name, value);
        self
    }

    /// Copy every binding of `other` into `self`; `other` wins on conflicts.
    pub fn extend(&mut self, other: &Environment) {
        self.bindings.extend(
            other
                .bindings
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

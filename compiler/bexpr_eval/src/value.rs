//! Runtime values produced by evaluation.

use std::fmt;
use std::mem;
use std::rc::Rc;

use bexpr_ir::Number;
use bexpr_stack::ensure_sufficient_stack;

use crate::errors::EvalResult;

/// Signature every callable in an [`Environment`](crate::Environment) has.
///
/// Arguments arrive fully evaluated, left to right. Callables are variadic:
/// arity checks, if any, are the callable's own business.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult;

/// A named host function.
#[derive(Clone)]
pub struct FunctionValue {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl FunctionValue {
    pub fn new(name: &str, func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        FunctionValue {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.func)(args)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name)
    }
}

/// Functions are equal only if they are the same allocation.
impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

/// Result of evaluating a node.
///
/// Lists nest as deeply as the vectors that produced them, so `Clone`,
/// `PartialEq`, `Display` and `Drop` are written to survive that depth.
#[derive(Debug, Default)]
pub enum Value {
    /// Absence: an unbound symbol, or an empty attribute expression.
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Function(FunctionValue),
}

impl Clone for Value {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Value::Nil => Value::Nil,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(n) => Value::Int(*n),
            Value::Float(f) => Value::Float(*f),
            Value::Str(s) => Value::Str(s.clone()),
            Value::List(items) => Value::List(items.clone()),
            Value::Function(func) => Value::Function(func.clone()),
        })
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        })
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let Value::List(items) = self else {
            return;
        };
        let mut pending = mem::take(items);
        while let Some(mut value) = pending.pop() {
            if let Value::List(children) = &mut value {
                pending.append(children);
            }
        }
    }
}

impl Value {
    /// Convenience constructor for string values.
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Truthiness as the templating layer sees it.
    ///
    /// `Nil`, `false`, `0`, `0.0`, NaN and `""` are falsy. Lists (even empty
    /// ones) and functions are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Function(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Function(_) => "function",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as a float, promoting integers.
    #[expect(
        clippy::cast_precision_loss,
        reason = "int to float promotion is the intended widening"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// User-facing rendering, as text directives would insert it.
///
/// Strings print without quotes; `Nil` prints as nothing.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Value::Nil => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match item {
                        Value::Str(s) => write!(f, "{s:?}")?,
                        other => write!(f, "{other}")?,
                    }
                }
                f.write_str("]")
            }
            Value::Function(func) => write!(f, "<fn {}>", func.name()),
        })
    }
}

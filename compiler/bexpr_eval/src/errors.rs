//! Evaluation errors.
//!
//! `EvalErrorKind` carries the structured category; the `#[cold]` factory
//! functions below are the way to build an [`EvalError`]. Host functions
//! registered in an environment use the same constructors, so callers can
//! match on `kind` regardless of where the failure came from.

use std::fmt;

use bexpr_ir::Span;

use crate::value::Value;

/// Result of evaluating one node.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// A list's first element is not a symbol, e.g. `(1 2)`.
    NonSymbolCallHead { found: &'static str },
    /// `()` has no head to call.
    EmptyCall,
    /// A list's head symbol has no entry in the environment.
    UndefinedFunction { name: String },
    /// A list's head symbol names a value that is not a function.
    NotCallable { name: String, type_name: &'static str },
    /// A function received an argument of the wrong type.
    TypeMismatch { expected: String, got: &'static str },
    /// A function received the wrong number of arguments.
    ArityMismatch { name: String, expected: usize, got: usize },
    IntegerOverflow { operation: &'static str },
    DivisionByZero,
    IndexOutOfBounds { index: i64, len: usize },
    /// Free-form failure raised by a host function.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonSymbolCallHead { found } => {
                write!(f, "expected a symbol for a function call, got a {found}")
            }
            Self::EmptyCall => write!(f, "expected a symbol for a function call, got an empty list"),
            Self::UndefinedFunction { name } => {
                write!(f, "'{name}' not found, could not eval function")
            }
            Self::NotCallable { name, type_name } => {
                write!(f, "'{name}' is a {type_name}, not a function")
            }
            Self::TypeMismatch { expected, got } => write!(f, "expected {expected}, got {got}"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation failure; aborts the whole `compile` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// Node that was being evaluated, once known.
    pub span: Option<Span>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a span unless one is already set.
    ///
    /// The innermost node wins: an error raised deep inside nested calls
    /// keeps pointing at the node that actually failed.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} (at {span})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EvalError {}

#[cold]
pub fn non_symbol_call_head(found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonSymbolCallHead { found })
}

#[cold]
pub fn empty_call() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyCall)
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_callable(name: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        name: name.to_string(),
        type_name,
    })
}

#[cold]
pub fn type_mismatch(expected: impl Into<String>, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.into(),
        got,
    })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

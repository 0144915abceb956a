use bexpr_eval::EvalError;
use bexpr_parse::ParseError;
use thiserror::Error;

use crate::attribute::Directive;

/// Failure to read or evaluate an instrumented attribute.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AttrError {
    #[error("`{name}` is not an instrumented attribute")]
    NotInstrumented { name: String },
    #[error("unknown directive `{keyword}`")]
    UnknownDirective { keyword: String },
    #[error("lookup failed, namespace not defined: {namespace}")]
    UnknownNamespace { namespace: String },
    #[error("malformed `{directive}` value; expected {expected}, got `{found}`")]
    MalformedValue {
        directive: Directive,
        expected: &'static str,
        found: String,
    },
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("eval error: {0}")]
    Eval(#[from] EvalError),
}

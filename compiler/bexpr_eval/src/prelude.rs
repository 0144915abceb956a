//! Standard function table.
//!
//! Nothing in the evaluator depends on these; callers opt in by merging
//! [`prelude()`] into their own environment. All functions are variadic
//! where that makes sense, and none of them short-circuit: arguments are
//! already evaluated by the time a function runs.

use crate::environment::Environment;
use crate::errors::{
    division_by_zero, index_out_of_bounds, integer_overflow, type_mismatch, wrong_arg_count,
    EvalError, EvalResult,
};
use crate::value::Value;

/// Build a fresh environment holding the standard functions.
pub fn prelude() -> Environment {
    Environment::new()
        .with_fn("+", add)
        .with_fn("-", sub)
        .with_fn("*", mul)
        .with_fn("/", div)
        .with_fn("=", |args| Ok(Value::Bool(chain(args, loose_eq))))
        .with_fn("<", |args| compare_chain(args, |a, b| a < b))
        .with_fn(">", |args| compare_chain(args, |a, b| a > b))
        .with_fn("<=", |args| compare_chain(args, |a, b| a <= b))
        .with_fn(">=", |args| compare_chain(args, |a, b| a >= b))
        .with_fn("not", not)
        .with_fn("and", |args| Ok(Value::Bool(args.iter().all(Value::is_truthy))))
        .with_fn("or", |args| Ok(Value::Bool(args.iter().any(Value::is_truthy))))
        .with_fn("str", |args| {
            Ok(Value::Str(args.iter().map(ToString::to_string).collect()))
        })
        .with_fn("count", count)
        .with_fn("get", get)
}

/// Numeric argument after int/float classification.
#[derive(Clone, Copy, Debug)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Result<Num, EvalError> {
        match value {
            Value::Int(n) => Ok(Num::Int(*n)),
            Value::Float(f) => Ok(Num::Float(*f)),
            other => Err(type_mismatch("number", other.type_name())),
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "int to float promotion is the intended widening"
    )]
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(f) => f,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Int(n),
            Num::Float(f) => Value::Float(f),
        }
    }
}

/// Left fold with int arithmetic while both sides are ints, float otherwise.
fn fold(
    op: &'static str,
    init: Num,
    args: &[Value],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    let mut acc = init;
    for arg in args {
        acc = match (acc, Num::of(arg)?) {
            (Num::Int(a), Num::Int(b)) => {
                Num::Int(int_op(a, b).ok_or_else(|| integer_overflow(op))?)
            }
            (a, b) => Num::Float(float_op(a.as_f64(), b.as_f64())),
        };
    }
    Ok(acc.into_value())
}

fn add(args: &[Value]) -> EvalResult {
    fold("addition", Num::Int(0), args, i64::checked_add, |a, b| a + b)
}

fn mul(args: &[Value]) -> EvalResult {
    fold("multiplication", Num::Int(1), args, i64::checked_mul, |a, b| a * b)
}

/// `(- x)` negates; `(- x y z)` subtracts left to right.
fn sub(args: &[Value]) -> EvalResult {
    match args {
        [] => Err(wrong_arg_count("-", 1, 0)),
        [only] => fold(
            "negation",
            Num::Int(0),
            std::slice::from_ref(only),
            i64::checked_sub,
            |a, b| a - b,
        ),
        [first, rest @ ..] => fold(
            "subtraction",
            Num::of(first)?,
            rest,
            i64::checked_sub,
            |a, b| a - b,
        ),
    }
}

/// `(/ x)` is `1/x`; `(/ x y z)` divides left to right.
///
/// Integer division stays integral only when exact, so `(/ 6 3)` is `2` and
/// `(/ 1 2)` is `0.5`. A zero divisor is an error for ints and floats alike.
fn div(args: &[Value]) -> EvalResult {
    let (init, divisors) = match args {
        [] => return Err(wrong_arg_count("/", 1, 0)),
        [only] => (Num::Int(1), std::slice::from_ref(only)),
        [first, rest @ ..] => (Num::of(first)?, rest),
    };

    let mut acc = init;
    for divisor in divisors {
        let divisor = Num::of(divisor)?;
        if divisor.as_f64() == 0.0 {
            return Err(division_by_zero());
        }
        acc = match (acc, divisor) {
            (Num::Int(a), Num::Int(b)) if a.checked_rem(b) == Some(0) => {
                Num::Int(a.checked_div(b).ok_or_else(|| integer_overflow("division"))?)
            }
            (a, b) => Num::Float(a.as_f64() / b.as_f64()),
        };
    }
    Ok(acc.into_value())
}

/// Equality that treats `1` and `1.0` as the same number.
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            a.as_float() == b.as_float()
        }
        _ => a == b,
    }
}

/// True when `pred` holds for every adjacent pair (vacuously for < 2 args).
fn chain(args: &[Value], pred: impl Fn(&Value, &Value) -> bool) -> bool {
    args.windows(2).all(|pair| pred(&pair[0], &pair[1]))
}

/// Numeric comparison over every adjacent pair.
fn compare_chain(args: &[Value], cmp: fn(f64, f64) -> bool) -> EvalResult {
    let nums = args
        .iter()
        .map(|arg| Num::of(arg).map(Num::as_f64))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Bool(nums.windows(2).all(|pair| cmp(pair[0], pair[1]))))
}

fn not(args: &[Value]) -> EvalResult {
    match args {
        [value] => Ok(Value::Bool(!value.is_truthy())),
        _ => Err(wrong_arg_count("not", 1, args.len())),
    }
}

/// Length of a list, or number of characters in a string.
fn count(args: &[Value]) -> EvalResult {
    let [value] = args else {
        return Err(wrong_arg_count("count", 1, args.len()));
    };
    let len = match value {
        Value::List(items) => items.len(),
        Value::Str(s) => s.chars().count(),
        other => return Err(type_mismatch("list or str", other.type_name())),
    };
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| integer_overflow("count"))
}

/// `(get list index)`.
fn get(args: &[Value]) -> EvalResult {
    let [list, index] = args else {
        return Err(wrong_arg_count("get", 2, args.len()));
    };
    let items = list
        .as_list()
        .ok_or_else(|| type_mismatch("list", list.type_name()))?;
    let index = index
        .as_int()
        .ok_or_else(|| type_mismatch("int", index.type_name()))?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| index_out_of_bounds(index, items.len()))
}

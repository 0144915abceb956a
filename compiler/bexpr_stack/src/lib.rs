//! Stack growth for recursion that follows expression nesting.
//!
//! Both the parser and the evaluator recurse once per nested `(...)` or
//! `[...]` group, so the only bound on recursion depth is the input itself.
//! Attribute values come from markup authors, and a value like `((((((...`
//! a few hundred thousand levels deep must still parse and evaluate instead
//! of overflowing the thread stack.
//!
//! - **Native targets**: `stacker` grows the stack when the red zone is hit.
//! - **WASM targets**: plain call; the runtime owns the stack.

/// Remaining stack below which a new segment is allocated (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
///
/// Wrap every recursive descent into a child node:
///
/// ```text
/// fn parse_group(&mut self) -> Result<Node, ParseError> {
///     ensure_sufficient_stack(|| self.parse_children())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM passthrough.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

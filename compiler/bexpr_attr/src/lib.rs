//! bexpr Attr - the boundary between expressions and the renderer.
//!
//! The renderer hands over attribute names and values as strings. This
//! crate recognises the instrumented ones (`b-<directive>[:<namespace>]`),
//! evaluates their value against the namespace's function table, and
//! resolves bare symbols through the element's [`BindingFrame`] chain.
//! Walking the document and acting on directives stay with the renderer.

mod attribute;
mod error;
mod frame;

pub use attribute::{
    binding_attribute_name, is_instrumented, read_attribute, Attribute, Directive, BINDING,
    INTERNAL_PREFIX, PREFIX,
};
pub use error::AttrError;
pub use frame::{iteration_items, BindingFrame, INDEX};

use bexpr_eval::{compile, CompileOptions, Environment, ResolverFallthrough, Value};
use tracing::debug;

/// Evaluate `attr` and return its first value.
///
/// `namespaces` maps a namespace key to its function table; an attribute
/// without a namespace evaluates against an empty table. Symbols resolve
/// through the nearest binding in `frame`'s chain before the table. Values
/// after the first are computed (errors included) and dropped; an empty
/// expression is `Nil`.
pub fn evaluate_attribute<'n>(
    attr: &Attribute,
    namespaces: impl FnOnce(&str) -> Option<&'n Environment>,
    frame: &BindingFrame<'_>,
) -> Result<Value, AttrError> {
    evaluate_attribute_with(attr, namespaces, frame, ResolverFallthrough::Absent)
}

/// [`evaluate_attribute`] with an explicit fallthrough policy.
///
/// The policy applies both to the ancestor walk and to the step from the
/// frames to the table. Under [`ResolverFallthrough::Falsy`] a falsy binding
/// gives way to an outer frame's binding, then to the table. Note that an
/// iteration [`INDEX`] of `0` is falsy too.
#[tracing::instrument(level = "debug", skip_all, fields(directive = %attr.directive))]
pub fn evaluate_attribute_with<'n>(
    attr: &Attribute,
    namespaces: impl FnOnce(&str) -> Option<&'n Environment>,
    frame: &BindingFrame<'_>,
    fallthrough: ResolverFallthrough,
) -> Result<Value, AttrError> {
    let empty = Environment::new();
    let env = match attr.namespace.as_deref() {
        Some(namespace) => namespaces(namespace).ok_or_else(|| AttrError::UnknownNamespace {
            namespace: namespace.to_string(),
        })?,
        None => &empty,
    };

    let nodes = bexpr_parse::parse(&attr.value)?;
    let resolver = |name: &str| frame.infer_with(name, fallthrough);
    let options = CompileOptions::new()
        .with_resolver(&resolver)
        .with_fallthrough(fallthrough);
    let values = compile(&nodes, env, &options)?;
    debug!(count = values.len(), "evaluated attribute");
    Ok(values.into_iter().next().unwrap_or_default())
}

#[cfg(test)]
mod tests;

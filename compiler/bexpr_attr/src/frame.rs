//! Bindings visible to an element.

use bexpr_eval::{ResolverFallthrough, Value};
use rustc_hash::FxHashMap;

use crate::attribute::Directive;
use crate::error::AttrError;

/// Key a `for` directive binds to each repeated element's position.
pub const INDEX: &str = "index";

const LET_SHAPE: &str = "[[key value] ...] with string keys";
const FOR_SHAPE: &str = "[key [items ...]] with a string key";

/// Bindings recorded on one element, linked to the enclosing element's frame.
///
/// Frames borrow their parent, so a child frame lives no longer than the
/// walk over its ancestors.
#[derive(Clone, Debug, Default)]
pub struct BindingFrame<'p> {
    bindings: FxHashMap<String, Value>,
    parent: Option<&'p BindingFrame<'p>>,
}

impl<'p> BindingFrame<'p> {
    /// Frame with no parent.
    pub fn root() -> Self {
        BindingFrame::default()
    }

    /// Empty frame nested inside `parent`.
    pub fn child(parent: &'p BindingFrame<'p>) -> Self {
        BindingFrame {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Record `key` on this frame, replacing an earlier binding here.
    pub fn bind(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(key.into(), value.into());
    }

    /// Binding recorded on this frame only.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.bindings.get(key)
    }

    /// Nearest binding of `key`, searching this frame and then its ancestors.
    pub fn infer(&self, key: &str) -> Option<Value> {
        self.infer_with(key, ResolverFallthrough::Absent)
    }

    /// Ancestor walk under a fallthrough policy.
    ///
    /// With [`ResolverFallthrough::Falsy`] a falsy binding does not stop the
    /// walk, so an outer truthy binding of the same key wins over it.
    pub fn infer_with(&self, key: &str, fallthrough: ResolverFallthrough) -> Option<Value> {
        let mut frame = Some(self);
        while let Some(current) = frame {
            match current.get(key) {
                Some(value) if fallthrough == ResolverFallthrough::Absent || value.is_truthy() => {
                    return Some(value.clone());
                }
                _ => frame = current.parent,
            }
        }
        None
    }

    pub fn parent(&self) -> Option<&'p BindingFrame<'p>> {
        self.parent
    }

    /// Record every `[key value]` pair of a `let` value.
    ///
    /// Nothing is bound unless every entry is well formed. Returns how many
    /// bindings were recorded.
    pub fn bind_pairs(&mut self, pairs: &Value) -> Result<usize, AttrError> {
        let Some(items) = pairs.as_list() else {
            return Err(malformed(Directive::Let, LET_SHAPE, pairs));
        };
        let bindings = items
            .iter()
            .map(|item| match item.as_list() {
                Some([Value::Str(key), value]) => Ok((key, value)),
                _ => Err(malformed(Directive::Let, LET_SHAPE, item)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (key, value) in &bindings {
            self.bind(key.as_str(), (*value).clone());
        }
        Ok(bindings.len())
    }

    /// Record the bindings of one `for` repetition: [`INDEX`] and `key`.
    pub fn bind_iteration(&mut self, key: &str, index: usize, item: Value) {
        self.bind(INDEX, i64::try_from(index).unwrap_or(i64::MAX));
        self.bind(key, item);
    }
}

/// Split a `for` value `[key [items ...]]` into its key and items.
pub fn iteration_items(value: &Value) -> Result<(&str, &[Value]), AttrError> {
    match value.as_list() {
        Some([Value::Str(key), Value::List(items)]) => Ok((key.as_str(), items.as_slice())),
        _ => Err(malformed(Directive::For, FOR_SHAPE, value)),
    }
}

#[cold]
fn malformed(directive: Directive, expected: &'static str, found: &Value) -> AttrError {
    AttrError::MalformedValue {
        directive,
        expected,
        found: found.to_string(),
    }
}

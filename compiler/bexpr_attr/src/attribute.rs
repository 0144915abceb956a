//! Attribute names of the form `b-<directive>[:<namespace>]`.

use std::fmt;

use crate::error::AttrError;

/// Prefix marking an attribute as instrumented.
pub const PREFIX: &str = "b-";
/// Prefix of attributes the renderer writes for itself.
pub const INTERNAL_PREFIX: &str = "__b-";
/// Attribute name stem for recorded bindings, see [`binding_attribute_name`].
pub const BINDING: &str = "__b-binding";

/// What an instrumented attribute asks the renderer to do with its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Show the element only when the value is truthy.
    When,
    /// Show the element only when the value is falsy.
    WhenNot,
    /// Replace the element's text.
    Text,
    /// Replace the element's markup.
    Html,
    /// Repeat the element's template once per item of `[key items]`.
    For,
    /// Record `[[key value] ...]` as bindings on the element.
    Let,
}

impl Directive {
    pub const ALL: [Directive; 6] = [
        Directive::When,
        Directive::WhenNot,
        Directive::Text,
        Directive::Html,
        Directive::For,
        Directive::Let,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.keyword() == keyword)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Directive::When => "when",
            Directive::WhenNot => "when-not",
            Directive::Text => "text",
            Directive::Html => "html",
            Directive::For => "for",
            Directive::Let => "let",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// An instrumented attribute, split into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub directive: Directive,
    /// Function table to evaluate against; `None` means an empty table.
    pub namespace: Option<String>,
    /// Unparsed expression text.
    pub value: String,
}

/// Whether `name` belongs to the templating layer.
///
/// Internal attributes (`__b-...`) do not count.
pub fn is_instrumented(name: &str) -> bool {
    name.starts_with(PREFIX)
}

/// Split `b-<directive>[:<namespace>]` and keep the value as is.
///
/// The name splits on every `:`; the first segment is the directive and the
/// second the namespace key. Further segments are ignored, and an empty
/// namespace (`b-text:`) is the same as none.
pub fn read_attribute(name: &str, value: &str) -> Result<Attribute, AttrError> {
    let Some(rest) = name.strip_prefix(PREFIX) else {
        return Err(AttrError::NotInstrumented {
            name: name.to_string(),
        });
    };
    let mut segments = rest.split(':');
    let keyword = segments.next().unwrap_or_default();
    let namespace = segments
        .next()
        .filter(|ns| !ns.is_empty())
        .map(str::to_string);
    let directive = Directive::from_keyword(keyword).ok_or_else(|| AttrError::UnknownDirective {
        keyword: keyword.to_string(),
    })?;
    Ok(Attribute {
        directive,
        namespace,
        value: value.to_string(),
    })
}

/// Name of the attribute that stores binding `key` on an element.
pub fn binding_attribute_name(key: &str) -> String {
    format!("{BINDING}:{key}")
}

//! Byte cursor over the expression text.
//!
//! Every byte the grammar dispatches on (whitespace, brackets, quote,
//! backslash, digits, `-`, `.`) is ASCII, so the cursor walks bytes and
//! only ever slices at positions that sit next to one of those bytes. Those
//! positions are always UTF-8 character boundaries.

use bexpr_ir::Span;

/// Whitespace skipped between nodes.
#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Bytes that end a number or symbol token. `None` is end of input.
#[inline]
pub(crate) fn is_delimiter(b: Option<u8>) -> bool {
    match b {
        None => true,
        Some(b) => is_whitespace(b) || matches!(b, b'(' | b')' | b'[' | b']'),
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    /// Full character at the cursor, for error messages.
    pub(crate) fn peek_char(&self) -> Option<char> {
        self.source.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        if self.pos < self.source.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Advance until [`is_delimiter`] holds for the current byte.
    pub(crate) fn eat_until_delimiter(&mut self) {
        while !is_delimiter(self.peek()) {
            self.pos += 1;
        }
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or("")
    }

    /// Span from `start` to the current position.
    pub(crate) fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.pos)
    }
}

//! Parse error types.
//!
//! Every malformed input is reported. The parser never drops a
//! sub-expression silently: an unterminated string or group fails the
//! whole `parse` call the same way a malformed number does.

use std::fmt;

use bexpr_ir::Span;

/// What went wrong, with the offending text where it helps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A number token contains something other than digits and one `.`.
    MalformedNumber { text: String },
    /// A number token contains a second `.`.
    ExtraDecimalPoint { text: String },
    /// An integer literal does not fit in `i64`.
    NumberTooLarge { text: String },
    /// End of input before the closing `'`.
    UnterminatedString,
    /// End of input before the `)` or `]` matching `open`.
    UnterminatedGroup { open: char },
    /// A group was closed with the wrong delimiter.
    MismatchedCloser { expected: char, found: char },
    /// A `)` or `]` with no open group.
    UnexpectedCloser { found: char },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedNumber { text } => {
                write!(f, "malformed number, starting with: {text}")
            }
            Self::ExtraDecimalPoint { text } => write!(
                f,
                "malformed number; found more than one decimal point, starting with: {text}"
            ),
            Self::NumberTooLarge { text } => write!(f, "number literal is too large: {text}"),
            Self::UnterminatedString => write!(f, "unterminated string; expected a closing '"),
            Self::UnterminatedGroup { open } => {
                let close = if *open == '(' { ')' } else { ']' };
                write!(f, "unterminated `{open}`; expected a closing `{close}`")
            }
            Self::MismatchedCloser { expected, found } => {
                write!(f, "expected `{expected}`, found `{found}`")
            }
            Self::UnexpectedCloser { found } => write!(f, "unexpected `{found}`"),
        }
    }
}

/// Parse failure; aborts the whole `parse` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Source text the error refers to.
    pub span: Span,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
}

impl ParseError {
    pub fn from_kind(kind: ParseErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        ParseError {
            kind,
            span,
            message,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}

#[cold]
pub(crate) fn malformed_number(text: &str, span: Span) -> ParseError {
    ParseError::from_kind(
        ParseErrorKind::MalformedNumber {
            text: text.to_string(),
        },
        span,
    )
}

#[cold]
pub(crate) fn extra_decimal_point(text: &str, span: Span) -> ParseError {
    ParseError::from_kind(
        ParseErrorKind::ExtraDecimalPoint {
            text: text.to_string(),
        },
        span,
    )
}

#[cold]
pub(crate) fn number_too_large(text: &str, span: Span) -> ParseError {
    ParseError::from_kind(
        ParseErrorKind::NumberTooLarge {
            text: text.to_string(),
        },
        span,
    )
}

#[cold]
pub(crate) fn unterminated_string(span: Span) -> ParseError {
    ParseError::from_kind(ParseErrorKind::UnterminatedString, span)
}

#[cold]
pub(crate) fn unterminated_group(open: char, span: Span) -> ParseError {
    ParseError::from_kind(ParseErrorKind::UnterminatedGroup { open }, span)
}

#[cold]
pub(crate) fn mismatched_closer(expected: char, found: char, span: Span) -> ParseError {
    ParseError::from_kind(ParseErrorKind::MismatchedCloser { expected, found }, span)
}

#[cold]
pub(crate) fn unexpected_closer(found: char, span: Span) -> ParseError {
    ParseError::from_kind(ParseErrorKind::UnexpectedCloser { found }, span)
}

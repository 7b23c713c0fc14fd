use crate::common::NonEmpty;
use thiserror::Error;

/// Byte span and text of the token an error points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    pub span: logos::Span,
    pub slice: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("(at position {}): illegal character {:?}", .0.span.start, .0.slice)]
    IllegalCharacter(SourcePosition),
    #[error("(at position {}): invalid function name {name}", .pos.span.start)]
    InvalidFunction { pos: SourcePosition, name: String },
    #[error("(at position {}): number is too large", .0.span.start)]
    NumberTooLarge(SourcePosition),
    #[error("(at position {}): syntax error; found {:?}, expected {}", .pos.span.start, .pos.slice, .expected.fmt_expected())]
    UnexpectedToken {
        pos: SourcePosition,
        expected: NonEmpty<String>,
    },
    #[error("syntax error; unexpected end of input, expected {}", .expected.fmt_expected())]
    UnexpectedEnd { expected: NonEmpty<String> },
    #[error("(at position {}): expression is nested too deeply", .0.span.start)]
    TooDeep(SourcePosition),
}

impl ParseError {
    /// True for errors raised by tokenization rather than the grammar.
    pub fn is_lex_error(&self) -> bool {
        matches!(
            self,
            Self::IllegalCharacter(_) | Self::InvalidFunction { .. } | Self::NumberTooLarge(_)
        )
    }
}

trait FormatExpected {
    fn fmt_expected(&self) -> String;
}

impl FormatExpected for [String] {
    fn fmt_expected(&self) -> String {
        match self {
            [] => unreachable!("NonEmpty cannot be empty"),
            [a] => a.to_owned(),
            [a, b] => format!("{} or {}", a, b),
            s => format!("{}, or {}", s[..s.len() - 1].join(", "), &s[s.len() - 1]),
        }
    }
}

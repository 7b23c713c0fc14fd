use crate::common::{Func, UInt};
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+", |lex| lex.slice().parse())]
    Number(UInt),

    #[token("d")]
    Die,
    #[token("x")]
    Times,
    #[token("+")]
    Plus,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(",")]
    Comma,

    // An identifier never begins with one of the reserved operator letters
    // (d, D, x, X), so `2xd6` lexes as `2`, `x`, `d`, `6`. Runs that are not
    // a known function name fall through to `Error`.
    #[regex(r"[a-ce-wyzA-CE-WYZ][a-zA-Z]*", ident)]
    Ident(Func),

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

fn ident(lex: &mut LogosLexer<TokenKind>) -> Option<Func> {
    Func::from_name(lex.slice())
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number(_) => "<number>",
            Self::Die => "'d'",
            Self::Times => "'x'",
            Self::Plus => "'+'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Comma => "','",
            Self::Ident(_) => "<function>",
            Self::Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

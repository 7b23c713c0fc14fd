pub mod ast;
mod error;
mod lexer;
mod parser;

pub use error::{ParseError, SourcePosition};

/// Parses dice notation into an evaluable [Expression](ast::Expression).
pub fn parse(s: &str) -> Result<ast::Expression, ParseError> {
    parser::Parser::new(s).parse()
}

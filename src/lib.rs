//! A parser and evaluator for a small dice-notation language.
//!
//! Expressions combine dice rolls (`3d6`, `d20`), a single addition
//! (`d8 + 2`), repetition (`2x(d4 + d6)`, which re-rolls the grouped
//! dice for each repeat), and the aggregate functions `min`, `max`, and
//! `mean` over two or more arguments.
//!
//! [parse()] builds an immutable [Expression]; evaluating it draws rolls
//! from an injectable random source, so the same tree can be evaluated
//! any number of times with independent outcomes.
//!
//! ```
//! let expr = dicelang::parse("min(3d6, d20) + 1")?;
//! let result = expr.eval()?;
//! assert!(result >= 2);
//! # Ok::<(), dicelang::Error>(())
//! ```

mod common;
mod error;
mod eval;
pub mod parse;

pub use common::{Int, UInt};
pub use error::Error;
pub use eval::{D10Rule, DefaultRoller, Eval, EvalContext, EvalError, Roller};
pub use parse::{ast::Expression, parse, ParseError};

/// Parses and evaluates `s` once with the thread-local generator.
pub fn roll(s: &str) -> Result<Int, Error> {
    let expr = parse(s)?;
    Ok(expr.eval()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll() {
        let result = roll("2x(d4 + d6)").unwrap();
        assert!((4..=20).contains(&result));
    }

    #[test]
    fn test_roll_propagates_errors() {
        assert!(matches!(roll("1+2+3"), Err(Error::Parse(_))));
        assert!(matches!(roll("d0"), Err(Error::Eval(_))));
    }
}

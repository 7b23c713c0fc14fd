use crate::eval::EvalError;
use crate::parse::ParseError;

/// Any failure from [roll](crate::roll): parsing or evaluation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Eval(#[from] EvalError),
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("cannot roll a die with zero sides")]
    ZeroSidedDie,
    #[error("too many dice rolled")]
    TooManyRolls,
}

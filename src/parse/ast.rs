use crate::common::*;
use crate::eval::{Eval, EvalContext, EvalError};

/// A parsed dice expression, ready to be evaluated any number of times.
///
/// The tree is immutable once built; every evaluation draws fresh rolls,
/// so repeated evaluations of the same tree are independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub(crate) root: Node,
}

impl Expression {
    pub(crate) fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[enum_dispatch::enum_dispatch(Eval)]
pub enum Node {
    Literal(Literal),
    Die(Die),
    Rolls(Rolls),
    Mult(Mult),
    Add(Add),
    Min(Min),
    Max(Max),
    Mean(Mean),
}

impl Node {
    pub(crate) fn literal(value: UInt) -> Self {
        Self::Literal(Literal {
            value: Int::from(value),
        })
    }

    pub(crate) fn rolls(count: UInt, sides: UInt) -> Self {
        Self::Rolls(Rolls {
            die: Box::new(Self::Die(Die { sides })),
            count,
        })
    }

    pub(crate) fn mult(factor: UInt, node: Node) -> Self {
        Self::Mult(Mult {
            node: Box::new(node),
            factor,
        })
    }

    pub(crate) fn add(lhs: Node, rhs: Node) -> Self {
        Self::Add(Add {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub(crate) fn func(func: Func, params: NonEmpty<Node>) -> Self {
        match func {
            Func::Min => Self::Min(Min { params }),
            Func::Max => Self::Max(Max { params }),
            Func::Mean => Self::Mean(Mean { params }),
        }
    }
}

/// A constant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: Int,
}

/// One roll of an N-sided die.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Die {
    pub sides: UInt,
}

/// The sum of `count` independent evaluations of `die`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rolls {
    pub die: Box<Node>,
    pub count: UInt,
}

/// Repetition: the sum of `factor` independent evaluations of `node`.
/// Not scalar multiplication; dice inside `node` are re-rolled per repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mult {
    pub node: Box<Node>,
    pub factor: UInt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Add {
    pub lhs: Box<Node>,
    pub rhs: Box<Node>,
}

/// Minimum of two or more evaluated parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Min {
    pub params: NonEmpty<Node>,
}

/// Maximum of two or more evaluated parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Max {
    pub params: NonEmpty<Node>,
}

/// Arithmetic mean of two or more evaluated parameters, rounded half
/// away from zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mean {
    pub params: NonEmpty<Node>,
}

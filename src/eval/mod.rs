mod ctx;
mod error;
mod roller;

use crate::common::*;
use crate::parse::ast::{Add, Die, Expression, Literal, Max, Mean, Min, Mult, Rolls};

pub use ctx::{D10Rule, DefaultRoller, EvalContext};
pub use error::EvalError;
pub use roller::Roller;

pub(crate) type EResult<T> = Result<T, EvalError>;

/// Reduces a syntax-tree node to a single integer, post-order, drawing
/// die rolls from the context. Never mutates the tree.
#[enum_dispatch::enum_dispatch]
pub trait Eval {
    fn eval(&self, ctx: &mut EvalContext<'_>) -> Result<Int, EvalError>;
}

impl Expression {
    /// Evaluates the tree once with the thread-local generator and
    /// default rules.
    pub fn eval(&self) -> Result<Int, EvalError> {
        let mut rng = rand::thread_rng();
        let mut ctx = EvalContext::new(&mut rng);
        self.eval_with(&mut ctx)
    }

    /// Evaluates the tree once against an explicit context.
    pub fn eval_with(&self, ctx: &mut EvalContext<'_>) -> Result<Int, EvalError> {
        self.root.eval(ctx)
    }
}

impl Eval for Literal {
    fn eval(&self, _ctx: &mut EvalContext<'_>) -> Result<Int, EvalError> {
        Ok(self.value)
    }
}

impl Eval for Die {
    fn eval(&self, ctx: &mut EvalContext<'_>) -> Result<Int, EvalError> {
        ctx.roll_one(self.sides)
    }
}

impl Eval for Rolls {
    fn eval(&self, ctx: &mut EvalContext<'_>) -> Result<Int, EvalError> {
        let mut total = 0;
        for _ in 0..self.count {
            total += self.die.eval(ctx)?;
        }
        Ok(total)
    }
}

impl Eval for Mult {
    // Repetition, not scalar multiplication: the subexpression is
    // re-evaluated per repeat, so dice inside it are rolled independently.
    fn eval(&self, ctx: &mut EvalContext<'_>) -> Result<Int, EvalError> {
        let mut total = 0;
        for _ in 0..self.factor {
            total += self.node.eval(ctx)?;
        }
        Ok(total)
    }
}

impl Eval for Add {
    fn eval(&self, ctx: &mut EvalContext<'_>) -> Result<Int, EvalError> {
        Ok(self.lhs.eval(ctx)? + self.rhs.eval(ctx)?)
    }
}

impl Eval for Min {
    fn eval(&self, ctx: &mut EvalContext<'_>) -> Result<Int, EvalError> {
        let mut best = self.params.first().eval(ctx)?;
        for param in &self.params[1..] {
            best = best.min(param.eval(ctx)?);
        }
        Ok(best)
    }
}

impl Eval for Max {
    fn eval(&self, ctx: &mut EvalContext<'_>) -> Result<Int, EvalError> {
        let mut best = self.params.first().eval(ctx)?;
        for param in &self.params[1..] {
            best = best.max(param.eval(ctx)?);
        }
        Ok(best)
    }
}

impl Eval for Mean {
    // Integer mean, rounded half away from zero. Every value the grammar
    // can produce is non-negative, so this is rounding half up.
    fn eval(&self, ctx: &mut EvalContext<'_>) -> Result<Int, EvalError> {
        let mut sum = 0;
        for param in self.params.iter() {
            sum += param.eval(ctx)?;
        }
        let n = self.params.len() as Int;
        if sum >= 0 {
            Ok((2 * sum + n) / (2 * n))
        } else {
            Ok((2 * sum - n) / (2 * n))
        }
    }
}

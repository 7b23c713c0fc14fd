use super::{error::EvalError, roller::Roller, EResult};
use crate::common::*;

pub type DefaultRoller = rand::rngs::ThreadRng;

/// Which range a ten-sided die draws from.
///
/// The canonical rule treats a d10 like every other die; the zero-based
/// rule reproduces the convention of numbering its faces 0 through 9.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum D10Rule {
    #[default]
    OneToTen,
    ZeroToNine,
}

/// Evaluation state: the injected random source plus the rules in force.
///
/// A context can be reused across evaluations; the roll budget, when set,
/// spans everything evaluated through it.
pub struct EvalContext<'r> {
    roller: &'r mut dyn Roller,
    max_rolls: Option<usize>,
    rolls: usize,
    d10_rule: D10Rule,
}

impl<'r> EvalContext<'r> {
    pub fn new(roller: &'r mut dyn Roller) -> Self {
        Self {
            roller,
            max_rolls: None,
            rolls: 0,
            d10_rule: D10Rule::default(),
        }
    }

    /// Caps the number of individual die rolls this context will perform.
    pub fn with_max_rolls(mut self, max_rolls: usize) -> Self {
        self.max_rolls = Some(max_rolls);
        self
    }

    pub fn with_d10_rule(mut self, rule: D10Rule) -> Self {
        self.d10_rule = rule;
        self
    }

    pub(crate) fn roll_one(&mut self, sides: UInt) -> EResult<Int> {
        let sides = NonZeroUInt::new(sides).ok_or(EvalError::ZeroSidedDie)?;
        self.count_rolls(1)?;
        let value = self.roller.roll(sides);
        Ok(match self.d10_rule {
            D10Rule::ZeroToNine if sides.get() == 10 => Int::from(value) - 1,
            _ => Int::from(value),
        })
    }

    fn count_rolls(&mut self, n: usize) -> EResult<()> {
        self.rolls += n;
        if self.max_rolls.map_or(false, |max| self.rolls > max) {
            Err(EvalError::TooManyRolls)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::roller::StepRoller;
    use crate::parse::parse;

    fn step_roller() -> StepRoller {
        StepRoller::new(NonZeroUInt::new(10).unwrap(), 1)
    }

    #[test]
    fn test_d10_rule_default() {
        let mut roller = step_roller();
        let mut ctx = EvalContext::new(&mut roller);
        let expr = parse("d10").unwrap();
        assert_eq!(10, expr.eval_with(&mut ctx).unwrap());
    }

    #[test]
    fn test_d10_rule_zero_based() {
        let mut roller = step_roller();
        let mut ctx = EvalContext::new(&mut roller).with_d10_rule(D10Rule::ZeroToNine);
        let expr = parse("d10").unwrap();
        assert_eq!(9, expr.eval_with(&mut ctx).unwrap());
    }

    #[test]
    fn test_d10_rule_only_affects_ten_sided() {
        let mut roller = step_roller();
        let mut ctx = EvalContext::new(&mut roller).with_d10_rule(D10Rule::ZeroToNine);
        let expr = parse("d6").unwrap();
        // 10 wraps to 4 on a six-sided die, unshifted.
        assert_eq!(4, expr.eval_with(&mut ctx).unwrap());
    }

    #[test]
    fn test_zero_sided_die() {
        let mut roller = step_roller();
        let mut ctx = EvalContext::new(&mut roller);
        let expr = parse("d0").unwrap();
        assert_eq!(Err(EvalError::ZeroSidedDie), expr.eval_with(&mut ctx));
    }

    #[test]
    fn test_roll_budget() {
        let mut roller = step_roller();
        let mut ctx = EvalContext::new(&mut roller).with_max_rolls(10);
        let expr = parse("100d6").unwrap();
        assert_eq!(Err(EvalError::TooManyRolls), expr.eval_with(&mut ctx));
    }
}

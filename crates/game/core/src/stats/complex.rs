//! Formula-backed stats.

use super::StatBlock;
use crate::formula::{Formula, FormulaError};

/// Level-dependent stats, one postfix formula per attribute.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplexStats {
    pub attack: Formula,
    pub defense: Formula,
    pub speed: Formula,
    pub max_hp: Formula,
}

impl ComplexStats {
    pub fn new(attack: Formula, defense: Formula, speed: Formula, max_hp: Formula) -> Self {
        Self {
            attack,
            defense,
            speed,
            max_hp,
        }
    }

    /// Fixed formulas reproducing a simple stat block at every level.
    pub fn constant(block: StatBlock) -> Self {
        Self {
            attack: Formula::constant(block.attack.into()),
            defense: Formula::constant(block.defense.into()),
            speed: Formula::constant(block.speed.into()),
            max_hp: Formula::constant(block.max_hp.into()),
        }
    }

    /// Evaluates all four formulas at `level`.
    pub fn compute(&self, level: u32) -> Result<StatBlock, FormulaError> {
        Ok(StatBlock {
            attack: saturate(self.attack.evaluate(level)?),
            defense: saturate(self.defense.evaluate(level)?),
            speed: saturate(self.speed.evaluate(level)?),
            max_hp: saturate(self.max_hp.evaluate(level)?),
        })
    }
}

#[inline]
fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

//src/items/src/dice.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// 骰子表达式 `NdS+M`
///
/// Only describes a roll; rolling it needs a roll source from the combat crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl Dice {
    pub const fn new(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            modifier: 0,
        }
    }

    pub const fn with_modifier(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Critical hits roll twice as many dice; the flat modifier is not doubled.
    pub fn doubled(&self) -> Self {
        Self {
            count: self.count * 2,
            ..*self
        }
    }

    pub fn min(&self) -> i32 {
        self.count as i32 + self.modifier
    }

    pub fn max(&self) -> i32 {
        (self.count * self.sides) as i32 + self.modifier
    }

    /// 平均值（向下取整）
    pub fn average(&self) -> i32 {
        (self.count * (self.sides + 1) / 2) as i32 + self.modifier
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}

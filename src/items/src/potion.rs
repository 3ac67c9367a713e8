//src/items/src/potion.rs
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dice::Dice;

/// 药水种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum PotionKind {
    #[strum(serialize = "Potion of Healing")]
    Healing,
    #[strum(serialize = "Potion of Greater Healing")]
    GreaterHealing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potion {
    pub kind: PotionKind,
}

impl Potion {
    pub fn new(kind: PotionKind) -> Self {
        Self { kind }
    }

    pub fn name(&self) -> String {
        self.kind.to_string()
    }

    /// 治疗量骰子
    pub fn heal_dice(&self) -> Dice {
        match self.kind {
            PotionKind::Healing => Dice::with_modifier(2, 4, 2),
            PotionKind::GreaterHealing => Dice::with_modifier(4, 4, 4),
        }
    }

    pub fn for_level(level: u32, greater: bool) -> Self {
        if level >= 4 && greater {
            Self::new(PotionKind::GreaterHealing)
        } else {
            Self::new(PotionKind::Healing)
        }
    }
}

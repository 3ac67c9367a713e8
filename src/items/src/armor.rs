//src/items/src/armor.rs
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum ArmorKind {
    Leather,
    Chain,
    Plate,
}

/// 护甲：提供护甲等级加值与固定减伤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub kind: ArmorKind,
    pub name: String,
    pub ac_bonus: i32,
    /// Flat reduction applied to monster damage.
    pub defense: i32,
}

impl Armor {
    pub fn new(kind: ArmorKind) -> Self {
        let (name, ac_bonus, defense) = match kind {
            ArmorKind::Leather => ("Leather Armor", 1, 0),
            ArmorKind::Chain => ("Chain Mail", 3, 1),
            ArmorKind::Plate => ("Plate Armor", 5, 2),
        };
        Self {
            kind,
            name: name.to_string(),
            ac_bonus,
            defense,
        }
    }

    pub fn available_at(level: u32) -> Vec<ArmorKind> {
        let mut kinds = vec![ArmorKind::Leather];
        if level >= 3 {
            kinds.push(ArmorKind::Chain);
        }
        if level >= 6 {
            kinds.push(ArmorKind::Plate);
        }
        kinds
    }
}

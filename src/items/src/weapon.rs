//src/items/src/weapon.rs
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dice::Dice;

/// 武器种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum WeaponKind {
    Dagger,
    Shortsword,
    Longsword,
    Greatsword,
}

/// 武器数据结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub name: String,
    pub damage: Dice,
    pub to_hit_bonus: i32,
    /// Finesse weapons may use DEX instead of STR.
    pub finesse: bool,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        let (name, damage, finesse) = match kind {
            WeaponKind::Dagger => ("Dagger", Dice::new(1, 4), true),
            WeaponKind::Shortsword => ("Shortsword", Dice::new(1, 6), true),
            WeaponKind::Longsword => ("Longsword", Dice::new(1, 8), false),
            WeaponKind::Greatsword => ("Greatsword", Dice::new(2, 6), false),
        };
        Self {
            kind,
            name: name.to_string(),
            damage,
            to_hit_bonus: 0,
            finesse,
        }
    }

    /// 带强化等级的武器（+1 命中）
    pub fn enchanted(kind: WeaponKind, bonus: i32) -> Self {
        let mut weapon = Self::new(kind);
        weapon.to_hit_bonus = bonus;
        if bonus > 0 {
            weapon.name = format!("{} +{}", weapon.name, bonus);
        }
        weapon
    }

    /// Weapons that first show up at a given dungeon depth.
    pub fn available_at(level: u32) -> Vec<WeaponKind> {
        let mut kinds = vec![WeaponKind::Dagger, WeaponKind::Shortsword];
        if level >= 3 {
            kinds.push(WeaponKind::Longsword);
        }
        if level >= 5 {
            kinds.push(WeaponKind::Greatsword);
        }
        kinds
    }
}

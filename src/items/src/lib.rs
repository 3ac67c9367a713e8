//src/items/src/lib.rs
//! 物品系统：药水、武器、护甲、宝箱与工具

use serde::{Deserialize, Serialize};

pub mod armor;
pub mod chest;
pub mod dice;
pub mod potion;
pub mod tools;
pub mod weapon;

pub use crate::armor::{Armor, ArmorKind};
pub use crate::chest::Chest;
pub use crate::dice::Dice;
pub use crate::potion::{Potion, PotionKind};
pub use crate::tools::{ToolKind, Tools};
pub use crate::weapon::{Weapon, WeaponKind};

/// 基础物品结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub name: String,
}

/// 物品类型枚举
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Potion(Potion),
    Weapon(Weapon),
    Armor(Armor),
    Chest(Chest),
    Tools(Tools),
}

/// 物品分类（用于背包排序与界面分组）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Potion,
    Tools,
    Container,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        let name = match &kind {
            ItemKind::Potion(p) => p.name(),
            ItemKind::Weapon(w) => w.name.clone(),
            ItemKind::Armor(a) => a.name.clone(),
            ItemKind::Chest(_) => "Chest".to_string(),
            ItemKind::Tools(t) => t.name(),
        };
        Self { kind, name }
    }

    pub fn potion(kind: PotionKind) -> Self {
        Self::new(ItemKind::Potion(Potion::new(kind)))
    }

    pub fn weapon(weapon: Weapon) -> Self {
        Self::new(ItemKind::Weapon(weapon))
    }

    pub fn armor(kind: ArmorKind) -> Self {
        Self::new(ItemKind::Armor(Armor::new(kind)))
    }

    pub fn tools(kind: ToolKind) -> Self {
        Self::new(ItemKind::Tools(Tools::new(kind)))
    }

    pub fn chest(contents: Vec<Item>) -> Self {
        Self::new(ItemKind::Chest(Chest::new(contents)))
    }

    pub fn category(&self) -> ItemCategory {
        match &self.kind {
            ItemKind::Weapon(_) => ItemCategory::Weapon,
            ItemKind::Armor(_) => ItemCategory::Armor,
            ItemKind::Potion(_) => ItemCategory::Potion,
            ItemKind::Tools(_) => ItemCategory::Tools,
            ItemKind::Chest(_) => ItemCategory::Container,
        }
    }

    /// 是否为消耗品
    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Potion(_))
    }

    pub fn is_equippable(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_) | ItemKind::Armor(_))
    }

    /// Display glyph used by the presentation layer.
    pub fn glyph(&self) -> char {
        match &self.kind {
            ItemKind::Potion(_) => '!',
            ItemKind::Weapon(_) => ')',
            ItemKind::Armor(_) => '[',
            ItemKind::Chest(_) => '=',
            ItemKind::Tools(_) => '(',
        }
    }

    pub fn as_chest_mut(&mut self) -> Option<&mut Chest> {
        match &mut self.kind {
            ItemKind::Chest(chest) => Some(chest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_names_follow_kind() {
        assert_eq!(Item::potion(PotionKind::Healing).name, "Potion of Healing");
        assert_eq!(Item::tools(ToolKind::ThievesTools).name, "Thieves' Tools");
        assert_eq!(Item::armor(ArmorKind::Chain).name, "Chain Mail");
    }

    #[test]
    fn test_categories() {
        let sword = Item::weapon(Weapon::new(WeaponKind::Longsword));
        assert_eq!(sword.category(), ItemCategory::Weapon);
        assert!(sword.is_equippable());
        assert!(Item::potion(PotionKind::Healing).is_consumable());
        assert!(Item::chest(vec![]).as_chest_mut().is_some());
    }
}

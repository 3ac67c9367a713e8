// src/hero/src/bag/equipment.rs
use items::{Armor, Item, ItemKind, Weapon};
use serde::{Deserialize, Serialize};

/// 装备槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// 当前装备
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Weapon>,
    pub armor: Option<Armor>,
}

impl Equipment {
    /// Puts an equippable item into its slot, handing back whatever was there.
    /// Non-equippable items are returned untouched as `Err`.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, Item> {
        match item.kind {
            ItemKind::Weapon(weapon) => Ok(self.weapon.replace(weapon).map(Item::weapon)),
            ItemKind::Armor(armor) => Ok(self
                .armor
                .replace(armor)
                .map(|old| Item::new(ItemKind::Armor(old)))),
            kind => Err(Item {
                kind,
                name: item.name,
            }),
        }
    }

    pub fn take(&mut self, slot: EquipSlot) -> Option<Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.take().map(Item::weapon),
            EquipSlot::Armor => self.armor.take().map(|a| Item::new(ItemKind::Armor(a))),
        }
    }

    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        match slot {
            EquipSlot::Weapon => self.weapon.is_none(),
            EquipSlot::Armor => self.armor.is_none(),
        }
    }

    pub fn armor_bonus(&self) -> i32 {
        self.armor.as_ref().map_or(0, |a| a.ac_bonus)
    }

    pub fn armor_defense(&self) -> i32 {
        self.armor.as_ref().map_or(0, |a| a.defense)
    }
}

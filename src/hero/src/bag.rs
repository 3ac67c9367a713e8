// src/hero/src/bag.rs
use error::ActionError;
use items::{Item, ItemKind, ToolKind};
use thiserror::Error;

pub mod equipment;

use equipment::{EquipSlot, Equipment};

/// 背包特定的错误类型
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BagError {
    #[error("背包已满")]
    Full,
    #[error("无效索引: {0}")]
    InvalidIndex(usize),
    #[error("该物品无法装备")]
    NotEquippable,
    #[error("该槽位没有装备")]
    SlotEmpty,
}

impl From<BagError> for ActionError {
    fn from(err: BagError) -> Self {
        match err {
            BagError::Full => ActionError::InventoryFull,
            BagError::InvalidIndex(i) => ActionError::InvalidSlot(i),
            BagError::NotEquippable => ActionError::WrongMode,
            BagError::SlotEmpty => ActionError::NothingHere,
        }
    }
}

/// 有容量上限的背包，外加装备槽
///
/// Equipped items do not count against the capacity.
#[derive(Debug, Clone)]
pub struct Bag {
    items: Vec<Item>,
    capacity: usize,
    pub equipment: Equipment,
}

impl Bag {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            equipment: Equipment::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Stores an item. A full bag hands the item back untouched.
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Item, BagError> {
        if index >= self.items.len() {
            return Err(BagError::InvalidIndex(index));
        }
        Ok(self.items.remove(index))
    }

    pub fn has_tool(&self, kind: ToolKind) -> bool {
        self.items
            .iter()
            .any(|item| matches!(&item.kind, ItemKind::Tools(t) if t.kind == kind))
    }

    /// 装备背包中的物品；原装备放回同一位置
    pub fn equip(&mut self, index: usize) -> Result<Option<String>, BagError> {
        let item = self.items.get(index).ok_or(BagError::InvalidIndex(index))?;
        if !item.is_equippable() {
            return Err(BagError::NotEquippable);
        }
        let item = self.items.remove(index);
        match self.equipment.equip(item) {
            Ok(Some(previous)) => {
                let name = previous.name.clone();
                self.items.insert(index, previous);
                Ok(Some(name))
            }
            Ok(None) => Ok(None),
            Err(item) => {
                self.items.insert(index, item);
                Err(BagError::NotEquippable)
            }
        }
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Result<String, BagError> {
        if self.equipment.is_empty(slot) {
            return Err(BagError::SlotEmpty);
        }
        if self.is_full() {
            return Err(BagError::Full);
        }
        let item = self.equipment.take(slot).ok_or(BagError::SlotEmpty)?;
        let name = item.name.clone();
        self.items.push(item);
        Ok(name)
    }
}

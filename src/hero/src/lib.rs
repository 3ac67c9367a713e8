// src/hero/src/lib.rs
//! 英雄：属性成长、背包、技能与输入状态

pub mod abilities;
pub mod bag;
pub mod core;
pub mod input;

pub use self::{
    abilities::{Ability, AbilityCost, AbilityKind, FAMILIAR_DURATION, Targeting, default_abilities},
    bag::{
        Bag, BagError,
        equipment::{EquipSlot, Equipment},
    },
    core::{Check, Hero, LevelUp},
    input::{CunningChoice, PlayerInput},
};

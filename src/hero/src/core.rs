// src/hero/src/core.rs
use combat::stats::proficiency_bonus;
use combat::{
    Ability as Stat, AbilityScores, Combatant, EffectEvent, RollSource, StatusEffect, StatusEffects,
    Strike,
};
use items::{ArmorKind, Dice, Item, PotionKind, ToolKind, Weapon, WeaponKind};
use tracing::{debug, warn};

use crate::abilities::{Ability, default_abilities};
use crate::bag::Bag;
use crate::input::PlayerInput;

/// XP needed for the first level-up.
pub const BASE_XP_THRESHOLD: u32 = 100;
/// Levels that grant +1 STR and +1 DEX.
pub const ABILITY_INCREASE_LEVELS: [u32; 5] = [4, 8, 12, 16, 19];
/// Average roll of the d8 hit die.
pub const HIT_DIE_AVERAGE: i32 = 5;
const HIT_DIE_MAX: i32 = 8;
const UNARMED: Dice = Dice::new(1, 2);

/// 一次升级的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub hp_gain: i32,
    pub ability_increase: bool,
}

/// A skill check or saving throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub natural: i32,
    pub total: i32,
    pub dc: i32,
}

impl Check {
    pub fn succeeded(&self) -> bool {
        self.total >= self.dc
    }
}

/// 英雄核心数据结构
#[derive(Debug, Clone)]
pub struct Hero {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub max_hp: i32,

    // 成长系统
    pub level: u32,
    pub experience: u32,
    pub xp_to_next: u32,
    pub scores: AbilityScores,

    pub initiative: i32,
    pub bag: Bag,
    pub effects: StatusEffects,
    pub abilities: Vec<Ability>,
    pub input: PlayerInput,
}

impl Hero {
    pub fn new(name: impl Into<String>, bag_capacity: usize) -> Self {
        let scores = AbilityScores::new(12, 16, 14, 12, 12, 10);
        let max_hp = HIT_DIE_MAX + scores.modifier(Stat::Constitution);
        Self {
            name: name.into(),
            x: 0,
            y: 0,
            hp: max_hp,
            max_hp,
            level: 1,
            experience: 0,
            xp_to_next: BASE_XP_THRESHOLD,
            scores,
            initiative: 0,
            bag: Bag::new(bag_capacity),
            effects: StatusEffects::new(),
            abilities: default_abilities(),
            input: PlayerInput::Idle,
        }
    }

    /// Starting kit: shortsword and leather worn, tools and a potion packed.
    pub fn adventurer(bag_capacity: usize) -> Self {
        let mut hero = Self::new("Adventurer", bag_capacity);
        hero.bag.equipment.weapon = Some(Weapon::new(WeaponKind::Shortsword));
        hero.bag.equipment.armor = Some(items::Armor::new(ArmorKind::Leather));
        for item in [Item::tools(ToolKind::ThievesTools), Item::potion(PotionKind::Healing)] {
            if let Err(err) = hero.bag.add(item) {
                warn!(?err, bag_capacity, "starting kit does not fit in the bag");
            }
        }
        hero
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn modifier(&self, stat: Stat) -> i32 {
        self.scores.modifier(stat)
    }

    pub fn proficiency(&self) -> i32 {
        proficiency_bonus(self.level)
    }

    /// Finesse weapons use the better of STR and DEX.
    fn weapon_modifier(&self) -> i32 {
        let str_mod = self.modifier(Stat::Strength);
        match &self.bag.equipment.weapon {
            Some(weapon) if weapon.finesse => str_mod.max(self.modifier(Stat::Dexterity)),
            _ => str_mod,
        }
    }

    pub fn weapon_dice(&self) -> Dice {
        self.bag.equipment.weapon.as_ref().map_or(UNARMED, |w| w.damage)
    }

    /// Everything the player brings to a weapon attack, buffs included.
    pub fn strike(&self) -> Strike {
        Strike {
            attack_bonus: self.attack_bonus(),
            dice: self.weapon_dice(),
            damage_bonus: self.attack_power() + self.effects.damage_modifier(),
        }
    }

    /// d20 + DEX modifier, kept for the scheduler.
    pub fn roll_initiative(&mut self, rng: &mut dyn RollSource) -> i32 {
        self.initiative = rng.d20() + self.modifier(Stat::Dexterity);
        self.initiative
    }

    /// d20 + ability modifier (+ proficiency when trained) against `dc`.
    pub fn check(&self, rng: &mut dyn RollSource, stat: Stat, proficient: bool, dc: i32) -> Check {
        let natural = rng.d20();
        let bonus = self.modifier(stat) + if proficient { self.proficiency() } else { 0 };
        Check {
            natural,
            total: natural + bonus,
            dc,
        }
    }

    /// 增加经验值，可能连续升级
    ///
    /// XP left over after each level-up carries into the next threshold, so
    /// nothing is lost across multi-level gains.
    pub fn gain_xp(&mut self, amount: u32) -> Vec<LevelUp> {
        self.experience += amount;
        let mut gained = Vec::new();
        while self.experience >= self.xp_to_next {
            self.experience -= self.xp_to_next;
            self.xp_to_next = self.xp_to_next * 3 / 2;
            gained.push(self.level_up());
        }
        gained
    }

    fn level_up(&mut self) -> LevelUp {
        self.level += 1;
        let ability_increase = ABILITY_INCREASE_LEVELS.contains(&self.level);
        if ability_increase {
            self.scores.increase(Stat::Strength, 1);
            self.scores.increase(Stat::Dexterity, 1);
        }
        let hp_gain = (HIT_DIE_AVERAGE + self.modifier(Stat::Constitution)).max(1);
        self.max_hp += hp_gain;
        self.hp += hp_gain;
        debug!(level = self.level, hp_gain, max_hp = self.max_hp, "level up");
        LevelUp {
            level: self.level,
            hp_gain,
            ability_increase,
        }
    }

    pub fn apply_effect(&mut self, effect: StatusEffect) -> EffectEvent {
        self.effects.apply(effect)
    }

    /// End-of-turn status tick on the hero itself.
    pub fn tick_effects(&mut self) -> Vec<EffectEvent> {
        let mut effects = std::mem::take(&mut self.effects);
        let events = effects.tick(self);
        self.effects = effects;
        events
    }

    /// Start-of-turn cooldown countdown, used or not.
    pub fn tick_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.tick();
        }
    }

    pub fn full_heal(&mut self) -> i32 {
        let missing = self.max_hp - self.hp;
        self.heal(missing)
    }
}

impl Combatant for Hero {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> i32 {
        self.hp
    }

    fn max_hp(&self) -> i32 {
        self.max_hp
    }

    fn armor_class(&self) -> i32 {
        10 + self.modifier(Stat::Dexterity) + self.bag.equipment.armor_bonus() + self.effects.ac_modifier()
    }

    fn attack_bonus(&self) -> i32 {
        let weapon_bonus = self.bag.equipment.weapon.as_ref().map_or(0, |w| w.to_hit_bonus);
        self.proficiency() + self.weapon_modifier() + weapon_bonus + self.effects.to_hit_modifier()
    }

    fn attack_power(&self) -> i32 {
        self.modifier(Stat::Strength)
    }

    fn defense(&self) -> i32 {
        self.bag.equipment.armor_defense()
    }

    fn take_damage(&mut self, amount: i32) -> i32 {
        let lost = amount.max(0).min(self.hp);
        self.hp -= lost;
        lost
    }

    fn heal(&mut self, amount: i32) -> i32 {
        let gained = amount.max(0).min(self.max_hp - self.hp).max(0);
        self.hp += gained;
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat::{EffectKind, ScriptedRng};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_small_bag_keeps_what_fits_of_the_kit() {
        let hero = Hero::adventurer(1);
        assert_eq!(hero.bag.len(), 1);
        assert!(hero.bag.has_tool(ToolKind::ThievesTools));
        assert!(hero.bag.equipment.weapon.is_some());
    }

    #[test]
    fn test_starting_stats() {
        let hero = Hero::adventurer(10);
        assert_eq!(hero.max_hp, 10);
        // 10 + DEX 3 + leather 1
        assert_eq!(hero.armor_class(), 14);
        // proficiency 2 + finesse DEX 3
        assert_eq!(hero.attack_bonus(), 5);
        assert_eq!(hero.attack_power(), 1);
        assert_eq!(hero.bag.len(), 2);
    }

    #[test]
    fn test_multi_level_gain_keeps_remainder() {
        let mut hero = Hero::new("Test", 10);
        // 100 for level 2, 150 for level 3, 25 left over
        let ups = hero.gain_xp(275);
        assert_eq!(ups.len(), 2);
        assert_eq!(hero.level, 3);
        assert_eq!(hero.experience, 25);
        assert_eq!(hero.xp_to_next, 225);
        assert!(hero.experience < hero.xp_to_next);
        assert_eq!(hero.max_hp, 10 + 2 * 7);
    }

    #[test]
    fn test_exact_threshold_levels_once() {
        let mut hero = Hero::new("Test", 10);
        assert_eq!(hero.gain_xp(100).len(), 1);
        assert_eq!(hero.experience, 0);
        assert!(hero.gain_xp(149).is_empty());
        assert_eq!(hero.gain_xp(1).len(), 1);
    }

    #[test]
    fn test_ability_increase_at_checkpoint() {
        let mut hero = Hero::new("Test", 10);
        hero.level = 3;
        let up = hero.gain_xp(hero.xp_to_next);
        assert_eq!(up[0].level, 4);
        assert!(up[0].ability_increase);
        assert_eq!(hero.scores.strength, 13);
        assert_eq!(hero.scores.dexterity, 17);
    }

    #[test]
    fn test_evasion_raises_ac() {
        let mut hero = Hero::new("Test", 10);
        let base = hero.armor_class();
        hero.apply_effect(StatusEffect::new(EffectKind::EvasionBuff, 3));
        assert_eq!(hero.armor_class(), base + 4);
    }

    #[test]
    fn test_poison_ticks_on_hero() {
        let mut hero = Hero::new("Test", 10);
        hero.apply_effect(StatusEffect::new(EffectKind::Poisoned, 3));
        for _ in 0..3 {
            hero.tick_effects();
        }
        assert_eq!(hero.hp, 10 - 6);
        assert!(hero.effects.is_empty());
    }

    #[test]
    fn test_check_adds_proficiency() {
        let hero = Hero::new("Test", 10);
        let mut rng = ScriptedRng::new([10]);
        // INT 12 -> +1, proficiency +2
        let check = hero.check(&mut rng, Stat::Intelligence, true, 12);
        assert_eq!(check.total, 13);
        assert!(check.succeeded());
    }
}

// src/combat/src/lib.rs
//! D20 combat resolution, status effects and the combatants that use them.

use items::Dice;
use tracing::debug;

pub mod combatant;
pub mod effect;
pub mod monster;
pub mod rng;
pub mod stats;
pub mod status_effect;
pub mod summon;

pub use crate::combatant::Combatant;
pub use crate::effect::{EffectKind, StatusEffect};
pub use crate::monster::{Monster, MonsterIntent, MonsterKind};
pub use crate::rng::{DungeonRng, RollSource, ScriptedRng};
pub use crate::stats::{Ability, AbilityScores};
pub use crate::status_effect::{EffectEvent, StatusEffects};
pub use crate::summon::{Summon, SummonKind};

/// Combat configuration constants
pub mod constants {
    /// Natural roll that always hits and doubles weapon dice.
    pub const CRITICAL_ROLL: i32 = 20;
    /// Natural roll that always misses.
    pub const FUMBLE_ROLL: i32 = 1;
    /// Minimum damage dealt by any hit.
    pub const MIN_DAMAGE: i32 = 1;
    /// Die used by the flat monster damage formula.
    pub const BRAWL_DIE: i32 = 4;
}

/// Chebyshev (8-directional) distance between two tiles.
pub fn chebyshev(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs().max((a.1 - b.1).abs())
}

/// Result class of a single attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Critical,
    Hit,
    Miss,
    Fumble,
}

impl HitOutcome {
    pub fn is_hit(self) -> bool {
        matches!(self, HitOutcome::Critical | HitOutcome::Hit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    pub natural: i32,
    pub total: i32,
    pub target_ac: i32,
    pub outcome: HitOutcome,
}

/// What a weapon-wielding attacker brings to a swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    /// Attack bonus including any to-hit buffs.
    pub attack_bonus: i32,
    pub dice: Dice,
    /// Flat damage modifier including any damage buffs.
    pub damage_bonus: i32,
}

/// Combat result with detailed logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: String,
    pub defender: String,
    pub roll: AttackRoll,
    /// Damage actually dealt (0 on a miss).
    pub damage: i32,
    pub defeated: bool,
    /// Experience the attacker earns for the kill.
    pub experience: u32,
}

impl AttackReport {
    pub fn is_hit(&self) -> bool {
        self.roll.outcome.is_hit()
    }

    pub fn is_critical(&self) -> bool {
        self.roll.outcome == HitOutcome::Critical
    }

    /// Combat messages for the message sink.
    pub fn logs(&self) -> Vec<String> {
        let mut logs = Vec::new();
        match self.roll.outcome {
            HitOutcome::Critical => logs.push(format!(
                "Critical hit! {} deals {} damage to {}!",
                self.attacker, self.damage, self.defender
            )),
            HitOutcome::Hit => logs.push(format!(
                "{} hits {} for {} damage ({} vs AC {}).",
                self.attacker, self.defender, self.damage, self.roll.total, self.roll.target_ac
            )),
            HitOutcome::Miss => logs.push(format!(
                "{} misses {} ({} vs AC {}).",
                self.attacker, self.defender, self.roll.total, self.roll.target_ac
            )),
            HitOutcome::Fumble => logs.push(format!("{} fumbles the attack!", self.attacker)),
        }
        if self.defeated {
            logs.push(format!("{} defeated {}!", self.attacker, self.defender));
        }
        logs
    }
}

/// Handles combat interactions between entities
pub struct Combat;

impl Combat {
    /// Classifies a roll: natural 20 always hits, natural 1 always misses,
    /// otherwise hit iff the total meets the armor class.
    pub fn classify(natural: i32, attack_bonus: i32, target_ac: i32) -> AttackRoll {
        let total = natural + attack_bonus;
        let outcome = if natural >= constants::CRITICAL_ROLL {
            HitOutcome::Critical
        } else if natural <= constants::FUMBLE_ROLL {
            HitOutcome::Fumble
        } else if total >= target_ac {
            HitOutcome::Hit
        } else {
            HitOutcome::Miss
        };
        AttackRoll {
            natural,
            total,
            target_ac,
            outcome,
        }
    }

    pub fn roll_to_hit(rng: &mut dyn RollSource, attack_bonus: i32, target_ac: i32) -> AttackRoll {
        let natural = rng.d20();
        let roll = Self::classify(natural, attack_bonus, target_ac);
        debug!(natural, total = roll.total, target_ac, outcome = ?roll.outcome, "attack roll");
        roll
    }

    /// Weapon dice (doubled on a critical) plus the flat bonus, at least 1.
    pub fn weapon_damage(rng: &mut dyn RollSource, dice: Dice, bonus: i32, critical: bool) -> i32 {
        let dice = if critical { dice.doubled() } else { dice };
        (rng.roll(dice) + bonus).max(constants::MIN_DAMAGE)
    }

    /// `1d4 + attack power - defense`, at least 1.
    pub fn flat_damage(rng: &mut dyn RollSource, attack_power: i32, defense: i32) -> i32 {
        (rng.range(1, constants::BRAWL_DIE) + attack_power - defense).max(constants::MIN_DAMAGE)
    }

    /// A weapon attack: d20 to hit, weapon dice for damage.
    pub fn strike<T>(
        rng: &mut dyn RollSource,
        attacker: &str,
        strike: Strike,
        defender: &mut T,
    ) -> AttackReport
    where
        T: Combatant + ?Sized,
    {
        let roll = Self::roll_to_hit(rng, strike.attack_bonus, defender.armor_class());
        let damage = if roll.outcome.is_hit() {
            let amount = Self::weapon_damage(
                rng,
                strike.dice,
                strike.damage_bonus,
                roll.outcome == HitOutcome::Critical,
            );
            defender.take_damage(amount);
            amount
        } else {
            0
        };
        Self::report(attacker, defender, roll, damage)
    }

    /// A monster-style attack: d20 to hit, flat damage reduced by defense.
    pub fn brawl<A, T>(rng: &mut dyn RollSource, attacker: &A, defender: &mut T) -> AttackReport
    where
        A: Combatant + ?Sized,
        T: Combatant + ?Sized,
    {
        let roll = Self::roll_to_hit(rng, attacker.attack_bonus(), defender.armor_class());
        let damage = if roll.outcome.is_hit() {
            let amount = Self::flat_damage(rng, attacker.attack_power(), defender.defense());
            defender.take_damage(amount);
            amount
        } else {
            0
        };
        Self::report(attacker.name(), defender, roll, damage)
    }

    fn report<T: Combatant + ?Sized>(
        attacker: &str,
        defender: &T,
        roll: AttackRoll,
        damage: i32,
    ) -> AttackReport {
        let defeated = damage > 0 && !defender.is_alive();
        AttackReport {
            attacker: attacker.to_string(),
            defender: defender.name().to_string(),
            roll,
            damage,
            defeated,
            experience: if defeated { defender.xp_reward() } else { 0 },
        }
    }
}

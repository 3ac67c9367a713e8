//! Status effect management for combatants
use serde::{Deserialize, Serialize};

use crate::Combatant;
use crate::effect::{EffectKind, StatusEffect};

/// Lifecycle notifications produced while managing effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectEvent {
    Applied(EffectKind),
    /// Re-applied while active; the duration was reset, not extended.
    Refreshed(EffectKind),
    Damaged { kind: EffectKind, amount: i32 },
    Expired(EffectKind),
}

/// Manages active status effects for a single combatant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an effect, or resets the duration of an active one of the same kind.
    pub fn apply(&mut self, effect: StatusEffect) -> EffectEvent {
        match self.effects.iter_mut().find(|e| **e == effect) {
            Some(existing) => {
                *existing = effect;
                EffectEvent::Refreshed(effect.kind())
            }
            None => {
                self.effects.push(effect);
                EffectEvent::Applied(effect.kind())
            }
        }
    }

    /// Removes an effect by kind, firing its removal.
    pub fn remove(&mut self, kind: EffectKind) -> Option<EffectEvent> {
        let idx = self.effects.iter().position(|e| e.kind() == kind)?;
        self.effects.remove(idx);
        Some(EffectEvent::Expired(kind))
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn to_hit_modifier(&self) -> i32 {
        self.effects.iter().map(StatusEffect::to_hit_modifier).sum()
    }

    pub fn damage_modifier(&self) -> i32 {
        self.effects.iter().map(StatusEffect::damage_modifier).sum()
    }

    pub fn ac_modifier(&self) -> i32 {
        self.effects.iter().map(StatusEffect::ac_modifier).sum()
    }

    /// Runs one end-of-turn tick: per-turn damage first, then every duration
    /// counts down and expired effects are dropped.
    pub fn tick(&mut self, target: &mut dyn Combatant) -> Vec<EffectEvent> {
        let mut events = Vec::new();

        for effect in &self.effects {
            let damage = effect.tick_damage();
            if damage > 0 && target.is_alive() {
                let amount = target.take_damage(damage);
                events.push(EffectEvent::Damaged {
                    kind: effect.kind(),
                    amount,
                });
            }
        }

        self.effects.retain_mut(|effect| {
            let active = effect.decrement();
            if !active {
                events.push(EffectEvent::Expired(effect.kind()));
            }
            active
        });

        events
    }
}

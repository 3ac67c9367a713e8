//src/combat/src/effect.rs
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// 状态效果种类
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum EffectKind {
    #[strum(serialize = "Power Attack")]
    PowerAttackBuff,
    #[strum(serialize = "Evasion")]
    EvasionBuff,
    #[strum(serialize = "Dash")]
    CunningActionDashBuff,
    #[strum(serialize = "Disengaged")]
    Disengaged,
    #[strum(serialize = "Poisoned")]
    Poisoned,
    #[strum(serialize = "Burning")]
    Burning,
}

impl EffectKind {
    /// 每回合伤害的默认强度
    pub fn default_potency(self) -> i32 {
        match self {
            EffectKind::Poisoned => 2,
            EffectKind::Burning => 3,
            _ => 0,
        }
    }

    pub fn is_harmful(self) -> bool {
        matches!(self, EffectKind::Poisoned | EffectKind::Burning)
    }
}

/// 效果实例
///
/// Two effects are equal when they are of the same kind; the remaining duration
/// and potency do not take part in equality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusEffect {
    kind: EffectKind,
    remaining: u32,
    potency: i32,
}

impl PartialEq for StatusEffect {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for StatusEffect {}

impl StatusEffect {
    pub fn new(kind: EffectKind, duration: u32) -> Self {
        Self {
            kind,
            remaining: duration,
            potency: kind.default_potency(),
        }
    }

    pub fn with_potency(kind: EffectKind, duration: u32, potency: i32) -> Self {
        Self {
            kind,
            remaining: duration,
            potency,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn potency(&self) -> i32 {
        self.potency
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Counts one turn down. Returns whether the effect is still active.
    pub fn decrement(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        !self.is_expired()
    }

    pub fn to_hit_modifier(&self) -> i32 {
        match self.kind {
            EffectKind::PowerAttackBuff => -3,
            _ => 0,
        }
    }

    pub fn damage_modifier(&self) -> i32 {
        match self.kind {
            EffectKind::PowerAttackBuff => 6,
            _ => 0,
        }
    }

    pub fn ac_modifier(&self) -> i32 {
        match self.kind {
            EffectKind::EvasionBuff => 4,
            _ => 0,
        }
    }

    /// Damage dealt at each tick, before the duration counts down.
    pub fn tick_damage(&self) -> i32 {
        if self.kind.is_harmful() {
            self.potency.max(0)
        } else {
            0
        }
    }

    pub fn applied_message(&self, who: &str) -> String {
        match self.kind {
            EffectKind::PowerAttackBuff => format!("{} winds up for heavy blows.", who),
            EffectKind::EvasionBuff => format!("{} moves with uncanny grace.", who),
            EffectKind::CunningActionDashBuff => format!("{} dashes ahead.", who),
            EffectKind::Disengaged => format!("{} slips out of reach.", who),
            EffectKind::Poisoned => format!("{} is poisoned!", who),
            EffectKind::Burning => format!("{} catches fire!", who),
        }
    }
}

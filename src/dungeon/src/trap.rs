// src/dungeon/src/trap.rs
use combat::{Ability, EffectKind};
use items::Dice;
use std::fmt;

/// 陷阱类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapKind {
    /// 尖刺陷阱 - 只造成伤害
    Spike,
    /// 毒镖陷阱 - 体质豁免失败则中毒
    PoisonDart,
    /// 火焰陷阱 - 敏捷豁免失败则燃烧
    Fire,
}

/// hidden → revealed → (triggered | disarmed). A hidden trap can also be
/// triggered directly by stepping on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapState {
    Hidden,
    Revealed,
    Triggered,
    Disarmed,
}

/// Secondary effect a trap imposes unless the victim makes a saving throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveRider {
    pub effect: EffectKind,
    pub duration: u32,
    pub save: Ability,
    pub dc: i32,
}

/// 表示地牢中的一个陷阱
///
/// Traps are plain values embedded in a map tile; every state change produces
/// a new trap that replaces the old tile wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trap {
    pub kind: TrapKind,
    pub state: TrapState,
    pub detection_dc: i32,
    pub disarm_dc: i32,
    pub damage: Dice,
    pub rider: Option<SaveRider>,
}

impl Trap {
    /// DCs grow by one every three dungeon levels.
    pub fn new(kind: TrapKind, level: u32) -> Self {
        let scale = (level / 3) as i32;
        let (detection_dc, disarm_dc, damage, rider) = match kind {
            TrapKind::Spike => (12, 12, Dice::new(1, 6), None),
            TrapKind::PoisonDart => (
                13,
                13,
                Dice::new(1, 4),
                Some(SaveRider {
                    effect: EffectKind::Poisoned,
                    duration: 3,
                    save: Ability::Constitution,
                    dc: 12 + scale,
                }),
            ),
            TrapKind::Fire => (
                14,
                14,
                Dice::new(2, 4),
                Some(SaveRider {
                    effect: EffectKind::Burning,
                    duration: 2,
                    save: Ability::Dexterity,
                    dc: 13 + scale,
                }),
            ),
        };
        Self {
            kind,
            state: TrapState::Hidden,
            detection_dc: detection_dc + scale,
            disarm_dc: disarm_dc + scale,
            damage: Dice::with_modifier(damage.count, damage.sides, scale),
            rider,
        }
    }

    /// Kinds that may appear on a given level.
    pub fn kinds_for_level(level: u32) -> &'static [TrapKind] {
        match level {
            0..=1 => &[TrapKind::Spike],
            2..=3 => &[TrapKind::Spike, TrapKind::PoisonDart],
            _ => &[TrapKind::Spike, TrapKind::PoisonDart, TrapKind::Fire],
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.state == TrapState::Hidden
    }

    pub fn is_revealed(&self) -> bool {
        self.state == TrapState::Revealed
    }

    /// Still able to go off.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TrapState::Hidden | TrapState::Revealed)
    }

    /// Triggered and disarmed are terminal.
    pub fn is_spent(&self) -> bool {
        !self.is_armed()
    }

    /// 尝试发现陷阱：检定总值不低于发现难度则返回已揭示的陷阱
    pub fn detect(&self, check_total: i32) -> Option<Trap> {
        (self.is_hidden() && check_total >= self.detection_dc).then(|| self.with_state(TrapState::Revealed))
    }

    pub fn disarm_succeeds(&self, check_total: i32) -> bool {
        check_total >= self.disarm_dc
    }

    pub fn revealed(&self) -> Trap {
        self.with_state(TrapState::Revealed)
    }

    pub fn triggered(&self) -> Trap {
        self.with_state(TrapState::Triggered)
    }

    pub fn disarmed(&self) -> Trap {
        self.with_state(TrapState::Disarmed)
    }

    fn with_state(&self, state: TrapState) -> Trap {
        Trap { state, ..*self }
    }
}

impl fmt::Display for TrapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrapKind::Spike => write!(f, "spike trap"),
            TrapKind::PoisonDart => write!(f, "poison dart trap"),
            TrapKind::Fire => write!(f, "fire trap"),
        }
    }
}

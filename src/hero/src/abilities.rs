use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// 职业技能
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum AbilityKind {
    #[strum(serialize = "Power Attack")]
    PowerAttack,
    Evasion,
    #[strum(serialize = "Cunning Action")]
    CunningAction,
    Search,
    #[strum(serialize = "Shadow Step")]
    ShadowStep,
    #[strum(serialize = "Summon Familiar")]
    SummonFamiliar,
}

/// Whether using an ability ends the player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityCost {
    Action,
    /// Does not end the turn.
    BonusAction,
}

/// How an ability picks what it acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Targeting {
    /// Resolves immediately.
    Instant,
    /// Waits for a tile within `range` (Chebyshev distance).
    Tile { range: u32 },
    /// Waits for a Dash/Disengage choice.
    Choice,
}

/// Turns a Summon Familiar cast lasts.
pub const FAMILIAR_DURATION: u32 = 10;

/// Active skill definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub name: String,
    pub cost: AbilityCost,
    pub cooldown: u32,
    pub current_cooldown: u32,
}

impl Ability {
    pub fn new(kind: AbilityKind) -> Self {
        let (cost, cooldown) = match kind {
            AbilityKind::PowerAttack => (AbilityCost::BonusAction, 5),
            AbilityKind::Evasion => (AbilityCost::BonusAction, 6),
            AbilityKind::CunningAction => (AbilityCost::BonusAction, 3),
            AbilityKind::Search => (AbilityCost::Action, 0),
            AbilityKind::ShadowStep => (AbilityCost::Action, 8),
            AbilityKind::SummonFamiliar => (AbilityCost::Action, 20),
        };
        Self {
            kind,
            name: kind.to_string(),
            cost,
            cooldown,
            current_cooldown: 0,
        }
    }

    pub fn targeting(&self) -> Targeting {
        match self.kind {
            AbilityKind::ShadowStep => Targeting::Tile { range: 6 },
            AbilityKind::SummonFamiliar => Targeting::Tile { range: 3 },
            AbilityKind::CunningAction => Targeting::Choice,
            _ => Targeting::Instant,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    pub fn consumes_turn(&self) -> bool {
        self.cost == AbilityCost::Action
    }

    /// Starts the cooldown after a successful use.
    pub fn trigger(&mut self) {
        self.current_cooldown = self.cooldown;
    }

    /// 每回合冷却 -1
    pub fn tick(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

/// The player's ability bar, in slot order.
pub fn default_abilities() -> Vec<Ability> {
    [
        AbilityKind::PowerAttack,
        AbilityKind::Evasion,
        AbilityKind::CunningAction,
        AbilityKind::Search,
        AbilityKind::ShadowStep,
        AbilityKind::SummonFamiliar,
    ]
    .into_iter()
    .map(Ability::new)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_cycle() {
        let mut ability = Ability::new(AbilityKind::PowerAttack);
        assert!(ability.is_ready());
        ability.trigger();
        assert_eq!(ability.current_cooldown, 5);
        for _ in 0..5 {
            assert!(!ability.is_ready());
            ability.tick();
        }
        assert!(ability.is_ready());
        ability.tick();
        assert_eq!(ability.current_cooldown, 0);
    }

    #[test]
    fn test_costs_and_targeting() {
        assert!(Ability::new(AbilityKind::Search).consumes_turn());
        assert!(!Ability::new(AbilityKind::CunningAction).consumes_turn());
        assert_eq!(
            Ability::new(AbilityKind::ShadowStep).targeting(),
            Targeting::Tile { range: 6 }
        );
        assert_eq!(default_abilities().len(), 6);
    }
}

//! Cooldown-gated abilities and the pending-target / pending-choice flow.
use combat::{EffectKind, StatusEffect, Summon, chebyshev};
use error::ActionError;
use hero::{AbilityKind, CunningChoice, FAMILIAR_DURATION, PlayerInput, Targeting};
use tracing::debug;

use crate::entity::Actor;
use crate::messages::palette;
use crate::session::GameSession;

const BUFF_DURATION: u32 = 3;

impl GameSession {
    /// Activates the ability in `slot`. Targeted abilities and Cunning Action
    /// only open their pending state here and never consume the turn.
    pub fn use_ability(&mut self, slot: usize) -> bool {
        let result = self.try_use_ability(slot);
        self.resolve(result)
    }

    /// Confirms the pending target. Invalid targets keep targeting open.
    pub fn execute_ability_on_target(&mut self, x: i32, y: i32) -> bool {
        let result = self.try_execute_on_target(x, y);
        self.resolve(result)
    }

    /// Leaves targeting or the Cunning Action choice. Never consumes the turn.
    pub fn cancel_targeting(&mut self) -> bool {
        if self.player.input.finish().is_some() {
            self.messages.push("Cancelled.", palette::INFO);
        }
        false
    }

    pub fn choose_cunning_action(&mut self, choice: CunningChoice) -> bool {
        let result = self.try_choose_cunning_action(choice);
        self.resolve(result)
    }

    fn try_use_ability(&mut self, slot: usize) -> Result<bool, ActionError> {
        self.ensure_player_turn()?;
        if self.is_tavern() || !self.player.input.is_idle() {
            return Err(ActionError::WrongMode);
        }
        let ability = self.player.abilities.get(slot).ok_or(ActionError::InvalidSlot(slot))?;
        if !ability.is_ready() {
            return Err(ActionError::OnCooldown {
                name: ability.name.clone(),
                turns: ability.current_cooldown,
            });
        }
        let (kind, name, consumes_turn) = (ability.kind, ability.name.clone(), ability.consumes_turn());

        match ability.targeting() {
            Targeting::Tile { range } => {
                self.player.input = PlayerInput::AwaitingTarget { slot };
                self.messages
                    .push(format!("{name}: choose a target (range {range})."), palette::INFO);
                return Ok(false);
            }
            Targeting::Choice => {
                self.player.input = PlayerInput::ChoosingCunningAction { slot };
                self.messages.push("Cunning Action: Dash or Disengage?", palette::INFO);
                return Ok(false);
            }
            Targeting::Instant => {}
        }

        match kind {
            AbilityKind::PowerAttack => self.apply_player_effect(EffectKind::PowerAttackBuff),
            AbilityKind::Evasion => self.apply_player_effect(EffectKind::EvasionBuff),
            AbilityKind::Search => {
                self.search_for_traps();
            }
            AbilityKind::CunningAction | AbilityKind::ShadowStep | AbilityKind::SummonFamiliar => {}
        }
        self.player.abilities[slot].trigger();
        debug!(%name, consumes_turn, "ability used");
        Ok(consumes_turn)
    }

    fn apply_player_effect(&mut self, kind: EffectKind) {
        let effect = StatusEffect::new(kind, BUFF_DURATION);
        self.messages.push(effect.applied_message("You"), palette::INFO);
        self.player.apply_effect(effect);
    }

    fn try_execute_on_target(&mut self, x: i32, y: i32) -> Result<bool, ActionError> {
        self.ensure_player_turn()?;
        let PlayerInput::AwaitingTarget { slot } = self.player.input else {
            return Err(ActionError::WrongMode);
        };
        let ability = self.player.abilities.get(slot).ok_or(ActionError::InvalidSlot(slot))?;
        let Targeting::Tile { range } = ability.targeting() else {
            return Err(ActionError::WrongMode);
        };
        let kind = ability.kind;

        if !self.map.in_bounds(x, y) {
            return Err(ActionError::OutOfBounds);
        }
        if chebyshev(self.player.position(), (x, y)) > range as i32 {
            return Err(ActionError::OutOfRange { max: range });
        }
        if !self.fov.is_visible(x, y) {
            return Err(ActionError::NotVisible);
        }
        if !self.map.is_walkable(x, y) {
            return Err(ActionError::Unwalkable);
        }
        if !self.is_open(x, y) {
            return Err(ActionError::Occupied);
        }

        match kind {
            AbilityKind::ShadowStep => {
                self.player.set_position(x, y);
                self.messages.push("You step through the shadows.", palette::INFO);
                self.refresh_fov();
            }
            AbilityKind::SummonFamiliar => {
                let familiar = Summon::familiar(x, y, FAMILIAR_DURATION, self.player.level);
                let id = self.spawn(Actor::Summon(familiar));
                self.join_turn_order(id);
                self.messages.push("A familiar answers your call.", palette::INFO);
            }
            _ => return Err(ActionError::WrongMode),
        }
        self.player.input.finish();
        self.player.abilities[slot].trigger();
        Ok(true)
    }

    fn try_choose_cunning_action(&mut self, choice: CunningChoice) -> Result<bool, ActionError> {
        self.ensure_player_turn()?;
        let PlayerInput::ChoosingCunningAction { slot } = self.player.input else {
            return Err(ActionError::WrongMode);
        };
        // both options last until the end of this turn
        let effect = match choice {
            CunningChoice::Dash => StatusEffect::new(EffectKind::CunningActionDashBuff, 1),
            CunningChoice::Disengage => StatusEffect::new(EffectKind::Disengaged, 1),
        };
        self.messages.push(effect.applied_message("You"), palette::INFO);
        self.player.apply_effect(effect);
        self.player.input.finish();
        if let Some(ability) = self.player.abilities.get_mut(slot) {
            ability.trigger();
        }
        Ok(false)
    }
}

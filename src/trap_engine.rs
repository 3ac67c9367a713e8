//! Trap detection, disarming and triggering.
use combat::{Ability as Stat, Combatant, StatusEffect};
use dungeon::{Tile, Trap};
use error::ActionError;
use items::ToolKind;
use tracing::debug;

use crate::messages::palette;
use crate::session::GameSession;

impl GameSession {
    /// Disarms a revealed trap in a cardinal direction from the player.
    pub fn disarm_trap(&mut self, dx: i32, dy: i32) -> bool {
        let result = self.try_disarm(dx, dy);
        self.resolve(result)
    }

    /// Investigation check against every hidden trap in the 8 surrounding
    /// cells, each rolled on its own. Returns how many were found.
    pub(crate) fn search_for_traps(&mut self) -> usize {
        let (px, py) = self.player.position();
        let mut found = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (x, y) = (px + dx, py + dy);
                let Some(trap) = self.map.get(x, y).and_then(Tile::as_trap).copied() else {
                    continue;
                };
                if !trap.is_hidden() {
                    continue;
                }
                let check = self
                    .player
                    .check(&mut *self.rng, Stat::Intelligence, true, trap.detection_dc);
                debug!(x, y, total = check.total, dc = trap.detection_dc, "trap detection");
                if let Some(revealed) = trap.detect(check.total) {
                    let _ = self.map.replace(x, y, Tile::Trap(revealed));
                    self.messages.push(format!("You spot a {}!", trap.kind), palette::TRAP);
                    self.floating.spawn(x, y, "^", palette::TRAP);
                    found += 1;
                }
            }
        }
        if found == 0 {
            self.messages.push("You search but find nothing.", palette::INFO);
        }
        found
    }

    fn try_disarm(&mut self, dx: i32, dy: i32) -> Result<bool, ActionError> {
        self.ensure_player_turn()?;
        if !self.player.input.is_idle() {
            return Err(ActionError::WrongMode);
        }
        if dx.abs() + dy.abs() != 1 {
            return Err(ActionError::OutOfRange { max: 1 });
        }
        if !self.player.bag.has_tool(ToolKind::ThievesTools) {
            return Err(ActionError::MissingTool(ToolKind::ThievesTools.to_string()));
        }
        let (px, py) = self.player.position();
        let (x, y) = (px + dx, py + dy);
        let trap = self
            .map
            .tile(x, y)?
            .as_trap()
            .copied()
            .ok_or(ActionError::NoTarget("disarm"))?;
        if trap.is_hidden() {
            return Err(ActionError::TrapNotRevealed);
        }
        if trap.is_spent() {
            return Err(ActionError::NoTarget("disarm"));
        }

        let check = self.player.check(&mut *self.rng, Stat::Dexterity, true, trap.disarm_dc);
        debug!(x, y, total = check.total, dc = trap.disarm_dc, "disarm attempt");
        if trap.disarm_succeeds(check.total) {
            let _ = self.map.replace(x, y, Tile::Trap(trap.disarmed()));
            self.messages.push(format!("You disarm the {}.", trap.kind), palette::TRAP);
        } else if self.rng.percent(self.config.rules.disarm_trigger_chance) {
            self.messages
                .push(format!("Your tools slip and the {} goes off!", trap.kind), palette::TRAP);
            self.trigger_trap(x, y, trap);
        } else {
            self.messages
                .push(format!("You fail to disarm the {}.", trap.kind), palette::WARNING);
        }
        Ok(true)
    }

    /// Sets a trap off against the player: damage, then the rider's save.
    pub(crate) fn trigger_trap(&mut self, x: i32, y: i32, trap: Trap) {
        let _ = self.map.replace(x, y, Tile::Trap(trap.triggered()));
        let damage = self.rng.roll(trap.damage).max(1);
        let lost = self.player.take_damage(damage);
        debug!(x, y, kind = ?trap.kind, damage = lost, "trap triggered");
        self.messages
            .push(format!("A {} hits you for {lost} damage!", trap.kind), palette::TRAP);
        let (px, py) = self.player.position();
        self.floating.spawn(px, py, format!("-{lost}"), palette::TRAP);

        if let Some(rider) = trap.rider {
            if self.player.is_alive() {
                let save = self.player.check(&mut *self.rng, rider.save, false, rider.dc);
                if save.succeeded() {
                    self.messages.push(format!("You resist the {}.", rider.effect), palette::INFO);
                } else {
                    let effect = StatusEffect::new(rider.effect, rider.duration);
                    self.messages.push(effect.applied_message("You"), palette::TRAP);
                    self.player.apply_effect(effect);
                }
            }
        }
        self.check_player_death();
    }
}

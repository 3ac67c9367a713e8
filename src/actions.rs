//! Player-initiated actions. Every public entry point returns the "turn
//! consumed" signal; failures land in the message log.
use combat::{AttackReport, Combat, Combatant, EffectKind, chebyshev};
use error::ActionError;
use hero::EquipSlot;
use items::ItemKind;
use tracing::debug;

use crate::entity::{Actor, EntityId};
use crate::messages::palette;
use crate::session::GameSession;

/// What stands in the way of a step.
enum Bump {
    /// Reaching for the "chest" wakes it.
    Mimic(EntityId),
    Monster(EntityId),
    Blocked,
}

impl GameSession {
    /// Steps (or bumps) one tile. `(0, 0)` waits in place.
    pub fn handle_player_move(&mut self, dx: i32, dy: i32) -> bool {
        let result = self.try_move(dx, dy);
        self.resolve(result)
    }

    pub fn handle_player_attack(&mut self, target: EntityId) -> bool {
        let result = self.try_attack(target);
        self.resolve(result)
    }

    pub fn pickup_item(&mut self) -> bool {
        let result = self.try_pickup();
        self.resolve(result)
    }

    pub fn equip_item(&mut self, index: usize) -> bool {
        let result = self.try_equip(index);
        self.resolve(result)
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> bool {
        let result = self.try_unequip(slot);
        self.resolve(result)
    }

    pub fn use_item(&mut self, index: usize) -> bool {
        let result = self.try_use_item(index);
        self.resolve(result)
    }

    fn ensure_idle_turn(&self) -> Result<(), ActionError> {
        self.ensure_player_turn()?;
        if !self.player.input.is_idle() {
            return Err(ActionError::WrongMode);
        }
        Ok(())
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> Result<bool, ActionError> {
        self.ensure_idle_turn()?;
        let (dx, dy) = (dx.signum(), dy.signum());
        if (dx, dy) == (0, 0) {
            return Ok(!self.is_tavern());
        }
        let from = self.player.position();
        let (x, y) = (from.0 + dx, from.1 + dy);
        let tile = *self.map.tile(x, y)?;

        let bumped = self.entity_at(x, y).map(|e| match &e.actor {
            Actor::Monster(m) if m.disguised => Bump::Mimic(e.id),
            Actor::Monster(_) => Bump::Monster(e.id),
            Actor::Summon(_) | Actor::Npc(_) => Bump::Blocked,
        });
        match bumped {
            Some(Bump::Mimic(id)) => {
                self.reveal_mimic(id);
                return Ok(true);
            }
            Some(Bump::Monster(id)) => return self.attack_entity(id),
            Some(Bump::Blocked) => return Err(ActionError::Occupied),
            None => {}
        }

        if tile.is_destructible() {
            self.map.destroy(x, y);
            self.messages
                .push(format!("You smash the {}.", tile.info().name), palette::INFO);
            return Ok(true);
        }
        if !tile.is_walkable() {
            return Err(ActionError::Unwalkable);
        }

        if self.is_tavern() {
            self.player.set_position(x, y);
            return Ok(true);
        }

        if !self.player.effects.has(EffectKind::Disengaged) {
            self.opportunity_attacks(from, (x, y));
            if !self.player.is_alive() {
                // the move never completes
                self.check_player_death();
                return Ok(true);
            }
        }

        self.player.set_position(x, y);
        self.refresh_fov();
        if let Some(trap) = tile.as_trap().filter(|t| t.is_armed()) {
            self.trigger_trap(x, y, *trap);
        }

        if self.player.effects.has(EffectKind::CunningActionDashBuff) {
            self.player.effects.remove(EffectKind::CunningActionDashBuff);
            self.messages.push("You dash onward.", palette::INFO);
            return Ok(false);
        }
        Ok(true)
    }

    /// Every visible monster adjacent before the move and not after it gets a
    /// free swing.
    fn opportunity_attacks(&mut self, from: (i32, i32), to: (i32, i32)) {
        let attackers: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter_map(|(i, e)| match &e.actor {
                Actor::Monster(m)
                    if m.is_alive()
                        && !m.disguised
                        && chebyshev(m.position(), from) == 1
                        && chebyshev(m.position(), to) > 1 =>
                {
                    Some(i)
                }
                _ => None,
            })
            .collect();

        for index in attackers {
            if !self.player.is_alive() {
                break;
            }
            let Actor::Monster(monster) = &self.entities[index].actor else {
                continue;
            };
            self.messages
                .push(format!("{} lashes out as you pull away!", monster.name), palette::COMBAT);
            let report = Combat::brawl(&mut *self.rng, monster, &mut self.player);
            self.report_attack(&report, from);
        }
    }

    fn try_attack(&mut self, target: EntityId) -> Result<bool, ActionError> {
        self.ensure_idle_turn()?;
        if self.is_tavern() {
            return Err(ActionError::WrongMode);
        }
        let entity = self
            .entity(target)
            .filter(|e| e.is_alive() && e.is_hostile())
            .ok_or(ActionError::NoTarget("attack"))?;
        if chebyshev(entity.position(), self.player.position()) > 1 {
            return Err(ActionError::OutOfRange { max: 1 });
        }
        self.attack_entity(target)
    }

    /// Weapon attack on a monster. Attacking a disguised mimic also unmasks it.
    pub(crate) fn attack_entity(&mut self, id: EntityId) -> Result<bool, ActionError> {
        let index = self.entity_index(id).ok_or(ActionError::ActorDead)?;
        if self.entities[index].as_monster().is_some_and(|m| m.disguised) {
            self.reveal_mimic(id);
        }

        let strike = self.player.strike();
        let Actor::Monster(monster) = &mut self.entities[index].actor else {
            return Err(ActionError::NoTarget("attack"));
        };
        if !monster.is_alive() {
            return Err(ActionError::ActorDead);
        }
        let report = Combat::strike(&mut *self.rng, &self.player.name, strike, monster);
        let position = monster.position();
        self.report_attack(&report, position);

        if report.defeated {
            self.award_experience(report.experience);
        }
        Ok(true)
    }

    pub(crate) fn award_experience(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        self.messages.push(format!("You gain {amount} XP."), palette::LEVEL);
        for level_up in self.player.gain_xp(amount) {
            self.messages.push(
                format!("You reach level {}! (+{} max HP)", level_up.level, level_up.hp_gain),
                palette::LEVEL,
            );
            if level_up.ability_increase {
                self.messages
                    .push("Your strength and dexterity improve.", palette::LEVEL);
            }
        }
    }

    /// Messages and a floating callout over whoever was attacked.
    pub(crate) fn report_attack(&mut self, report: &AttackReport, at: (i32, i32)) {
        let color = if report.is_hit() { palette::COMBAT } else { palette::MISS };
        for line in report.logs() {
            self.messages.push(line, color);
        }
        let callout = match (report.is_critical(), report.is_hit()) {
            (true, _) => format!("-{}!", report.damage),
            (false, true) => format!("-{}", report.damage),
            (false, false) => "miss".to_string(),
        };
        self.floating.spawn(at.0, at.1, callout, color);
    }

    pub(crate) fn reveal_mimic(&mut self, id: EntityId) {
        let Some(index) = self.entity_index(id) else {
            return;
        };
        let Some(monster) = self.entities[index].as_monster_mut() else {
            return;
        };
        if monster.reveal() {
            let (x, y) = monster.position();
            debug!(?id, "mimic revealed");
            self.messages.push("The chest springs to life! It's a Mimic!", palette::COMBAT);
            self.floating.spawn(x, y, "!", palette::COMBAT);
            self.join_turn_order(id);
        }
    }

    fn try_pickup(&mut self) -> Result<bool, ActionError> {
        self.ensure_idle_turn()?;
        let (x, y) = self.player.position();
        let item = self.map.item_at_mut(x, y).ok_or(ActionError::NothingHere)?;

        if let Some(chest) = item.as_chest_mut() {
            let bag = &mut self.player.bag;
            let moved = chest.take_contents(|item| bag.add(item).err());
            let emptied = chest.is_empty();
            if moved == 0 && !emptied {
                return Err(ActionError::InventoryFull);
            }
            if emptied {
                self.map.take_item(x, y);
                self.messages
                    .push(format!("You empty the chest ({moved} items)."), palette::LOOT);
            } else {
                self.messages.push(
                    format!("You take {moved} items; the rest stay in the chest."),
                    palette::LOOT,
                );
            }
            return Ok(true);
        }

        if self.player.bag.is_full() {
            return Err(ActionError::InventoryFull);
        }
        let item = self.map.take_item(x, y).ok_or(ActionError::NothingHere)?;
        self.messages.push(format!("You pick up {}.", item.name), palette::LOOT);
        if let Err(item) = self.player.bag.add(item) {
            // checked above, but never lose the item
            self.map.place_item(x, y, item);
            return Err(ActionError::InventoryFull);
        }
        Ok(true)
    }

    fn try_equip(&mut self, index: usize) -> Result<bool, ActionError> {
        self.ensure_idle_turn()?;
        let name = self
            .player
            .bag
            .get(index)
            .map(|i| i.name.clone())
            .ok_or(ActionError::InvalidSlot(index))?;
        match self.player.bag.equip(index)? {
            Some(previous) => self
                .messages
                .push(format!("You swap {previous} for {name}."), palette::INFO),
            None => self.messages.push(format!("You equip {name}."), palette::INFO),
        }
        Ok(!self.is_tavern())
    }

    fn try_unequip(&mut self, slot: EquipSlot) -> Result<bool, ActionError> {
        self.ensure_idle_turn()?;
        let name = self.player.bag.unequip(slot)?;
        self.messages.push(format!("You take off {name}."), palette::INFO);
        Ok(!self.is_tavern())
    }

    /// Potions are drunk; weapons and armor are equipped.
    fn try_use_item(&mut self, index: usize) -> Result<bool, ActionError> {
        self.ensure_idle_turn()?;
        let item = self.player.bag.get(index).ok_or(ActionError::InvalidSlot(index))?;
        match &item.kind {
            ItemKind::Potion(potion) => {
                let dice = potion.heal_dice();
                let name = item.name.clone();
                self.player.bag.remove(index)?;
                let amount = self.rng.roll(dice);
                let healed = self.player.heal(amount);
                let (x, y) = self.player.position();
                self.messages
                    .push(format!("You drink the {name} and recover {healed} HP."), palette::HEAL);
                self.floating.spawn(x, y, format!("+{healed}"), palette::HEAL);
                Ok(!self.is_tavern())
            }
            ItemKind::Weapon(_) | ItemKind::Armor(_) => self.try_equip(index),
            ItemKind::Tools(_) | ItemKind::Chest(_) => Err(ActionError::WrongMode),
        }
    }
}

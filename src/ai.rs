//! Autonomous turns for monsters and summons.
use combat::{Combat, Combatant, MonsterIntent, chebyshev};
use tracing::debug;

use crate::entity::{Actor, EntityId};
use crate::messages::palette;
use crate::session::GameSession;

impl GameSession {
    /// Runs one non-player entity's turn to completion.
    pub(crate) fn run_entity_turn(&mut self, id: EntityId) {
        let Some(index) = self.entity_index(id) else {
            return;
        };
        if !self.entities[index].is_alive() {
            // purged at the next advancement
            return;
        }
        match &self.entities[index].actor {
            Actor::Monster(m) if !m.disguised => self.monster_turn(index),
            Actor::Summon(_) => self.summon_turn(index),
            Actor::Monster(_) | Actor::Npc(_) => {}
        }
    }

    /// Attack when adjacent, otherwise close in greedily.
    fn monster_turn(&mut self, index: usize) {
        let player = self.player.position();
        let Actor::Monster(monster) = &self.entities[index].actor else {
            return;
        };
        let intent = monster.plan(player, |x, y| self.is_open(x, y));
        debug!(name = %monster.name, ?intent, "monster turn");

        match intent {
            MonsterIntent::Attack => {
                let Actor::Monster(monster) = &self.entities[index].actor else {
                    return;
                };
                let report = Combat::brawl(&mut *self.rng, monster, &mut self.player);
                self.report_attack(&report, player);
            }
            MonsterIntent::Move(x, y) => {
                if let Some(monster) = self.entities[index].as_monster_mut() {
                    monster.perform_move(x, y);
                }
            }
            MonsterIntent::Wait => {}
        }
    }

    /// Fight whatever hostile is adjacent, otherwise stay close to the player.
    /// The familiar fades when its duration runs out.
    fn summon_turn(&mut self, index: usize) {
        let Actor::Summon(summon) = &self.entities[index].actor else {
            return;
        };
        let position = summon.position();
        let target = self.entities.iter().position(|e| {
            e.is_alive()
                && e.as_monster().is_some_and(|m| !m.disguised)
                && chebyshev(e.position(), position) == 1
        });
        let intent = summon.plan(target.is_some(), self.player.position(), |x, y| self.is_open(x, y));

        match (intent, target) {
            (MonsterIntent::Attack, Some(target)) => {
                let attacker = summon.clone();
                let Actor::Monster(defender) = &mut self.entities[target].actor else {
                    return;
                };
                let report = Combat::brawl(&mut *self.rng, &attacker, defender);
                let at = defender.position();
                self.report_attack(&report, at);
                // the familiar's kills count for its master
                if report.defeated {
                    self.award_experience(report.experience);
                }
            }
            (MonsterIntent::Move(x, y), _) => {
                if let Actor::Summon(summon) = &mut self.entities[index].actor {
                    summon.x = x;
                    summon.y = y;
                }
            }
            _ => {}
        }

        if let Actor::Summon(summon) = &mut self.entities[index].actor {
            if summon.tick_duration() {
                self.messages.push("Your familiar fades away.", palette::INFO);
            }
        }
    }
}

//! Non-player entities and the capability traits the session dispatches on.
use combat::{Combatant, Monster, Summon};
use dungeon::Npc;
use hero::Hero;
use ratatui::style::Color;

/// Stable handle for anything that can appear in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    pub const PLAYER: EntityId = EntityId(0);

    pub fn is_player(self) -> bool {
        self == Self::PLAYER
    }
}

/// Takes part in dungeon turn order.
pub trait Schedulable {
    fn initiative(&self) -> i32;

    /// Disguised mimics and NPCs stay out of turn order.
    fn is_schedulable(&self) -> bool {
        true
    }
}

/// Something the player can talk to.
pub trait Interactable {
    fn prompt(&self) -> &str;
}

impl Schedulable for Hero {
    fn initiative(&self) -> i32 {
        self.initiative
    }
}

impl Schedulable for Monster {
    fn initiative(&self) -> i32 {
        self.initiative
    }

    fn is_schedulable(&self) -> bool {
        !self.disguised
    }
}

impl Schedulable for Summon {
    fn initiative(&self) -> i32 {
        self.initiative
    }
}

impl Interactable for Npc {
    fn prompt(&self) -> &str {
        self.greeting()
    }
}

/// 实体变体
#[derive(Debug, Clone)]
pub enum Actor {
    Monster(Monster),
    Summon(Summon),
    Npc(Npc),
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub actor: Actor,
}

impl Entity {
    pub fn new(id: EntityId, actor: Actor) -> Self {
        Self { id, actor }
    }

    pub fn position(&self) -> (i32, i32) {
        match &self.actor {
            Actor::Monster(m) => m.position(),
            Actor::Summon(s) => s.position(),
            Actor::Npc(n) => n.position(),
        }
    }

    /// Disguised mimics draw as chests.
    pub fn glyph(&self) -> char {
        match &self.actor {
            Actor::Monster(m) if m.disguised => '=',
            Actor::Monster(m) => m.glyph,
            Actor::Summon(s) => s.glyph,
            Actor::Npc(n) => n.glyph,
        }
    }

    pub fn color(&self) -> Color {
        match &self.actor {
            Actor::Monster(m) if m.disguised => Color::Yellow,
            Actor::Monster(m) => m.color,
            Actor::Summon(s) => s.color,
            Actor::Npc(n) => n.color,
        }
    }

    pub fn name(&self) -> &str {
        match &self.actor {
            Actor::Monster(m) if m.disguised => "Chest",
            Actor::Monster(m) => m.name.as_str(),
            Actor::Summon(s) => s.name.as_str(),
            Actor::Npc(n) => n.name.as_str(),
        }
    }

    /// Summons also go once their duration runs out.
    pub fn is_alive(&self) -> bool {
        match &self.actor {
            Actor::Monster(m) => m.is_alive(),
            Actor::Summon(s) => s.is_alive() && !s.is_expired(),
            Actor::Npc(_) => true,
        }
    }

    pub fn schedulable(&self) -> Option<&dyn Schedulable> {
        match &self.actor {
            Actor::Monster(m) => Some(m),
            Actor::Summon(s) => Some(s),
            Actor::Npc(_) => None,
        }
    }

    pub fn as_monster(&self) -> Option<&Monster> {
        match &self.actor {
            Actor::Monster(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_monster_mut(&mut self) -> Option<&mut Monster> {
        match &mut self.actor {
            Actor::Monster(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_npc(&self) -> Option<&Npc> {
        match &self.actor {
            Actor::Npc(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_hostile(&self) -> bool {
        matches!(self.actor, Actor::Monster(_))
    }
}

//! Initiative-ordered turn scheduler.
//!
//! In the tavern there is no scheduling at all. In the dungeon every
//! schedulable entity gets a slot, sorted by initiative once at level entry,
//! and a cursor walks the list cyclically. Dead entities are purged at the
//! start of each advancement.

use tracing::debug;

use crate::entity::EntityId;

/// High-level phases recognised by the turn scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnMode {
    /// Free movement, nothing is scheduled.
    Tavern,
    /// Strict initiative order.
    Dungeon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSlot {
    pub id: EntityId,
    pub initiative: i32,
}

/// Outcome of one cursor advancement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnAdvance {
    /// Whose turn just ended.
    pub finished: Option<EntityId>,
    /// Entities dropped from turn order by this advancement.
    pub purged: Vec<EntityId>,
    /// Whose turn it is now.
    pub current: Option<EntityId>,
}

#[derive(Debug, Clone)]
pub struct TurnSystem {
    mode: TurnMode,
    order: Vec<TurnSlot>,
    cursor: usize,
    /// Completed passes through the order.
    pub round: u32,
}

impl Default for TurnSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnSystem {
    pub fn new() -> Self {
        Self {
            mode: TurnMode::Tavern,
            order: Vec::new(),
            cursor: 0,
            round: 0,
        }
    }

    pub fn mode(&self) -> TurnMode {
        self.mode
    }

    pub fn enter_tavern(&mut self) {
        self.mode = TurnMode::Tavern;
        self.order.clear();
        self.cursor = 0;
        self.round = 0;
    }

    /// Sorts slots by descending initiative. Ties keep the order given.
    pub fn enter_dungeon(&mut self, mut slots: Vec<TurnSlot>) {
        slots.sort_by(|a, b| b.initiative.cmp(&a.initiative));
        self.mode = TurnMode::Dungeon;
        self.order = slots;
        self.cursor = 0;
        self.round = 0;
        debug!(order = ?self.order, "turn order built");
    }

    pub fn order(&self) -> &[TurnSlot] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn current(&self) -> Option<EntityId> {
        self.order.get(self.cursor).map(|slot| slot.id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.order.iter().any(|slot| slot.id == id)
    }

    pub fn is_players_turn(&self) -> bool {
        match self.mode {
            TurnMode::Tavern => true,
            TurnMode::Dungeon => self.current() == Some(EntityId::PLAYER),
        }
    }

    /// Adds a late joiner (a revealed mimic, a fresh summon) at its initiative
    /// position without changing whose turn it is.
    pub fn insert(&mut self, slot: TurnSlot) {
        if self.mode != TurnMode::Dungeon || self.contains(slot.id) {
            return;
        }
        let index = self
            .order
            .iter()
            .position(|s| s.initiative < slot.initiative)
            .unwrap_or(self.order.len());
        if index <= self.cursor && !self.order.is_empty() {
            self.cursor += 1;
        }
        self.order.insert(index, slot);
    }

    /// Drops every slot whose entity is no longer alive. The cursor keeps
    /// pointing at the same entity; if that entity is the one removed the
    /// cursor resets to 0.
    pub fn purge<F>(&mut self, is_alive: F) -> Vec<EntityId>
    where
        F: Fn(EntityId) -> bool,
    {
        let current = self.current();
        let purged: Vec<EntityId> = self
            .order
            .iter()
            .filter(|slot| !is_alive(slot.id))
            .map(|slot| slot.id)
            .collect();
        if purged.is_empty() {
            return purged;
        }

        self.order.retain(|slot| !purged.contains(&slot.id));
        self.cursor = current
            .and_then(|id| self.order.iter().position(|slot| slot.id == id))
            .unwrap_or(0);
        debug!(?purged, cursor = self.cursor, "purged turn order");
        purged
    }

    /// Purges, then moves to the next slot. When the entity whose turn just
    /// ended was purged the cursor already sits on 0 and does not move again.
    pub fn advance<F>(&mut self, is_alive: F) -> TurnAdvance
    where
        F: Fn(EntityId) -> bool,
    {
        let finished = self.current();
        let purged = self.purge(is_alive);
        let finished_died = finished.is_some_and(|id| purged.contains(&id));

        if !finished_died && !self.order.is_empty() {
            self.cursor += 1;
            if self.cursor >= self.order.len() {
                self.cursor = 0;
                self.round += 1;
            }
        }
        let current = self.current();
        debug!(?finished, ?current, round = self.round, "turn advanced");
        TurnAdvance {
            finished,
            purged,
            current,
        }
    }

    /// Turn order emptied out but the player lives on: the player alone.
    pub fn reseed_with_player(&mut self, initiative: i32) {
        self.order = vec![TurnSlot {
            id: EntityId::PLAYER,
            initiative,
        }];
        self.cursor = 0;
    }
}

//! The session controller: owns the map, the entities and the turn order, and
//! is the only place that mutates them.
use combat::{Combatant, EffectEvent, RollSource};
use dungeon::{FieldOfView, GeneratedLevel, Npc, NpcKind, Tile, TileMap, generate_level, generate_tavern};
use error::ActionError;
use hero::Hero;
use ratatui::style::Color;
use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::entity::{Actor, Entity, EntityId, Interactable, Schedulable};
use crate::messages::{FloatingTexts, MessageLog, palette};
use crate::turn_system::{TurnMode, TurnSlot, TurnSystem};

/// Which way a staircase under the player leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StairsDirection {
    Down,
    Up,
}

/// 游戏会话
///
/// Callers read state through the accessors and change it only through the
/// action methods.
pub struct GameSession {
    pub(crate) config: CoreConfig,
    pub(crate) rng: Box<dyn RollSource>,
    pub(crate) player: Hero,
    pub(crate) entities: Vec<Entity>,
    pub(crate) turns: TurnSystem,
    pub(crate) map: TileMap,
    pub(crate) fov: FieldOfView,
    /// 0 is the tavern.
    pub(crate) depth: u32,
    pub(crate) stairs_up: Option<(i32, i32)>,
    pub(crate) stairs_down: Option<(i32, i32)>,
    pub(crate) door: Option<(i32, i32)>,
    pub(crate) messages: MessageLog,
    pub(crate) floating: FloatingTexts,
    /// Reset at the start of each player turn.
    pub(crate) player_acted: bool,
    pub(crate) game_over: bool,
    next_id: u32,
}

impl GameSession {
    /// A fresh session standing in the tavern.
    pub fn new(config: CoreConfig, rng: Box<dyn RollSource>) -> Self {
        let player = Hero::adventurer(config.rules.inventory_capacity);
        let mut session = Self::empty(config, rng, player);
        session.generate_tavern();
        session
    }

    /// Resumes play on a prepared level. Nobody rolls initiative: the hero
    /// and the monsters keep what they carry, and whoever leads the order is
    /// current. Depth 0 is treated as the tavern.
    pub fn from_level(config: CoreConfig, rng: Box<dyn RollSource>, player: Hero, level: GeneratedLevel) -> Self {
        let mut session = Self::empty(config, rng, player);
        let tavern = level.depth == 0;
        session.load(level);
        if tavern {
            session.turns.enter_tavern();
        } else {
            let slots = session.opening_slots();
            session.turns.enter_dungeon(slots);
        }
        session.refresh_fov();
        session
    }

    fn empty(config: CoreConfig, rng: Box<dyn RollSource>, player: Hero) -> Self {
        let messages = MessageLog::new(config.rules.message_capacity);
        let floating = FloatingTexts::new(config.rules.floating_text_lifetime);
        Self {
            config,
            rng,
            player,
            entities: Vec::new(),
            turns: TurnSystem::new(),
            map: TileMap::new(0, 0, Tile::Wall),
            fov: FieldOfView::new(0, 0),
            depth: 0,
            stairs_up: None,
            stairs_down: None,
            door: None,
            messages,
            floating,
            player_acted: false,
            game_over: false,
            next_id: 1,
        }
    }

    /// Replaces the session state with the tavern. Entity handles from before
    /// are invalid afterwards.
    pub fn generate_tavern(&mut self) {
        let tavern = generate_tavern();
        self.load(tavern);
        self.turns.enter_tavern();
        self.refresh_fov();
        self.messages
            .push("You are in the tavern. The door leads down into the dungeon.", palette::INFO);
    }

    /// Replaces the session state with a new dungeon level and rolls
    /// initiative for everyone on it.
    ///
    /// Entering a level starts a fresh order without ending the player's
    /// turn: cooldowns do not tick and the acted flag stays clear.
    pub fn generate_level(&mut self, depth: u32, spawn_on_stairs_up: bool) {
        let level = generate_level(&self.config.generator, depth, spawn_on_stairs_up, &mut *self.rng);
        self.load(level);

        self.player.roll_initiative(&mut *self.rng);
        for entity in &mut self.entities {
            if let Actor::Monster(monster) = &mut entity.actor {
                monster.initiative = self.rng.d20();
            }
        }
        let slots = self.opening_slots();
        self.turns.enter_dungeon(slots);
        info!(depth, entities = self.entities.len(), "entered dungeon level");
        self.messages.push(format!("You enter dungeon level {depth}."), palette::INFO);

        // monsters that out-rolled the player act right away
        self.run_until_player_turn();
        self.refresh_fov();
    }

    /// The player plus every schedulable monster, at their current initiative.
    fn opening_slots(&self) -> Vec<TurnSlot> {
        let mut slots = vec![TurnSlot {
            id: EntityId::PLAYER,
            initiative: self.player.initiative,
        }];
        for entity in &self.entities {
            if let Actor::Monster(monster) = &entity.actor {
                if monster.is_schedulable() {
                    slots.push(TurnSlot {
                        id: entity.id,
                        initiative: monster.initiative,
                    });
                }
            }
        }
        slots
    }

    fn load(&mut self, level: GeneratedLevel) {
        self.depth = level.depth;
        self.map = level.map;
        self.fov = FieldOfView::new(self.map.width, self.map.height);
        self.stairs_up = level.stairs_up;
        self.stairs_down = level.stairs_down;
        self.door = level.door;
        self.entities.clear();
        self.floating.clear();
        for monster in level.monsters {
            let id = self.allocate_id();
            self.entities.push(Entity::new(id, Actor::Monster(monster)));
        }
        for npc in level.npcs {
            let id = self.allocate_id();
            self.entities.push(Entity::new(id, Actor::Npc(npc)));
        }
        let (x, y) = level.player_start;
        self.player.set_position(x, y);
        self.player.input.finish();
        self.player_acted = false;
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Adds an entity to the level. It does not take turns until it joins
    /// turn order.
    pub(crate) fn spawn(&mut self, actor: Actor) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(Entity::new(id, actor));
        id
    }

    pub fn is_tavern(&self) -> bool {
        self.turns.mode() == TurnMode::Tavern
    }

    // ---- queries for the presentation layer ----

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn player(&self) -> &Hero {
        &self.player
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn turns(&self) -> &TurnSystem {
        &self.turns
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn fov(&self) -> &FieldOfView {
        &self.fov
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn stairs_up(&self) -> Option<(i32, i32)> {
        self.stairs_up
    }

    pub fn stairs_down(&self) -> Option<(i32, i32)> {
        self.stairs_down
    }

    pub fn door(&self) -> Option<(i32, i32)> {
        self.door
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn floating(&self) -> &FloatingTexts {
        &self.floating
    }

    /// Whether the player has spent this turn's action.
    pub fn player_acted(&self) -> bool {
        self.player_acted
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn get_current_entity(&self) -> Option<EntityId> {
        match self.turns.mode() {
            TurnMode::Tavern => Some(EntityId::PLAYER),
            TurnMode::Dungeon => self.turns.current(),
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub(crate) fn entity_index(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    /// Living entity standing on a cell (the player excluded).
    pub fn entity_at(&self, x: i32, y: i32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is_alive() && e.position() == (x, y))
    }

    pub fn check_stairs_interaction(&self) -> Option<StairsDirection> {
        let pos = Some(self.player.position());
        if pos == self.stairs_down {
            Some(StairsDirection::Down)
        } else if pos == self.stairs_up {
            Some(StairsDirection::Up)
        } else {
            None
        }
    }

    pub fn check_door_interaction(&self) -> bool {
        self.door.is_some_and(|d| d == self.player.position())
    }

    /// NPC next to (or under) the player.
    pub fn check_npc_interaction(&self) -> Option<&Npc> {
        let (px, py) = self.player.position();
        self.entities
            .iter()
            .filter_map(Entity::as_npc)
            .find(|npc| (npc.x - px).abs() <= 1 && (npc.y - py).abs() <= 1)
    }

    /// Free for the player or a summon to step onto.
    pub(crate) fn is_open(&self, x: i32, y: i32) -> bool {
        self.map.is_walkable(x, y) && self.player.position() != (x, y) && self.entity_at(x, y).is_none()
    }

    // ---- transitions ----
    //
    // Changing level never consumes a turn: the new level starts its own
    // order with the player's turn still open.

    pub fn descend(&mut self) -> bool {
        let result = match self.check_stairs_interaction() {
            Some(StairsDirection::Down) if !self.game_over => {
                let depth = self.depth + 1;
                self.generate_level(depth, true);
                Ok(false)
            }
            _ => Err(ActionError::NoTarget("descend")),
        };
        self.resolve(result)
    }

    pub fn ascend(&mut self) -> bool {
        let result = match self.check_stairs_interaction() {
            Some(StairsDirection::Up) if !self.game_over => {
                let depth = self.depth.saturating_sub(1);
                if depth == 0 {
                    self.generate_tavern();
                } else {
                    self.generate_level(depth, false);
                }
                Ok(false)
            }
            _ => Err(ActionError::NoTarget("climb")),
        };
        self.resolve(result)
    }

    /// The tavern door leads to level 1; a dungeon door leads back up.
    pub fn use_door(&mut self) -> bool {
        let result = if !self.check_door_interaction() || self.game_over {
            Err(ActionError::NoTarget("open"))
        } else if self.is_tavern() {
            self.generate_level(1, true);
            Ok(false)
        } else {
            self.generate_tavern();
            Ok(false)
        };
        self.resolve(result)
    }

    pub fn interact_with_npc(&mut self) -> bool {
        let result = self.try_interact();
        self.resolve(result)
    }

    fn try_interact(&mut self) -> Result<bool, ActionError> {
        self.ensure_player_turn()?;
        let (px, py) = self.player.position();
        let npc = self
            .entities
            .iter_mut()
            .filter_map(|e| match &mut e.actor {
                Actor::Npc(npc) => Some(npc),
                _ => None,
            })
            .find(|npc| (npc.x - px).abs() <= 1 && (npc.y - py).abs() <= 1)
            .ok_or(ActionError::NoTarget("talk to"))?;

        self.messages.push(npc.prompt(), palette::INFO);
        if !npc.serve() {
            return Ok(false);
        }
        let healed = self.player.full_heal();
        if npc.kind == NpcKind::Barkeep {
            self.player.effects.clear();
            self.messages.push("You rest and wake refreshed.", palette::HEAL);
        } else {
            self.messages.push(format!("The healer restores {healed} HP."), palette::HEAL);
        }
        Ok(!self.is_tavern())
    }

    // ---- turn flow ----

    /// Ends the current turn and runs every non-player turn up to the
    /// player's next one. Held while a target or a Cunning Action choice is
    /// pending.
    pub fn advance_turn(&mut self) {
        if self.is_tavern() || self.game_over || !self.player.input.is_idle() {
            return;
        }
        self.step_turn();
        self.run_until_player_turn();
        if self.turns.is_players_turn() && !self.game_over {
            self.start_player_turn();
        }
    }

    /// One advancement: purge the dead, move the cursor, and tick the
    /// player's effects when the player is the one who finished.
    fn step_turn(&mut self) {
        let entities = &self.entities;
        let player_alive = self.player.is_alive();
        let advance = self.turns.advance(|id| {
            if id.is_player() {
                player_alive
            } else {
                entities.iter().any(|e| e.id == id && e.is_alive())
            }
        });
        // the entity list loses the same dead as turn order, plus corpses that
        // never had a slot (a mimic slain while still disguised)
        self.entities.retain(Entity::is_alive);

        if self.turns.is_empty() && self.player.is_alive() {
            debug!("turn order empty, reseeding with the player");
            self.turns.reseed_with_player(self.player.initiative);
        }

        if advance.finished == Some(EntityId::PLAYER) {
            self.end_player_turn();
        }
    }

    /// Non-player turns resolve synchronously until control is back with the
    /// player (or the player is dead).
    fn run_until_player_turn(&mut self) {
        let mut budget = self.turns.len() * 2 + 2;
        while !self.game_over && budget > 0 {
            budget -= 1;
            match self.turns.current() {
                Some(id) if !id.is_player() => {
                    self.run_entity_turn(id);
                    self.check_player_death();
                    if self.game_over {
                        break;
                    }
                    self.step_turn();
                }
                _ => break,
            }
        }
    }

    fn start_player_turn(&mut self) {
        self.player.tick_cooldowns();
        self.player_acted = false;
        self.refresh_fov();
    }

    /// Status effects on the player tick once the player's turn is over.
    fn end_player_turn(&mut self) {
        let events = self.player.tick_effects();
        self.report_effect_events(&events);
        self.check_player_death();
    }

    pub(crate) fn report_effect_events(&mut self, events: &[EffectEvent]) {
        let (x, y) = self.player.position();
        for event in events {
            match *event {
                EffectEvent::Damaged { kind, amount } => {
                    self.messages
                        .push(format!("You take {amount} damage from {kind}."), palette::COMBAT);
                    self.floating.spawn(x, y, format!("-{amount}"), palette::COMBAT);
                }
                EffectEvent::Expired(kind) => {
                    self.messages.push(format!("{kind} wears off."), palette::INFO);
                }
                EffectEvent::Applied(_) | EffectEvent::Refreshed(_) => {}
            }
        }
    }

    pub(crate) fn check_player_death(&mut self) {
        if !self.game_over && !self.player.is_alive() {
            self.game_over = true;
            info!(depth = self.depth, level = self.player.level, "player died");
            self.messages.push("You have died.", Color::Red);
        }
    }

    /// Recomputed on moves, teleports and (re)generation, not every frame.
    pub fn refresh_fov(&mut self) {
        if self.is_tavern() {
            self.fov.reveal_all();
        } else {
            self.fov
                .recompute(&self.map, self.player.position(), &self.config.fov);
        }
    }

    /// Shared guard for player actions.
    pub(crate) fn ensure_player_turn(&self) -> Result<(), ActionError> {
        if self.game_over {
            return Err(ActionError::ActorDead);
        }
        if !self.turns.is_players_turn() {
            return Err(ActionError::NotPlayersTurn);
        }
        Ok(())
    }

    /// Maps an action result onto the "turn consumed" signal, reporting
    /// failures through the message log.
    pub(crate) fn resolve(&mut self, result: Result<bool, ActionError>) -> bool {
        match result {
            Ok(consumed) => {
                if consumed {
                    self.player_acted = true;
                }
                consumed
            }
            Err(err) if err.is_user_visible() => {
                debug!(%err, category = ?err.category(), "action rejected");
                self.messages.push(err.to_string(), palette::WARNING);
                false
            }
            Err(err) => {
                debug!(%err, "action ignored");
                false
            }
        }
    }

    /// Puts a revealed mimic or a new summon into turn order.
    pub(crate) fn join_turn_order(&mut self, id: EntityId) {
        if self.is_tavern() {
            return;
        }
        let initiative = self.rng.d20();
        if let Some(index) = self.entity_index(id) {
            match &mut self.entities[index].actor {
                Actor::Monster(m) => m.initiative = initiative,
                Actor::Summon(s) => s.initiative = initiative,
                Actor::Npc(_) => return,
            }
            self.turns.insert(TurnSlot { id, initiative });
        }
    }
}

//! Test helpers for building small, fully known dungeon levels.
//!
//! Every arena is a walled rectangle of open floor with the dice scripted up
//! front, so each scenario sees exactly the rolls it queued.
#![allow(dead_code)]

use combat::{Monster, ScriptedRng};
use dungeon::{GeneratedLevel, Npc, Tile, TileMap};
use dungeon_crawler::{CoreConfig, EntityId, GameSession};
use hero::Hero;
use items::{Item, PotionKind};

type HeroSetup = Box<dyn FnOnce(&mut Hero)>;

/// Builder for a hand-made dungeon level with a scripted dice sequence.
pub struct ArenaBuilder {
    width: i32,
    height: i32,
    player: (i32, i32),
    player_initiative: i32,
    rolls: Vec<i32>,
    monsters: Vec<(Monster, i32)>,
    npcs: Vec<Npc>,
    tiles: Vec<(i32, i32, Tile)>,
    items: Vec<(i32, i32, Item)>,
    stairs_down: Option<(i32, i32)>,
    door: Option<(i32, i32)>,
    hero_setup: Vec<HeroSetup>,
    config: CoreConfig,
}

impl ArenaBuilder {
    /// 15x11 arena, player at (5, 5) with initiative 10.
    pub fn new() -> Self {
        Self {
            width: 15,
            height: 11,
            player: (5, 5),
            player_initiative: 10,
            rolls: Vec::new(),
            monsters: Vec::new(),
            npcs: Vec::new(),
            tiles: Vec::new(),
            items: Vec::new(),
            stairs_down: None,
            door: None,
            hero_setup: Vec::new(),
            config: CoreConfig::default(),
        }
    }

    /// Queues dice results, consumed in order by every roll the session makes.
    pub fn rolls(mut self, rolls: impl IntoIterator<Item = i32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn player_at(mut self, x: i32, y: i32) -> Self {
        self.player = (x, y);
        self
    }

    pub fn player_initiative(mut self, initiative: i32) -> Self {
        self.player_initiative = initiative;
        self
    }

    /// Tweaks the starting adventurer before the session sees it.
    pub fn hero(mut self, setup: impl FnOnce(&mut Hero) + 'static) -> Self {
        self.hero_setup.push(Box::new(setup));
        self
    }

    /// Adds a monster. Disguised monsters get no slot in turn order.
    pub fn monster(mut self, monster: Monster, initiative: i32) -> Self {
        self.monsters.push((monster, initiative));
        self
    }

    pub fn npc(mut self, npc: Npc) -> Self {
        self.npcs.push(npc);
        self
    }

    pub fn tile(mut self, x: i32, y: i32, tile: Tile) -> Self {
        self.tiles.push((x, y, tile));
        self
    }

    pub fn item(mut self, x: i32, y: i32, item: Item) -> Self {
        self.items.push((x, y, item));
        self
    }

    pub fn stairs_down(mut self, x: i32, y: i32) -> Self {
        self.stairs_down = Some((x, y));
        self.tiles.push((x, y, Tile::StairsDown));
        self
    }

    /// A door back up to the tavern.
    pub fn door(mut self, x: i32, y: i32) -> Self {
        self.door = Some((x, y));
        self.tiles.push((x, y, Tile::Door));
        self
    }

    pub fn config(mut self, config: CoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the session on dungeon level 1. Monster ids come back in the
    /// order the monsters were added.
    pub fn build(self) -> (GameSession, Vec<EntityId>) {
        let mut map = TileMap::new(self.width, self.height, Tile::Wall);
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                map.replace(x, y, Tile::Floor).expect("inside the arena");
            }
        }
        for (x, y, tile) in self.tiles {
            map.replace(x, y, tile).expect("tile inside the arena");
        }
        for (x, y, item) in self.items {
            map.place_item(x, y, item);
        }

        let monsters = self
            .monsters
            .into_iter()
            .map(|(mut monster, initiative)| {
                monster.initiative = initiative;
                monster
            })
            .collect();
        let level = GeneratedLevel {
            depth: 1,
            map,
            rooms: Vec::new(),
            player_start: self.player,
            stairs_up: None,
            stairs_down: self.stairs_down,
            door: self.door,
            monsters,
            npcs: self.npcs,
            shortfalls: Vec::new(),
        };

        let mut hero = Hero::adventurer(self.config.rules.inventory_capacity);
        hero.initiative = self.player_initiative;
        for setup in self.hero_setup {
            setup(&mut hero);
        }

        let rng = ScriptedRng::new(self.rolls);
        let session = GameSession::from_level(self.config, Box::new(rng), hero, level);
        let ids = session
            .entities()
            .iter()
            .filter(|e| e.as_monster().is_some())
            .map(|e| e.id)
            .collect();
        (session, ids)
    }
}

impl Default for ArenaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn order as plain ids.
pub fn order_ids(session: &GameSession) -> Vec<EntityId> {
    session.turns().order().iter().map(|slot| slot.id).collect()
}

/// Fills the bag with healing potions until it holds `len` items.
pub fn fill_bag(hero: &mut Hero, len: usize) {
    while hero.bag.len() < len {
        hero.bag
            .add(Item::potion(PotionKind::Healing))
            .expect("bag has room");
    }
}

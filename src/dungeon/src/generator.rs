//src/dungeon/src/generator.rs
//! 随机地牢层生成
use combat::{Monster, MonsterKind, RollSource};
use error::ActionError;
use items::{Armor, Item, Potion, ToolKind, Weapon};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::level::tiles::{Decoration, Tile};
use crate::level::{Room, TileMap};
use crate::npc::Npc;
use crate::trap::Trap;

/// 生成器参数（概率均为整数百分比）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    pub max_rooms: usize,
    pub room_min_size: i32,
    pub room_max_size: i32,
    /// Upper bound on room placement attempts, so small maps cannot loop forever.
    pub max_attempts: u32,
    pub decoration_chance: u32,
    pub torch_chance: u32,
    pub crate_chance: u32,
    pub item_chance: u32,
    pub chest_chance: u32,
    pub mimic_chance: u32,
    pub trap_chance: u32,
    pub healer_chance: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 45,
            max_rooms: 12,
            room_min_size: 5,
            room_max_size: 10,
            max_attempts: 200,
            decoration_chance: 3,
            torch_chance: 40,
            crate_chance: 15,
            item_chance: 35,
            chest_chance: 30,
            mimic_chance: 20,
            trap_chance: 20,
            healer_chance: 25,
        }
    }
}

/// Everything a freshly generated level hands to the session.
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    /// 0 is the tavern.
    pub depth: u32,
    pub map: TileMap,
    pub rooms: Vec<Room>,
    pub player_start: (i32, i32),
    pub stairs_up: Option<(i32, i32)>,
    pub stairs_down: Option<(i32, i32)>,
    pub door: Option<(i32, i32)>,
    pub monsters: Vec<Monster>,
    pub npcs: Vec<Npc>,
    /// Placements the generator had to give up on.
    pub shortfalls: Vec<ActionError>,
}

impl GeneratedLevel {
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.monsters.iter().any(|m| m.position() == (x, y))
            || self.npcs.iter().any(|n| n.position() == (x, y))
    }

    fn is_reserved(&self, x: i32, y: i32) -> bool {
        [Some(self.player_start), self.stairs_up, self.stairs_down, self.door].contains(&Some((x, y)))
    }

    /// Bare floor with no feature, entity or item on it.
    fn is_free(&self, x: i32, y: i32) -> bool {
        self.map.get(x, y).is_some_and(Tile::is_bare_floor)
            && !self.is_reserved(x, y)
            && !self.is_occupied(x, y)
            && !self.map.has_item(x, y)
    }

    fn start_room(&self) -> usize {
        let (x, y) = self.player_start;
        self.rooms.iter().position(|r| r.contains(x, y)).unwrap_or(0)
    }

    fn shortfall(&mut self, what: &'static str, placed: usize, requested: usize) {
        warn!(depth = self.depth, what, placed, requested, "generation capacity degraded");
        self.shortfalls.push(ActionError::Capacity {
            what,
            placed,
            requested,
        });
    }
}

/// 地牢层生成器
pub struct LevelGenerator<'a> {
    config: &'a GeneratorConfig,
    rng: &'a mut dyn RollSource,
}

impl<'a> LevelGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig, rng: &'a mut dyn RollSource) -> Self {
        Self { config, rng }
    }

    pub fn generate(&mut self, depth: u32, spawn_on_stairs_up: bool) -> GeneratedLevel {
        let mut map = TileMap::new(self.config.width, self.config.height, Tile::Wall);
        let rooms = self.place_rooms(&mut map);

        let mut level = GeneratedLevel {
            depth,
            map,
            rooms,
            player_start: (0, 0),
            stairs_up: None,
            stairs_down: None,
            door: None,
            monsters: Vec::new(),
            npcs: Vec::new(),
            shortfalls: Vec::new(),
        };
        if level.rooms.len() < self.config.max_rooms {
            let placed = level.rooms.len();
            level.shortfall("rooms", placed, self.config.max_rooms);
        }

        self.place_exits(&mut level);
        level.player_start = match (spawn_on_stairs_up, level.stairs_up, level.stairs_down) {
            (true, Some(up), _) => up,
            (false, _, Some(down)) => down,
            _ => level.rooms.first().map(Room::center).unwrap_or((1, 1)),
        };

        self.place_monsters(&mut level);
        self.place_healer(&mut level);
        self.place_center_items(&mut level);
        self.place_chests(&mut level);
        self.place_traps(&mut level);

        info!(
            depth,
            rooms = level.rooms.len(),
            monsters = level.monsters.len(),
            items = level.map.items.len(),
            torches = level.map.torches.len(),
            "level generated"
        );
        level
    }

    fn place_rooms(&mut self, map: &mut TileMap) -> Vec<Room> {
        let cfg = self.config;
        let mut rooms: Vec<Room> = Vec::new();
        let mut attempts = 0;
        while rooms.len() < cfg.max_rooms && attempts < cfg.max_attempts {
            attempts += 1;
            let w = self.rng.range(cfg.room_min_size, cfg.room_max_size);
            let h = self.rng.range(cfg.room_min_size, cfg.room_max_size);
            if w + 1 >= map.width || h + 1 >= map.height {
                continue;
            }
            let x = self.rng.range(0, map.width - w - 1);
            let y = self.rng.range(0, map.height - h - 1);
            let room = Room::new(x, y, w, h);
            if rooms.iter().any(|other| room.intersects(other)) {
                continue;
            }

            map.carve_room(&room);
            self.decorate(map, &room);
            if let Some(prev) = rooms.last() {
                self.connect(map, prev.center(), room.center());
            }
            rooms.push(room);
        }

        if rooms.is_empty() && map.width >= 3 && map.height >= 3 {
            // nothing fitted, fall back to one room filling the map
            let room = Room::new(0, 0, map.width - 1, map.height - 1);
            map.carve_room(&room);
            rooms.push(room);
        }
        rooms
    }

    /// Floor clutter, at most one crate, and maybe a torch on the top wall.
    fn decorate(&mut self, map: &mut TileMap, room: &Room) {
        for (x, y) in room.interior().collect::<Vec<_>>() {
            if self.rng.percent(self.config.decoration_chance) {
                let decoration = match self.rng.range(0, 2) {
                    0 => Decoration::Bones,
                    1 => Decoration::Rubble,
                    _ => Decoration::Moss,
                };
                let _ = map.replace(x, y, Tile::Decoration(decoration));
            }
        }

        // crates stay off the room's edge so they never seal an entrance, and
        // off the center where the player may start
        let center = room.center();
        let inner: Vec<_> = room.inner().filter(|&cell| cell != center).collect();
        if !inner.is_empty() && self.rng.percent(self.config.crate_chance) {
            let (x, y) = inner[self.rng.pick(inner.len())];
            let _ = map.replace(x, y, Tile::Crate);
        }

        if self.rng.percent(self.config.torch_chance) {
            let x = self.rng.range(room.x1 + 1, room.x2 - 1);
            // an earlier corridor may already run through this wall
            if map.get(x, room.y1) == Some(&Tile::Wall) {
                map.add_torch(x, room.y1);
            }
        }
    }

    /// L-shaped corridor, horizontal or vertical leg first at random.
    fn connect(&mut self, map: &mut TileMap, from: (i32, i32), to: (i32, i32)) {
        let (x1, y1) = from;
        let (x2, y2) = to;
        if self.rng.percent(50) {
            map.carve_h_tunnel(x1, x2, y1);
            map.carve_v_tunnel(y1, y2, x2);
        } else {
            map.carve_v_tunnel(y1, y2, x1);
            map.carve_h_tunnel(x1, x2, y2);
        }
    }

    fn place_exits(&mut self, level: &mut GeneratedLevel) {
        let n = level.rooms.len();
        if n == 0 {
            return;
        }

        if level.depth > 1 {
            let (x, y) = level.rooms[0].center();
            if level.map.replace(x, y, Tile::StairsUp).is_ok() {
                level.stairs_up = Some((x, y));
            }
        }
        if n >= 3 {
            if let Some((x, y)) = free_cell_near(level, n - 2) {
                let _ = level.map.replace(x, y, Tile::StairsDown);
                level.stairs_down = Some((x, y));
            }
        }
        if let Some((x, y)) = free_cell_near(level, n - 1) {
            let _ = level.map.replace(x, y, Tile::Door);
            level.door = Some((x, y));
        }
    }

    fn place_monsters(&mut self, level: &mut GeneratedLevel) {
        let requested = 2 + level.depth as usize;
        let start = level.start_room();
        let mut candidates: Vec<usize> = (0..level.rooms.len()).filter(|&i| i != start).collect();
        shuffle(&mut candidates, self.rng);

        let count = requested.min(level.rooms.len().saturating_sub(1));
        let tier = MonsterKind::tier_for_level(level.depth);
        let mut placed = 0;
        for &room_index in candidates.iter().take(count) {
            let room = level.rooms[room_index];
            let spot = (0..10).map(|_| room.random_point(self.rng)).find(|&(x, y)| {
                level.map.is_walkable(x, y) && !level.is_reserved(x, y) && !level.is_occupied(x, y)
            });
            if let Some((x, y)) = spot {
                let kind = tier[self.rng.pick(tier.len())];
                level.monsters.push(Monster::new(kind, x, y));
                placed += 1;
            }
        }
        if placed < requested {
            level.shortfall("monsters", placed, requested);
        }
    }

    /// At most one healer, tucked away from the room's center lines and from
    /// any corridor opening.
    fn place_healer(&mut self, level: &mut GeneratedLevel) {
        if level.rooms.is_empty() || !self.rng.percent(self.config.healer_chance) {
            return;
        }
        let room = level.rooms[self.rng.pick(level.rooms.len())];
        let (cx, cy) = room.center();
        let spots: Vec<(i32, i32)> = room
            .interior()
            .filter(|&(x, y)| x != cx && y != cy && level.is_free(x, y))
            .filter(|&(x, y)| {
                neighbors(x, y).all(|(nx, ny)| room.contains(nx, ny) || !level.map.is_walkable(nx, ny))
            })
            .collect();
        if spots.is_empty() {
            return;
        }
        let (x, y) = spots[self.rng.pick(spots.len())];
        level.npcs.push(Npc::healer(x, y));
    }

    /// Loot on room centers. Centers already taken by stairs, the door or an
    /// entity are skipped.
    fn place_center_items(&mut self, level: &mut GeneratedLevel) {
        let start = level.start_room();
        for index in 0..level.rooms.len() {
            if index == start || !self.rng.percent(self.config.item_chance) {
                continue;
            }
            let (x, y) = level.rooms[index].center();
            if level.is_free(x, y) {
                let item = random_loot(level.depth, self.rng);
                level.map.place_item(x, y, item);
            }
        }
    }

    fn place_chests(&mut self, level: &mut GeneratedLevel) {
        let start = level.start_room();
        for index in 0..level.rooms.len() {
            if index == start || !self.rng.percent(self.config.chest_chance) {
                continue;
            }
            let room = level.rooms[index];
            let Some((x, y)) = (0..10).map(|_| room.random_point(self.rng)).find(|&(x, y)| level.is_free(x, y))
            else {
                continue;
            };
            if self.rng.percent(self.config.mimic_chance) {
                level.monsters.push(Monster::mimic(x, y));
            } else {
                let count = 1 + level.depth / 3 + self.rng.range(0, 1) as u32;
                let contents = (0..count).map(|_| random_loot(level.depth, self.rng)).collect();
                level.map.place_item(x, y, Item::chest(contents));
            }
        }
    }

    fn place_traps(&mut self, level: &mut GeneratedLevel) {
        let start = level.start_room();
        let kinds = Trap::kinds_for_level(level.depth);
        for index in 0..level.rooms.len() {
            if index == start || !self.rng.percent(self.config.trap_chance) {
                continue;
            }
            let room = level.rooms[index];
            let center = room.center();
            let spot = (0..10)
                .map(|_| room.random_point(self.rng))
                .find(|&(x, y)| (x, y) != center && level.is_free(x, y));
            if let Some((x, y)) = spot {
                let kind = kinds[self.rng.pick(kinds.len())];
                let _ = level.map.replace(x, y, Tile::Trap(Trap::new(kind, level.depth)));
            }
        }
    }
}

/// Convenience wrapper around [`LevelGenerator`].
pub fn generate_level(
    config: &GeneratorConfig,
    depth: u32,
    spawn_on_stairs_up: bool,
    rng: &mut dyn RollSource,
) -> GeneratedLevel {
    LevelGenerator::new(config, rng).generate(depth, spawn_on_stairs_up)
}

/// 按层数随机生成战利品
pub fn random_loot(depth: u32, rng: &mut dyn RollSource) -> Item {
    let roll = rng.range(1, 100);
    match roll {
        1..=40 => Item::new(items::ItemKind::Potion(Potion::for_level(depth, rng.percent(30)))),
        41..=65 => {
            let kinds = Weapon::available_at(depth);
            let kind = kinds[rng.pick(kinds.len())];
            let bonus = if depth >= 4 && rng.percent(25) { 1 } else { 0 };
            Item::weapon(Weapon::enchanted(kind, bonus))
        }
        66..=85 => {
            let kinds = Armor::available_at(depth);
            Item::armor(kinds[rng.pick(kinds.len())])
        }
        _ => Item::tools(ToolKind::ThievesTools),
    }
}

/// Interior cell of `room` closest to its center that is still bare floor.
fn free_cell_near(level: &GeneratedLevel, room_index: usize) -> Option<(i32, i32)> {
    let room = level.rooms[room_index];
    let (cx, cy) = room.center();
    let mut cells: Vec<(i32, i32)> = room.interior().collect();
    cells.sort_by_key(|&(x, y)| (x - cx).abs() + (y - cy).abs());
    cells.into_iter().find(|&(x, y)| level.is_free(x, y))
}

fn neighbors(x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> {
    (-1..=1)
        .flat_map(move |dy| (-1..=1).map(move |dx| (x + dx, y + dy)))
        .filter(move |&p| p != (x, y))
}

fn shuffle<T>(values: &mut [T], rng: &mut dyn RollSource) {
    for i in (1..values.len()).rev() {
        let j = rng.range(0, i as i32) as usize;
        values.swap(i, j);
    }
}

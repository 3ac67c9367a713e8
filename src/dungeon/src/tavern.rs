//! The tavern: a small, fully lit hub with a barkeep and the door down.
use items::{Item, PotionKind};
use tracing::info;

use crate::generator::GeneratedLevel;
use crate::level::tiles::{Decoration, Tile};
use crate::level::{Room, TileMap};
use crate::npc::Npc;

pub const TAVERN_WIDTH: i32 = 24;
pub const TAVERN_HEIGHT: i32 = 14;

/// 生成酒馆（固定布局，不需要随机数）
pub fn generate_tavern() -> GeneratedLevel {
    let room = Room::new(0, 0, TAVERN_WIDTH - 1, TAVERN_HEIGHT - 1);
    let mut map = TileMap::new(TAVERN_WIDTH, TAVERN_HEIGHT, Tile::Wall);
    map.carve_room(&room);

    // bar counter along the top with the barkeep behind it
    for x in 3..=10 {
        let _ = map.replace(x, 3, Tile::Bar);
    }
    for (x, y) in [(15, 4), (18, 4), (15, 8), (18, 8)] {
        let _ = map.replace(x, y, Tile::Decoration(Decoration::Rubble));
    }
    map.add_torch(6, 0);
    map.add_torch(17, 0);

    let door = (TAVERN_WIDTH / 2, TAVERN_HEIGHT - 1);
    let _ = map.replace(door.0, door.1, Tile::Door);
    map.place_item(4, 4, Item::potion(PotionKind::Healing));

    let level = GeneratedLevel {
        depth: 0,
        map,
        rooms: vec![room],
        player_start: (door.0, door.1 - 2),
        stairs_up: None,
        stairs_down: None,
        door: Some(door),
        monsters: Vec::new(),
        npcs: vec![Npc::barkeep(6, 2)],
        shortfalls: Vec::new(),
    };
    info!(width = TAVERN_WIDTH, height = TAVERN_HEIGHT, "tavern generated");
    level
}

// src/dungeon/src/level/tiles.rs
use crate::trap::{Trap, TrapState};

/// 地面装饰（可通行）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    Bones,
    Rubble,
    Moss,
}

/// 地图格子
///
/// Tiles are small immutable values. A cell changes only by having its tile
/// replaced wholesale (a smashed crate becomes floor, a found trap becomes a
/// revealed trap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
    /// Exit between the tavern and the dungeon.
    Door,
    StairsDown,
    StairsUp,
    /// Wall-mounted light source.
    Torch,
    Decoration(Decoration),
    /// Destructible obstacle.
    Crate,
    /// Tavern bar counter.
    Bar,
    Trap(Trap),
}

/// 格子的属性信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileInfo {
    pub name: &'static str,
    pub glyph: char,
    pub walkable: bool,
    pub blocks_sight: bool,
    pub destructible: bool,
}

impl TileInfo {
    const fn new(name: &'static str, glyph: char, walkable: bool, blocks_sight: bool) -> Self {
        Self {
            name,
            glyph,
            walkable,
            blocks_sight,
            destructible: false,
        }
    }
}

impl Tile {
    pub fn info(&self) -> TileInfo {
        match self {
            Tile::Floor => TileInfo::new("floor", '.', true, false),
            Tile::Wall => TileInfo::new("wall", '#', false, true),
            Tile::Door => TileInfo::new("door", '+', true, false),
            Tile::StairsDown => TileInfo::new("stairs down", '>', true, false),
            Tile::StairsUp => TileInfo::new("stairs up", '<', true, false),
            Tile::Torch => TileInfo::new("torch", '*', false, true),
            Tile::Decoration(Decoration::Bones) => TileInfo::new("bones", ',', true, false),
            Tile::Decoration(Decoration::Rubble) => TileInfo::new("rubble", ';', true, false),
            Tile::Decoration(Decoration::Moss) => TileInfo::new("moss", '"', true, false),
            Tile::Crate => TileInfo {
                destructible: true,
                ..TileInfo::new("crate", '%', false, true)
            },
            Tile::Bar => TileInfo::new("bar counter", '=', false, false),
            Tile::Trap(trap) => match trap.state {
                // hidden traps look like plain floor
                TrapState::Hidden => TileInfo::new("floor", '.', true, false),
                TrapState::Revealed => TileInfo::new("trap", '^', true, false),
                TrapState::Triggered => TileInfo::new("sprung trap", '^', true, false),
                TrapState::Disarmed => TileInfo::new("disarmed trap", '_', true, false),
            },
        }
    }

    pub fn is_walkable(&self) -> bool {
        self.info().walkable
    }

    pub fn blocks_sight(&self) -> bool {
        self.info().blocks_sight
    }

    pub fn is_destructible(&self) -> bool {
        self.info().destructible
    }

    pub fn as_trap(&self) -> Option<&Trap> {
        match self {
            Tile::Trap(trap) => Some(trap),
            _ => None,
        }
    }

    /// Plain floor with nothing on it, eligible for placing features.
    pub fn is_bare_floor(&self) -> bool {
        matches!(self, Tile::Floor)
    }
}

//src/dungeon/src/lib.rs
//! 地牢：瓦片地图、视野、陷阱以及层级生成

pub mod fov;
pub mod generator;
pub mod level;
pub mod npc;
pub mod tavern;
pub mod trap;

pub use crate::fov::{FieldOfView, FovConfig, Visibility, trace_ray};
pub use crate::generator::{GeneratedLevel, GeneratorConfig, LevelGenerator, generate_level, random_loot};
pub use crate::level::tiles::{Decoration, Tile, TileInfo};
pub use crate::level::{GroundItem, Room, TileMap};
pub use crate::npc::{Npc, NpcKind};
pub use crate::tavern::generate_tavern;
pub use crate::trap::{SaveRider, Trap, TrapKind, TrapState};

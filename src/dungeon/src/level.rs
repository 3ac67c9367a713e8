// src/dungeon/src/level.rs
use combat::RollSource;
use error::ActionError;
use items::Item;

pub mod tiles;

use crate::level::tiles::Tile;

/// 房间：包含墙壁在内的矩形区域，内部为 (x1+1..x2, y1+1..y2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Touching rectangles count as intersecting so rooms never share a wall.
    pub fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x > self.x1 && x < self.x2 && y > self.y1 && y < self.y2
    }

    /// 房间内部所有格子（按行遍历）
    pub fn interior(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        ((self.y1 + 1)..self.y2).flat_map(move |y| ((self.x1 + 1)..self.x2).map(move |x| (x, y)))
    }

    /// Interior cells that do not touch the room's walls.
    pub fn inner(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.interior()
            .filter(|&(x, y)| x > self.x1 + 1 && x < self.x2 - 1 && y > self.y1 + 1 && y < self.y2 - 1)
    }

    pub fn random_point(&self, rng: &mut dyn RollSource) -> (i32, i32) {
        (
            rng.range(self.x1 + 1, self.x2 - 1),
            rng.range(self.y1 + 1, self.y2 - 1),
        )
    }
}

/// 地面上的物品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundItem {
    pub x: i32,
    pub y: i32,
    pub item: Item,
}

/// 瓦片地图，按行主序存储
#[derive(Debug, Clone)]
pub struct TileMap {
    pub width: i32,
    pub height: i32,
    cells: Vec<Tile>,
    pub items: Vec<GroundItem>,
    /// Positions of wall torches acting as light sources.
    pub torches: Vec<(i32, i32)>,
}

impl TileMap {
    pub fn new(width: i32, height: i32, fill: Tile) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![fill; (width * height) as usize],
            items: Vec::new(),
            torches: Vec::new(),
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| (y * self.width + x) as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Same as [`TileMap::get`] but reports out-of-bounds as an action error.
    pub fn tile(&self, x: i32, y: i32) -> Result<&Tile, ActionError> {
        self.get(x, y).ok_or(ActionError::OutOfBounds)
    }

    /// Out-of-bounds is never walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Tile::is_walkable)
    }

    /// Out-of-bounds blocks sight.
    pub fn blocks_sight(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(Tile::blocks_sight)
    }

    /// 替换格子，返回旧值
    pub fn replace(&mut self, x: i32, y: i32, tile: Tile) -> Result<Tile, ActionError> {
        let i = self.index(x, y).ok_or(ActionError::OutOfBounds)?;
        Ok(std::mem::replace(&mut self.cells[i], tile))
    }

    /// Smashes a destructible tile into floor. Returns false if nothing broke.
    pub fn destroy(&mut self, x: i32, y: i32) -> bool {
        match self.get(x, y) {
            Some(tile) if tile.is_destructible() => self.replace(x, y, Tile::Floor).is_ok(),
            _ => false,
        }
    }

    /// Carves a cell into floor unless it is already walkable.
    pub fn carve(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get(x, y) {
            if tile.is_walkable() {
                return;
            }
            if *tile == Tile::Torch {
                self.torches.retain(|&t| t != (x, y));
            }
            let _ = self.replace(x, y, Tile::Floor);
        }
    }

    pub fn carve_room(&mut self, room: &Room) {
        for (x, y) in room.interior().collect::<Vec<_>>() {
            let _ = self.replace(x, y, Tile::Floor);
        }
    }

    pub fn carve_h_tunnel(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.carve(x, y);
        }
    }

    pub fn carve_v_tunnel(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.carve(x, y);
        }
    }

    pub fn add_torch(&mut self, x: i32, y: i32) -> bool {
        if self.replace(x, y, Tile::Torch).is_ok() {
            self.torches.push((x, y));
            true
        } else {
            false
        }
    }

    pub fn place_item(&mut self, x: i32, y: i32, item: Item) {
        self.items.push(GroundItem { x, y, item });
    }

    pub fn item_at(&self, x: i32, y: i32) -> Option<&Item> {
        self.items.iter().find(|g| g.x == x && g.y == y).map(|g| &g.item)
    }

    pub fn item_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Item> {
        self.items
            .iter_mut()
            .find(|g| g.x == x && g.y == y)
            .map(|g| &mut g.item)
    }

    /// 拾取地面物品（同一格有多件时取最早放下的）
    pub fn take_item(&mut self, x: i32, y: i32) -> Option<Item> {
        let pos = self.items.iter().position(|g| g.x == x && g.y == y)?;
        Some(self.items.remove(pos).item)
    }

    pub fn has_item(&self, x: i32, y: i32) -> bool {
        self.item_at(x, y).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::PotionKind;

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let map = TileMap::new(10, 5, Tile::Floor);
        assert!(map.get(10, 0).is_none());
        assert!(map.get(-1, 2).is_none());
        assert!(!map.is_walkable(0, 5));
        assert!(map.blocks_sight(99, 99));
        assert_eq!(map.tile(0, -1), Err(ActionError::OutOfBounds));
    }

    #[test]
    fn test_replace_returns_old_tile() {
        let mut map = TileMap::new(4, 4, Tile::Wall);
        assert_eq!(map.replace(1, 1, Tile::Floor), Ok(Tile::Wall));
        assert!(map.is_walkable(1, 1));
        assert!(map.replace(4, 1, Tile::Floor).is_err());
    }

    #[test]
    fn test_destroy_crate() {
        let mut map = TileMap::new(4, 4, Tile::Floor);
        map.replace(2, 2, Tile::Crate).unwrap();
        assert!(!map.is_walkable(2, 2));
        assert!(map.destroy(2, 2));
        assert!(map.is_walkable(2, 2));
        assert!(!map.destroy(2, 2));
    }

    #[test]
    fn test_carving_through_torch_removes_light() {
        let mut map = TileMap::new(8, 8, Tile::Wall);
        map.add_torch(3, 0);
        map.carve_v_tunnel(0, 4, 3);
        assert!(map.torches.is_empty());
        assert!(map.is_walkable(3, 0));
    }

    #[test]
    fn test_room_geometry() {
        let a = Room::new(0, 0, 5, 5);
        let b = Room::new(5, 0, 5, 5);
        let c = Room::new(6, 0, 5, 5);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.center(), (2, 2));
        assert_eq!(a.interior().count(), 16);
        assert_eq!(a.inner().count(), 4);
        assert!(a.contains(1, 1));
        assert!(!a.contains(0, 1));
    }

    #[test]
    fn test_ground_items() {
        let mut map = TileMap::new(4, 4, Tile::Floor);
        map.place_item(1, 1, Item::potion(PotionKind::Healing));
        assert!(map.has_item(1, 1));
        assert!(map.take_item(1, 1).is_some());
        assert!(map.take_item(1, 1).is_none());
    }
}

//! Raycast field of view with separate player and torch light layers.
use serde::{Deserialize, Serialize};

use crate::level::TileMap;

/// 视野参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FovConfig {
    pub player_radius: i32,
    pub torch_radius: i32,
    pub angle_step_degrees: u32,
}

impl Default for FovConfig {
    fn default() -> Self {
        Self {
            player_radius: 8,
            torch_radius: 5,
            angle_step_degrees: 2,
        }
    }
}

/// Per-cell visibility. Player sight takes precedence over torchlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Unexplored,
    Explored,
    VisibleByPlayer,
    VisibleByTorch,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::VisibleByPlayer | Visibility::VisibleByTorch)
    }
}

/// Cells touched by one ray, in order. The ray stops after the first cell that
/// blocks sight (that cell is included) or when it leaves the map.
pub fn trace_ray(map: &TileMap, origin: (i32, i32), angle_degrees: f64, radius: i32) -> Vec<(i32, i32)> {
    let (dy, dx) = angle_degrees.to_radians().sin_cos();
    let mut cells = Vec::with_capacity(radius.max(0) as usize);
    for step in 1..=radius {
        let x = (origin.0 as f64 + dx * step as f64).round() as i32;
        let y = (origin.1 as f64 + dy * step as f64).round() as i32;
        if !map.in_bounds(x, y) {
            break;
        }
        cells.push((x, y));
        if map.blocks_sight(x, y) {
            break;
        }
    }
    cells
}

/// 视野图层：玩家视野、火把光照和已探索区域
#[derive(Debug, Clone)]
pub struct FieldOfView {
    width: i32,
    height: i32,
    player: Vec<bool>,
    torch: Vec<bool>,
    explored: Vec<bool>,
}

impl FieldOfView {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        Self {
            width: width.max(0),
            height: height.max(0),
            player: vec![false; size],
            torch: vec![false; size],
            explored: vec![false; size],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Clears both light layers and recasts rays from the player and every
    /// torch. Explored cells are never forgotten.
    pub fn recompute(&mut self, map: &TileMap, player: (i32, i32), config: &FovConfig) {
        if map.width != self.width || map.height != self.height {
            *self = Self::new(map.width, map.height);
        }
        self.player.fill(false);
        self.torch.fill(false);

        let step = config.angle_step_degrees.clamp(1, 360) as usize;
        cast(map, player, config.player_radius, step, |i| {
            self.player[i] = true;
            self.explored[i] = true;
        });
        for &torch in &map.torches {
            cast(map, torch, config.torch_radius, step, |i| {
                self.torch[i] = true;
                self.explored[i] = true;
            });
        }
    }

    /// The tavern is fully lit.
    pub fn reveal_all(&mut self) {
        self.player.fill(true);
        self.explored.fill(true);
    }

    pub fn classify(&self, x: i32, y: i32) -> Visibility {
        match self.index(x, y) {
            Some(i) if self.player[i] => Visibility::VisibleByPlayer,
            Some(i) if self.torch[i] => Visibility::VisibleByTorch,
            Some(i) if self.explored[i] => Visibility::Explored,
            _ => Visibility::Unexplored,
        }
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.classify(x, y).is_visible()
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.explored[i])
    }

    pub fn explored_count(&self) -> usize {
        self.explored.iter().filter(|&&e| e).count()
    }
}

/// Marks the source cell and every cell along rays spaced `step` degrees apart.
/// Sources outside the map are ignored.
fn cast<F>(map: &TileMap, origin: (i32, i32), radius: i32, step: usize, mut mark: F)
where
    F: FnMut(usize),
{
    if !map.in_bounds(origin.0, origin.1) {
        return;
    }
    let index = |(x, y): (i32, i32)| (y * map.width + x) as usize;
    mark(index(origin));
    for angle in (0..360).step_by(step) {
        for cell in trace_ray(map, origin, angle as f64, radius) {
            mark(index(cell));
        }
    }
}

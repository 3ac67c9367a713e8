//src/combat/src/rng.rs
use std::collections::VecDeque;

use items::Dice;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// The single randomness seam of the simulation.
///
/// Everything that rolls takes `&mut dyn RollSource`, so a scripted source can
/// stand in for the seeded generator wherever an exact sequence is needed.
pub trait RollSource {
    /// Uniform integer in `low..=high`. A degenerate range yields `low`.
    fn range(&mut self, low: i32, high: i32) -> i32;

    /// `chance` percent (0..=100) success.
    fn percent(&mut self, chance: u32) -> bool {
        self.range(1, 100) <= chance as i32
    }

    fn d20(&mut self) -> i32 {
        self.range(1, 20)
    }

    /// 掷骰 `NdS+M`
    fn roll(&mut self, dice: Dice) -> i32 {
        let mut total = dice.modifier;
        for _ in 0..dice.count {
            total += self.range(1, dice.sides.max(1) as i32);
        }
        total
    }

    /// Index into a non-empty collection of `len` elements.
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.range(0, len as i32 - 1) as usize
    }
}

/// 地牢专用的确定性RNG
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: Pcg32,
    seed: u64,
}

impl DungeonRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// 使用随机种子创建
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 重置RNG状态（使用当前种子）
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }
}

impl RollSource for DungeonRng {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Replays queued rolls first, then falls back to a seeded generator.
///
/// Queued values are clamped into the requested range, so a queued `20`
/// asked for as `1..=4` comes out as `4`.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    queue: VecDeque<i32>,
    fallback: DungeonRng,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            fallback: DungeonRng::new(0x5EED),
        }
    }

    pub fn with_fallback_seed(rolls: impl IntoIterator<Item = i32>, seed: u64) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            fallback: DungeonRng::new(seed),
        }
    }

    pub fn push(&mut self, roll: i32) {
        self.queue.push_back(roll);
    }

    pub fn extend(&mut self, rolls: impl IntoIterator<Item = i32>) {
        self.queue.extend(rolls);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollSource for ScriptedRng {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        match self.queue.pop_front() {
            Some(_) if low >= high => low,
            Some(value) => value.clamp(low, high),
            None => self.fallback.range(low, high),
        }
    }
}

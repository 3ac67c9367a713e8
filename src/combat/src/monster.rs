// src/combat/src/monster.rs

use ratatui::style::Color;
use strum::{Display, EnumIter};

use crate::combatant::{Combatant, apply_damage, apply_heal};
use crate::chebyshev;

/// 怪物种类，按层数分为三个梯队
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MonsterKind {
    Rat,
    Kobold,
    Goblin,
    Orc,
    Skeleton,
    #[strum(serialize = "Giant Spider")]
    GiantSpider,
    Ogre,
    Troll,
    Wraith,
    Mimic,
}

/// Hand-tuned stat line for an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub hp: i32,
    pub attack_power: i32,
    pub attack_bonus: i32,
    pub armor_class: i32,
    pub defense: i32,
    pub xp_reward: u32,
    pub glyph: char,
    pub color: Color,
}

impl MonsterKind {
    pub fn template(self) -> MonsterTemplate {
        let (hp, attack_power, attack_bonus, armor_class, defense, xp_reward, glyph, color) =
            match self {
                MonsterKind::Rat => (4, 0, 2, 10, 0, 10, 'r', Color::Rgb(160, 120, 90)),
                MonsterKind::Kobold => (6, 1, 3, 11, 0, 15, 'k', Color::Rgb(200, 120, 60)),
                MonsterKind::Goblin => (8, 1, 4, 12, 0, 25, 'g', Color::Rgb(90, 180, 60)),
                MonsterKind::Orc => (14, 2, 4, 13, 1, 50, 'o', Color::Rgb(60, 140, 40)),
                MonsterKind::Skeleton => (13, 2, 4, 13, 1, 50, 's', Color::Rgb(220, 220, 200)),
                MonsterKind::GiantSpider => (16, 2, 5, 14, 1, 70, 'S', Color::Rgb(120, 60, 140)),
                MonsterKind::Ogre => (30, 4, 6, 11, 2, 150, 'O', Color::Rgb(170, 130, 70)),
                MonsterKind::Troll => (36, 4, 7, 15, 2, 200, 'T', Color::Rgb(70, 120, 70)),
                MonsterKind::Wraith => (28, 3, 6, 13, 2, 180, 'W', Color::Rgb(130, 130, 200)),
                MonsterKind::Mimic => (20, 3, 5, 12, 1, 100, 'M', Color::Rgb(180, 140, 40)),
            };
        MonsterTemplate {
            hp,
            attack_power,
            attack_bonus,
            armor_class,
            defense,
            xp_reward,
            glyph,
            color,
        }
    }

    /// Archetypes that spawn at a given dungeon level.
    pub fn tier_for_level(level: u32) -> &'static [MonsterKind] {
        match level {
            0..=2 => &[MonsterKind::Rat, MonsterKind::Kobold, MonsterKind::Goblin],
            3..=5 => &[
                MonsterKind::Goblin,
                MonsterKind::Orc,
                MonsterKind::Skeleton,
                MonsterKind::GiantSpider,
            ],
            _ => &[
                MonsterKind::Orc,
                MonsterKind::Ogre,
                MonsterKind::Troll,
                MonsterKind::Wraith,
            ],
        }
    }
}

/// What a monster wants to do with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterIntent {
    Attack,
    Move(i32, i32),
    Wait,
}

/// 怪物实体，包含战斗属性和位置信息
#[derive(Debug, Clone)]
pub struct Monster {
    pub kind: MonsterKind,
    pub name: String,
    pub glyph: char,
    pub color: Color,
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub attack_power: i32,
    pub attack_bonus: i32,
    pub armor_class: i32,
    pub defense: i32,
    pub xp_reward: u32,
    pub initiative: i32,
    /// A mimic still posing as a chest. Disguised monsters take no turns.
    pub disguised: bool,
}

impl Monster {
    pub fn new(kind: MonsterKind, x: i32, y: i32) -> Self {
        let t = kind.template();
        Self {
            kind,
            name: kind.to_string(),
            glyph: t.glyph,
            color: t.color,
            x,
            y,
            hp: t.hp,
            max_hp: t.hp,
            attack_power: t.attack_power,
            attack_bonus: t.attack_bonus,
            armor_class: t.armor_class,
            defense: t.defense,
            xp_reward: t.xp_reward,
            initiative: 0,
            disguised: false,
        }
    }

    /// 伪装成宝箱的拟态怪
    pub fn mimic(x: i32, y: i32) -> Self {
        let mut monster = Self::new(MonsterKind::Mimic, x, y);
        monster.disguised = true;
        monster
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Drops the disguise. Returns false if it was already revealed.
    pub fn reveal(&mut self) -> bool {
        std::mem::replace(&mut self.disguised, false)
    }

    pub fn is_adjacent_to(&self, pos: (i32, i32)) -> bool {
        chebyshev(self.position(), pos) == 1
    }

    /// Greedy chase: the direct step first, then a single step along the
    /// longer axis, otherwise stay put. No pathfinding.
    pub fn step_toward<F>(&self, target: (i32, i32), is_open: F) -> Option<(i32, i32)>
    where
        F: Fn(i32, i32) -> bool,
    {
        let dx = target.0 - self.x;
        let dy = target.1 - self.y;
        let (sx, sy) = (dx.signum(), dy.signum());
        if sx == 0 && sy == 0 {
            return None;
        }

        let direct = (self.x + sx, self.y + sy);
        if is_open(direct.0, direct.1) {
            return Some(direct);
        }

        let fallback = if dx.abs() >= dy.abs() {
            (self.x + sx, self.y)
        } else {
            (self.x, self.y + sy)
        };
        if fallback != direct && is_open(fallback.0, fallback.1) {
            return Some(fallback);
        }
        None
    }

    /// 决定本回合行动
    pub fn plan<F>(&self, player: (i32, i32), is_open: F) -> MonsterIntent
    where
        F: Fn(i32, i32) -> bool,
    {
        if self.disguised || !self.is_alive() {
            return MonsterIntent::Wait;
        }
        if self.is_adjacent_to(player) {
            return MonsterIntent::Attack;
        }
        match self.step_toward(player, is_open) {
            Some((x, y)) => MonsterIntent::Move(x, y),
            None => MonsterIntent::Wait,
        }
    }

    pub fn perform_move(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

impl Combatant for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> i32 {
        self.hp
    }

    fn max_hp(&self) -> i32 {
        self.max_hp
    }

    fn armor_class(&self) -> i32 {
        self.armor_class
    }

    fn attack_bonus(&self) -> i32 {
        self.attack_bonus
    }

    fn attack_power(&self) -> i32 {
        self.attack_power
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn xp_reward(&self) -> u32 {
        self.xp_reward
    }

    fn take_damage(&mut self, amount: i32) -> i32 {
        apply_damage(&mut self.hp, amount)
    }

    fn heal(&mut self, amount: i32) -> i32 {
        apply_heal(&mut self.hp, self.max_hp, amount)
    }
}

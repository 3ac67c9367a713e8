//! Temporary allies conjured by the player.
use ratatui::style::Color;

use crate::chebyshev;
use crate::combatant::{Combatant, apply_damage, apply_heal};
use crate::monster::MonsterIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummonKind {
    Familiar,
}

#[derive(Debug, Clone)]
pub struct Summon {
    pub kind: SummonKind,
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
    pub initiative: i32,
    /// Turns left before the summon fades.
    pub remaining: u32,
}

impl Summon {
    pub fn familiar(x: i32, y: i32, duration: u32, caster_level: u32) -> Self {
        let bonus = (caster_level / 3) as i32;
        Self {
            kind: SummonKind::Familiar,
            name: "Familiar".to_string(),
            glyph: 'f',
            color: Color::Rgb(120, 200, 255),
            x,
            y,
            hp: 8 + 2 * caster_level as i32,
            max_hp: 8 + 2 * caster_level as i32,
            attack_power: 1 + bonus,
            attack_bonus: 3 + bonus,
            armor_class: 12,
            initiative: 0,
            remaining: duration,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Counts down at the end of the summon's own turn. Returns true once expired.
    pub fn tick_duration(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Attack an adjacent enemy if there is one, otherwise stay within two
    /// tiles of the player.
    pub fn plan<F>(&self, adjacent_enemy: bool, player: (i32, i32), is_open: F) -> MonsterIntent
    where
        F: Fn(i32, i32) -> bool,
    {
        if adjacent_enemy {
            return MonsterIntent::Attack;
        }
        if chebyshev(self.position(), player) <= 2 {
            return MonsterIntent::Wait;
        }
        let (sx, sy) = ((player.0 - self.x).signum(), (player.1 - self.y).signum());
        let candidates = [(self.x + sx, self.y + sy), (self.x + sx, self.y), (self.x, self.y + sy)];
        candidates
            .into_iter()
            .filter(|&pos| pos != self.position())
            .find(|&(x, y)| is_open(x, y))
            .map_or(MonsterIntent::Wait, |(x, y)| MonsterIntent::Move(x, y))
    }
}

impl Combatant for Summon {
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

    fn take_damage(&mut self, amount: i32) -> i32 {
        apply_damage(&mut self.hp, amount)
    }

    fn heal(&mut self, amount: i32) -> i32 {
        apply_heal(&mut self.hp, self.max_hp, amount)
    }
}

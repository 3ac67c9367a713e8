//src/dungeon/src/npc.rs
use ratatui::style::Color;

/// 非玩家角色种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NpcKind {
    /// Restores the player once per dungeon level.
    Healer,
    /// Tavern keeper. Rest is unlimited.
    Barkeep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    pub kind: NpcKind,
    pub name: String,
    pub glyph: char,
    pub color: Color,
    pub x: i32,
    pub y: i32,
    /// `None` means unlimited service.
    pub charges: Option<u32>,
}

impl Npc {
    pub fn healer(x: i32, y: i32) -> Self {
        Self {
            kind: NpcKind::Healer,
            name: "Healer".to_string(),
            glyph: 'H',
            color: Color::LightGreen,
            x,
            y,
            charges: Some(1),
        }
    }

    pub fn barkeep(x: i32, y: i32) -> Self {
        Self {
            kind: NpcKind::Barkeep,
            name: "Barkeep".to_string(),
            glyph: 'B',
            color: Color::Yellow,
            x,
            y,
            charges: None,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn can_serve(&self) -> bool {
        self.charges != Some(0)
    }

    /// 消耗一次服务次数，次数用尽时返回 false
    pub fn serve(&mut self) -> bool {
        match &mut self.charges {
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
            None => true,
        }
    }

    /// Line shown when the player walks up to this NPC.
    pub fn greeting(&self) -> &'static str {
        match (self.kind, self.can_serve()) {
            (NpcKind::Healer, true) => "The healer offers to tend your wounds.",
            (NpcKind::Healer, false) => "The healer has nothing left to give.",
            (NpcKind::Barkeep, _) => "The barkeep offers you a warm meal and a bed.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healer_single_use() {
        let mut healer = Npc::healer(1, 1);
        assert!(healer.serve());
        assert!(!healer.can_serve());
        assert!(!healer.serve());
    }

    #[test]
    fn test_barkeep_unlimited() {
        let mut barkeep = Npc::barkeep(1, 1);
        for _ in 0..5 {
            assert!(barkeep.serve());
        }
    }
}

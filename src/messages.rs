//! Message and floating-text sinks read by the presentation layer.
use std::collections::VecDeque;

use ratatui::style::Color;

/// 消息颜色
pub mod palette {
    use ratatui::style::Color;

    pub const INFO: Color = Color::White;
    pub const WARNING: Color = Color::Yellow;
    pub const COMBAT: Color = Color::LightRed;
    pub const HEAL: Color = Color::LightGreen;
    pub const LOOT: Color = Color::LightCyan;
    pub const TRAP: Color = Color::Magenta;
    pub const LEVEL: Color = Color::LightMagenta;
    pub const MISS: Color = Color::Gray;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub color: Color,
}

/// Append-only log holding the most recent lines.
#[derive(Debug, Clone)]
pub struct MessageLog {
    lines: VecDeque<Message>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, text: impl Into<String>, color: Color) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(Message {
            text: text.into(),
            color,
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, palette::INFO);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True if any retained line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|m| m.text.contains(needle))
    }
}

/// 浮动文字（伤害数字、未命中等）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingText {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Color,
    /// Frames left.
    pub lifetime: u32,
    pub max_lifetime: u32,
}

impl FloatingText {
    /// Frames since the annotation appeared.
    pub fn age(&self) -> u32 {
        self.max_lifetime.saturating_sub(self.lifetime)
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct FloatingTexts {
    texts: Vec<FloatingText>,
    lifetime: u32,
}

impl FloatingTexts {
    pub fn new(lifetime: u32) -> Self {
        Self {
            texts: Vec::new(),
            lifetime,
        }
    }

    pub fn spawn(&mut self, x: i32, y: i32, text: impl Into<String>, color: Color) {
        self.texts.push(FloatingText {
            x,
            y,
            text: text.into(),
            color,
            lifetime: self.lifetime,
            max_lifetime: self.lifetime,
        });
    }

    /// Counts every annotation down one frame and drops finished ones.
    pub fn tick(&mut self) {
        for text in &mut self.texts {
            text.lifetime = text.lifetime.saturating_sub(1);
        }
        self.texts.retain(|t| !t.is_expired());
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloatingText> {
        self.texts.iter()
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn clear(&mut self) {
        self.texts.clear();
    }
}

//src/items/src/tools.rs
use serde::{Deserialize, Serialize};
use strum::Display;

/// 工具类物品
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ToolKind {
    /// Required to disarm traps.
    #[strum(serialize = "Thieves' Tools")]
    ThievesTools,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tools {
    pub kind: ToolKind,
}

impl Tools {
    pub fn new(kind: ToolKind) -> Self {
        Self { kind }
    }

    pub fn name(&self) -> String {
        self.kind.to_string()
    }
}

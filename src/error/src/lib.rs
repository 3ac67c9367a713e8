//! 游戏错误处理模块
//!
//! Shared error taxonomy for the simulation core. Nothing in here is fatal:
//! every action failure is turned into a message line and a "turn not
//! consumed" signal by the session controller.

use thiserror::Error;

/// Broad classes of failure the core distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Occupied, unwalkable or out-of-range targets. Targeting mode persists.
    InvalidTarget,
    /// Cooldowns, full inventory, missing tools. The action is aborted.
    ResourceUnavailable,
    /// The generator could not place everything it was asked to.
    GenerationCapacity,
    /// Acting on something that should already have been purged.
    LogicInvariant,
}

/// Failures of a single player-initiated action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("That is beyond the edge of the map.")]
    OutOfBounds,

    #[error("You can't move there.")]
    Unwalkable,

    #[error("Something is already there.")]
    Occupied,

    #[error("That is out of range (max {max}).")]
    OutOfRange { max: u32 },

    #[error("You can't see that spot.")]
    NotVisible,

    #[error("There is nothing to {0} there.")]
    NoTarget(&'static str),

    #[error("{name} is recharging ({turns} turns left).")]
    OnCooldown { name: String, turns: u32 },

    #[error("Your pack is full.")]
    InventoryFull,

    #[error("You need {0} for that.")]
    MissingTool(String),

    #[error("That trap has not been found yet.")]
    TrapNotRevealed,

    #[error("You can't use that here.")]
    WrongMode,

    #[error("No ability in slot {0}.")]
    InvalidSlot(usize),

    #[error("There is nothing here to pick up.")]
    NothingHere,

    #[error("Could only place {placed} of {requested} {what}.")]
    Capacity {
        what: &'static str,
        placed: usize,
        requested: usize,
    },

    #[error("It is not the player's turn.")]
    NotPlayersTurn,

    #[error("The actor is no longer alive.")]
    ActorDead,
}

impl ActionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ActionError::OutOfBounds
            | ActionError::Unwalkable
            | ActionError::Occupied
            | ActionError::OutOfRange { .. }
            | ActionError::NotVisible
            | ActionError::NoTarget(_)
            | ActionError::TrapNotRevealed => ErrorCategory::InvalidTarget,
            ActionError::OnCooldown { .. }
            | ActionError::InventoryFull
            | ActionError::MissingTool(_)
            | ActionError::WrongMode
            | ActionError::InvalidSlot(_)
            | ActionError::NothingHere => ErrorCategory::ResourceUnavailable,
            ActionError::Capacity { .. } => ErrorCategory::GenerationCapacity,
            ActionError::NotPlayersTurn | ActionError::ActorDead => ErrorCategory::LogicInvariant,
        }
    }

    /// Logic-invariant failures are guards, not something the player should read.
    pub fn is_user_visible(&self) -> bool {
        self.category() != ErrorCategory::LogicInvariant
    }
}

/// Errors outside the turn loop (configuration and setup).
#[derive(Debug, Error)]
pub enum GameError {
    /// 配置解析错误
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// 配置数值无效
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

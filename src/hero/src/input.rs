//! Per-player input state: whether a turn is still waiting on a choice.

/// Dash or Disengage, picked after activating Cunning Action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CunningChoice {
    Dash,
    Disengage,
}

/// idle → awaiting a target / a choice → back to idle on confirm or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerInput {
    #[default]
    Idle,
    AwaitingTarget {
        slot: usize,
    },
    ChoosingCunningAction {
        slot: usize,
    },
}

impl PlayerInput {
    pub fn is_idle(&self) -> bool {
        *self == PlayerInput::Idle
    }

    /// Slot of the ability whose resolution is pending, if any.
    pub fn pending_slot(&self) -> Option<usize> {
        match *self {
            PlayerInput::Idle => None,
            PlayerInput::AwaitingTarget { slot } | PlayerInput::ChoosingCunningAction { slot } => Some(slot),
        }
    }

    pub fn is_awaiting_target(&self) -> bool {
        matches!(self, PlayerInput::AwaitingTarget { .. })
    }

    /// Back to idle, returning the slot that was pending.
    pub fn finish(&mut self) -> Option<usize> {
        std::mem::take(self).pending_slot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_resets() {
        let mut input = PlayerInput::AwaitingTarget { slot: 4 };
        assert!(!input.is_idle());
        assert_eq!(input.finish(), Some(4));
        assert!(input.is_idle());
        assert_eq!(input.finish(), None);
    }
}

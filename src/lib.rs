//! Turn-based dungeon crawler simulation core.
//!
//! The presentation layer drives a [`GameSession`]: it forwards player input
//! to the action methods, advances the scheduler whenever an action reports
//! that it consumed the turn, and renders the map, the entities, the field of
//! view and the message sinks.

pub mod ability_engine;
pub mod actions;
pub mod ai;
pub mod config;
pub mod entity;
pub mod messages;
pub mod session;
pub mod trap_engine;
pub mod turn_system;

pub use crate::config::{CoreConfig, RulesConfig};
pub use crate::entity::{Actor, Entity, EntityId, Interactable, Schedulable};
pub use crate::messages::{FloatingText, FloatingTexts, Message, MessageLog};
pub use crate::session::{GameSession, StairsDirection};
pub use crate::turn_system::{TurnAdvance, TurnMode, TurnSlot, TurnSystem};

//! Resolved numeric parameters for the simulation core.
use dungeon::{FovConfig, GeneratorConfig};
use error::GameError;
use serde::{Deserialize, Serialize};

/// 规则参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub inventory_capacity: usize,
    /// Message sink keeps only this many recent lines.
    pub message_capacity: usize,
    /// Frames a floating annotation lives for.
    pub floating_text_lifetime: u32,
    /// Percent chance a failed disarm sets the trap off.
    pub disarm_trigger_chance: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            inventory_capacity: 10,
            message_capacity: 100,
            floating_text_lifetime: 30,
            disarm_trigger_chance: 50,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub fov: FovConfig,
    pub generator: GeneratorConfig,
    pub rules: RulesConfig,
}

impl CoreConfig {
    /// Parses a (possibly partial) JSON document. Missing fields keep their
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let config: CoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let generator = &self.generator;
        if self.fov.player_radius < 0 || self.fov.torch_radius < 0 {
            return Err(GameError::InvalidConfig("light radii must not be negative".into()));
        }
        if self.fov.angle_step_degrees == 0 || self.fov.angle_step_degrees > 360 {
            return Err(GameError::InvalidConfig("angle step must be within 1..=360".into()));
        }
        if generator.room_min_size < 3 || generator.room_min_size > generator.room_max_size {
            return Err(GameError::InvalidConfig(format!(
                "room sizes {}..={} are not a valid range (minimum 3)",
                generator.room_min_size, generator.room_max_size
            )));
        }
        if generator.width < generator.room_min_size + 2 || generator.height < generator.room_min_size + 2 {
            return Err(GameError::InvalidConfig(format!(
                "map {}x{} cannot hold a single room",
                generator.width, generator.height
            )));
        }
        let chances = [
            generator.decoration_chance,
            generator.torch_chance,
            generator.crate_chance,
            generator.item_chance,
            generator.chest_chance,
            generator.mimic_chance,
            generator.trap_chance,
            generator.healer_chance,
            self.rules.disarm_trigger_chance,
        ];
        if chances.iter().any(|&c| c > 100) {
            return Err(GameError::InvalidConfig("percent chances must be within 0..=100".into()));
        }
        if self.rules.inventory_capacity == 0 || self.rules.message_capacity == 0 {
            return Err(GameError::InvalidConfig("capacities must be positive".into()));
        }
        Ok(())
    }
}

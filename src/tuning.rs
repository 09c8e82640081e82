//! Game balance tuning
//!
//! Every gameplay constant the simulation reads, in one serializable struct.
//! Defaults come from [`crate::consts`]; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// The file could not be read
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid tuning JSON
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value the simulation cannot run with
    #[error("invalid tuning `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Data-driven balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal speed (pixels/s)
    pub player_speed: f32,
    /// Minimum interval between shots (ms)
    pub fire_rate_ms: f64,
    /// Player spawn point
    pub player_start: (f32, f32),
    pub player_bullet_speed: f32,
    pub player_bullet_offset: f32,

    // === Enemies ===
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_offset: f32,
    /// Enemy bullets past this y are destroyed
    pub enemy_bullet_cull_y: f32,
    /// Fire roll is uniform in [0, roll_max]; an enemy fires when it exceeds the threshold
    pub enemy_fire_roll_max: u32,
    pub enemy_fire_threshold: u32,

    // === Spawner ===
    pub spawn_interval_ms: f64,
    pub wave_size: (u32, u32),
    pub spawn_x: (i32, i32),
    pub spawn_y: (i32, i32),
    pub enemy_speed: (i32, i32),

    // === Scoring ===
    pub score_per_kill: u32,

    // === World ===
    pub world_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            fire_rate_ms: FIRE_RATE_MS,
            player_start: (PLAYER_START_X, PLAYER_START_Y),
            player_bullet_speed: PLAYER_BULLET_SPEED,
            player_bullet_offset: PLAYER_BULLET_OFFSET,

            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_bullet_offset: ENEMY_BULLET_OFFSET,
            enemy_bullet_cull_y: ENEMY_BULLET_CULL_Y,
            enemy_fire_roll_max: ENEMY_FIRE_ROLL_MAX,
            enemy_fire_threshold: ENEMY_FIRE_THRESHOLD,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            wave_size: (WAVE_SIZE_MIN, WAVE_SIZE_MAX),
            spawn_x: (SPAWN_X_MIN, SPAWN_X_MAX),
            spawn_y: (SPAWN_Y_MIN, SPAWN_Y_MAX),
            enemy_speed: (ENEMY_SPEED_MIN, ENEMY_SPEED_MAX),

            score_per_kill: SCORE_PER_KILL,

            world_width: WORLD_WIDTH,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.player_speed >= 0.0) {
            return Err(invalid("player_speed", "must be non-negative"));
        }
        if !(self.fire_rate_ms >= 0.0) {
            return Err(invalid("fire_rate_ms", "must be non-negative"));
        }
        if !(self.spawn_interval_ms > 0.0) {
            return Err(invalid("spawn_interval_ms", "must be positive"));
        }
        if !(self.world_width > 0.0) {
            return Err(invalid("world_width", "must be positive"));
        }
        if self.wave_size.0 > self.wave_size.1 {
            return Err(invalid("wave_size", "min exceeds max"));
        }
        if self.spawn_x.0 > self.spawn_x.1 {
            return Err(invalid("spawn_x", "min exceeds max"));
        }
        if self.spawn_y.0 > self.spawn_y.1 {
            return Err(invalid("spawn_y", "min exceeds max"));
        }
        if self.enemy_speed.0 > self.enemy_speed.1 {
            return Err(invalid("enemy_speed", "min exceeds max"));
        }
        if self.enemy_speed.0 <= 0 {
            return Err(invalid("enemy_speed", "enemies must move downward"));
        }
        if self.spawn_y.1 >= 0 {
            return Err(invalid("spawn_y", "enemies must spawn above the visible area"));
        }
        if !(0.0..=self.world_width).contains(&self.player_start.0) {
            return Err(invalid(
                "player_start",
                format!("x must lie within the world (0..={})", self.world_width),
            ));
        }
        if self.enemy_fire_threshold > self.enemy_fire_roll_max {
            return Err(invalid(
                "enemy_fire_threshold",
                format!("exceeds enemy_fire_roll_max ({})", self.enemy_fire_roll_max),
            ));
        }
        Ok(())
    }
}

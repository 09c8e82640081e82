//! Wave Shooter - a vertical arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, firing, collisions, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// World dimensions (y grows downward)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 550.0;
    /// Horizontal speed while a direction is held (pixels/s)
    pub const PLAYER_SPEED: f32 = 250.0;
    /// Minimum time between two player shots (ms)
    pub const FIRE_RATE_MS: f64 = 400.0;

    /// Player bullet: spawned this far above the player, moving up
    pub const PLAYER_BULLET_OFFSET: f32 = 20.0;
    pub const PLAYER_BULLET_SPEED: f32 = 300.0;

    /// Enemy bullet: spawned this far below the enemy, moving down
    pub const ENEMY_BULLET_OFFSET: f32 = 10.0;
    pub const ENEMY_BULLET_SPEED: f32 = 150.0;
    /// Enemy bullets below this line are destroyed
    pub const ENEMY_BULLET_CULL_Y: f32 = 600.0;

    /// Enemy fire roll: draw in [0, ROLL_MAX], fire when the draw exceeds THRESHOLD
    pub const ENEMY_FIRE_ROLL_MAX: u32 = 1000;
    pub const ENEMY_FIRE_THRESHOLD: u32 = 995;

    /// Wave spawner
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const WAVE_SIZE_MIN: u32 = 2;
    pub const WAVE_SIZE_MAX: u32 = 4;
    pub const SPAWN_X_MIN: i32 = 50;
    pub const SPAWN_X_MAX: i32 = 750;
    pub const SPAWN_Y_MIN: i32 = -50;
    pub const SPAWN_Y_MAX: i32 = -10;
    pub const ENEMY_SPEED_MIN: i32 = 20;
    pub const ENEMY_SPEED_MAX: i32 = 60;

    /// Score awarded per enemy destroyed by a player bullet
    pub const SCORE_PER_KILL: u32 = 10;
    /// Lives at session start (also the number of life indicators)
    pub const MAX_LIVES: usize = 3;
    /// Digits in the score display
    pub const SCORE_DIGITS: usize = 5;

    /// Half-extents of the bodies used by the reference physics
    pub const PLAYER_HALF_EXTENT: (f32, f32) = (24.0, 24.0);
    pub const ENEMY_HALF_EXTENT: (f32, f32) = (20.0, 20.0);
    pub const PLAYER_BULLET_HALF_EXTENT: (f32, f32) = (6.0, 6.0);
    pub const ENEMY_BULLET_HALF_EXTENT: (f32, f32) = (5.0, 8.0);
}

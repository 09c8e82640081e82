//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated time only (passed in by the host)
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies; side effects leave as `GameEvent`s

pub mod collision;
pub mod controller;
pub mod enemy;
pub mod hud;
pub mod physics;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Overlap, resolve_overlaps};
pub use controller::{TickInput, apply_input, autopilot};
pub use enemy::{cull_enemy_bullets, enemies_fire};
pub use hud::{Glyph, render_score, visible_lives};
pub use physics::{ArcadePhysics, Physics};
pub use registry::{Body, BodyKind, Collection, EnemyKind, Handle, Registry};
pub use spawner::{SpawnTimer, spawn_wave};
pub use state::{GameEvent, GamePhase, GameState, Player, RunStats, SoundEffect};
pub use tick::{frame, spawn_tick, step};

//! Game state and core simulation types
//!
//! The whole simulation context lives in one explicit [`GameState`] that every
//! operation receives by `&mut`. Nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hud::{Glyph, render_score};
use super::registry::{Body, BodyKind, Handle, Registry};
use super::spawner::SpawnTimer;
use crate::consts::{MAX_LIVES, SCORE_DIGITS};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; frozen until an explicit restart
    GameOver,
}

/// Sound effect ids handed to the audio sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Anything got hit
    Hit,
}

impl SoundEffect {
    pub fn id(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Hit => "hit",
        }
    }
}

/// Fire-and-forget side effects for the host's render/audio sinks.
///
/// Queued during a frame, drained by the host afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlaySound(SoundEffect),
    /// A body entered the registry
    Spawned { handle: Handle, kind: BodyKind },
    /// A body left the registry; its handle is dead from now on
    Destroyed { handle: Handle },
    /// Score digit texture changed
    SetScoreDigit { slot: usize, glyph: Glyph },
    /// Life indicator visibility changed
    SetLifeVisible { index: usize, visible: bool },
    /// Game-over layer (banner + restart button) visibility changed
    SetGameOverVisible(bool),
    /// The session was reinitialized; the host should rebuild its scene
    Restarted,
}

/// The player ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal velocity (pixels/s)
    pub vel_x: f32,
    /// Simulated time (ms) of the last shot
    pub last_fired: f64,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start.0, tuning.player_start.1),
            vel_x: 0.0,
            last_fired: 0.0,
        }
    }
}

/// Session counters, informational only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub frames: u64,
    pub waves_spawned: u32,
    pub enemies_spawned: u32,
    pub shots_fired: u32,
    pub enemy_shots_fired: u32,
    pub enemies_destroyed: u32,
    pub hits_taken: u32,
    pub enemy_bullets_culled: u32,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this session was started from
    pub seed: u64,
    /// Session RNG; every random draw comes from here
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub registry: Registry,
    pub score: u32,
    /// Lives remaining. Kept signed so a hit past zero is observable before
    /// the game-over check; displays clamp it.
    pub lives: i32,
    /// Current score display
    pub score_glyphs: [Glyph; SCORE_DIGITS],
    /// Life indicator visibility, index = life number
    pub life_indicators: [bool; MAX_LIVES],
    pub game_over_visible: bool,
    pub spawn_timer: SpawnTimer,
    /// Simulated time (ms) of the last processed frame
    pub time_ms: f64,
    pub stats: RunStats,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            spawn_timer: SpawnTimer::looping(tuning.spawn_interval_ms),
            tuning,
            phase: GamePhase::Running,
            registry: Registry::new(),
            score: 0,
            lives: MAX_LIVES as i32,
            score_glyphs: render_score(0),
            life_indicators: [true; MAX_LIVES],
            game_over_visible: false,
            time_ms: 0.0,
            stats: RunStats::default(),
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Queue a side effect for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending side effects, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending side effects
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Register a body and announce it
    pub fn spawn(&mut self, body: Body) -> Handle {
        let handle = self.registry.spawn(body);
        self.emit(GameEvent::Spawned {
            handle,
            kind: body.kind,
        });
        handle
    }

    /// Remove a body and announce it. Dead handles are a silent no-op.
    pub fn destroy(&mut self, handle: Handle) -> bool {
        if !self.registry.destroy(handle) {
            return false;
        }
        self.emit(GameEvent::Destroyed { handle });
        true
    }

    /// Recompute the score display, emitting a texture change per changed slot
    pub fn refresh_score_display(&mut self) {
        let glyphs = render_score(self.score);
        for (slot, glyph) in glyphs.iter().enumerate() {
            if self.score_glyphs[slot] != *glyph {
                self.score_glyphs[slot] = *glyph;
                self.emit(GameEvent::SetScoreDigit {
                    slot,
                    glyph: *glyph,
                });
            }
        }
    }

    /// Hide one life indicator
    pub fn hide_life_indicator(&mut self, index: usize) {
        if let Some(visible) = self.life_indicators.get_mut(index) {
            if *visible {
                *visible = false;
                self.emit(GameEvent::SetLifeVisible {
                    index,
                    visible: false,
                });
            }
        }
    }

    /// Number of life indicators currently shown
    pub fn visible_life_indicators(&self) -> usize {
        self.life_indicators.iter().filter(|v| **v).count()
    }

    /// Enter the terminal phase and reveal the game-over layer
    pub fn enter_game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_visible = true;
        self.emit(GameEvent::SetGameOverVisible(true));
        log::info!(
            "Game over: score {} after {} frames ({} waves)",
            self.score,
            self.stats.frames,
            self.stats.waves_spawned
        );
    }

    /// Start a fresh session after game over.
    ///
    /// Full reinitialization: score, lives, registry, player, timer and
    /// display all return to their initial values. The new seed is drawn from
    /// the old generator so seeded runs stay reproducible across restarts.
    /// Returns `false` (and does nothing) while still running.
    pub fn restart(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        let next_seed: u64 = self.rng.random();
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::with_tuning(next_seed, tuning);
        self.emit(GameEvent::Restarted);
        log::info!("Session restarted (seed {next_seed})");
        true
    }
}

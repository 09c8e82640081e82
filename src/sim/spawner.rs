//! Wave spawner
//!
//! A periodic timer drops a small wave of enemies just above the visible area.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::registry::{Body, EnemyKind};
use super::state::GameState;
use crate::tuning::Tuning;

/// Looping timer driven by simulated time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub delay_ms: f64,
    elapsed_ms: f64,
}

impl SpawnTimer {
    /// Fires every `delay_ms`, forever
    pub fn looping(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms` and return how many times the timer fired
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if self.delay_ms <= 0.0 || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.delay_ms {
            self.elapsed_ms -= self.delay_ms;
            fired += 1;
        }
        fired
    }
}

/// Draw one enemy of a wave
pub fn roll_enemy<R: Rng>(rng: &mut R, tuning: &Tuning) -> Body {
    let kind = EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];
    let x = rng.random_range(tuning.spawn_x.0..=tuning.spawn_x.1);
    let y = rng.random_range(tuning.spawn_y.0..=tuning.spawn_y.1);
    let speed = rng.random_range(tuning.enemy_speed.0..=tuning.enemy_speed.1);
    Body::enemy(kind, Vec2::new(x as f32, y as f32), speed as f32)
}

/// Draw a whole wave: between `wave_size.0` and `wave_size.1` enemies
pub fn roll_wave<R: Rng>(rng: &mut R, tuning: &Tuning) -> Vec<Body> {
    let count = rng.random_range(tuning.wave_size.0..=tuning.wave_size.1);
    (0..count).map(|_| roll_enemy(rng, tuning)).collect()
}

/// Spawn one wave into the registry. Does nothing once the game is over.
///
/// Returns the number of enemies created.
pub fn spawn_wave(state: &mut GameState) -> usize {
    if !state.is_running() {
        return 0;
    }
    let wave = roll_wave(&mut state.rng, &state.tuning);
    for body in &wave {
        state.spawn(*body);
    }
    state.stats.waves_spawned += 1;
    state.stats.enemies_spawned += wave.len() as u32;
    log::debug!(
        "Wave {}: {} enemies ({} alive)",
        state.stats.waves_spawned,
        wave.len(),
        state.registry.len(super::registry::Collection::Enemies)
    );
    wave.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry::{BodyKind, Collection};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_timer_fires_on_period() {
        let mut timer = SpawnTimer::looping(2000.0);
        assert_eq!(timer.advance(1999.0), 0);
        assert_eq!(timer.advance(1.0), 1);
        assert_eq!(timer.advance(1000.0), 0);
        assert_eq!(timer.advance(999.0), 0);
        assert_eq!(timer.advance(1.0), 1);
    }

    #[test]
    fn test_timer_catches_up_on_long_delta() {
        let mut timer = SpawnTimer::looping(2000.0);
        assert_eq!(timer.advance(6500.0), 3);
        assert_eq!(timer.advance(1500.0), 1);
    }

    #[test]
    fn test_timer_ignores_non_positive_delta() {
        let mut timer = SpawnTimer::looping(2000.0);
        assert_eq!(timer.advance(1500.0), 0);
        assert_eq!(timer.advance(-500.0), 0);
        assert_eq!(timer.advance(0.0), 0);
        assert_eq!(timer.advance(500.0), 1);
    }

    #[test]
    fn test_wave_ranges() {
        let tuning = Tuning::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let wave = roll_wave(&mut rng, &tuning);
            assert!((2..=4).contains(&wave.len()));
            for body in wave {
                assert!((50.0..=750.0).contains(&body.pos.x));
                assert!((-50.0..=-10.0).contains(&body.pos.y));
                assert!((20.0..=60.0).contains(&body.vel.y));
                assert_eq!(body.vel.x, 0.0);
                assert!(matches!(body.kind, BodyKind::Enemy(_)));
            }
        }
    }

    #[test]
    fn test_wave_uses_every_kind_and_size() {
        let tuning = Tuning::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut sizes = [false; 5];
        let mut kinds = Vec::new();
        for _ in 0..200 {
            let wave = roll_wave(&mut rng, &tuning);
            sizes[wave.len()] = true;
            for body in wave {
                if let BodyKind::Enemy(kind) = body.kind {
                    if !kinds.contains(&kind) {
                        kinds.push(kind);
                    }
                }
            }
        }
        assert_eq!(sizes, [false, false, true, true, true]);
        assert_eq!(kinds.len(), EnemyKind::ALL.len());
    }

    #[test]
    fn test_spawn_wave_registers_enemies() {
        let mut state = GameState::new(5);
        let n = spawn_wave(&mut state);
        assert_eq!(state.registry.len(Collection::Enemies), n);
        assert_eq!(state.stats.waves_spawned, 1);
        assert_eq!(state.drain_events().len(), n);
    }

    #[test]
    fn test_no_spawn_after_game_over() {
        let mut state = GameState::new(5);
        state.enter_game_over();
        assert_eq!(spawn_wave(&mut state), 0);
        assert!(state.registry.is_empty(Collection::Enemies));
    }
}

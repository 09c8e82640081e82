//! Frame and spawn-timer stepping
//!
//! Core loop that advances the simulation. The host owns the clock and calls
//! [`step`] once per frame; the spawn timer and the frame update run back to
//! back on the same `&mut GameState`, so they never interleave.

use super::collision::resolve_overlaps;
use super::controller::{TickInput, apply_input};
use super::enemy::{cull_enemy_bullets, enemies_fire};
use super::physics::Physics;
use super::spawner::spawn_wave;
use super::state::GameState;

/// Advance the spawn timer by `dt_ms` and spawn a wave for every tick that
/// elapsed. Ticks are dropped while the game is over.
///
/// Returns the number of enemies created.
pub fn spawn_tick(state: &mut GameState, dt_ms: f64) -> usize {
    if !state.is_running() {
        return 0;
    }
    let ticks = state.spawn_timer.advance(dt_ms);
    let mut spawned = 0;
    for _ in 0..ticks {
        spawned += spawn_wave(state);
    }
    spawned
}

/// Simulate one frame at simulated time `now_ms`, `dt_ms` after the previous one
pub fn frame<P: Physics + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    dt_ms: f64,
    physics: &mut P,
) {
    // Don't tick if game over
    if !state.is_running() {
        return;
    }
    let dt_ms = if dt_ms < 0.0 {
        log::warn!("Negative frame delta {dt_ms}ms ignored");
        0.0
    } else {
        dt_ms
    };

    state.time_ms = now_ms;
    state.stats.frames += 1;

    // Player intent
    apply_input(state, input, now_ms);

    // Enemy bullets below the world are gone before anyone fires again
    cull_enemy_bullets(state);
    enemies_fire(state);

    // Collaborator moves everything, then reports what touches
    let dt = (dt_ms / 1000.0) as f32;
    physics.integrate(&mut state.player, &mut state.registry, dt);
    let overlaps = physics.overlaps(&state.player, &state.registry);
    if !overlaps.is_empty() {
        log::trace!("{} overlaps at t={now_ms:.0}ms", overlaps.len());
    }
    resolve_overlaps(state, &overlaps);
}

/// One full host step: spawn timer first, then the frame
pub fn step<P: Physics + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    dt_ms: f64,
    physics: &mut P,
) {
    spawn_tick(state, dt_ms);
    frame(state, input, now_ms, dt_ms, physics);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Overlap;
    use crate::sim::physics::ArcadePhysics;
    use crate::sim::registry::{Body, Collection, EnemyKind, Registry};
    use crate::sim::state::{GamePhase, Player};
    use glam::Vec2;

    const DT: f64 = 1000.0 / 60.0;

    /// Physics stub that moves nothing and reports a scripted overlap list once
    struct Scripted(Vec<Overlap>);

    impl Physics for Scripted {
        fn integrate(&mut self, _: &mut Player, _: &mut Registry, _: f32) {}

        fn overlaps(&self, _: &Player, _: &Registry) -> Vec<Overlap> {
            self.0.clone()
        }
    }

    fn run(state: &mut GameState, input: &TickInput, frames: u32, physics: &mut ArcadePhysics) {
        for _ in 0..frames {
            let now = state.time_ms + DT;
            step(state, input, now, DT, physics);
        }
    }

    #[test]
    fn test_waves_arrive_every_two_seconds() {
        let mut state = GameState::new(12345);
        let mut physics = ArcadePhysics::default();
        let input = TickInput::default();

        run(&mut state, &input, 119, &mut physics);
        assert_eq!(state.stats.waves_spawned, 0);
        run(&mut state, &input, 2, &mut physics);
        assert_eq!(state.stats.waves_spawned, 1);
        run(&mut state, &input, 120, &mut physics);
        assert_eq!(state.stats.waves_spawned, 2);
    }

    #[test]
    fn test_frame_moves_player() {
        let mut state = GameState::new(1);
        let mut physics = ArcadePhysics::default();
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        frame(&mut state, &input, 100.0, 100.0, &mut physics);
        assert!((state.player.pos.x - 425.0).abs() < 1e-3);
    }

    #[test]
    fn test_bullet_kills_enemy_end_to_end() {
        let mut state = GameState::new(1);
        let mut physics = ArcadePhysics::default();
        state.spawn(Body::enemy(EnemyKind::Scout, Vec2::new(400.0, 300.0), 0.0));
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        // One shot, then let it travel ~230px
        frame(&mut state, &fire, 500.0, DT, &mut physics);
        run(&mut state, &TickInput::default(), 60, &mut physics);

        assert_eq!(state.score, 10);
        assert!(state.registry.is_empty(Collection::Enemies));
        assert!(state.registry.is_empty(Collection::PlayerBullets));
    }

    #[test]
    fn test_game_over_freezes_everything() {
        let mut state = GameState::new(77);
        let b = state.spawn(Body::enemy_bullet(Vec2::new(400.0, 550.0), 150.0));
        state.lives = 1;
        let mut scripted = Scripted(vec![Overlap::EnemyBulletPlayer { bullet: b }]);
        frame(&mut state, &TickInput::default(), DT, DT, &mut scripted);
        assert_eq!(state.phase, GamePhase::GameOver);

        state.spawn(Body::enemy(EnemyKind::Raider, Vec2::new(100.0, 100.0), 50.0));
        let before_total = state.registry.total();
        let before_pos = state.player.pos;
        let before_frames = state.stats.frames;

        let mut physics = ArcadePhysics::default();
        let input = TickInput {
            left: true,
            fire: true,
            ..Default::default()
        };
        for i in 0..600 {
            step(&mut state, &input, 1000.0 + i as f64 * DT, DT, &mut physics);
        }

        assert_eq!(state.registry.total(), before_total);
        assert_eq!(state.player.pos, before_pos);
        assert_eq!(state.stats.frames, before_frames);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 0);
        assert_eq!(state.stats.waves_spawned, 0);
    }

    #[test]
    fn test_restart_then_play_again() {
        let mut state = GameState::new(5);
        state.enter_game_over();
        assert!(state.restart());

        let mut physics = ArcadePhysics::default();
        run(&mut state, &TickInput::default(), 130, &mut physics);
        assert_eq!(state.stats.waves_spawned, 1);
        assert!(!state.registry.is_empty(Collection::Enemies));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let mut physics = ArcadePhysics::default();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        run(&mut state1, &input, 1800, &mut physics);
        run(&mut state2, &input, 1800, &mut physics);

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.stats, state2.stats);
        assert_eq!(state1.player.pos, state2.player.pos);
        for collection in Collection::ALL {
            assert_eq!(state1.registry.len(collection), state2.registry.len(collection));
        }
    }
}

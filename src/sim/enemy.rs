//! Enemy behavior
//!
//! Enemies fire on an independent per-frame dice roll; the resulting bullets
//! are culled once they fall past the bottom of the world.
//!
//! Only enemy bullets are culled. Player bullets leaving the top and enemies
//! leaving the bottom stay registered, so very long sessions grow the registry
//! without bound.

use glam::Vec2;
use rand::Rng;

use super::registry::{Body, Collection};
use super::state::GameState;
use crate::tuning::Tuning;

/// One enemy's fire roll for this frame
pub fn rolls_fire<R: Rng>(rng: &mut R, tuning: &Tuning) -> bool {
    rng.random_range(0..=tuning.enemy_fire_roll_max) > tuning.enemy_fire_threshold
}

/// Roll for every live enemy and spawn the bullets. Returns how many fired.
pub fn enemies_fire(state: &mut GameState) -> usize {
    if !state.is_running() {
        return 0;
    }
    let origins: Vec<Vec2> = state
        .registry
        .iter(Collection::Enemies)
        .map(|(_, enemy)| enemy.pos)
        .collect();

    let mut fired = 0;
    for pos in origins {
        if !rolls_fire(&mut state.rng, &state.tuning) {
            continue;
        }
        let origin = pos + Vec2::new(0.0, state.tuning.enemy_bullet_offset);
        state.spawn(Body::enemy_bullet(origin, state.tuning.enemy_bullet_speed));
        fired += 1;
        log::trace!("Enemy fired from ({:.1}, {:.1})", origin.x, origin.y);
    }
    state.stats.enemy_shots_fired += fired as u32;
    fired
}

/// Destroy enemy bullets below the cull line. Returns how many were removed.
pub fn cull_enemy_bullets(state: &mut GameState) -> usize {
    if !state.is_running() {
        return 0;
    }
    let cull_y = state.tuning.enemy_bullet_cull_y;
    let gone: Vec<_> = state
        .registry
        .iter(Collection::EnemyBullets)
        .filter(|(_, b)| b.pos.y > cull_y)
        .map(|(h, _)| h)
        .collect();

    for handle in &gone {
        state.destroy(*handle);
    }
    state.stats.enemy_bullets_culled += gone.len() as u32;
    if !gone.is_empty() {
        log::trace!("Culled {} enemy bullets", gone.len());
    }
    gone.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry::EnemyKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fire_chance_is_about_half_a_percent() {
        let tuning = Tuning::default();
        let mut rng = StdRng::seed_from_u64(11);
        let trials = 200_000;
        let hits = (0..trials).filter(|_| rolls_fire(&mut rng, &tuning)).count();
        // Expected 5/1001 of the trials (~999)
        assert!((800..1200).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn test_certain_fire_spawns_bullet_below_enemy() {
        let mut state = GameState::new(2);
        state.tuning.enemy_fire_threshold = 0;
        state.tuning.enemy_fire_roll_max = 0;
        // A draw of 0 never exceeds 0, so nobody fires
        state.spawn(Body::enemy(EnemyKind::Scout, Vec2::new(200.0, 100.0), 30.0));
        assert_eq!(enemies_fire(&mut state), 0);

        state.tuning.enemy_fire_roll_max = 1;
        state.tuning.enemy_fire_threshold = 0;
        let mut fired = 0;
        for _ in 0..64 {
            fired += enemies_fire(&mut state);
        }
        assert!(fired > 0);
        for (_, bullet) in state.registry.iter(Collection::EnemyBullets) {
            assert_eq!(bullet.pos, Vec2::new(200.0, 110.0));
            assert_eq!(bullet.vel, Vec2::new(0.0, 150.0));
        }
    }

    #[test]
    fn test_cull_only_below_line() {
        let mut state = GameState::new(2);
        let low = state.spawn(Body::enemy_bullet(Vec2::new(10.0, 601.0), 150.0));
        let edge = state.spawn(Body::enemy_bullet(Vec2::new(10.0, 600.0), 150.0));
        assert_eq!(cull_enemy_bullets(&mut state), 1);
        assert!(!state.registry.contains(low));
        assert!(state.registry.contains(edge));
    }

    #[test]
    fn test_player_bullets_and_enemies_are_not_culled() {
        // Known unbounded-growth risk: nothing removes these off-screen bodies.
        let mut state = GameState::new(2);
        let up = state.spawn(Body::player_bullet(Vec2::new(10.0, -500.0), 300.0));
        let down = state.spawn(Body::enemy(EnemyKind::Raider, Vec2::new(10.0, 900.0), 30.0));
        cull_enemy_bullets(&mut state);
        assert!(state.registry.contains(up));
        assert!(state.registry.contains(down));
    }
}

//! Fixed timestep simulation tick
//!
//! Advances the game exactly one 60 Hz step. Deterministic: seeded RNG,
//! stable iteration order, no platform calls.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, Obstacle, Particle};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Discrete jump trigger (one key-down = one trigger). Outside of
    /// Playing this starts or restarts the game instead.
    pub jump: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // Background layers scroll in every phase. rem_euclid keeps the
    // offsets in [0, tile) so the wrap seam is exact.
    state.bg_offset = (state.bg_offset + BG_SPEED).rem_euclid(PLAYFIELD_WIDTH);
    state.cloud_offset = (state.cloud_offset + CLOUD_SPEED).rem_euclid(CLOUD_TILE_WIDTH);

    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {
            if input.jump {
                state.reset();
            }
        }
        GamePhase::Playing => playing_tick(state, input),
    }
}

fn playing_tick(state: &mut GameState, input: &TickInput) {
    state.player.apply_physics();

    if input.jump {
        if let Some(event) = state.player.try_jump() {
            state.events.push(event);
            spawn_jump_burst(state);
        }
    }

    state.effects.decay();

    // Spawner: one obstacle per full interval
    state.spawn_timer += 1;
    if state.spawn_timer >= state.spawn_interval {
        spawn_obstacle(state);
        state.spawn_timer = 0;
    }

    // Advance obstacles and test against the player. The collision is
    // terminal, but the rest of the frame still settles (passed obstacles
    // score before the phase flips).
    let player_box = state.player.aabb();
    let invincible = state.effects.invincible();
    let mut collided = false;
    for obs in &mut state.obstacles {
        obs.pos.x -= state.obstacle_speed;
        if !invincible && player_box.overlaps(&obs.aabb()) {
            collided = true;
        }
    }

    // Compact the live set; each removed obstacle scores exactly once
    let mut passed = 0u32;
    state.obstacles.retain(|obs| {
        if obs.passed() {
            passed += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..passed {
        state.score += 1;
        state.events.push(GameEvent::Scored);
        ramp_difficulty(state);
    }

    // Powerups drift with the field (pickup wiring incomplete)
    for powerup in &mut state.powerups {
        powerup.pos.x -= state.obstacle_speed;
    }
    state.powerups.retain(|p| p.pos.x > -OBSTACLE_WIDTH);

    // Particles: integrate and shrink
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.size -= PARTICLE_DECAY;
    }
    state.particles.retain(|p| p.size > 0.0);

    if collided {
        state.events.push(GameEvent::Collided);
        state.phase = GamePhase::GameOver;
    }
}

/// Roll a height and push a new obstacle at the right edge
fn spawn_obstacle(state: &mut GameState) {
    let height = state
        .rng
        .random_range(OBSTACLE_MIN_HEIGHT..=OBSTACLE_MAX_HEIGHT);
    state.obstacles.push(Obstacle::new(height));
}

/// Burst of particles at the player's feet on every jump
fn spawn_jump_burst(state: &mut GameState) {
    let feet = state.player.feet();
    for _ in 0..JUMP_PARTICLES {
        if state.particles.len() >= MAX_PARTICLES {
            state.particles.remove(0);
        }
        let vel = Vec2::new(
            state.rng.random_range(-2.0..2.0),
            state.rng.random_range(-3.0..-1.0),
        );
        state.particles.push(Particle {
            pos: feet,
            vel,
            size: state.rng.random_range(2.0..7.0),
            hue: state.rng.random_range(0.0..360.0),
        });
    }
}

/// Every `RAMP_SCORE_STEP` points the field speeds up a notch
fn ramp_difficulty(state: &mut GameState) {
    if !state.score.is_multiple_of(RAMP_SCORE_STEP) {
        return;
    }
    state.obstacle_speed = (state.obstacle_speed + RAMP_SPEED_STEP).min(OBSTACLE_SPEED_MAX);
    state.spawn_interval = state
        .spawn_interval
        .saturating_sub(RAMP_INTERVAL_STEP)
        .max(SPAWN_INTERVAL_MIN);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const JUMP: TickInput = TickInput { jump: true };
    const IDLE: TickInput = TickInput { jump: false };

    /// Tick a fresh state into Playing
    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &JUMP);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_start_to_playing_on_jump() {
        let mut state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Start);

        tick(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::Start);

        tick(&mut state, &JUMP);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_game_over_restarts_on_jump() {
        let mut state = playing_state(42);
        state.phase = GamePhase::GameOver;
        state.score = 9;

        tick(&mut state, &JUMP);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_jump_emits_event_and_particles() {
        let mut state = playing_state(1);

        tick(&mut state, &JUMP);
        assert!(state.events.contains(&GameEvent::Jumped));
        assert_eq!(state.particles.len(), JUMP_PARTICLES);
        assert!(state.player.vel_y < 0.0);

        state.drain_events();
        tick(&mut state, &JUMP);
        assert!(state.events.contains(&GameEvent::DoubleJumped));
    }

    #[test]
    fn test_exhausted_jumps_are_a_noop() {
        let mut state = playing_state(1);
        tick(&mut state, &JUMP);
        tick(&mut state, &JUMP);
        assert_eq!(state.player.jumps_left, 0);
        state.drain_events();

        let vel_before = state.player.vel_y;
        tick(&mut state, &JUMP);
        // Gravity still applies, but no impulse and no jump event
        assert_eq!(state.player.vel_y, vel_before + GRAVITY);
        assert!(!state.events.contains(&GameEvent::Jumped));
        assert!(!state.events.contains(&GameEvent::DoubleJumped));
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = playing_state(7);

        for _ in 0..(SPAWN_INTERVAL - 1) {
            tick(&mut state, &IDLE);
        }
        assert!(state.obstacles.is_empty());

        tick(&mut state, &IDLE);
        assert_eq!(state.obstacles.len(), 1);

        // Four full intervals, four obstacles (none scores in this window,
        // so the cadence never shifts)
        let mut state = playing_state(7);
        let window = SPAWN_INTERVAL * 4;
        for _ in 0..window {
            tick(&mut state, &IDLE);
        }
        let created = state.obstacles.len() as u32 + state.score;
        assert_eq!(created, 4);
    }

    #[test]
    fn test_collision_ends_the_run() {
        let mut state = playing_state(3);
        let mut obs = Obstacle::new(80.0);
        obs.pos.x = state.player.pos.x;
        state.obstacles.push(obs);

        tick(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::Collided));
    }

    #[test]
    fn test_invincibility_gates_collision() {
        let mut state = playing_state(3);
        state.effects.arm_invincibility();
        let mut obs = Obstacle::new(80.0);
        obs.pos.x = state.player.pos.x;
        state.obstacles.push(obs);

        tick(&mut state, &IDLE);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.events.contains(&GameEvent::Collided));
    }

    #[test]
    fn test_passed_obstacle_scores_exactly_once() {
        let mut state = playing_state(5);
        let mut obs = Obstacle::new(60.0);
        obs.pos.x = -60.0;
        state.obstacles.push(obs);

        tick(&mut state, &IDLE);
        assert_eq!(state.score, 1);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| **e == GameEvent::Scored)
                .count(),
            1
        );
        assert!(state.obstacles.is_empty());

        state.drain_events();
        tick(&mut state, &IDLE);
        assert_eq!(state.score, 1);
        assert!(!state.events.contains(&GameEvent::Scored));
    }

    #[test]
    fn test_difficulty_ramps_on_score_steps() {
        let mut state = playing_state(5);

        // Four passes: no ramp yet
        for _ in 0..(RAMP_SCORE_STEP - 1) {
            let mut obs = Obstacle::new(60.0);
            obs.pos.x = -60.0;
            state.obstacles.push(obs);
            tick(&mut state, &IDLE);
        }
        assert_eq!(state.obstacle_speed, OBSTACLE_SPEED);
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL);

        // Fifth pass tightens the field
        let mut obs = Obstacle::new(60.0);
        obs.pos.x = -60.0;
        state.obstacles.push(obs);
        tick(&mut state, &IDLE);
        assert_eq!(state.obstacle_speed, OBSTACLE_SPEED + RAMP_SPEED_STEP);
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL - RAMP_INTERVAL_STEP);
    }

    #[test]
    fn test_ramp_saturates() {
        let mut state = playing_state(5);
        for i in 1..=100u32 {
            state.score = i * RAMP_SCORE_STEP;
            ramp_difficulty(&mut state);
        }
        assert_eq!(state.obstacle_speed, OBSTACLE_SPEED_MAX);
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut once = playing_state(11);
        for _ in 0..200 {
            tick(&mut once, &IDLE);
        }
        let mut twice = once.clone();

        once.reset();
        once.drain_events();
        twice.reset();
        twice.reset();
        twice.drain_events();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);

        let script = [JUMP, IDLE, IDLE, JUMP, JUMP, IDLE];
        for _ in 0..300 {
            for input in &script {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_background_offsets_stay_in_range() {
        let mut state = GameState::new(2);
        for i in 0..5000 {
            let input = if i % 37 == 0 { JUMP } else { IDLE };
            tick(&mut state, &input);
            assert!(state.bg_offset >= 0.0 && state.bg_offset < PLAYFIELD_WIDTH);
            assert!(state.cloud_offset >= 0.0 && state.cloud_offset < CLOUD_TILE_WIDTH);
        }
    }

    proptest! {
        /// The player never sinks below the ground line and jump bookkeeping
        /// never leaves its bounds, whatever the input script.
        #[test]
        fn prop_ground_and_jump_invariants(script in proptest::collection::vec(any::<bool>(), 1..600)) {
            let mut state = GameState::new(0xC10D);
            for jump in script {
                tick(&mut state, &TickInput { jump });
                prop_assert!(state.player.bottom() <= GROUND_Y);
                prop_assert!(state.player.jumps_left <= MAX_JUMPS);
            }
        }

        /// Score never decreases within a run; it only returns to zero
        /// through a reset.
        #[test]
        fn prop_score_monotonic_while_playing(script in proptest::collection::vec(any::<bool>(), 1..600)) {
            let mut state = GameState::new(0x5C0E);
            let mut prev_score = 0;
            let mut prev_phase = state.phase;
            for jump in script {
                tick(&mut state, &TickInput { jump });
                if state.phase == GamePhase::Playing && prev_phase == GamePhase::Playing {
                    prop_assert!(state.score >= prev_score);
                }
                prev_score = state.score;
                prev_phase = state.phase;
            }
        }
    }
}

//! Game state and core simulation types
//!
//! Everything the frame driver owns lives here. No platform types, no
//! rendering, no audio - the simulation only records what happened.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first jump input
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart input
    GameOver,
}

/// Side effects requested by the simulation, drained by the frame driver
/// each frame (audio cues, high-score recording)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Grounded jump
    Jumped,
    /// Mid-air jump (the last one available)
    DoubleJumped,
    /// Player hit an obstacle; the run ended
    Collided,
    /// An obstacle scrolled past the left edge
    Scored,
}

/// The player sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner in playfield units
    pub pos: Vec2,
    /// Vertical velocity, units per tick (negative = up)
    pub vel_y: f32,
    /// Jumps remaining before ground contact refills them
    pub jumps_left: u8,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_SIZE),
            vel_y: 0.0,
            jumps_left: MAX_JUMPS,
        }
    }

    /// Bottom edge (the feet line)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_SIZE
    }

    /// Resting on the ground line
    #[inline]
    pub fn grounded(&self) -> bool {
        self.bottom() >= GROUND_Y
    }

    /// Center of the feet, where jump particles burst from
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + PLAYER_SIZE / 2.0, self.bottom())
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Apply gravity and integrate position for one tick, clamping to the
    /// ground line. Velocity zeroes and jumps refill on contact.
    pub fn apply_physics(&mut self) {
        self.vel_y += GRAVITY;
        self.pos.y += self.vel_y;
        if self.bottom() > GROUND_Y {
            self.pos.y = GROUND_Y - PLAYER_SIZE;
            self.vel_y = 0.0;
            self.jumps_left = MAX_JUMPS;
        }
    }

    /// Try to jump. Returns the event to emit, or None when out of jumps.
    pub fn try_jump(&mut self) -> Option<GameEvent> {
        if self.jumps_left == 0 {
            return None;
        }
        self.vel_y = JUMP_IMPULSE;
        let event = if self.jumps_left == 1 {
            GameEvent::DoubleJumped
        } else {
            GameEvent::Jumped
        };
        self.jumps_left -= 1;
        Some(event)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A scrolling obstacle. Width is fixed; height is rolled at spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Top-left corner in playfield units
    pub pos: Vec2,
    pub height: f32,
}

impl Obstacle {
    /// Spawn at the right edge, standing on the ground line
    pub fn new(height: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYFIELD_WIDTH, GROUND_Y - height),
            height,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, OBSTACLE_WIDTH, self.height)
    }

    /// Fully past the left edge (scores and despawns)
    #[inline]
    pub fn passed(&self) -> bool {
        self.pos.x + OBSTACLE_WIDTH < 0.0
    }
}

/// A jump-burst particle, purely visual
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Disk radius; shrinks every tick, dead at <= 0
    pub size: f32,
    /// Color hue in degrees (rendered at full saturation)
    pub hue: f32,
}

/// Power-up kinds. Pickup wiring is incomplete: nothing spawns these during
/// play yet, but the container participates in scrolling and reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Invincibility,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Powerup {
    pub pos: Vec2,
    pub kind: PowerupKind,
}

/// Active power-up effects. Only the collision gate consumes these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    pub invincible_ticks: u32,
}

impl ActiveEffects {
    #[inline]
    pub fn invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    pub fn arm_invincibility(&mut self) {
        self.invincible_ticks = INVINCIBILITY_TICKS;
    }

    /// Count down one tick of every timed effect
    pub fn decay(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
    }
}

/// Complete game state, owned by the frame driver
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; the only source of randomness in the simulation
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub powerups: Vec<Powerup>,
    pub effects: ActiveEffects,
    /// Ticks since the last obstacle spawn
    pub spawn_timer: u32,
    /// Current spawn cadence; tightens as the score climbs
    pub spawn_interval: u32,
    /// Current obstacle speed; rises as the score climbs
    pub obstacle_speed: f32,
    /// Background scroll offsets in [0, tile width)
    pub bg_offset: f32,
    pub cloud_offset: f32,
    /// Events emitted this tick, drained by the driver
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            time_ticks: 0,
            player: Player::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            spawn_timer: 0,
            spawn_interval: SPAWN_INTERVAL,
            obstacle_speed: OBSTACLE_SPEED,
            bg_offset: 0.0,
            cloud_offset: 0.0,
            events: Vec::new(),
        }
    }

    /// Re-initialize run state and enter Playing. The RNG and the scroll
    /// offsets carry over: they are not part of a run.
    pub fn reset(&mut self) {
        self.player = Player::new();
        self.obstacles.clear();
        self.particles.clear();
        self.powerups.clear();
        self.effects = ActiveEffects::default();
        self.score = 0;
        self.spawn_timer = 0;
        self.spawn_interval = SPAWN_INTERVAL;
        self.obstacle_speed = OBSTACLE_SPEED;
        self.phase = GamePhase::Playing;
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_grounded() {
        let player = Player::new();
        assert_eq!(player.bottom(), GROUND_Y);
        assert!(player.grounded());
        assert_eq!(player.jumps_left, MAX_JUMPS);
    }

    #[test]
    fn test_jump_consumes_and_refills() {
        let mut player = Player::new();
        assert_eq!(player.try_jump(), Some(GameEvent::Jumped));
        assert_eq!(player.jumps_left, 1);
        assert_eq!(player.try_jump(), Some(GameEvent::DoubleJumped));
        assert_eq!(player.jumps_left, 0);

        // Out of jumps: no-op, velocity untouched
        let vel_before = player.vel_y;
        assert_eq!(player.try_jump(), None);
        assert_eq!(player.vel_y, vel_before);

        // Rise, then fall back to the ground; jumps refill on contact
        player.apply_physics();
        assert!(!player.grounded());
        while !player.grounded() {
            player.apply_physics();
        }
        assert_eq!(player.jumps_left, MAX_JUMPS);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_obstacle_spawns_on_ground() {
        let obs = Obstacle::new(80.0);
        assert_eq!(obs.pos.x, PLAYFIELD_WIDTH);
        assert_eq!(obs.pos.y + obs.height, GROUND_Y);
        assert!(!obs.passed());
    }

    #[test]
    fn test_obstacle_passed() {
        let mut obs = Obstacle::new(60.0);
        obs.pos.x = -OBSTACLE_WIDTH - 10.0;
        assert!(obs.passed());
        obs.pos.x = -OBSTACLE_WIDTH;
        assert!(!obs.passed());
    }

    #[test]
    fn test_invincibility_arm_and_decay() {
        let mut effects = ActiveEffects::default();
        assert!(!effects.invincible());

        effects.arm_invincibility();
        assert!(effects.invincible());

        for _ in 0..INVINCIBILITY_TICKS {
            effects.decay();
        }
        assert!(!effects.invincible());

        // Decay past zero saturates
        effects.decay();
        assert_eq!(effects.invincible_ticks, 0);
    }

    #[test]
    fn test_reset_enters_playing_with_clean_run() {
        let mut state = GameState::new(7);
        state.score = 12;
        state.obstacles.push(Obstacle::new(70.0));
        state.effects.arm_invincibility();
        state.phase = GamePhase::GameOver;

        state.reset();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.particles.is_empty());
        assert!(state.powerups.is_empty());
        assert!(!state.effects.invincible());
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL);
        assert_eq!(state.obstacle_speed, OBSTACLE_SPEED);
    }

    #[test]
    fn test_drain_events_empties() {
        let mut state = GameState::new(1);
        state.events.push(GameEvent::Scored);
        state.events.push(GameEvent::Jumped);

        let drained = state.drain_events();
        assert_eq!(drained, vec![GameEvent::Scored, GameEvent::Jumped]);
        assert!(state.events.is_empty());
    }
}

//! Graviton Surge - gravity-field arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Fixed constants that are not balance knobs
pub mod consts {
    /// Reference frame rate; per-frame velocities are expressed at this rate
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Target frame interval for the driving scheduler (ms)
    pub const TARGET_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest delta the scheduler hands to the step, as a multiple of the frame interval
    pub const MAX_FRAME_DELTA_FACTOR: f64 = 3.0;

    /// Stick deadzone for aim/facing
    pub const STICK_DEADZONE: f32 = 0.3;
    /// Trigger deadzone for gravity modes
    pub const TRIGGER_DEADZONE: f32 = 0.1;
    /// Aim magnitude above which the gravity field becomes a cone
    pub const AIM_THRESHOLD: f32 = 0.3;
    /// Default cone half angle (60 degrees)
    pub const FIELD_HALF_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Debris bounce coefficient
    pub const RESTITUTION: f32 = 0.7;
    /// Extra separation applied to each body after de-overlap
    pub const SEPARATION_MARGIN: f32 = 1.0;

    /// Entity radii
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const SHIELD_RADIUS: f32 = 35.0;
    pub const DEBRIS_SMALL_RADIUS: f32 = 8.0;
    pub const DEBRIS_MEDIUM_RADIUS: f32 = 15.0;
    pub const DEBRIS_LARGE_RADIUS: f32 = 25.0;
    pub const POWERUP_RADIUS: f32 = 12.0;

    /// Hard caps
    pub const MAX_LIVES: u8 = 3;
    pub const MAX_SHIELD_CHARGES: u8 = 3;
    pub const MAX_MULTIPLIER: u8 = 8;
    pub const MAX_DIFFICULTY: u8 = 10;

    /// Spawn geometry
    pub const EDGE_SPAWN_MARGIN: f32 = 10.0;
    pub const SPAWN_PADDING: f32 = 50.0;
    pub const SPAWN_SAFE_RADIUS: f32 = 150.0;
    pub const POWERUP_SPAWN_ATTEMPTS: u32 = 10;
    pub const INITIAL_DEBRIS_ATTEMPTS: u32 = 5;
    /// Debris further than this outside the screen is culled
    pub const CULL_MARGIN: f32 = 150.0;
}

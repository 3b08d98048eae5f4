//! Game state and core simulation types
//!
//! The whole session lives in [`GameState`]: entities, scoring, timers, the
//! seeded RNG and the button latches. The step consumes and returns it.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::ControlLatches;
use super::spawner;
use crate::{Tuning, TuningError};
use crate::consts::*;

/// Unique entity identifier
///
/// `seq` increases monotonically within a session; `salt` comes from the
/// session seed so ids from different runs do not collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    pub seq: u32,
    pub salt: u32,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity-{}-{:08x}", self.seq, self.salt)
    }
}

/// Hands out [`EntityId`]s for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
    salt: u32,
}

impl IdAllocator {
    pub fn new(salt: u32) -> Self {
        Self { next: 1, salt }
    }

    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId {
            seq: self.next,
            salt: self.salt,
        };
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point so a circle of `radius` stays on screen
    pub fn clamp_with_radius(&self, point: Vec2, radius: f32) -> Vec2 {
        // max() first keeps clamp from panicking on screens smaller than the circle
        Vec2::new(
            point.x.clamp(radius, (self.width - radius).max(radius)),
            point.y.clamp(radius, (self.height - radius).max(radius)),
        )
    }

    /// True once a point is more than `margin` outside the screen
    pub fn is_outside(&self, point: Vec2, margin: f32) -> bool {
        point.x < -margin
            || point.x > self.width + margin
            || point.y < -margin
            || point.y > self.height + margin
    }
}

/// Player gravity field mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityMode {
    #[default]
    None,
    Attract,
    Repel,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub energy: f32,
    pub max_energy: f32,
    pub lives: u8,
    pub shield_charges: u8,
    pub shield_active: bool,
    /// Remaining shield time (ms)
    pub shield_remaining_ms: f32,
    pub gravity_mode: GravityMode,
    /// 0..=1, zero when no field is active
    pub gravity_intensity: f32,
    /// Aim vector; zero means the field is omnidirectional
    pub gravity_direction: Vec2,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            rotation: -std::f32::consts::FRAC_PI_2, // Pointing up
            energy: tuning.max_energy,
            max_energy: tuning.max_energy,
            lives: MAX_LIVES,
            shield_charges: tuning.starting_shield_charges.min(MAX_SHIELD_CHARGES),
            shield_active: false,
            shield_remaining_ms: 0.0,
            gravity_mode: GravityMode::None,
            gravity_intensity: 0.0,
            gravity_direction: Vec2::ZERO,
        }
    }

    /// Collision radius against debris (shield bubble when active)
    pub fn effective_radius(&self) -> f32 {
        if self.shield_active {
            SHIELD_RADIUS
        } else {
            self.radius
        }
    }

    pub fn is_attracting(&self) -> bool {
        self.gravity_mode == GravityMode::Attract && self.gravity_intensity > 0.0
    }
}

/// Debris size tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebrisSize {
    Small,
    Medium,
    Large,
}

impl DebrisSize {
    pub fn radius(&self) -> f32 {
        match self {
            DebrisSize::Small => DEBRIS_SMALL_RADIUS,
            DebrisSize::Medium => DEBRIS_MEDIUM_RADIUS,
            DebrisSize::Large => DEBRIS_LARGE_RADIUS,
        }
    }

    pub fn mass(&self) -> f32 {
        match self {
            DebrisSize::Small => 1.0,
            DebrisSize::Medium => 2.0,
            DebrisSize::Large => 3.0,
        }
    }

    /// Display color (0xRRGGBB)
    pub fn color(&self) -> u32 {
        match self {
            DebrisSize::Small => 0x888899,
            DebrisSize::Medium => 0x667788,
            DebrisSize::Large => 0x556677,
        }
    }

    /// Fragment tier and count produced when this size is destroyed
    pub fn fragments(&self) -> Option<(DebrisSize, usize)> {
        match self {
            DebrisSize::Small => None,
            DebrisSize::Medium => Some((DebrisSize::Small, 2)),
            DebrisSize::Large => Some((DebrisSize::Medium, 3)),
        }
    }
}

/// A drifting obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debris {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub mass: f32,
    pub size: DebrisSize,
    pub color: u32,
}

impl Debris {
    pub fn new(id: EntityId, size: DebrisSize, pos: Vec2, vel: Vec2, rotation: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: size.radius(),
            rotation,
            mass: size.mass(),
            size,
            color: size.color(),
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Energy,
    Shield,
    Multiplier,
    Life,
}

impl PowerupKind {
    /// Fixed effect value per type
    pub fn value(&self) -> f32 {
        match self {
            PowerupKind::Energy => 30.0,
            PowerupKind::Shield | PowerupKind::Multiplier | PowerupKind::Life => 1.0,
        }
    }

    /// Display color (0xRRGGBB)
    pub fn color(&self) -> u32 {
        match self {
            PowerupKind::Energy => 0xffff00,
            PowerupKind::Shield => 0x00ff88,
            PowerupKind::Multiplier => 0xff8800,
            PowerupKind::Life => 0xff4488,
        }
    }
}

/// A collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: EntityId,
    pub kind: PowerupKind,
    pub value: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub color: u32,
}

impl Powerup {
    pub fn new(id: EntityId, kind: PowerupKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            value: kind.value(),
            pos,
            vel,
            radius: POWERUP_RADIUS,
            rotation: 0.0,
            color: kind.color(),
        }
    }
}

/// Things that happened during the last tick, for presentation/audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Paused,
    Resumed,
    LifeLost { debris: EntityId },
    DebrisDestroyed { debris: EntityId, size: DebrisSize },
    PowerupCollected { powerup: EntityId, kind: PowerupKind },
    ShieldActivated,
    ShieldExpired,
    BurstFired { affected: usize },
    DifficultyUp { level: u8 },
    GameOver { score: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; every random roll goes through this
    pub rng: Pcg32,
    pub player: Player,
    /// Active debris in insertion order; this order decides which debris wins the single hit
    pub debris: Vec<Debris>,
    pub powerups: Vec<Powerup>,
    pub score: u64,
    /// Fractional survival score not yet folded into `score`
    pub score_carry: f32,
    pub multiplier: u8,
    pub game_over: bool,
    pub paused: bool,
    pub bounds: Bounds,
    pub difficulty: u8,
    /// Cumulative elapsed time supplied by the driver (ms)
    pub elapsed_ms: f64,
    pub last_debris_spawn_ms: f64,
    pub last_powerup_spawn_ms: f64,
    pub controls: ControlLatches,
    pub tuning: Tuning,
    pub ids: IdAllocator,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session seeded from the wall clock
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self::with_seed(screen_width, screen_height, time_seed())
    }

    /// Create a fresh session with a fixed seed
    pub fn with_seed(screen_width: f32, screen_height: f32, seed: u64) -> Self {
        Self::build(screen_width, screen_height, seed, Tuning::default())
    }

    /// Create a fresh session with a fixed seed and custom balance
    ///
    /// Fails if `tuning` does not pass [`Tuning::validate`].
    pub fn with_tuning(
        screen_width: f32,
        screen_height: f32,
        seed: u64,
        tuning: Tuning,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(screen_width, screen_height, seed, tuning))
    }

    /// Assemble a session from already validated tuning
    fn build(screen_width: f32, screen_height: f32, seed: u64, tuning: Tuning) -> Self {
        let bounds = Bounds::new(screen_width, screen_height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = IdAllocator::new(salt_from_seed(seed));

        let player = Player::new(ids.next_id(), bounds.center(), &tuning);
        let debris = spawner::spawn_initial_debris(
            &mut rng,
            &mut ids,
            bounds,
            player.pos,
            tuning.initial_debris,
        );

        log::info!(
            "New session: seed={seed:#x}, bounds={screen_width}x{screen_height}, debris={}",
            debris.len()
        );

        Self {
            seed,
            rng,
            player,
            debris,
            powerups: Vec::new(),
            score: 0,
            score_carry: 0.0,
            multiplier: 1,
            game_over: false,
            paused: false,
            bounds,
            difficulty: 1,
            elapsed_ms: 0.0,
            last_debris_spawn_ms: 0.0,
            last_powerup_spawn_ms: 0.0,
            controls: ControlLatches::default(),
            tuning,
            ids,
            events: Vec::new(),
        }
    }

    /// Discard this session and build a new one with the same bounds and tuning
    pub fn restart(&self) -> Self {
        log::info!("Restarting session (final score {})", self.score);
        Self::build(
            self.bounds.width,
            self.bounds.height,
            time_seed(),
            self.tuning.clone(),
        )
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        self.ids.next_id()
    }
}

/// Seed derived from the wall clock
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

fn salt_from_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

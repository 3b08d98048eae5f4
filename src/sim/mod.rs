//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One synchronous step per frame, no I/O
//! - Seeded RNG only, owned by the game state
//! - Stable iteration order (debris list insertion order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod gravity;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod vector;

pub use clock::FrameClock;
pub use collision::{circles_overlap, resolve_debris_collisions, resolve_pair};
pub use gravity::{GravityField, aimed_gravity, graviton_burst};
pub use input::{ButtonLatch, ControlLatches, InputSnapshot, LatchState};
pub use spawner::{break_debris, spawn_debris, spawn_initial_debris, spawn_powerup};
pub use state::{
    Bounds, Debris, DebrisSize, EntityId, GameEvent, GameState, GravityMode, IdAllocator, Player,
    Powerup, PowerupKind,
};
pub use tick::{difficulty_for, step, tick};

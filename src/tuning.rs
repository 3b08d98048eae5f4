//! Data-driven game balance
//!
//! Every gameplay knob the step consults lives in [`Tuning`]. Defaults match
//! the shipped balance; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading tuning overrides.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning value `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics (per reference frame) ===
    /// Velocity added per frame at full stick deflection
    pub player_acceleration: f32,
    /// Multiplicative velocity decay per frame
    pub player_drag: f32,
    /// Speed cap (pixels per frame)
    pub max_player_speed: f32,

    // === Gravity field ===
    pub gravity_max_force: f32,
    pub gravity_range: f32,
    /// Powerups feel the field this much harder
    pub powerup_intensity_boost: f32,
    /// Powerups feel the field from this much further away
    pub powerup_range_boost: f32,

    // === Energy (per second) ===
    pub max_energy: f32,
    pub energy_drain_rate: f32,
    pub energy_regen_rate: f32,

    // === Graviton burst ===
    pub burst_energy_cost: f32,
    pub burst_radius: f32,
    pub burst_force: f32,

    // === Shield ===
    /// Shield lifetime (ms)
    pub shield_duration_ms: f32,
    pub starting_shield_charges: u8,

    // === Spawning ===
    pub initial_debris: usize,
    pub max_debris: usize,
    pub max_powerups: usize,
    /// Base debris interval (ms); shrinks by `debris_interval_step_ms` per level
    pub debris_spawn_interval_ms: f64,
    pub debris_interval_step_ms: f64,
    pub min_debris_spawn_interval_ms: f64,
    pub powerup_spawn_interval_ms: f64,

    // === Scoring ===
    pub debris_destroy_score: u64,
    pub powerup_collect_score: u64,
    pub survival_score_per_second: f32,

    // === Difficulty ===
    /// Elapsed ms per difficulty level
    pub difficulty_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_acceleration: 0.5,
            player_drag: 0.95,
            max_player_speed: 8.0,

            gravity_max_force: 5.0,
            gravity_range: 200.0,
            powerup_intensity_boost: 1.5,
            powerup_range_boost: 1.2,

            // 0.3 / 0.1 per frame at 60 Hz
            max_energy: 100.0,
            energy_drain_rate: 18.0,
            energy_regen_rate: 6.0,

            burst_energy_cost: 30.0,
            burst_radius: 200.0,
            burst_force: 15.0,

            shield_duration_ms: 2000.0,
            starting_shield_charges: 3,

            initial_debris: 8,
            max_debris: 25,
            max_powerups: 5,
            debris_spawn_interval_ms: 1500.0,
            debris_interval_step_ms: 100.0,
            min_debris_spawn_interval_ms: 500.0,
            powerup_spawn_interval_ms: 8000.0,

            debris_destroy_score: 10,
            powerup_collect_score: 50,
            survival_score_per_second: 1.0,

            difficulty_interval_ms: 30_000.0,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would break the step's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::OutOfRange { field, value })
            }
        }

        positive("max_player_speed", self.max_player_speed as f64)?;
        positive("gravity_range", self.gravity_range as f64)?;
        positive("max_energy", self.max_energy as f64)?;
        positive("burst_radius", self.burst_radius as f64)?;
        positive("shield_duration_ms", self.shield_duration_ms as f64)?;
        positive("difficulty_interval_ms", self.difficulty_interval_ms)?;
        positive("powerup_spawn_interval_ms", self.powerup_spawn_interval_ms)?;
        positive(
            "min_debris_spawn_interval_ms",
            self.min_debris_spawn_interval_ms,
        )?;

        if !(0.0..=1.0).contains(&self.player_drag) {
            return Err(TuningError::OutOfRange {
                field: "player_drag",
                value: self.player_drag as f64,
            });
        }
        if self.starting_shield_charges > crate::consts::MAX_SHIELD_CHARGES {
            return Err(TuningError::OutOfRange {
                field: "starting_shield_charges",
                value: self.starting_shield_charges as f64,
            });
        }
        if self.burst_energy_cost < 0.0 || self.burst_energy_cost > self.max_energy {
            return Err(TuningError::OutOfRange {
                field: "burst_energy_cost",
                value: self.burst_energy_cost as f64,
            });
        }
        Ok(())
    }

    /// Debris spawn interval for a difficulty level, floored at the minimum
    pub fn debris_interval_for(&self, difficulty: u8) -> f64 {
        (self.debris_spawn_interval_ms - difficulty as f64 * self.debris_interval_step_ms)
            .max(self.min_debris_spawn_interval_ms)
    }
}

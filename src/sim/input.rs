//! Per-frame input snapshot and edge-triggered button latches

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input commands for a single tick, sampled once before the step runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Left stick, each axis in [-1, 1]
    pub move_stick: Vec2,
    /// Right stick, each axis in [-1, 1]
    pub aim_stick: Vec2,
    /// Attract trigger, [0, 1]
    pub attract: f32,
    /// Repel trigger, [0, 1]
    pub repel: f32,
    pub shield: bool,
    pub burst: bool,
    pub pause: bool,
}

impl InputSnapshot {
    /// Clamp every field into its documented range
    pub fn sanitized(&self) -> Self {
        let finite_or_zero = |t: f32| if t.is_finite() { t } else { 0.0 };
        let axis = |v: Vec2| {
            Vec2::new(finite_or_zero(v.x), finite_or_zero(v.y))
                .clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
        };
        let trigger = |t: f32| finite_or_zero(t).clamp(0.0, 1.0);
        Self {
            move_stick: axis(self.move_stick),
            aim_stick: axis(self.aim_stick),
            attract: trigger(self.attract),
            repel: trigger(self.repel),
            ..*self
        }
    }
}

/// Button edge state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LatchState {
    /// Button up
    #[default]
    Idle,
    /// Button down, press not yet consumed
    ReleasedPending,
    /// Button down, press already consumed
    Held,
}

/// Rising-edge detector for one button
///
/// A press fires at most once per hold. A press that arrives while its action
/// is gated stays pending and fires as soon as the gate opens, unless the
/// button is released first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonLatch {
    state: LatchState,
}

impl ButtonLatch {
    pub fn state(&self) -> LatchState {
        self.state
    }

    /// Feed the current button level
    pub fn update(&mut self, pressed: bool) {
        self.state = match (self.state, pressed) {
            (_, false) => LatchState::Idle,
            (LatchState::Idle, true) => LatchState::ReleasedPending,
            (state, true) => state,
        };
    }

    pub fn is_pending(&self) -> bool {
        self.state == LatchState::ReleasedPending
    }

    /// Consume a pending press if `gate` allows it
    pub fn fire_if(&mut self, gate: bool) -> bool {
        if gate && self.is_pending() {
            self.state = LatchState::Held;
            true
        } else {
            false
        }
    }
}

/// Latches for every edge-triggered control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlLatches {
    pub shield: ButtonLatch,
    pub burst: ButtonLatch,
    pub pause: ButtonLatch,
}

//! Player gravity field and graviton burst
//!
//! Falloff is linear in distance and in cone angle, not inverse-square:
//! predictable to play against and easy to tune.

use glam::Vec2;

use super::state::Debris;
use super::vector::angle_between;
use crate::consts::{AIM_THRESHOLD, FIELD_HALF_ANGLE};

/// A configured field emitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub source: Vec2,
    /// Aim vector; magnitude above the aim threshold makes the field a cone
    pub aim: Vec2,
    pub intensity: f32,
    pub max_range: f32,
    pub attract: bool,
    /// Cone half angle (radians)
    pub half_angle: f32,
}

impl GravityField {
    pub fn new(source: Vec2, aim: Vec2, intensity: f32, max_range: f32, attract: bool) -> Self {
        Self {
            source,
            aim,
            intensity,
            max_range,
            attract,
            half_angle: FIELD_HALF_ANGLE,
        }
    }

    pub fn with_half_angle(mut self, half_angle: f32) -> Self {
        self.half_angle = half_angle;
        self
    }

    /// True when the field is restricted to a cone
    pub fn is_aimed(&self) -> bool {
        self.aim.length() > AIM_THRESHOLD
    }

    /// Force on a target at `target`, before mass scaling
    pub fn force_at(&self, target: Vec2) -> Vec2 {
        aimed_gravity(
            self.source,
            self.aim,
            target,
            self.intensity,
            self.max_range,
            self.attract,
            self.half_angle,
        )
    }
}

/// Force the field applies to a target
///
/// Zero at the source itself, beyond `max_range`, or outside the cone when
/// aiming. Aimed force scales with `(1 - angle/half_angle)`; unaimed force is
/// omnidirectional at half strength.
pub fn aimed_gravity(
    source: Vec2,
    aim: Vec2,
    target: Vec2,
    intensity: f32,
    max_range: f32,
    attract: bool,
    half_angle: f32,
) -> Vec2 {
    let to_target = target - source;
    let distance = to_target.length();
    if distance == 0.0 || distance > max_range {
        return Vec2::ZERO;
    }

    let distance_falloff = 1.0 - distance / max_range;
    let magnitude = if aim.length() > AIM_THRESHOLD {
        let angle = angle_between(aim, to_target);
        if angle > half_angle {
            return Vec2::ZERO;
        }
        intensity * (1.0 - angle / half_angle) * distance_falloff
    } else {
        intensity * distance_falloff * 0.5
    };

    let outward = to_target / distance;
    let direction = if attract { -outward } else { outward };
    direction * magnitude
}

/// Radial repulsion impulse with quadratic falloff
///
/// Returns how many debris were pushed.
pub fn graviton_burst(debris: &mut [Debris], origin: Vec2, radius: f32, force: f32) -> usize {
    let mut affected = 0;
    for d in debris.iter_mut() {
        let offset = d.pos - origin;
        let distance = offset.length();
        if distance == 0.0 || distance > radius {
            continue;
        }
        let falloff = 1.0 - distance / radius;
        let push = force * falloff * falloff;
        d.vel += offset / distance * (push / d.mass);
        affected += 1;
    }
    affected
}

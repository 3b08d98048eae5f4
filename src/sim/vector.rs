//! 2D vector helpers on top of `glam::Vec2`
//!
//! glam already covers add/sub/scale/dot/lerp/distance and
//! `normalize_or_zero`. The helpers here fill the gaps the simulation needs
//! and pin down the zero-vector behaviour.

use glam::Vec2;

/// Rescale `v` to `max` only if its magnitude exceeds `max`
#[inline]
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len <= max {
        v
    } else {
        v.normalize_or_zero() * max
    }
}

/// Rotate `v` counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Unsigned angle between two vectors in `[0, π]`
///
/// Either input being zero yields π/2 (dot of a zero normal is 0).
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let dot = a.normalize_or_zero().dot(b.normalize_or_zero());
    dot.clamp(-1.0, 1.0).acos()
}

/// Direction angle of `v` (radians, atan2 convention)
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector pointing at `angle`
#[inline]
pub fn from_heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

//! Circle collision detection and impulse response
//!
//! Debris bounce off each other with a mass-weighted elastic impulse along
//! the contact normal, then get pushed apart so they do not stay embedded.

use glam::Vec2;

use super::state::Debris;
use crate::consts::{RESTITUTION, SEPARATION_MARGIN};

/// Result of a circle-circle contact check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first circle toward the second
    pub normal: Vec2,
    /// Overlap depth (sum of radii minus center distance)
    pub penetration: f32,
}

/// Strict overlap test: touching circles do not collide
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Contact info for two overlapping circles, `None` if apart
pub fn circle_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<Contact> {
    let delta = b_pos - a_pos;
    let dist = delta.length();
    let radii = a_radius + b_radius;
    if dist >= radii {
        return None;
    }
    // Coincident centers have no defined normal; pick +x so separation still happens
    let normal = if dist > 0.0 { delta / dist } else { Vec2::X };
    Some(Contact {
        normal,
        penetration: radii - dist,
    })
}

/// Velocities after an elastic impulse along `normal`
///
/// Pairs already separating (relative velocity along the normal negative)
/// come back unchanged.
pub fn impulse_velocities(
    a_vel: Vec2,
    a_mass: f32,
    b_vel: Vec2,
    b_mass: f32,
    normal: Vec2,
) -> (Vec2, Vec2) {
    let relative = a_vel - b_vel;
    let along_normal = relative.dot(normal);
    if along_normal < 0.0 {
        return (a_vel, b_vel);
    }

    // Post-impact closing speed is -RESTITUTION times the pre-impact one
    let total_mass = a_mass + b_mass;
    let impulse = (1.0 + RESTITUTION) * along_normal / total_mass;
    let impulse_vec = normal * impulse;

    (a_vel - impulse_vec * b_mass, b_vel + impulse_vec * a_mass)
}

/// Resolve one debris pair in place; returns true if they were in contact
pub fn resolve_pair(a: &mut Debris, b: &mut Debris) -> bool {
    let Some(contact) = circle_contact(a.pos, a.radius, b.pos, b.radius) else {
        return false;
    };

    let (a_vel, b_vel) = impulse_velocities(a.vel, a.mass, b.vel, b.mass, contact.normal);
    a.vel = a_vel;
    b.vel = b_vel;

    let push = contact.normal * (contact.penetration / 2.0 + SEPARATION_MARGIN);
    a.pos -= push;
    b.pos += push;
    true
}

/// All-pairs debris resolution in list order
///
/// O(n²); fine at the debris population cap, revisit with a spatial hash if
/// the cap grows.
pub fn resolve_debris_collisions(debris: &mut [Debris]) -> usize {
    let mut contacts = 0;
    for i in 0..debris.len() {
        let (head, tail) = debris.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b) {
                contacts += 1;
            }
        }
    }
    contacts
}

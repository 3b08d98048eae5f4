//! Procedural spawning of debris and powerups
//!
//! Every roll goes through the caller's RNG so a fixed seed reproduces the
//! same field. Placement retries are bounded: after the last attempt the
//! entity is kept even if it landed inside the exclusion radius.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Bounds, Debris, DebrisSize, IdAllocator, Powerup, PowerupKind};
use super::vector::from_heading;
use crate::consts::*;

/// Uniform sample in `[lo, hi)`, or the midpoint when the range is empty
fn range_or_mid<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Weighted size roll; larger debris become likelier as difficulty rises
pub fn roll_debris_size<R: Rng + ?Sized>(rng: &mut R, difficulty: u8) -> DebrisSize {
    let level = difficulty as f32;
    let large_p = (0.1 + level * 0.02).min(0.3);
    let medium_p = (0.3 + level * 0.02).min(0.5);

    let roll: f32 = rng.random();
    if roll < large_p {
        DebrisSize::Large
    } else if roll < large_p + medium_p {
        DebrisSize::Medium
    } else {
        DebrisSize::Small
    }
}

/// Spawn one debris just outside a random screen edge, drifting inward
pub fn spawn_debris<R: Rng + ?Sized>(
    rng: &mut R,
    ids: &mut IdAllocator,
    bounds: Bounds,
    difficulty: u8,
) -> Debris {
    let size = roll_debris_size(rng, difficulty);
    let radius = size.radius();
    let offset = radius + EDGE_SPAWN_MARGIN;

    let base_speed = 1.0 + difficulty as f32 * 0.3;
    let speed = rng.random_range(base_speed..base_speed + 1.5);
    let drift = rng.random_range(-1.0f32..1.0) * speed * 0.5;

    let (pos, vel) = match rng.random_range(0..4u8) {
        // Top
        0 => (
            Vec2::new(range_or_mid(rng, 0.0, bounds.width), -offset),
            Vec2::new(drift, speed),
        ),
        // Right
        1 => (
            Vec2::new(bounds.width + offset, range_or_mid(rng, 0.0, bounds.height)),
            Vec2::new(-speed, drift),
        ),
        // Bottom
        2 => (
            Vec2::new(range_or_mid(rng, 0.0, bounds.width), bounds.height + offset),
            Vec2::new(drift, -speed),
        ),
        // Left
        _ => (
            Vec2::new(-offset, range_or_mid(rng, 0.0, bounds.height)),
            Vec2::new(speed, drift),
        ),
    };

    let rotation = rng.random_range(0.0..TAU);
    Debris::new(ids.next_id(), size, pos, vel, rotation)
}

/// Weighted powerup roll: energy 40%, shield 30%, multiplier 20%, life 10%
pub fn roll_powerup_kind<R: Rng + ?Sized>(rng: &mut R) -> PowerupKind {
    let roll: f32 = rng.random();
    if roll < 0.4 {
        PowerupKind::Energy
    } else if roll < 0.7 {
        PowerupKind::Shield
    } else if roll < 0.9 {
        PowerupKind::Multiplier
    } else {
        PowerupKind::Life
    }
}

/// Spawn a powerup inside the padded screen, away from the player if possible
pub fn spawn_powerup<R: Rng + ?Sized>(
    rng: &mut R,
    ids: &mut IdAllocator,
    bounds: Bounds,
    player_pos: Vec2,
) -> Powerup {
    let kind = roll_powerup_kind(rng);

    let mut pos = bounds.center();
    for _ in 0..POWERUP_SPAWN_ATTEMPTS {
        pos = Vec2::new(
            range_or_mid(rng, SPAWN_PADDING, bounds.width - SPAWN_PADDING),
            range_or_mid(rng, SPAWN_PADDING, bounds.height - SPAWN_PADDING),
        );
        if pos.distance(player_pos) >= SPAWN_SAFE_RADIUS {
            break;
        }
    }

    // Slight drift
    let vel = Vec2::new(
        rng.random_range(-0.3f32..0.3),
        rng.random_range(-0.3f32..0.3),
    );

    Powerup::new(ids.next_id(), kind, pos, vel)
}

/// Spawn the opening debris field at difficulty 1, re-rolling pieces that
/// land near the player's start
pub fn spawn_initial_debris<R: Rng + ?Sized>(
    rng: &mut R,
    ids: &mut IdAllocator,
    bounds: Bounds,
    player_pos: Vec2,
    count: usize,
) -> Vec<Debris> {
    let mut field = Vec::with_capacity(count);
    for _ in 0..count {
        let mut debris = spawn_debris(rng, ids, bounds, 1);
        let mut attempts = 0;
        while debris.pos.distance(player_pos) < SPAWN_SAFE_RADIUS
            && attempts < INITIAL_DEBRIS_ATTEMPTS
        {
            debris = spawn_debris(rng, ids, bounds, 1);
            attempts += 1;
        }
        field.push(debris);
    }
    field
}

/// Fragments produced by destroying `parent`
///
/// Large splits into 3 medium, medium into 2 small, small into nothing.
/// Fragments inherit the parent's position and velocity plus an evenly spaced
/// radial kick with a little angular jitter.
pub fn break_debris<R: Rng + ?Sized>(
    rng: &mut R,
    ids: &mut IdAllocator,
    parent: &Debris,
) -> Vec<Debris> {
    let Some((size, count)) = parent.size.fragments() else {
        return Vec::new();
    };

    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU + rng.random_range(-0.3f32..0.3);
            let speed = rng.random_range(1.5f32..3.0);
            let vel = parent.vel + from_heading(angle) * speed;
            let rotation = rng.random_range(0.0..TAU);
            Debris::new(ids.next_id(), size, parent.pos, vel, rotation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Pcg32, IdAllocator, Bounds) {
        (Pcg32::seed_from_u64(1234), IdAllocator::new(0), Bounds::new(800.0, 600.0))
    }

    fn parent(size: DebrisSize) -> Debris {
        Debris::new(
            EntityId { seq: 99, salt: 0 },
            size,
            Vec2::new(200.0, 200.0),
            Vec2::new(1.0, -1.0),
            0.0,
        )
    }

    #[test]
    fn test_fragment_counts() {
        let (mut rng, mut ids, _) = setup();
        let large = break_debris(&mut rng, &mut ids, &parent(DebrisSize::Large));
        assert_eq!(large.len(), 3);
        assert!(large.iter().all(|d| d.size == DebrisSize::Medium && d.mass == 2.0));

        let medium = break_debris(&mut rng, &mut ids, &parent(DebrisSize::Medium));
        assert_eq!(medium.len(), 2);
        assert!(medium.iter().all(|d| d.size == DebrisSize::Small && d.mass == 1.0));

        assert!(break_debris(&mut rng, &mut ids, &parent(DebrisSize::Small)).is_empty());
    }

    #[test]
    fn test_fragments_inherit_parent_motion() {
        let (mut rng, mut ids, _) = setup();
        let p = parent(DebrisSize::Large);
        for frag in break_debris(&mut rng, &mut ids, &p) {
            assert_eq!(frag.pos, p.pos);
            let kick = (frag.vel - p.vel).length();
            assert!((1.5..3.0).contains(&kick));
            assert_ne!(frag.id, p.id);
        }
    }

    #[test]
    fn test_debris_spawns_offscreen_moving_inward() {
        let (mut rng, mut ids, bounds) = setup();
        for _ in 0..200 {
            let d = spawn_debris(&mut rng, &mut ids, bounds, 5);
            assert!(d.radius > 0.0 && d.mass >= 1.0);
            let outside = d.pos.x < 0.0 || d.pos.y < 0.0 || d.pos.x > bounds.width || d.pos.y > bounds.height;
            assert!(outside, "spawned on screen at {:?}", d.pos);
            let toward_center = (bounds.center() - d.pos).dot(d.vel);
            assert!(toward_center > 0.0);
        }
    }

    #[test]
    fn test_size_weights_shift_with_difficulty() {
        let mut rng = Pcg32::seed_from_u64(5);
        let count_large = |rng: &mut Pcg32, level| {
            (0..5000)
                .filter(|_| roll_debris_size(rng, level) == DebrisSize::Large)
                .count()
        };
        let easy = count_large(&mut rng, 1);
        let hard = count_large(&mut rng, 10);
        // ~12% vs capped 30%
        assert!(easy < 900);
        assert!(hard > 1200);
    }

    #[test]
    fn test_powerup_avoids_player() {
        let (mut rng, mut ids, bounds) = setup();
        let player = bounds.center();
        for _ in 0..100 {
            let p = spawn_powerup(&mut rng, &mut ids, bounds, player);
            assert!(p.pos.x >= SPAWN_PADDING && p.pos.x <= bounds.width - SPAWN_PADDING);
            assert!(p.pos.y >= SPAWN_PADDING && p.pos.y <= bounds.height - SPAWN_PADDING);
            assert_eq!(p.value, p.kind.value());
        }
    }

    #[test]
    fn test_powerup_gives_up_on_tiny_screen() {
        // Whole screen is inside the exclusion radius; spawn still returns
        let (mut rng, mut ids, _) = setup();
        let bounds = Bounds::new(200.0, 200.0);
        let p = spawn_powerup(&mut rng, &mut ids, bounds, bounds.center());
        assert!(p.pos.distance(bounds.center()) < SPAWN_SAFE_RADIUS);
    }

    #[test]
    fn test_powerup_kind_weights() {
        let mut rng = Pcg32::seed_from_u64(77);
        let mut counts = [0usize; 4];
        for _ in 0..10_000 {
            let idx = match roll_powerup_kind(&mut rng) {
                PowerupKind::Energy => 0,
                PowerupKind::Shield => 1,
                PowerupKind::Multiplier => 2,
                PowerupKind::Life => 3,
            };
            counts[idx] += 1;
        }
        assert!((3600..4400).contains(&counts[0]));
        assert!((2600..3400).contains(&counts[1]));
        assert!((1600..2400).contains(&counts[2]));
        assert!((700..1300).contains(&counts[3]));
    }

    #[test]
    fn test_initial_debris_count_and_determinism() {
        let bounds = Bounds::new(800.0, 600.0);
        let spawn = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ids = IdAllocator::new(0);
            spawn_initial_debris(&mut rng, &mut ids, bounds, bounds.center(), 8)
        };
        let a = spawn(9);
        let b = spawn(9);
        assert_eq!(a.len(), 8);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
        }
    }
}

//! Per-frame simulation step
//!
//! Advances a [`GameState`] by one frame: pause gate, player, gravity and
//! energy, shield, debris, graviton burst, powerups, collisions and scoring,
//! spawning, difficulty, survival score, terminal check. In that order.

use glam::Vec2;

use super::collision::{circles_overlap, resolve_debris_collisions};
use super::gravity::{GravityField, graviton_burst};
use super::input::InputSnapshot;
use super::spawner::{break_debris, spawn_debris, spawn_powerup};
use super::state::{Debris, GameEvent, GameState, GravityMode, Powerup, PowerupKind};
use super::vector::{clamp_magnitude, heading};
use crate::consts::*;

/// Debris spin per reference frame, per unit of mass
const DEBRIS_SPIN: f32 = 0.01;
/// Powerup spin per reference frame
const POWERUP_SPIN: f32 = 0.02;

/// Consume a state, advance it one frame and hand it back
pub fn step(mut state: GameState, input: &InputSnapshot, dt: f32, elapsed_ms: f64) -> GameState {
    tick(&mut state, input, dt, elapsed_ms);
    state
}

/// Difficulty level for an elapsed time: one level per interval, capped
pub fn difficulty_for(elapsed_ms: f64, interval_ms: f64) -> u8 {
    if interval_ms.is_nan() || interval_ms <= 0.0 || !elapsed_ms.is_finite() {
        return 1;
    }
    let steps = (elapsed_ms.max(0.0) / interval_ms).floor();
    (1.0 + steps).min(MAX_DIFFICULTY as f64) as u8
}

/// Advance the game state by one frame
///
/// `dt` is the frame delta in seconds, `elapsed_ms` the driver's cumulative
/// clock. A game-over state is left untouched; restarting is the caller's job.
pub fn tick(state: &mut GameState, input: &InputSnapshot, dt: f32, elapsed_ms: f64) {
    state.events.clear();
    if state.game_over {
        return;
    }

    let input = input.sanitized();
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    // Velocities are pixels per 60 Hz frame
    let frames = dt * REFERENCE_FPS;

    // Pause toggles on the rising edge and eats the frame either way
    state.controls.pause.update(input.pause);
    if state.controls.pause.fire_if(true) {
        state.paused = !state.paused;
        if state.paused {
            log::debug!("Paused at {:.0} ms", elapsed_ms);
            state.events.push(GameEvent::Paused);
        } else {
            log::debug!("Resumed at {:.0} ms", elapsed_ms);
            state.events.push(GameEvent::Resumed);
        }
        return;
    }
    if state.paused {
        return;
    }

    update_player(state, &input, frames);
    update_gravity_mode(state, &input, dt);
    update_shield(state, input.shield, dt);
    update_debris(state, frames);
    fire_burst(state, input.burst);
    update_powerups(state, frames);
    resolve_player_collisions(state);
    run_spawners(state, elapsed_ms);
    update_difficulty(state, elapsed_ms);
    accrue_survival_score(state, dt);
    state.elapsed_ms = elapsed_ms;

    if state.player.lives == 0 {
        state.game_over = true;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over: score={}, difficulty={}, elapsed={:.1}s",
            state.score,
            state.difficulty,
            elapsed_ms / 1000.0
        );
    }
}

/// Stick-driven kinematics, clamped to the screen
fn update_player(state: &mut GameState, input: &InputSnapshot, frames: f32) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.vel += input.move_stick * tuning.player_acceleration * frames;
    player.vel *= tuning.player_drag.powf(frames);
    player.vel = clamp_magnitude(player.vel, tuning.max_player_speed);
    player.pos += player.vel * frames;
    player.pos = state.bounds.clamp_with_radius(player.pos, player.radius);

    // Aim stick wins; moving only turns the ship, the field stays omnidirectional
    if input.aim_stick.length() > STICK_DEADZONE {
        player.rotation = heading(input.aim_stick);
        player.gravity_direction = input.aim_stick;
    } else {
        if input.move_stick.length() > STICK_DEADZONE {
            player.rotation = heading(input.move_stick);
        }
        player.gravity_direction = Vec2::ZERO;
    }
}

/// Trigger arbitration and energy drain/regen
fn update_gravity_mode(state: &mut GameState, input: &InputSnapshot, dt: f32) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    let attracting = input.attract > TRIGGER_DEADZONE;
    let repelling = input.repel > TRIGGER_DEADZONE;
    let (mode, intensity) = match (attracting, repelling) {
        (true, false) => (GravityMode::Attract, input.attract),
        (false, true) => (GravityMode::Repel, input.repel),
        // Both held cancel out
        _ => (GravityMode::None, 0.0),
    };

    if mode != GravityMode::None && player.energy > 0.0 {
        player.gravity_mode = mode;
        player.gravity_intensity = intensity;
        player.energy -= tuning.energy_drain_rate * intensity * dt;
    } else {
        player.gravity_mode = GravityMode::None;
        player.gravity_intensity = 0.0;
        player.energy += tuning.energy_regen_rate * dt;
    }
    player.energy = player.energy.min(player.max_energy).max(0.0);
}

fn update_shield(state: &mut GameState, pressed: bool, dt: f32) {
    let player = &mut state.player;

    state.controls.shield.update(pressed);
    let available = player.shield_charges > 0 && !player.shield_active;
    if state.controls.shield.fire_if(available) {
        player.shield_active = true;
        player.shield_charges -= 1;
        player.shield_remaining_ms = state.tuning.shield_duration_ms;
        state.events.push(GameEvent::ShieldActivated);
        log::debug!("Shield up, {} charges left", player.shield_charges);
    }

    if player.shield_active {
        player.shield_remaining_ms -= dt * 1000.0;
        if player.shield_remaining_ms <= 0.0 {
            player.shield_active = false;
            player.shield_remaining_ms = 0.0;
            state.events.push(GameEvent::ShieldExpired);
        }
    }
}

/// Field force emitted by the player this frame, if any
fn player_field(state: &GameState) -> Option<GravityField> {
    let player = &state.player;
    if player.gravity_mode == GravityMode::None || player.gravity_intensity <= 0.0 {
        return None;
    }
    Some(GravityField::new(
        player.pos,
        player.gravity_direction,
        player.gravity_intensity * state.tuning.gravity_max_force,
        state.tuning.gravity_range,
        player.gravity_mode == GravityMode::Attract,
    ))
}

/// Drift, spin, cull, gravity, then debris-debris collisions
fn update_debris(state: &mut GameState, frames: f32) {
    for d in &mut state.debris {
        d.pos += d.vel * frames;
        d.rotation += DEBRIS_SPIN * d.mass * frames;
    }

    let bounds = state.bounds;
    state
        .debris
        .retain(|d| !bounds.is_outside(d.pos, CULL_MARGIN));

    if let Some(field) = player_field(state) {
        for d in &mut state.debris {
            d.vel += field.force_at(d.pos) / d.mass * frames;
        }
    }

    resolve_debris_collisions(&mut state.debris);
}

fn fire_burst(state: &mut GameState, pressed: bool) {
    state.controls.burst.update(pressed);
    let affordable = state.player.energy >= state.tuning.burst_energy_cost;
    if state.controls.burst.fire_if(affordable) {
        let affected = graviton_burst(
            &mut state.debris,
            state.player.pos,
            state.tuning.burst_radius,
            state.tuning.burst_force,
        );
        state.player.energy = (state.player.energy - state.tuning.burst_energy_cost).max(0.0);
        state.events.push(GameEvent::BurstFired { affected });
        log::debug!("Graviton burst hit {affected} debris");
    }
}

/// Drift and spin; attracting pulls powerups in harder and from further out
fn update_powerups(state: &mut GameState, frames: f32) {
    for p in &mut state.powerups {
        p.pos += p.vel * frames;
        p.rotation += POWERUP_SPIN * frames;
    }

    if !state.player.is_attracting() {
        return;
    }
    let tuning = &state.tuning;
    let field = GravityField::new(
        state.player.pos,
        state.player.gravity_direction,
        state.player.gravity_intensity * tuning.gravity_max_force * tuning.powerup_intensity_boost,
        tuning.gravity_range * tuning.powerup_range_boost,
        true,
    );
    for p in &mut state.powerups {
        p.vel += field.force_at(p.pos) * frames;
    }
}

/// Player vs debris and player vs powerups
///
/// Unshielded, only the first overlapping debris in list order does damage
/// this frame. Shielded, every debris inside the shield radius is destroyed
/// and scored.
fn resolve_player_collisions(state: &mut GameState) {
    let player_pos = state.player.pos;
    let mut destroyed: Vec<Debris> = Vec::new();

    if !state.player.shield_active {
        let radius = state.player.radius;
        if let Some(idx) = state
            .debris
            .iter()
            .position(|d| circles_overlap(player_pos, radius, d.pos, d.radius))
        {
            let hit = state.debris.remove(idx);
            state.player.lives = state.player.lives.saturating_sub(1);
            state.events.push(GameEvent::LifeLost { debris: hit.id });
            log::debug!("Hit by {} ({:?}), lives={}", hit.id, hit.size, state.player.lives);
            destroyed.push(hit);
        }
    } else {
        let radius = state.player.effective_radius();
        let (hits, survivors): (Vec<Debris>, Vec<Debris>) = std::mem::take(&mut state.debris)
            .into_iter()
            .partition(|d| circles_overlap(player_pos, radius, d.pos, d.radius));
        state.debris = survivors;

        for d in &hits {
            state.score = state
                .score
                .saturating_add(state.tuning.debris_destroy_score * state.multiplier as u64);
            state.events.push(GameEvent::DebrisDestroyed {
                debris: d.id,
                size: d.size,
            });
        }
        destroyed = hits;
    }

    for d in &destroyed {
        let fragments = break_debris(&mut state.rng, &mut state.ids, d);
        state.debris.extend(fragments);
    }

    let player_radius = state.player.radius;
    let (collected, remaining): (Vec<Powerup>, Vec<Powerup>) = std::mem::take(&mut state.powerups)
        .into_iter()
        .partition(|p| circles_overlap(player_pos, player_radius, p.pos, p.radius));
    state.powerups = remaining;

    for p in collected {
        state.score = state
            .score
            .saturating_add(state.tuning.powerup_collect_score * state.multiplier as u64);
        apply_powerup(state, &p);
        state.events.push(GameEvent::PowerupCollected {
            powerup: p.id,
            kind: p.kind,
        });
    }
}

fn apply_powerup(state: &mut GameState, powerup: &Powerup) {
    let player = &mut state.player;
    match powerup.kind {
        PowerupKind::Energy => {
            player.energy = (player.energy + powerup.value).min(player.max_energy).max(0.0);
        }
        PowerupKind::Shield => {
            player.shield_charges = (player.shield_charges + 1).min(MAX_SHIELD_CHARGES);
        }
        PowerupKind::Multiplier => {
            state.multiplier = (state.multiplier + 1).min(MAX_MULTIPLIER);
        }
        PowerupKind::Life => {
            player.lives = (player.lives + 1).min(MAX_LIVES);
        }
    }
    log::debug!("Collected {:?} powerup {}", powerup.kind, powerup.id);
}

/// Timestamp-driven spawning, gated on population caps
fn run_spawners(state: &mut GameState, elapsed_ms: f64) {
    let interval = state.tuning.debris_interval_for(state.difficulty);
    if elapsed_ms - state.last_debris_spawn_ms > interval
        && state.debris.len() < state.tuning.max_debris
    {
        let debris = spawn_debris(&mut state.rng, &mut state.ids, state.bounds, state.difficulty);
        log::debug!("Spawned {:?} debris {}", debris.size, debris.id);
        state.debris.push(debris);
        state.last_debris_spawn_ms = elapsed_ms;
    }

    if elapsed_ms - state.last_powerup_spawn_ms > state.tuning.powerup_spawn_interval_ms
        && state.powerups.len() < state.tuning.max_powerups
    {
        let powerup = spawn_powerup(&mut state.rng, &mut state.ids, state.bounds, state.player.pos);
        log::debug!("Spawned {:?} powerup {}", powerup.kind, powerup.id);
        state.powerups.push(powerup);
        state.last_powerup_spawn_ms = elapsed_ms;
    }
}

fn update_difficulty(state: &mut GameState, elapsed_ms: f64) {
    let level = difficulty_for(elapsed_ms, state.tuning.difficulty_interval_ms);
    if level > state.difficulty {
        state.events.push(GameEvent::DifficultyUp { level });
        log::info!("Difficulty {} -> {}", state.difficulty, level);
    }
    state.difficulty = level;
}

/// Survival points trickle in; fractions carry over so slow rates still count
fn accrue_survival_score(state: &mut GameState, dt: f32) {
    state.score_carry += state.tuning.survival_score_per_second * dt * state.multiplier as f32;
    let whole = state.score_carry.floor();
    if whole >= 1.0 {
        state.score = state.score.saturating_add(whole as u64);
        state.score_carry -= whole;
    }
}

//! Ball-peg collision detection and response
//!
//! Pegs are static circles, so detection is a distance test. Response pushes
//! the ball out along the contact normal, reflects its velocity, trims it to
//! a restitution-scaled speed and guarantees it keeps moving downward.

use glam::Vec2;
use rand::Rng;

use super::lattice::{Lattice, Peg};
use super::state::Ball;
use crate::consts::*;
use crate::spread;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal (from peg centre toward ball centre)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between a ball and a peg
///
/// A ball centred exactly on the peg gets an upward normal.
pub fn ball_peg_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    peg_pos: Vec2,
    peg_radius: f32,
) -> CollisionResult {
    let offset = ball_pos - peg_pos;
    let distance = offset.length();
    let min_distance = ball_radius + peg_radius;

    if distance >= min_distance {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        normal: offset.normalize_or(Vec2::NEG_Y),
        penetration: min_distance - distance,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce a ball off one peg
///
/// Returns false (and leaves the ball untouched) unless the ball overlaps
/// the peg, is moving into it and the peg is not in cooldown.
pub fn resolve_peg<R: Rng>(ball: &mut Ball, peg: &Peg, now: f64, rng: &mut R) -> bool {
    let result = ball_peg_collision(ball.pos, BALL_RADIUS, peg.pos, PEG_RADIUS);
    if !result.hit || ball.in_cooldown(peg.id, now) {
        return false;
    }

    let normal = result.normal;
    // Separating already
    if ball.vel.dot(normal) >= 0.0 {
        return false;
    }

    ball.pos += normal * result.penetration * PUSH_OUT_FACTOR;

    let bounce_speed = ball.vel.length() * PEG_RESTITUTION;
    let reflected = reflect_velocity(ball.vel, normal);
    let reflected_speed = reflected.length();
    if reflected_speed > 0.0 {
        ball.vel = reflected * (bounce_speed / reflected_speed);
        ball.vel.x += spread(rng, BOUNCE_NUDGE);
    }

    if ball.vel.y < MIN_BOUNCE_VY {
        ball.vel.y = MIN_BOUNCE_VY + rng.random::<f32>() * BOUNCE_VY_SPREAD;
    }

    ball.record_contact(peg.id, now);
    true
}

/// Resolve a ball against every peg near its current height
///
/// The band test uses the ball's position after any earlier push-out in the
/// same pass. Returns the number of bounces applied this step.
pub fn resolve_peg_collisions<R: Rng>(
    ball: &mut Ball,
    lattice: &Lattice,
    now: f64,
    rng: &mut R,
) -> usize {
    let mut bounces = 0;
    for peg in lattice.pegs() {
        if (ball.pos.y - peg.pos.y).abs() > NEAR_ROW_BAND {
            continue;
        }
        if resolve_peg(ball, peg, now, rng) {
            bounces += 1;
        }
    }
    bounces
}

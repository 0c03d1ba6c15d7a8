//! Per-frame simulation step
//!
//! Advances one ball: Euler integration, wall bounce, peg collisions, then
//! slot arrival. Balls never interact, so the session can step them in any
//! order.

use rand::Rng;
use serde::Serialize;

use super::collision::resolve_peg_collisions;
use super::lattice::Lattice;
use super::payout::{Multiplier, PayoutTable};
use super::state::Ball;
use crate::consts::*;
use crate::spread;

/// A ball landed in a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub ball_id: u32,
    pub slot_index: usize,
    pub bet: i64,
    pub multiplier: Multiplier,
    /// Net winnings: `floor(bet * multiplier) - bet` (negative on a loss)
    pub payout: i64,
}

/// Integrate motion for one frame
pub fn integrate<R: Rng>(ball: &mut Ball, rng: &mut R) {
    ball.pos += ball.vel;
    ball.vel.y += GRAVITY;
    ball.vel.x += spread(rng, AIR_JITTER);
    ball.vel.x *= HORIZONTAL_DAMPING;
}

/// Keep the ball inside the side walls, bouncing with energy loss
pub fn bounce_walls(ball: &mut Ball, width: f32) {
    if ball.pos.x < BALL_RADIUS {
        ball.pos.x = BALL_RADIUS;
        ball.vel.x = ball.vel.x.abs() * WALL_RESTITUTION;
    } else if ball.pos.x > width - BALL_RADIUS {
        ball.pos.x = width - BALL_RADIUS;
        ball.vel.x = -ball.vel.x.abs() * WALL_RESTITUTION;
    }
}

/// Settle the ball if it reached the slot band
///
/// Emits at most one settlement per ball over its lifetime.
pub fn try_settle(
    ball: &mut Ball,
    lattice: &Lattice,
    payouts: &PayoutTable,
    now: f64,
) -> Option<Settlement> {
    if ball.pos.y < lattice.settle_line() {
        return None;
    }

    let slot_index = lattice.slot_at(ball.pos.x);
    if !ball.settle(now, slot_index) {
        return None;
    }

    let multiplier = payouts.get(slot_index);
    Some(Settlement {
        ball_id: ball.id,
        slot_index,
        bet: ball.bet,
        multiplier,
        payout: multiplier.net_payout(ball.bet),
    })
}

/// Advance a ball by one frame
pub fn step_ball<R: Rng>(
    ball: &mut Ball,
    lattice: &Lattice,
    payouts: &PayoutTable,
    now: f64,
    rng: &mut R,
) -> Option<Settlement> {
    if ball.is_settled() {
        return None;
    }

    integrate(ball, rng);
    bounce_walls(ball, lattice.width());
    resolve_peg_collisions(ball, lattice, now, rng);
    try_settle(ball, lattice, payouts, now)
}

//! Ball state
//!
//! A ball is an explicit value owned by the session: no rendering hooks,
//! no shared references. Its only memory of the board is the last peg it
//! bounced off, kept for the collision cooldown.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::lattice::{Lattice, PegId};
use crate::consts::*;
use crate::spread;

/// Ball lifecycle: `Falling -> Settled -> removed`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BallState {
    /// In flight through the lattice
    Falling,
    /// Landed in `slot` at time `at` (ms); lingers for display, then removed
    Settled { at: f64, slot: usize },
}

/// Most recent resolved peg collision
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PegContact {
    pub peg: PegId,
    pub at: f64,
}

/// A ball entity
#[derive(Debug, Clone, Serialize)]
pub struct Ball {
    pub id: u32,
    /// Stake placed on this ball
    pub bet: i64,
    pub pos: Vec2,
    pub vel: Vec2,
    pub state: BallState,
    pub last_contact: Option<PegContact>,
}

impl Ball {
    pub fn new(id: u32, bet: i64, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            bet,
            pos,
            vel,
            state: BallState::Falling,
            last_contact: None,
        }
    }

    /// Drop a ball above the apex with a small random offset and drift
    pub fn spawn<R: Rng>(id: u32, bet: i64, lattice: &Lattice, rng: &mut R) -> Self {
        let pos = lattice.spawn_point() + Vec2::new(spread(rng, SPAWN_X_SPREAD), 0.0);
        let vel = Vec2::new(spread(rng, SPAWN_VX_SPREAD), SPAWN_VY);
        Self::new(id, bet, pos, vel)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.state, BallState::Settled { .. })
    }

    /// Mark the ball as landed. Returns false if it already had.
    pub fn settle(&mut self, at: f64, slot: usize) -> bool {
        if self.is_settled() {
            return false;
        }
        self.state = BallState::Settled { at, slot };
        true
    }

    /// Settled long enough ago to drop from the live set
    pub fn is_expired(&self, now: f64) -> bool {
        match self.state {
            BallState::Settled { at, .. } => now - at >= SETTLE_LINGER_MS,
            BallState::Falling => false,
        }
    }

    /// True if `peg` was the last one resolved and still inside the cooldown
    pub fn in_cooldown(&self, peg: PegId, now: f64) -> bool {
        self.last_contact
            .is_some_and(|c| c.peg == peg && now - c.at <= COLLISION_COOLDOWN_MS)
    }

    pub fn record_contact(&mut self, peg: PegId, at: f64) {
        self.last_contact = Some(PegContact { peg, at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::RowCount;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_near_apex() {
        let lattice = Lattice::build(RowCount::Twelve, 800.0, 650.0);
        let mut rng = Pcg32::seed_from_u64(1);
        for id in 0..100 {
            let ball = Ball::spawn(id, 10, &lattice, &mut rng);
            assert!((ball.pos.x - 400.0).abs() <= SPAWN_X_SPREAD / 2.0);
            assert_eq!(ball.pos.y, SPAWN_Y);
            assert!(ball.vel.x.abs() <= SPAWN_VX_SPREAD / 2.0);
            assert_eq!(ball.vel.y, SPAWN_VY);
            assert_eq!(ball.state, BallState::Falling);
        }
    }

    #[test]
    fn test_settle_once() {
        let mut ball = Ball::new(1, 100, Vec2::ZERO, Vec2::Y);
        assert!(ball.settle(1000.0, 3));
        assert!(!ball.settle(1100.0, 5));
        assert_eq!(ball.state, BallState::Settled { at: 1000.0, slot: 3 });
    }

    #[test]
    fn test_expiry_after_linger() {
        let mut ball = Ball::new(1, 100, Vec2::ZERO, Vec2::Y);
        assert!(!ball.is_expired(1e9));
        ball.settle(1000.0, 0);
        assert!(!ball.is_expired(1199.0));
        assert!(ball.is_expired(1200.0));
    }

    #[test]
    fn test_cooldown_window() {
        let peg = PegId { row: 2, col: 1 };
        let other = PegId { row: 2, col: 2 };
        let mut ball = Ball::new(1, 100, Vec2::ZERO, Vec2::Y);
        assert!(!ball.in_cooldown(peg, 0.0));

        ball.record_contact(peg, 500.0);
        assert!(ball.in_cooldown(peg, 550.0));
        assert!(ball.in_cooldown(peg, 580.0));
        assert!(!ball.in_cooldown(peg, 581.0));
        assert!(!ball.in_cooldown(other, 550.0));
    }
}

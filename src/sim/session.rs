//! Simulation session
//!
//! Owns the board configuration, the derived lattice and payout table, and
//! every live ball. The host calls `spawn_ball` on a bet, `step` once per
//! animation frame, and applies the returned settlements to its balance.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::config::{BoardConfig, RiskTier};
use super::lattice::Lattice;
use super::payout::PayoutTable;
use super::state::Ball;
use super::tick::{Settlement, step_ball};
use crate::consts::*;
use crate::error::SimError;

/// Render-facing view of a live ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub id: u32,
    pub pos: Vec2,
    pub settled: bool,
}

/// A slot still playing its landing animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotHit {
    pub slot: usize,
    /// Animation progress in `[0, 1)`
    pub progress: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub lattice: &'a Lattice,
    pub payouts: &'a PayoutTable,
    pub balls: Vec<BallView>,
    pub slot_hits: Vec<SlotHit>,
}

/// Multi-ball simulation over one board
#[derive(Debug, Clone)]
pub struct Session<R = Pcg32> {
    config: BoardConfig,
    lattice: Lattice,
    payouts: PayoutTable,
    /// Live balls, falling or lingering after settlement
    balls: Vec<Ball>,
    /// Time each slot was last landed in (ms)
    slot_hits: Vec<Option<f64>>,
    rng: R,
    next_id: u32,
    /// Timestamp of the latest step (ms)
    clock: f64,
}

impl Session<Pcg32> {
    /// Create a session with a seeded PCG generator
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Create a session with an injected random source
    pub fn with_rng(config: BoardConfig, rng: R) -> Self {
        let lattice = Lattice::build(config.rows, config.canvas_width, config.canvas_height);
        let payouts = PayoutTable::new(config.rows, config.risk);
        Self {
            slot_hits: vec![None; lattice.slot_count()],
            config,
            lattice,
            payouts,
            balls: Vec::new(),
            rng,
            next_id: 1,
            clock: 0.0,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn payouts(&self) -> &PayoutTable {
        &self.payouts
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Change the board layout
    ///
    /// Only allowed while no balls are live; on any error nothing changes.
    /// Geometry and payouts are rebuilt only if their inputs changed.
    pub fn configure(
        &mut self,
        rows: u32,
        risk: RiskTier,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Result<(), SimError> {
        if !self.is_idle() {
            log::warn!(
                "Rejected reconfigure: {} ball(s) still on the board",
                self.balls.len()
            );
            return Err(SimError::ConfigurationWhileActive {
                live: self.balls.len(),
            });
        }

        let config = BoardConfig::new(rows, risk, canvas_width, canvas_height)?;

        if !config.same_geometry(&self.config) {
            self.lattice = Lattice::build(config.rows, config.canvas_width, config.canvas_height);
            self.slot_hits = vec![None; self.lattice.slot_count()];
        }
        if config.rows != self.config.rows || config.risk != self.config.risk {
            self.payouts = PayoutTable::new(config.rows, config.risk);
        }
        self.config = config;

        log::info!(
            "Board configured: {} rows, {} risk, {}x{} canvas",
            rows,
            risk,
            canvas_width,
            canvas_height
        );
        Ok(())
    }

    /// Drop a new ball carrying `bet`
    ///
    /// The caller has already checked the player can afford the bet.
    pub fn spawn_ball(&mut self, bet: i64) -> Result<u32, SimError> {
        if bet <= 0 {
            log::warn!("Rejected drop with bet {}", bet);
            return Err(SimError::InvalidBet(bet));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.balls.push(Ball::spawn(id, bet, &self.lattice, &mut self.rng));
        log::debug!("Ball {} dropped with bet {}", id, bet);
        Ok(id)
    }

    /// Advance every live ball by one frame
    ///
    /// Returns the settlements produced this frame, in ball insertion order.
    pub fn step(&mut self, now: f64) -> Vec<Settlement> {
        self.clock = now;
        let mut settlements = Vec::new();

        for ball in &mut self.balls {
            let landed = step_ball(ball, &self.lattice, &self.payouts, now, &mut self.rng);
            if let Some(settlement) = landed {
                log::debug!(
                    "Ball {} landed in slot {} ({}): payout {}",
                    settlement.ball_id,
                    settlement.slot_index,
                    settlement.multiplier,
                    settlement.payout
                );
                self.slot_hits[settlement.slot_index] = Some(now);
                settlements.push(settlement);
            }
        }

        self.balls.retain(|b| !b.is_expired(now));
        for hit in &mut self.slot_hits {
            if hit.is_some_and(|at| now - at >= SLOT_BOUNCE_MS) {
                *hit = None;
            }
        }

        settlements
    }

    /// True when no balls remain (the frame loop may stop, layout may change)
    pub fn is_idle(&self) -> bool {
        self.balls.is_empty()
    }

    /// Balls still falling
    pub fn active_balls(&self) -> usize {
        self.balls.iter().filter(|b| !b.is_settled()).count()
    }

    /// Current geometry and ball positions for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        let balls = self
            .balls
            .iter()
            .map(|b| BallView {
                id: b.id,
                pos: b.pos,
                settled: b.is_settled(),
            })
            .collect();

        let slot_hits = self
            .slot_hits
            .iter()
            .enumerate()
            .filter_map(|(slot, hit)| {
                hit.map(|at| SlotHit {
                    slot,
                    progress: ((self.clock - at) / SLOT_BOUNCE_MS).clamp(0.0, 1.0) as f32,
                })
            })
            .collect();

        Snapshot {
            lattice: &self.lattice,
            payouts: &self.payouts,
            balls,
            slot_hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::RowCount;

    const MAX_STEPS: usize = 500;

    /// Step until idle, collecting every settlement
    fn run_until_idle<R: Rng>(session: &mut Session<R>, start: f64) -> Vec<Settlement> {
        let mut events = Vec::new();
        let mut now = start;
        for _ in 0..MAX_STEPS {
            now += FRAME_MS;
            events.extend(session.step(now));
            if session.is_idle() {
                return events;
            }
        }
        panic!("session still busy after {MAX_STEPS} steps");
    }

    #[test]
    fn test_single_drop_scenario() {
        let config = BoardConfig::new(12, RiskTier::Normal, 800.0, 650.0).unwrap();
        let mut session = Session::new(config, 12345);

        assert_eq!(session.payouts().len(), 13);
        assert_eq!(session.payouts().get(6).value(), 0.2);
        assert_eq!(session.payouts().get(0).value(), 5.0);

        let id = session.spawn_ball(100).unwrap();
        assert!(!session.is_idle());
        assert_eq!(session.active_balls(), 1);

        let events = run_until_idle(&mut session, 0.0);
        assert_eq!(events.len(), 1);
        let event = events[0];
        assert_eq!(event.ball_id, id);
        assert!(event.slot_index <= 12);
        assert_eq!(
            event.payout,
            session.payouts().get(event.slot_index).net_payout(100)
        );
    }

    #[test]
    fn test_every_ball_settles_once_all_configs() {
        for rows in RowCount::ALL {
            for risk in RiskTier::ALL {
                for seed in 0..8u64 {
                    let config = BoardConfig::new(rows.get(), risk, 800.0, 650.0).unwrap();
                    let mut session = Session::new(config, seed);
                    let ids: Vec<u32> = (1..=5)
                        .map(|i| session.spawn_ball(i * 10).unwrap())
                        .collect();

                    let events = run_until_idle(&mut session, 0.0);
                    let mut settled: Vec<u32> = events.iter().map(|e| e.ball_id).collect();
                    settled.sort_unstable();
                    assert_eq!(settled, ids);
                    assert!(events.iter().all(|e| e.slot_index <= rows.get() as usize));
                }
            }
        }
    }

    #[test]
    fn test_staggered_drops() {
        let mut session = Session::new(BoardConfig::default(), 77);
        let mut events = Vec::new();
        let mut now = 0.0;
        for frame in 0..600 {
            now += FRAME_MS;
            if frame % 10 == 0 && frame < 100 {
                session.spawn_ball(50).unwrap();
            }
            events.extend(session.step(now));
        }
        assert!(session.is_idle());
        assert_eq!(events.len(), 10);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let run = |seed| {
            let mut session = Session::new(BoardConfig::default(), seed);
            for _ in 0..3 {
                session.spawn_ball(100).unwrap();
            }
            run_until_idle(&mut session, 0.0)
        };
        assert_eq!(run(2024), run(2024));
    }

    #[test]
    fn test_invalid_bet_rejected() {
        let mut session = Session::new(BoardConfig::default(), 1);
        assert_eq!(session.spawn_ball(0), Err(SimError::InvalidBet(0)));
        assert_eq!(session.spawn_ball(-5), Err(SimError::InvalidBet(-5)));
        assert!(session.is_idle());
    }

    #[test]
    fn test_extreme_bet_settles() {
        let mut session = Session::new(BoardConfig::default(), 3);
        for bet in [i64::MAX / 4, i64::MAX] {
            session.spawn_ball(bet).unwrap();
        }

        let events = run_until_idle(&mut session, 0.0);
        assert_eq!(events.len(), 2);
        for event in events {
            let multiplier = session.payouts().get(event.slot_index);
            assert_eq!(event.multiplier, multiplier);
            assert_eq!(event.payout, multiplier.net_payout(event.bet));
            assert!(event.payout >= -event.bet);
        }
    }

    #[test]
    fn test_configure_while_active_rejected() {
        let mut session = Session::new(BoardConfig::default(), 1);
        session.spawn_ball(100).unwrap();
        let lattice = session.lattice().clone();
        let payouts = session.payouts().clone();

        let err = session.configure(16, RiskTier::High, 800.0, 650.0);
        assert_eq!(err, Err(SimError::ConfigurationWhileActive { live: 1 }));
        assert_eq!(session.lattice(), &lattice);
        assert_eq!(session.payouts(), &payouts);
        assert_eq!(session.balls().len(), 1);
        assert_eq!(session.config(), &BoardConfig::default());
    }

    #[test]
    fn test_configure_when_idle() {
        let mut session = Session::new(BoardConfig::default(), 1);

        session.configure(12, RiskTier::High, 800.0, 650.0).unwrap();
        assert_eq!(session.payouts().get(0).value(), 25.0);
        assert_eq!(session.lattice().pegs().len(), 78);

        session.configure(16, RiskTier::High, 1000.0, 800.0).unwrap();
        assert_eq!(session.lattice().pegs().len(), 136);
        assert_eq!(session.lattice().width(), 1000.0);
        assert_eq!(session.payouts().len(), 17);
    }

    #[test]
    fn test_invalid_configuration_leaves_state() {
        let mut session = Session::new(BoardConfig::default(), 1);
        assert!(matches!(
            session.configure(10, RiskTier::Low, 800.0, 650.0),
            Err(SimError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            session.configure(8, RiskTier::Low, 800.0, 100.0),
            Err(SimError::InvalidConfiguration(_))
        ));
        assert_eq!(session.config(), &BoardConfig::default());
        assert_eq!(session.lattice().pegs().len(), 78);
    }

    #[test]
    fn test_snapshot_and_slot_hits() {
        let mut session = Session::new(BoardConfig::default(), 9);
        session.spawn_ball(100).unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.balls.len(), 1);
        assert!(!snapshot.balls[0].settled);
        assert_eq!(snapshot.lattice.pegs().len(), 78);
        assert!(snapshot.slot_hits.is_empty());

        let mut now = 0.0;
        let slot = loop {
            now += FRAME_MS;
            if let Some(event) = session.step(now).first() {
                break event.slot_index;
            }
        };

        // Lingering settled ball is still drawn, its slot is highlighted
        let snapshot = session.snapshot();
        assert_eq!(snapshot.balls.len(), 1);
        assert!(snapshot.balls[0].settled);
        assert_eq!(snapshot.slot_hits, vec![SlotHit { slot, progress: 0.0 }]);
        assert_eq!(session.active_balls(), 0);

        // Ball removed after the linger window, highlight outlives it
        session.step(now + SETTLE_LINGER_MS);
        assert!(session.is_idle());
        assert_eq!(session.snapshot().slot_hits.len(), 1);

        session.step(now + SLOT_BOUNCE_MS);
        assert!(session.snapshot().slot_hits.is_empty());

        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"pegs\""));
    }
}

//! Plinko Sim - ball-drop peg board physics core
//!
//! Core modules:
//! - `sim`: Simulation (lattice, payout table, collisions, multi-ball session)
//! - `settings`: Persisted player preferences (board layout, default bet)
//! - `platform`: Browser bindings for the web build
//! - `error`: Error types reported to the host application
//!
//! The core never draws and never touches a coin balance. The host drops balls
//! with a bet, steps the session once per animation frame and applies the
//! returned payouts to its own bookkeeping.

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SimError};
pub use settings::Settings;

use rand::Rng;

/// Board and physics constants
///
/// Velocities are in canvas units per frame; times are in milliseconds.
pub mod consts {
    /// Nominal frame duration at 60 Hz (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Default canvas dimensions
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 650.0;

    /// Body sizes
    pub const BALL_RADIUS: f32 = 8.0;
    pub const PEG_RADIUS: f32 = 6.0;

    /// Lattice layout: first row sits at LATTICE_TOP, rows spread over
    /// (height - LATTICE_VERTICAL_RESERVE)
    pub const LATTICE_TOP: f32 = 100.0;
    pub const LATTICE_VERTICAL_RESERVE: f32 = 250.0;
    /// Slot band top edge is this far above the canvas bottom
    pub const SLOT_BAND_OFFSET: f32 = 120.0;

    /// Spawn
    pub const SPAWN_Y: f32 = 30.0;
    pub const SPAWN_X_SPREAD: f32 = 20.0;
    pub const SPAWN_VX_SPREAD: f32 = 1.5;
    pub const SPAWN_VY: f32 = 1.5;

    /// Integration
    pub const GRAVITY: f32 = 0.2;
    pub const AIR_JITTER: f32 = 0.1;
    pub const HORIZONTAL_DAMPING: f32 = 0.99;
    pub const WALL_RESTITUTION: f32 = 0.7;

    /// Peg collisions
    pub const PEG_RESTITUTION: f32 = 0.65;
    /// Only pegs within this vertical distance are tested
    pub const NEAR_ROW_BAND: f32 = 30.0;
    /// Push-out over-correction (prevents re-penetration next frame)
    pub const PUSH_OUT_FACTOR: f32 = 1.2;
    /// Width of the random horizontal nudge after a bounce
    pub const BOUNCE_NUDGE: f32 = 2.0;
    /// Minimum downward speed after a bounce, plus random spread on top
    pub const MIN_BOUNCE_VY: f32 = 1.0;
    pub const BOUNCE_VY_SPREAD: f32 = 2.0;
    /// Same-peg suppression window (ms)
    pub const COLLISION_COOLDOWN_MS: f64 = 80.0;

    /// Settled balls stay visible this long before removal (ms)
    pub const SETTLE_LINGER_MS: f64 = 200.0;
    /// Slot highlight animation length (ms)
    pub const SLOT_BOUNCE_MS: f64 = 400.0;
}

/// Uniform sample in `[-width/2, width/2)`
#[inline]
pub fn spread<R: Rng>(rng: &mut R, width: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * width
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spread_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = spread(&mut rng, 2.0);
            assert!((-1.0..1.0).contains(&v));
        }
    }
}

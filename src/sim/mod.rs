//! Ball-drop simulation module
//!
//! All gameplay physics lives here. This module has no rendering or platform
//! dependencies:
//! - One step per animation frame
//! - Injected RNG only (seedable for tests)
//! - Balls are independent values owned by the session

pub mod collision;
pub mod config;
pub mod lattice;
pub mod payout;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_peg_collision, reflect_velocity, resolve_peg_collisions};
pub use config::{BoardConfig, RiskTier, RowCount};
pub use lattice::{Lattice, Peg, PegId};
pub use payout::{Multiplier, PayoutTable};
pub use session::{BallView, Session, SlotHit, Snapshot};
pub use state::{Ball, BallState, PegContact};
pub use tick::{Settlement, step_ball};

//! Slot payout multipliers
//!
//! Multipliers grow toward the edges: `min + (max - min) * d^1.5`, where `d`
//! is the slot's normalized distance from the centre. Values are kept in
//! hundredths so `floor(bet * multiplier)` is exact integer math.

use serde::{Deserialize, Serialize};

use super::config::{RiskTier, RowCount};

/// Payout multiplier in hundredths (`Multiplier(250)` is x2.5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Multiplier(u32);

impl Multiplier {
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Round to the nearest hundredth
    pub fn from_f64(value: f64) -> Self {
        Self((value.max(0.0) * 100.0).round() as u32)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn value(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Net winnings for a stake: `floor(bet * multiplier) - bet`
    ///
    /// Computed in 128 bits and saturated to the `i64` range, so an extreme
    /// stake yields `i64::MAX`/`i64::MIN` rather than overflowing.
    pub fn net_payout(self, bet: i64) -> i64 {
        let bet = i128::from(bet);
        let net = (bet * i128::from(self.0)).div_euclid(100) - bet;
        net.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

impl std::fmt::Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "x{whole}")
        } else if frac % 10 == 0 {
            write!(f, "x{whole}.{}", frac / 10)
        } else {
            write!(f, "x{whole}.{frac:02}")
        }
    }
}

/// One multiplier per slot, symmetric about the centre
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoutTable {
    risk: RiskTier,
    multipliers: Vec<Multiplier>,
}

impl PayoutTable {
    pub fn new(rows: RowCount, risk: RiskTier) -> Self {
        let (min, max) = risk.multiplier_range();
        let center = rows.get() as f64 / 2.0;

        let multipliers = (0..rows.slot_count())
            .map(|i| {
                let distance = ((i as f64 - center) / center).abs();
                Multiplier::from_f64(min + (max - min) * distance.powf(1.5))
            })
            .collect();

        Self { risk, multipliers }
    }

    pub fn risk(&self) -> RiskTier {
        self.risk
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }

    pub fn multipliers(&self) -> &[Multiplier] {
        &self.multipliers
    }

    /// Multiplier for a slot; out-of-range indices use the nearest edge slot
    pub fn get(&self, slot: usize) -> Multiplier {
        let last = self.multipliers.len().saturating_sub(1);
        self.multipliers[slot.min(last)]
    }
}

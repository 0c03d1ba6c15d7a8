//! Board configuration: row count, risk tier and canvas size

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Supported lattice heights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RowCount {
    Eight,
    #[default]
    Twelve,
    Sixteen,
}

impl RowCount {
    pub const ALL: [RowCount; 3] = [RowCount::Eight, RowCount::Twelve, RowCount::Sixteen];

    /// Number of peg rows
    pub fn get(self) -> u32 {
        match self {
            RowCount::Eight => 8,
            RowCount::Twelve => 12,
            RowCount::Sixteen => 16,
        }
    }

    /// Number of bottom slots (one more than rows)
    pub fn slot_count(self) -> usize {
        self.get() as usize + 1
    }

    /// Total pegs in the triangle
    pub fn peg_count(self) -> usize {
        let r = self.get() as usize;
        r * (r + 1) / 2
    }
}

impl TryFrom<u32> for RowCount {
    type Error = SimError;

    fn try_from(rows: u32) -> Result<Self, Self::Error> {
        match rows {
            8 => Ok(RowCount::Eight),
            12 => Ok(RowCount::Twelve),
            16 => Ok(RowCount::Sixteen),
            other => Err(SimError::InvalidConfiguration(format!(
                "row count {other} is not one of 8, 12, 16"
            ))),
        }
    }
}

impl From<RowCount> for u32 {
    fn from(rows: RowCount) -> u32 {
        rows.get()
    }
}

/// Risk tier selecting the multiplier range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    #[default]
    Normal,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Normal, RiskTier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Normal => "normal",
            RiskTier::High => "high",
        }
    }

    /// Parse a tier name (also accepts the "less risky"/"more risky" labels)
    pub fn parse(s: &str) -> Result<Self, SimError> {
        match s.trim().to_lowercase().as_str() {
            "low" | "less risky" => Ok(RiskTier::Low),
            "normal" => Ok(RiskTier::Normal),
            "high" | "more risky" => Ok(RiskTier::High),
            other => Err(SimError::InvalidConfiguration(format!(
                "unknown risk tier {other:?}"
            ))),
        }
    }

    /// (min, max) multiplier for this tier
    pub fn multiplier_range(&self) -> (f64, f64) {
        match self {
            RiskTier::Low => (0.5, 2.0),
            RiskTier::Normal => (0.2, 5.0),
            RiskTier::High => (0.1, 25.0),
        }
    }
}

impl std::str::FromStr for RiskTier {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to build a lattice and payout table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: RowCount,
    pub risk: RiskTier,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: RowCount::default(),
            risk: RiskTier::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl BoardConfig {
    /// Build a validated config from raw host values
    pub fn new(
        rows: u32,
        risk: RiskTier,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Result<Self, SimError> {
        let config = Self {
            rows: RowCount::try_from(rows)?,
            risk,
            canvas_width,
            canvas_height,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the canvas leaves room for walls, pegs and the slot band
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.canvas_width.is_finite() || self.canvas_width <= 2.0 * BALL_RADIUS {
            return Err(SimError::InvalidConfiguration(format!(
                "canvas width {} is too small",
                self.canvas_width
            )));
        }
        if !self.canvas_height.is_finite() || self.canvas_height <= LATTICE_VERTICAL_RESERVE {
            return Err(SimError::InvalidConfiguration(format!(
                "canvas height {} must exceed {}",
                self.canvas_height, LATTICE_VERTICAL_RESERVE
            )));
        }
        Ok(())
    }

    /// True if the lattice geometry differs (risk changes only touch payouts)
    pub fn same_geometry(&self, other: &BoardConfig) -> bool {
        self.rows == other.rows
            && self.canvas_width == other.canvas_width
            && self.canvas_height == other.canvas_height
    }
}

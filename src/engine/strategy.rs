//! Fight-or-flee strategies and the encounter odds they imply.

use std::fmt;
use std::str::FromStr;

use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::engine::error::{Result, SimError};

/// Spread of the per-encounter win threshold.
pub const WINFIGHT_SPREAD: f64 = 0.25;
/// Spread of the per-encounter escape threshold.
pub const GETAWAY_SPREAD: f64 = 0.1;

pub const DEFAULT_P_WINFIGHT: f64 = 0.5;
pub const DEFAULT_P_GETAWAY: f64 = 0.67;

/// What the squad does when an encounter is forced on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    Fight,
    Flee,
}

/// Placement at or below which the squad takes fights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum FightThreshold {
    #[default]
    Always,
    TopN(u32),
}

impl FightThreshold {
    pub fn engagement(self, placement: u32) -> Engagement {
        match self {
            FightThreshold::Always => Engagement::Fight,
            FightThreshold::TopN(n) if placement <= n => Engagement::Fight,
            FightThreshold::TopN(_) => Engagement::Flee,
        }
    }
}

impl From<Option<u32>> for FightThreshold {
    fn from(topn: Option<u32>) -> Self {
        topn.map_or(FightThreshold::Always, FightThreshold::TopN)
    }
}

impl From<FightThreshold> for Option<u32> {
    fn from(threshold: FightThreshold) -> Self {
        match threshold {
            FightThreshold::Always => None,
            FightThreshold::TopN(n) => Some(n),
        }
    }
}

/// Parses `inf` (or `always`) as always fight, and a placement as top-N.
impl FromStr for FightThreshold {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "inf" | "always" => Ok(FightThreshold::Always),
            other => match other.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(FightThreshold::TopN(n)),
                _ => Err(SimError::InvalidThreshold(trimmed.to_string())),
            },
        }
    }
}

impl fmt::Display for FightThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FightThreshold::Always => f.write_str("inf"),
            FightThreshold::TopN(n) => write!(f, "{}", n),
        }
    }
}

/// A play style: when to fight, and how likely fights and escapes are to go well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    #[serde(rename = "topn", default)]
    pub threshold: FightThreshold,
    #[serde(default = "default_p_winfight")]
    pub p_winfight: f64,
    #[serde(default = "default_p_getaway")]
    pub p_getaway: f64,
}

fn default_p_winfight() -> f64 {
    DEFAULT_P_WINFIGHT
}

fn default_p_getaway() -> f64 {
    DEFAULT_P_GETAWAY
}

impl Default for Strategy {
    fn default() -> Self {
        Self::always_fight()
    }
}

impl Strategy {
    pub fn always_fight() -> Self {
        Self {
            threshold: FightThreshold::Always,
            p_winfight: DEFAULT_P_WINFIGHT,
            p_getaway: DEFAULT_P_GETAWAY,
        }
    }

    /// Avoid fights until the squad is in the top `n`.
    pub fn fight_in_top(n: u32) -> Self {
        Self {
            threshold: FightThreshold::TopN(n),
            ..Self::always_fight()
        }
    }

    pub fn engagement(&self, placement: u32) -> Engagement {
        self.threshold.engagement(placement)
    }

    /// Build the threshold distributions used during a match.
    pub fn odds(&self) -> Result<EncounterOdds> {
        Ok(EncounterOdds {
            win_fight: threshold_distribution("p_winfight", self.p_winfight, WINFIGHT_SPREAD)?,
            getaway: threshold_distribution("p_getaway", self.p_getaway, GETAWAY_SPREAD)?,
        })
    }
}

fn threshold_distribution(field: &'static str, center: f64, spread: f64) -> Result<Normal<f64>> {
    if !center.is_finite() {
        return Err(SimError::InvalidProbability { field, value: center });
    }
    Normal::new(center, spread).map_err(|_| SimError::InvalidProbability { field, value: center })
}

/// Normal distributions the uniform draws are compared against. Draws are not
/// clamped: a threshold above 1 always succeeds, below 0 always fails.
#[derive(Debug, Clone, Copy)]
pub struct EncounterOdds {
    pub win_fight: Normal<f64>,
    pub getaway: Normal<f64>,
}

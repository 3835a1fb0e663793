//! Domain types for battle-royale ranked play.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::error::SimError;

/// Lobby size: 20 squads, so placements run 1..=20.
pub const MAX_PLACEMENT: u32 = 20;

/// Ranked tier. Determines the entry cost paid every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankTier {
    Bronze,
    Silver,
    Gold,
    #[default]
    Plat,
    Diamond,
    Master,
    Pred,
}

impl RankTier {
    pub const ALL: [RankTier; 7] = [
        RankTier::Bronze,
        RankTier::Silver,
        RankTier::Gold,
        RankTier::Plat,
        RankTier::Diamond,
        RankTier::Master,
        RankTier::Pred,
    ];

    /// Ranked points deducted at the start of every match.
    pub fn entry_cost(self) -> f64 {
        match self {
            RankTier::Bronze => 0.0,
            RankTier::Silver => 12.0,
            RankTier::Gold => 24.0,
            RankTier::Plat => 36.0,
            RankTier::Diamond => 48.0,
            RankTier::Master | RankTier::Pred => 60.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RankTier::Bronze => "bronze",
            RankTier::Silver => "silver",
            RankTier::Gold => "gold",
            RankTier::Plat => "plat",
            RankTier::Diamond => "diamond",
            RankTier::Master => "master",
            RankTier::Pred => "pred",
        }
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankTier {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        RankTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == lowered)
            .ok_or_else(|| SimError::InvalidRankTier(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tiers() {
        assert_eq!("plat".parse::<RankTier>().unwrap(), RankTier::Plat);
        assert_eq!(" Diamond ".parse::<RankTier>().unwrap(), RankTier::Diamond);
        assert!(matches!(
            "platinum".parse::<RankTier>(),
            Err(SimError::InvalidRankTier(name)) if name == "platinum"
        ));
    }

    #[test]
    fn test_entry_cost_monotonic() {
        let costs: Vec<f64> = RankTier::ALL.iter().map(|t| t.entry_cost()).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(RankTier::Bronze.entry_cost(), 0.0);
        assert_eq!(RankTier::Master.entry_cost(), RankTier::Pred.entry_cost());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&RankTier::Pred).unwrap();
        assert_eq!(json, "\"pred\"");
        let tier: RankTier = serde_json::from_str("\"gold\"").unwrap();
        assert_eq!(tier, RankTier::Gold);
    }
}

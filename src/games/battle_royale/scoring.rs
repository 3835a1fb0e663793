//! Ranked-points scoring for a finished match.

use crate::engine::error::{Result, SimError};

use super::types::{RankTier, MAX_PLACEMENT};

/// Points awarded for a placement, plus the bonus per squad elimination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementReward {
    pub placement_bonus: f64,
    pub per_fight_bonus: f64,
}

const fn reward(placement_bonus: f64, per_fight_bonus: f64) -> PlacementReward {
    PlacementReward {
        placement_bonus,
        per_fight_bonus,
    }
}

/// Rewards for placements 1..=10, indexed by `placement - 1`.
const TOP_TEN_REWARDS: [PlacementReward; 10] = [
    reward(100.0, 25.0),
    reward(60.0, 20.0),
    reward(40.0, 20.0),
    reward(40.0, 15.0),
    reward(30.0, 15.0),
    reward(30.0, 12.0),
    reward(20.0, 12.0),
    reward(20.0, 12.0),
    reward(10.0, 12.0),
    reward(10.0, 12.0),
];

/// Everyone outside the top ten gets kill credit only.
const OUTSIDE_TOP_TEN: PlacementReward = reward(0.0, 10.0);

/// Squad size; elimination credit is split evenly between members.
pub const SQUAD_SIZE: f64 = 3.0;

pub fn placement_reward(placement: u32) -> Result<PlacementReward> {
    if placement == 0 || placement > MAX_PLACEMENT {
        return Err(SimError::InvalidPlacement {
            placement,
            max: MAX_PLACEMENT,
        });
    }
    Ok(TOP_TEN_REWARDS
        .get(placement as usize - 1)
        .copied()
        .unwrap_or(OUTSIDE_TOP_TEN))
}

/// Ranked-points delta for one match.
pub fn score(placement: u32, fights_won: u32, tier: RankTier) -> Result<f64> {
    let r = placement_reward(placement)?;
    Ok(r.placement_bonus + r.per_fight_bonus * fights_won as f64 / SQUAD_SIZE - tier.entry_cost())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_without_kills_in_bronze() {
        assert_eq!(score(1, 0, RankTier::Bronze).unwrap(), 100.0);
    }

    #[test]
    fn test_tenth_place_in_plat() {
        // 10 + 12 * 3 / 3 - 36
        assert_eq!(score(10, 3, RankTier::Plat).unwrap(), -14.0);
    }

    #[test]
    fn test_outside_top_ten_shares_reward() {
        for placement in 11..=MAX_PLACEMENT {
            assert_eq!(placement_reward(placement).unwrap(), OUTSIDE_TOP_TEN);
        }
        assert_eq!(score(20, 0, RankTier::Pred).unwrap(), -60.0);
        assert!((score(15, 1, RankTier::Bronze).unwrap() - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rewards_decrease_with_placement() {
        let rewards: Vec<PlacementReward> =
            (1..=MAX_PLACEMENT).map(|p| placement_reward(p).unwrap()).collect();
        for pair in rewards.windows(2) {
            assert!(pair[0].placement_bonus >= pair[1].placement_bonus);
            assert!(pair[0].per_fight_bonus >= pair[1].per_fight_bonus);
        }
    }

    #[test]
    fn test_out_of_range_placement() {
        assert!(matches!(
            score(0, 0, RankTier::Plat),
            Err(SimError::InvalidPlacement { placement: 0, .. })
        ));
        assert!(matches!(
            score(21, 2, RankTier::Plat),
            Err(SimError::InvalidPlacement { placement: 21, max: 20 })
        ));
    }
}

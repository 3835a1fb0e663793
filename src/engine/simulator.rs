//! Single-match random walk over lobby placements.
//!
//! Each step the lobby shrinks by one squad. With probability `1 / (p - 1)`
//! the elimination involves us: depending on the strategy we either fight
//! (win → kill credit and advance) or try to run (escape → advance). A step
//! that leaves the placement unchanged means we were the squad eliminated.

use rand::Rng;
use rand_distr::Distribution;

use crate::engine::error::{Result, SimError};
use crate::engine::models::MatchOutcome;
use crate::engine::strategy::{Engagement, EncounterOdds, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatchState {
    placement: u32,
    fights_won: u32,
}

impl From<MatchState> for MatchOutcome {
    fn from(state: MatchState) -> Self {
        MatchOutcome {
            final_placement: state.placement,
            fights_won: state.fights_won,
        }
    }
}

enum Step {
    Continue(MatchState),
    Finished(MatchOutcome),
}

/// Strategy with its threshold distributions prepared once, reused across matches.
#[derive(Debug, Clone)]
pub struct MatchSimulator {
    strategy: Strategy,
    odds: EncounterOdds,
}

impl MatchSimulator {
    pub fn new(strategy: Strategy) -> Result<Self> {
        let odds = strategy.odds()?;
        Ok(Self { strategy, odds })
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Play one match from `start` until we win or get eliminated.
    pub fn run<R: Rng + ?Sized>(&self, start: u32, rng: &mut R) -> Result<MatchOutcome> {
        if start == 0 {
            return Err(SimError::InvalidStartPlacement(start));
        }

        let initial = MatchState {
            placement: start,
            fights_won: 0,
        };
        let mut step = if start == 1 {
            Step::Finished(initial.into())
        } else {
            Step::Continue(initial)
        };

        loop {
            match step {
                Step::Continue(state) => step = self.advance(state, rng),
                Step::Finished(outcome) => return Ok(outcome),
            }
        }
    }

    fn advance<R: Rng + ?Sized>(&self, state: MatchState, rng: &mut R) -> Step {
        let p = state.placement;
        debug_assert!(p > 1, "advance called on a finished match");

        let p_forced_fight = 1.0 / (p - 1) as f64;
        let next = if rng.gen::<f64>() > p_forced_fight {
            // Someone else got eliminated.
            MatchState {
                placement: p - 1,
                ..state
            }
        } else {
            match self.strategy.engagement(p) {
                Engagement::Fight => {
                    let roll = rng.gen::<f64>();
                    if roll < self.odds.win_fight.sample(rng) {
                        MatchState {
                            placement: p - 1,
                            fights_won: state.fights_won + 1,
                        }
                    } else {
                        state
                    }
                }
                Engagement::Flee => {
                    let roll = rng.gen::<f64>();
                    if roll < self.odds.getaway.sample(rng) {
                        MatchState {
                            placement: p - 1,
                            ..state
                        }
                    } else {
                        state
                    }
                }
            }
        };

        if next.placement == p || next.placement == 1 {
            Step::Finished(next.into())
        } else {
            Step::Continue(next)
        }
    }
}

/// Play one match under `strategy`.
pub fn simulate_match<R: Rng + ?Sized>(
    start: u32,
    strategy: &Strategy,
    rng: &mut R,
) -> Result<MatchOutcome> {
    MatchSimulator::new(*strategy)?.run(start, rng)
}

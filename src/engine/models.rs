//! Core data types flowing through the simulation pipeline.

use serde::{Deserialize, Serialize};

/// Where a single match ended and how many squads were eliminated on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub final_placement: u32,
    pub fights_won: u32,
}

/// A match outcome with its ranked-points delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredOutcome {
    #[serde(flatten)]
    outcome: MatchOutcome,
    points: f64,
}

impl ScoredOutcome {
    pub fn new(outcome: MatchOutcome, points: f64) -> Self {
        Self { outcome, points }
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.outcome
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    pub fn final_placement(&self) -> u32 {
        self.outcome.final_placement
    }

    pub fn fights_won(&self) -> u32 {
        self.outcome.fights_won
    }
}

/// Scored outcomes of many independent matches. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    outcomes: Vec<ScoredOutcome>,
}

impl Population {
    pub fn new(outcomes: Vec<ScoredOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[ScoredOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredOutcome> {
        self.outcomes.iter()
    }
}

/// Aggregate of the matches played in one session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub mean_placement: f64,
    pub mean_fights_won: f64,
    pub summed_points: f64,
}

impl Session {
    /// A one-game session carrying the match values verbatim.
    pub fn single(entry: &ScoredOutcome) -> Self {
        Self {
            mean_placement: entry.final_placement() as f64,
            mean_fights_won: entry.fights_won() as f64,
            summed_points: entry.points(),
        }
    }

    /// Reduce a non-empty draw of matches: means for placement and fights, sum for points.
    pub fn aggregate<'a, I>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a ScoredOutcome>,
    {
        let mut n = 0usize;
        let mut placement = 0.0;
        let mut fights = 0.0;
        let mut points = 0.0;
        for e in entries {
            n += 1;
            placement += e.final_placement() as f64;
            fights += e.fights_won() as f64;
            points += e.points();
        }
        if n == 0 {
            return None;
        }
        Some(Self {
            mean_placement: placement / n as f64,
            mean_fights_won: fights / n as f64,
            summed_points: points,
        })
    }
}

/// Which column of a [`SessionResults`] table to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionColumn {
    MeanPlacement,
    MeanFightsWon,
    SummedPoints,
}

impl SessionColumn {
    pub fn name(self) -> &'static str {
        match self {
            SessionColumn::MeanPlacement => "mean_placement",
            SessionColumn::MeanFightsWon => "mean_fights_won",
            SessionColumn::SummedPoints => "summed_points",
        }
    }

    pub fn get(self, session: &Session) -> f64 {
        match self {
            SessionColumn::MeanPlacement => session.mean_placement,
            SessionColumn::MeanFightsWon => session.mean_fights_won,
            SessionColumn::SummedPoints => session.summed_points,
        }
    }
}

/// Output table of the resampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResults {
    games_per_session: usize,
    sessions: Vec<Session>,
}

impl SessionResults {
    pub fn new(games_per_session: usize, sessions: Vec<Session>) -> Self {
        Self {
            games_per_session,
            sessions,
        }
    }

    /// Matches aggregated into each session (1 for passthrough tables).
    pub fn games_per_session(&self) -> usize {
        self.games_per_session
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn column(&self, column: SessionColumn) -> Vec<f64> {
        self.sessions.iter().map(|s| column.get(s)).collect()
    }
}

//! Session resampling: bootstrap "a session of k games" from a population.

use rand::Rng;

use crate::engine::error::{Result, SimError};
use crate::engine::models::{Population, Session, SessionResults};

/// Draw `sample_count` sessions of `games_per_session` matches each, with replacement.
///
/// With `games_per_session == None` every population entry becomes its own
/// one-game session and `sample_count` is ignored.
pub fn resample_sessions<R: Rng + ?Sized>(
    population: &Population,
    games_per_session: Option<usize>,
    sample_count: usize,
    rng: &mut R,
) -> Result<SessionResults> {
    if population.is_empty() {
        return Err(SimError::EmptyPopulation);
    }

    let Some(games) = games_per_session else {
        return Ok(SessionResults::new(
            1,
            population.iter().map(Session::single).collect(),
        ));
    };

    if games == 0 {
        return Err(SimError::InvalidCount {
            field: "games_per_session",
            value: games,
        });
    }
    if sample_count == 0 {
        return Err(SimError::InvalidCount {
            field: "sample_count",
            value: sample_count,
        });
    }

    let outcomes = population.outcomes();
    let mut sessions = Vec::with_capacity(sample_count);
    for _ in 0..sample_count {
        let drawn = (0..games).map(|_| &outcomes[rng.gen_range(0..outcomes.len())]);
        // games >= 1, so the draw is never empty
        if let Some(session) = Session::aggregate(drawn) {
            sessions.push(session);
        }
    }

    tracing::debug!(
        sample_count,
        games_per_session = games,
        population = outcomes.len(),
        "resampled sessions"
    );
    Ok(SessionResults::new(games, sessions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::{MatchOutcome, ScoredOutcome};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn population(entries: &[(u32, u32, f64)]) -> Population {
        Population::new(
            entries
                .iter()
                .map(|&(p, f, pts)| {
                    ScoredOutcome::new(
                        MatchOutcome {
                            final_placement: p,
                            fights_won: f,
                        },
                        pts,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_passthrough_keeps_every_entry() {
        let pop = population(&[(1, 3, 125.0), (14, 0, -36.0), (5, 2, 4.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let res = resample_sessions(&pop, None, 100, &mut rng).unwrap();
        assert_eq!(res.games_per_session(), 1);
        assert_eq!(res.len(), pop.len());
        for (s, e) in res.sessions().iter().zip(pop.iter()) {
            assert_eq!(*s, Session::single(e));
        }
    }

    #[test]
    fn test_sample_count_is_exact() {
        let pop = population(&[(3, 1, 10.0), (9, 0, -26.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for s in [1, 7, 100, 1_000] {
            let res = resample_sessions(&pop, Some(10), s, &mut rng).unwrap();
            assert_eq!(res.len(), s);
            assert_eq!(res.games_per_session(), 10);
        }
    }

    #[test]
    fn test_more_games_than_population() {
        let pop = population(&[(2, 1, 30.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let res = resample_sessions(&pop, Some(50), 3, &mut rng).unwrap();
        for s in res.sessions() {
            assert_eq!(s.mean_placement, 2.0);
            assert_eq!(s.mean_fights_won, 1.0);
            assert!((s.summed_points - 1_500.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_session_values_stay_within_population_range() {
        let pop = population(&[(1, 4, 100.0), (20, 0, -36.0), (8, 1, -12.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let res = resample_sessions(&pop, Some(10), 200, &mut rng).unwrap();
        for s in res.sessions() {
            assert!((1.0..=20.0).contains(&s.mean_placement));
            assert!((0.0..=4.0).contains(&s.mean_fights_won));
            assert!((-360.0..=1_000.0).contains(&s.summed_points));
        }
    }

    #[test]
    fn test_invalid_arguments() {
        let pop = population(&[(1, 0, 64.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            resample_sessions(&pop, Some(10), 0, &mut rng),
            Err(SimError::InvalidCount { field: "sample_count", .. })
        ));
        assert!(matches!(
            resample_sessions(&pop, Some(0), 10, &mut rng),
            Err(SimError::InvalidCount { field: "games_per_session", .. })
        ));
        assert!(matches!(
            resample_sessions(&Population::new(Vec::new()), Some(10), 10, &mut rng),
            Err(SimError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_seeded_resampling_is_reproducible() {
        let pop = population(&[(1, 2, 80.0), (4, 1, 9.0), (12, 0, -36.0), (19, 1, -32.0)]);
        let a = resample_sessions(&pop, Some(10), 50, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        let b = resample_sessions(&pop, Some(10), 50, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
    }
}

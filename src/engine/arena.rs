//! Strategy arena: run the pipeline under several strategies and compare them.

use std::time::Instant;

use serde::Serialize;

use crate::engine::error::{Result, SimError};
use crate::engine::models::{SessionColumn, SessionResults};
use crate::engine::pipeline::{run_simulation, SimulationConfig, SimulationRun};
use crate::engine::stats::{mean, stddev, welch_unchecked, WelchTest};
use crate::engine::strategy::Strategy;

/// Difference in summed-points means between two session tables.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Comparison {
    pub mean_a: f64,
    pub mean_b: f64,
    /// `mean_a - mean_b`
    pub diff_in_means: f64,
    pub welch: WelchTest,
}

impl Comparison {
    pub fn p_value(&self) -> f64 {
        self.welch.p_value
    }

    pub fn summary(&self, label_a: &str, label_b: &str) -> String {
        format!(
            "Diff. in means ({} - {}): {:.2} (P={:.3})",
            label_a, label_b, self.diff_in_means, self.welch.p_value
        )
    }
}

/// Compare summed points of two session tables with Welch's t-test.
pub fn compare(a: &SessionResults, b: &SessionResults) -> Result<Comparison> {
    let pa = a.column(SessionColumn::SummedPoints);
    let pb = b.column(SessionColumn::SummedPoints);
    for (side, n) in [("a", pa.len()), ("b", pb.len())] {
        if n < 2 {
            return Err(SimError::InsufficientSamples { side, count: n });
        }
    }
    let welch = welch_unchecked(&pa, &pb);
    let (mean_a, mean_b) = (mean(&pa), mean(&pb));
    Ok(Comparison {
        mean_a,
        mean_b,
        diff_in_means: mean_a - mean_b,
        welch,
    })
}

/// Named strategy runs, in the order they were requested.
pub struct ArenaResult {
    pub runs: Vec<(String, SimulationRun)>,
    pub durations_ms: Vec<f64>,
}

impl ArenaResult {
    pub fn get(&self, name: &str) -> Option<&SimulationRun> {
        self.runs.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn compare(&self, a: &str, b: &str) -> Result<Comparison> {
        let lookup = |name: &str| {
            self.get(name).ok_or_else(|| SimError::UnknownProfile {
                name: name.to_string(),
                available: self.runs.iter().map(|(n, _)| n.clone()).collect(),
            })
        };
        compare(&lookup(a)?.results, &lookup(b)?.results)
    }

    pub fn summary(&self) -> String {
        let games = self
            .runs
            .first()
            .map(|(_, r)| r.results.games_per_session())
            .unwrap_or(0);
        let mut lines = vec![format!(
            "Arena Results ({} strategies, {} games per session)",
            self.runs.len(),
            games
        )];
        lines.push("=".repeat(72));
        for (name, run) in &self.runs {
            let rp = run.results.column(SessionColumn::SummedPoints);
            let place = run.results.column(SessionColumn::MeanPlacement);
            let fights = run.results.column(SessionColumn::MeanFightsWon);
            lines.push(format!(
                "  {:>12}: topn={:>3}  RP={:7.1} +/- {:6.1}  place={:5.2}  fights={:4.2}  (n={})",
                name,
                run.config.strategy.threshold.to_string(),
                mean(&rp),
                stddev(&rp),
                mean(&place),
                mean(&fights),
                run.results.len(),
            ));
        }
        if !self.durations_ms.is_empty() {
            let total_s = self.durations_ms.iter().sum::<f64>() / 1000.0;
            lines.push(format!("  Total: {:.1}s", total_s));
        }
        lines.join("\n")
    }
}

/// Run `base` once per strategy. Strategy `i` uses seed `base.seed + i`, so a
/// seeded arena is reproducible while the runs stay independent.
pub fn run_arena(
    base: &SimulationConfig,
    strategies: &[(String, Strategy)],
    progress_callback: Option<&dyn Fn(usize, usize)>,
) -> Result<ArenaResult> {
    let base_seed = base.seed.unwrap_or_else(rand::random);
    let mut result = ArenaResult {
        runs: Vec::with_capacity(strategies.len()),
        durations_ms: Vec::with_capacity(strategies.len()),
    };

    for (idx, (name, strategy)) in strategies.iter().enumerate() {
        let config = SimulationConfig {
            strategy: *strategy,
            seed: Some(base_seed.wrapping_add(idx as u64)),
            ..base.clone()
        };
        tracing::debug!(strategy = %name, threshold = %strategy.threshold, "running strategy");

        let t0 = Instant::now();
        let run = run_simulation(&config)?;
        result.durations_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
        result.runs.push((name.clone(), run));

        if let Some(cb) = progress_callback {
            cb(idx + 1, strategies.len());
        }
    }

    Ok(result)
}

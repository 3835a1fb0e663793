//! Text reports: marginal distributions of a session table.

use crate::engine::models::{SessionColumn, SessionResults};
use crate::engine::pipeline::SimulationRun;
use crate::engine::stats::Summary;

const BAR_WIDTH: usize = 40;
const DEFAULT_BINS: usize = 12;

/// Equal-width histogram over `[lo, hi]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub lo: f64,
    pub hi: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` over their own range.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let (lo, hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if values.is_empty() {
            return Self::with_range(values, 0.0, 0.0, bins);
        }
        Self::with_range(values, lo, hi, bins)
    }

    /// Bin `values` over a fixed range; values outside are clamped into the edge bins.
    pub fn with_range(values: &[f64], lo: f64, hi: f64, bins: usize) -> Self {
        let bins = bins.max(1);
        let mut counts = vec![0usize; bins];
        let width = (hi - lo) / bins as f64;
        for &v in values {
            let idx = if width > 0.0 {
                (((v - lo) / width).floor().max(0.0) as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }
        Self { lo, hi, counts }
    }

    pub fn bin_width(&self) -> f64 {
        (self.hi - self.lo) / self.counts.len() as f64
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn render(&self) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let width = self.bin_width();
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let start = self.lo + width * i as f64;
                let bar = "#".repeat(count * BAR_WIDTH / peak);
                format!(
                    "  [{:>8.2}, {:>8.2}) {:>5} {}",
                    start,
                    start + width,
                    count,
                    bar
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

struct Marginal {
    label: &'static str,
    column: SessionColumn,
    range: Option<(f64, f64)>,
}

const MARGINALS: [Marginal; 3] = [
    Marginal {
        label: "Placement per match (session ave.)",
        column: SessionColumn::MeanPlacement,
        range: Some((0.0, 20.0)),
    },
    Marginal {
        label: "Summed RP during session",
        column: SessionColumn::SummedPoints,
        range: None,
    },
    Marginal {
        label: "Number of fights won per match (session ave.)",
        column: SessionColumn::MeanFightsWon,
        range: None,
    },
];

/// Summary plus histogram for each of the three session columns.
pub fn render_marginals(results: &SessionResults, bins: usize) -> String {
    let mut sections = Vec::with_capacity(MARGINALS.len());
    for m in &MARGINALS {
        let values = results.column(m.column);
        let s = Summary::of(&values);
        let hist = match m.range {
            Some((lo, hi)) if s.min >= lo && s.max <= hi => Histogram::with_range(&values, lo, hi, bins),
            _ => Histogram::new(&values, bins),
        };
        sections.push(format!(
            "{}\n  mean={:.2}  std={:.2}  min={:.2}  max={:.2}  n={}\n{}",
            m.label,
            s.mean,
            s.stddev,
            s.min,
            s.max,
            s.count,
            hist.render()
        ));
    }
    sections.join("\n\n")
}

/// Full report for one run: title, then the three marginal distributions.
pub fn render_run(run: &SimulationRun) -> String {
    format!(
        "{}\n{}\n{}",
        run.title(),
        "=".repeat(72),
        render_marginals(&run.results, DEFAULT_BINS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::Session;

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let h = Histogram::new(&values, 5);
        assert_eq!(h.total(), values.len());
        assert_eq!(h.counts, vec![2, 2, 2, 2, 3]);
        assert_eq!(h.bin_width(), 2.0);
    }

    #[test]
    fn test_histogram_constant_values() {
        let h = Histogram::new(&[4.0, 4.0, 4.0], 6);
        assert_eq!(h.counts[0], 3);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn test_histogram_fixed_range() {
        let h = Histogram::with_range(&[0.5, 19.9, 20.0, 10.0], 0.0, 20.0, 4);
        assert_eq!(h.counts, vec![1, 0, 1, 2]);
    }

    #[test]
    fn test_render_marginals_labels() {
        let results = SessionResults::new(
            10,
            vec![
                Session { mean_placement: 9.5, mean_fights_won: 0.8, summed_points: -120.0 },
                Session { mean_placement: 7.1, mean_fights_won: 1.4, summed_points: 35.0 },
            ],
        );
        let text = render_marginals(&results, 4);
        assert!(text.contains("Placement per match (session ave.)"));
        assert!(text.contains("Summed RP during session"));
        assert!(text.contains("Number of fights won per match (session ave.)"));
        assert!(text.contains("n=2"));
    }
}

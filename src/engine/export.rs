//! Persist session tables and run summaries.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::engine::error::{Result, SimError};
use crate::engine::models::{SessionColumn, SessionResults};
use crate::engine::pipeline::{SimulationConfig, SimulationRun};
use crate::engine::stats::Summary;

fn io_err(path: &Path) -> impl Fn(std::io::Error) -> SimError + '_ {
    move |source| SimError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write the session table as comma-separated values with a leading row index.
pub fn write_csv(results: &SessionResults, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut out = BufWriter::new(file);
    write_csv_to(results, &mut out).map_err(io_err(path))?;
    out.flush().map_err(io_err(path))?;
    tracing::info!(path = %path.display(), rows = results.len(), "wrote session table");
    Ok(())
}

pub fn write_csv_to<W: Write>(results: &SessionResults, out: &mut W) -> std::io::Result<()> {
    writeln!(out, ",mean_placement,mean_fights_won,summed_points")?;
    for (i, s) in results.sessions().iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{}",
            i, s.mean_placement, s.mean_fights_won, s.summed_points
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct RunSummary<'a> {
    title: String,
    config: &'a SimulationConfig,
    seed: u64,
    population_size: usize,
    games_per_session: usize,
    mean_placement: Summary,
    mean_fights_won: Summary,
    summed_points: Summary,
}

/// Write run configuration and column summaries as pretty JSON.
pub fn write_json(run: &SimulationRun, path: &Path) -> Result<()> {
    let summary = RunSummary {
        title: run.title(),
        config: &run.config,
        seed: run.seed,
        population_size: run.population_size,
        games_per_session: run.results.games_per_session(),
        mean_placement: Summary::of(&run.results.column(SessionColumn::MeanPlacement)),
        mean_fights_won: Summary::of(&run.results.column(SessionColumn::MeanFightsWon)),
        summed_points: Summary::of(&run.results.column(SessionColumn::SummedPoints)),
    };
    let json = serde_json::to_string_pretty(&summary)?;
    std::fs::write(path, json).map_err(io_err(path))?;
    tracing::info!(path = %path.display(), "wrote run summary");
    Ok(())
}

//! Arena CLI — compare play strategies from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --a default --b top7
//!   cargo run --release --bin arena -- --a default --b rat --games 20 --seed 42

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ranked_sim::engine::arena::run_arena;
use ranked_sim::engine::export::write_csv;
use ranked_sim::engine::profiles::{load_default_profiles, load_profiles};
use ranked_sim::engine::report::render_run;
use ranked_sim::games::battle_royale::types::RankTier;

#[derive(Parser)]
#[command(name = "arena", about = "Compare ranked-points outcomes of two strategies")]
struct Cli {
    /// Baseline strategy profile
    #[arg(long, default_value = "default")]
    a: String,

    /// Challenger strategy profile
    #[arg(long, default_value = "top7")]
    b: String,

    /// Path to strategy_profiles.toml
    #[arg(long, env = "RANKED_SIM_PROFILES")]
    profiles: Option<PathBuf>,

    /// Matches simulated per strategy population
    #[arg(long)]
    population: Option<usize>,

    /// Sessions drawn per strategy
    #[arg(long)]
    samples: Option<usize>,

    /// Matches per session
    #[arg(long)]
    games: Option<usize>,

    /// Rank tier
    #[arg(long)]
    tier: Option<RankTier>,

    /// Random seed
    #[arg(long, env = "RANKED_SIM_SEED")]
    seed: Option<u64>,

    /// Print the full distribution report for each strategy
    #[arg(long)]
    verbose: bool,

    /// Directory to write one CSV per strategy into
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path)?,
        None => load_default_profiles(),
    };

    let mut base = profiles.simulation_config();
    if let Some(v) = cli.population { base.population = v; }
    if let Some(v) = cli.samples { base.sample_count = v; }
    if let Some(v) = cli.games { base.games_per_session = Some(v); }
    if let Some(v) = cli.tier { base.rank_tier = v; }
    if let Some(v) = cli.seed { base.seed = Some(v); }

    let strategies = vec![
        (cli.a.clone(), profiles.resolve(&cli.a)?),
        (cli.b.clone(), profiles.resolve(&cli.b)?),
    ];

    eprintln!(
        "Arena: population={}, samples={}, games={:?}, tier={}, seed={:?}",
        base.population, base.sample_count, base.games_per_session, base.rank_tier, base.seed
    );
    for (name, s) in &strategies {
        eprintln!(
            "  {}: topn={}, p_winfight={}, p_getaway={}",
            name, s.threshold, s.p_winfight, s.p_getaway
        );
    }
    eprintln!();

    let progress_cb = |done: usize, total: usize| {
        eprint!("\r  [{}/{}] strategies simulated", done, total);
    };
    let result = run_arena(&base, &strategies, Some(&progress_cb))?;
    eprintln!("\r                                    "); // clear progress line

    if cli.verbose {
        for (_, run) in &result.runs {
            println!("{}\n", render_run(run));
        }
    }
    println!("{}", result.summary());

    let comparison = result.compare(&cli.a, &cli.b)?;
    println!("\n{}", comparison.summary(&cli.a, &cli.b));

    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)?;
        for (name, run) in &result.runs {
            write_csv(&run.results, &dir.join(format!("{}_sim.csv", name)))?;
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ranked_sim::engine::export::{write_csv, write_json};
use ranked_sim::engine::pipeline::run_simulation;
use ranked_sim::engine::profiles::{load_default_profiles, load_profiles};
use ranked_sim::engine::report::render_run;
use ranked_sim::engine::strategy::FightThreshold;
use ranked_sim::games::battle_royale::types::RankTier;

#[derive(Parser)]
#[command(name = "ranked-sim", about = "Simulate ranked sessions for one play strategy")]
struct Cli {
    /// Strategy profile name (from strategy_profiles.toml or built-in)
    #[arg(long, default_value = "default")]
    profile: String,

    /// Path to strategy_profiles.toml (default: auto-discover)
    #[arg(long, env = "RANKED_SIM_PROFILES")]
    profiles: Option<PathBuf>,

    /// Matches simulated to build the population
    #[arg(long)]
    population: Option<usize>,

    /// Sessions drawn from the population
    #[arg(long)]
    samples: Option<usize>,

    /// Matches per session
    #[arg(long)]
    games: Option<usize>,

    /// Report every simulated match as its own session
    #[arg(long)]
    passthrough: bool,

    /// Starting placement (lobby size)
    #[arg(long)]
    start: Option<u32>,

    /// Rank tier: bronze, silver, gold, plat, diamond, master, pred
    #[arg(long)]
    tier: Option<RankTier>,

    /// Fight only at or below this placement, or "inf" to always fight (overrides the profile)
    #[arg(long)]
    topn: Option<FightThreshold>,

    /// Center of the fight-win threshold (overrides the profile)
    #[arg(long)]
    p_winfight: Option<f64>,

    /// Center of the escape threshold (overrides the profile)
    #[arg(long)]
    p_getaway: Option<f64>,

    /// Random seed
    #[arg(long, env = "RANKED_SIM_SEED")]
    seed: Option<u64>,

    /// Write the session table as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON run summary
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path)?,
        None => load_default_profiles(),
    };

    let mut config = profiles.simulation_config();
    config.strategy = profiles.resolve(&cli.profile)?;

    // CLI overrides on top of profile
    if let Some(v) = cli.population { config.population = v; }
    if let Some(v) = cli.samples { config.sample_count = v; }
    if let Some(v) = cli.games { config.games_per_session = Some(v); }
    if cli.passthrough { config.games_per_session = None; }
    if let Some(v) = cli.start { config.start_placement = v; }
    if let Some(v) = cli.tier { config.rank_tier = v; }
    if let Some(v) = cli.topn { config.strategy.threshold = v; }
    if let Some(v) = cli.p_winfight { config.strategy.p_winfight = v; }
    if let Some(v) = cli.p_getaway { config.strategy.p_getaway = v; }
    if let Some(v) = cli.seed { config.seed = Some(v); }

    tracing::info!(
        profile = %cli.profile,
        population = config.population,
        samples = config.sample_count,
        games = ?config.games_per_session,
        tier = %config.rank_tier,
        "starting simulation"
    );

    let run = run_simulation(&config)?;
    println!("{}", render_run(&run));

    if let Some(path) = &cli.csv {
        write_csv(&run.results, path)?;
    }
    if let Some(path) = &cli.json {
        write_json(&run, path)?;
    }

    Ok(())
}

//! Named strategy profiles and simulation defaults.
//! Loaded from TOML at runtime for the CLIs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::engine::error::{Result, SimError};
use crate::engine::pipeline::SimulationConfig;
use crate::engine::strategy::{FightThreshold, Strategy};
use crate::games::battle_royale::types::RankTier;

/// A named strategy. Unset fields fall back to `Strategy::default()`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StrategyProfile {
    pub description: Option<String>,
    /// Fight only at or below this placement; omit to always fight.
    pub topn: Option<u32>,
    pub p_winfight: Option<f64>,
    pub p_getaway: Option<f64>,
}

impl StrategyProfile {
    pub fn to_strategy(&self) -> Strategy {
        let d = Strategy::default();
        Strategy {
            threshold: FightThreshold::from(self.topn),
            p_winfight: self.p_winfight.unwrap_or(d.p_winfight),
            p_getaway: self.p_getaway.unwrap_or(d.p_getaway),
        }
    }
}

/// Overrides for `SimulationConfig` defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SimulationSettings {
    pub population: Option<usize>,
    pub sample_count: Option<usize>,
    pub games_per_session: Option<usize>,
    /// Report every match as its own session.
    #[serde(default)]
    pub passthrough: bool,
    pub start_placement: Option<u32>,
    pub rank_tier: Option<RankTier>,
    pub seed: Option<u64>,
}

impl SimulationSettings {
    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(v) = self.population { config.population = v; }
        if let Some(v) = self.sample_count { config.sample_count = v; }
        if let Some(v) = self.games_per_session { config.games_per_session = Some(v); }
        if self.passthrough { config.games_per_session = None; }
        if let Some(v) = self.start_placement { config.start_placement = v; }
        if let Some(v) = self.rank_tier { config.rank_tier = v; }
        if let Some(v) = self.seed { config.seed = Some(v); }
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StrategyProfilesFile {
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub profiles: BTreeMap<String, StrategyProfile>,
}

impl StrategyProfilesFile {
    /// Built-in experiments: always fight, and fight only in the top seven.
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "default".to_string(),
            StrategyProfile {
                description: Some("Always take the fight".into()),
                ..Default::default()
            },
        );
        profiles.insert(
            "top7".to_string(),
            StrategyProfile {
                description: Some("Avoid fights until top 7".into()),
                topn: Some(7),
                ..Default::default()
            },
        );
        Self {
            simulation: SimulationSettings::default(),
            profiles,
        }
    }

    /// Look up a profile by name.
    pub fn resolve(&self, name: &str) -> Result<Strategy> {
        self.profiles
            .get(name)
            .map(StrategyProfile::to_strategy)
            .ok_or_else(|| SimError::UnknownProfile {
                name: name.to_string(),
                available: self.profiles.keys().cloned().collect(),
            })
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        self.simulation.apply(&mut config);
        config
    }
}

/// Load profiles from a TOML file. Built-in profiles stay available unless the
/// file redefines them.
pub fn load_profiles(path: &Path) -> Result<StrategyProfilesFile> {
    let content = std::fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: StrategyProfilesFile =
        toml::from_str(&content).map_err(|source| SimError::ProfileParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut merged = StrategyProfilesFile::builtin();
    merged.simulation = parsed.simulation;
    merged.profiles.extend(parsed.profiles);
    Ok(merged)
}

/// Try to load profiles from well-known paths, returning the built-ins if none found.
pub fn load_default_profiles() -> StrategyProfilesFile {
    let candidates = ["strategy_profiles.toml", "../strategy_profiles.toml"];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(path = %p.display(), count = profiles.profiles.len(), "loaded strategy profiles");
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load strategy profiles");
                }
            }
        }
    }
    tracing::info!("no strategy_profiles.toml found, using built-in profiles");
    StrategyProfilesFile::builtin()
}

/// Resolve an experiment name to a strategy using the default profile lookup.
pub fn experiment(name: &str) -> Result<Strategy> {
    load_default_profiles().resolve(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_experiments() {
        let profiles = StrategyProfilesFile::builtin();
        assert_eq!(profiles.resolve("default").unwrap(), Strategy::always_fight());
        assert_eq!(profiles.resolve("top7").unwrap(), Strategy::fight_in_top(7));
        match profiles.resolve("rat") {
            Err(SimError::UnknownProfile { name, available }) => {
                assert_eq!(name, "rat");
                assert_eq!(available, vec!["default".to_string(), "top7".to_string()]);
            }
            other => panic!("expected UnknownProfile, got {:?}", other),
        }
    }

    #[test]
    fn test_load_profiles_merges_with_builtins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[simulation]
population = 500
games_per_session = 5
rank_tier = "diamond"
seed = 7

[profiles.rat]
description = "Hide until the final two"
topn = 2
p_getaway = 0.8

[profiles.default]
p_winfight = 0.55
"#
        )
        .unwrap();

        let profiles = load_profiles(file.path()).unwrap();
        let rat = profiles.resolve("rat").unwrap();
        assert_eq!(rat.threshold, FightThreshold::TopN(2));
        assert_eq!(rat.p_getaway, 0.8);
        assert_eq!(rat.p_winfight, 0.5);
        assert_eq!(profiles.resolve("default").unwrap().p_winfight, 0.55);
        assert!(profiles.resolve("top7").is_ok());

        let config = profiles.simulation_config();
        assert_eq!(config.population, 500);
        assert_eq!(config.games_per_session, Some(5));
        assert_eq!(config.sample_count, 100);
        assert_eq!(config.rank_tier, RankTier::Diamond);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_passthrough_setting() {
        let settings: SimulationSettings = toml::from_str("passthrough = true").unwrap();
        let mut config = SimulationConfig::default();
        settings.apply(&mut config);
        assert_eq!(config.games_per_session, None);
    }

    #[test]
    fn test_load_profiles_errors() {
        let missing = Path::new("/definitely/not/here/strategy_profiles.toml");
        assert!(matches!(load_profiles(missing), Err(SimError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[profiles.bad]\ntopn = \"seven\"").unwrap();
        assert!(matches!(
            load_profiles(file.path()),
            Err(SimError::ProfileParse { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nrank_tier = \"platinum\"").unwrap();
        assert!(matches!(
            load_profiles(file.path()),
            Err(SimError::ProfileParse { .. })
        ));
    }
}

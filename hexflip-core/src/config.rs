//! Strategy configuration - per-difficulty heuristic overrides loaded from JSON

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::ai::{Difficulty, HeuristicAI};
use crate::eval::Heuristics;

/// Heuristic policy table keyed by difficulty.
///
/// Tiers missing from the file fall back to the built-in presets.
///
/// ```json
/// { "strategies": { "hard": { "capture_weight": 2.0, "position_weight": 1.0,
///                             "mobility_weight": 4.0, "noise": 0.0 } } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub strategies: BTreeMap<Difficulty, Heuristics>,
}

impl StrategyConfig {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read strategy file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid strategy file: {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: StrategyConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load if a path is given, otherwise use the presets
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (difficulty, h) in &self.strategies {
            let weights = [h.capture_weight, h.position_weight, h.mobility_weight, h.noise];
            if weights.iter().any(|w| !w.is_finite()) {
                bail!("{difficulty}: weights must be finite");
            }
            if h.noise < 0.0 {
                bail!("{difficulty}: noise must not be negative");
            }
        }
        Ok(())
    }

    /// Effective heuristics for a tier
    pub fn heuristics(&self, difficulty: Difficulty) -> Heuristics {
        self.strategies
            .get(&difficulty)
            .cloned()
            .unwrap_or_else(|| difficulty.heuristics())
    }

    /// Build a seeded computer player for a tier
    pub fn selector(&self, difficulty: Difficulty, seed: u64) -> HeuristicAI {
        HeuristicAI::with_seed(self.heuristics(difficulty), seed)
    }
}

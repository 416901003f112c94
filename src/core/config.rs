//! Battle configuration.
//!
//! A `BattleConfig` is built once and handed to the battle at
//! construction time. It can be assembled with the `with_*` builder
//! methods or loaded from a JSON file where every field is optional:
//!
//! ```json
//! { "max_rounds": 30, "seed": 7, "ai": { "buff_chance": 0.25 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Tunable probabilities and thresholds for the heuristic AI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// An ally below this hp ratio triggers an emergency heal.
    pub emergency_heal_threshold: f64,

    /// Chance to use an area skill when two or more enemies stand.
    pub area_skill_chance: f64,

    /// Team average hp ratio above which buffing is considered.
    pub buff_team_hp_threshold: f64,

    /// Chance to cast a buff once the threshold is met.
    pub buff_chance: f64,

    /// Chance to use an offensive skill instead of attacking.
    pub offensive_skill_chance: f64,

    /// Chance a plain attack goes for the weakest enemy rather than a random one.
    pub focus_weakest_chance: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            emergency_heal_threshold: 0.2,
            area_skill_chance: 0.7,
            buff_team_hp_threshold: 0.6,
            buff_chance: 0.4,
            offensive_skill_chance: 0.5,
            focus_weakest_chance: 0.8,
        }
    }
}

/// Complete battle configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Rounds after which the battle is called a draw. `None` for unlimited.
    pub max_rounds: Option<u32>,

    /// Reject skills the caster cannot pay for instead of clamping chakra at 0.
    pub enforce_chakra_cost: bool,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// AI tuning.
    pub ai: AiConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: Some(50),
            enforce_chakra_cost: false,
            seed: None,
            ai: AiConfig::default(),
        }
    }
}

impl BattleConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the round limit.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Remove the round limit.
    #[must_use]
    pub fn unlimited_rounds(mut self) -> Self {
        self.max_rounds = None;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Require casters to afford their skills.
    #[must_use]
    pub fn enforce_chakra_cost(mut self) -> Self {
        self.enforce_chakra_cost = true;
        self
    }

    /// Replace the AI tuning.
    #[must_use]
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

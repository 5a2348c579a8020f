use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::search::Difficulty;

/// Settings for a game session, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    /// Seed for the fallback RNG; entropy when absent.
    pub seed: Option<u64>,
    /// Side played by a human; `None` means the engine plays both sides.
    pub human_color: Option<Color>,
    pub max_plies: usize,
    /// Starting FEN; `None` for the standard start position.
    pub fen: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { difficulty: Difficulty::Intermediate, seed: None, human_color: None, max_plies: 200, fen: None }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid engine config")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text)
    }
}

use serde::{Deserialize, Serialize};

use crate::engine::MIN_SIZE;
use crate::error::{EngineError, Result};

/// Construction knobs for a `GameEngine`.
///
/// Missing fields fall back to `Default`, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board side length (N for an N x N grid).
    pub size: usize,
    /// `Some(seed)` replays deterministically, including `Some(0)`.
    /// `None` draws from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { size: 4, seed: None }
    }
}

impl EngineConfig {
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        Self { size, seed }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < MIN_SIZE {
            return Err(EngineError::InvalidSize(self.size));
        }
        Ok(())
    }
}

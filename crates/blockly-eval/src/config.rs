//! Evaluator configuration.

use serde::{Deserialize, Serialize};

/// Default cap on nested procedure calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// Limits and seeding for runs started by an [`Interpreter`](crate::Interpreter).
///
/// Deserialisable so hosts can load it next to their own settings; every
/// field is optional in the serialised form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Maximum number of blocks evaluated per run. `None` means unlimited.
    pub step_limit: Option<u64>,
    /// Maximum nesting of procedure calls.
    pub max_call_depth: usize,
    /// Seed for the random blocks. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            step_limit: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            seed: None,
        }
    }
}

impl EvalConfig {
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

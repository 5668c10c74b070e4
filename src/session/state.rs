use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Running totals for one game. Mutated only by the scoring engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub answered: u32,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub combo: u32,
    #[serde(default)]
    pub max_combo: u32,
    #[serde(default)]
    pub used_indices: BTreeSet<usize>,
}

impl SessionState {
    pub fn accuracy(&self) -> f64 {
        if self.answered == 0 {
            return 0.0;
        }
        (self.correct as f64 / self.answered as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn progress(&self, pool_len: usize) -> f64 {
        if pool_len == 0 {
            return 0.0;
        }
        self.used_indices.len() as f64 / pool_len as f64
    }

    /// correct ≤ answered, combo ≤ max_combo, every used index inside the pool.
    pub fn is_consistent(&self, pool_len: usize) -> bool {
        self.correct <= self.answered
            && self.combo <= self.max_combo
            && self.score >= 0.0
            && self.used_indices.iter().all(|&i| i < pool_len)
    }

    /// Drop indices that no longer fit the pool, e.g. after the word list
    /// shrank between runs.
    pub fn clamp_to_pool(&mut self, pool_len: usize) {
        self.used_indices.retain(|&i| i < pool_len);
        self.correct = self.correct.min(self.answered);
        self.max_combo = self.max_combo.max(self.combo);
        if !(self.score.is_finite() && self.score >= 0.0) {
            self.score = 0.0;
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Smallest pool the round selector can draw two distinct distractors from.
pub const MIN_POOL_SIZE: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub source: String,
    pub target: String,
}

impl WordPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Content identity used to key per-word statistics.
    pub fn key(&self) -> String {
        format!("{}\t{}", self.source, self.target)
    }
}

/// Read-only word list for one session. Construction guarantees the
/// minimum size the selector relies on.
#[derive(Clone, Debug)]
pub struct WordPool {
    words: Vec<WordPair>,
}

impl WordPool {
    pub fn new(words: Vec<WordPair>) -> GameResult<Self> {
        if words.len() < MIN_POOL_SIZE {
            return Err(GameError::PoolTooSmall {
                required: MIN_POOL_SIZE,
                actual: words.len(),
            });
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordPair> {
        self.words.get(index)
    }

    pub fn words(&self) -> &[WordPair] {
        &self.words
    }
}

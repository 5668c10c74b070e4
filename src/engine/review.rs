use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::words::pool::WordPair;

/// One-shot trigger per threshold window. Remembers the window index
/// (`answered / threshold`) it last fired in, so a window never fires twice
/// and the next multiple is always eligible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLatch {
    #[serde(default)]
    pub last_window: Option<u32>,
}

impl ReviewLatch {
    pub fn should_fire(&self, answered: u32, threshold: u32) -> bool {
        if threshold == 0 || answered == 0 || answered % threshold != 0 {
            return false;
        }
        self.last_window != Some(answered / threshold)
    }

    pub fn fire(&mut self, answered: u32, threshold: u32) {
        if threshold > 0 {
            self.last_window = Some(answered / threshold);
        }
    }

    pub fn reset(&mut self) {
        self.last_window = None;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealStep {
    /// Translation shown at this emphasis level (1-based).
    Revealed { level: u8 },
    /// Final reveal for this word; it leaves the queue for good.
    Completed { word: WordPair },
}

/// Active adaptive review: a queue of difficult words walked front to back.
#[derive(Clone, Debug)]
pub struct ReviewMode {
    queue: VecDeque<WordPair>,
    reveals: u8,
}

impl ReviewMode {
    /// `None` when there is nothing to review.
    pub fn start(words: Vec<WordPair>) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        Some(Self {
            queue: words.into(),
            reveals: 0,
        })
    }

    pub fn current(&self) -> Option<&WordPair> {
        self.queue.front()
    }

    /// Reveals granted on the current word so far.
    pub fn reveals(&self) -> u8 {
        self.reveals
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn reveal(&mut self, reveals_per_word: u8) -> Option<RevealStep> {
        self.queue.front()?;
        self.reveals += 1;
        if self.reveals >= reveals_per_word.max(1) {
            self.reveals = 0;
            let word = self.queue.pop_front()?;
            Some(RevealStep::Completed { word })
        } else {
            Some(RevealStep::Revealed {
                level: self.reveals,
            })
        }
    }

    pub fn skip_word(&mut self) -> Option<WordPair> {
        self.reveals = 0;
        self.queue.pop_front()
    }
}

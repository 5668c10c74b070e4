use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::words::pool::{WordPair, WordPool};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTally {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub wrong: u32,
}

impl WordTally {
    pub fn is_difficult(&self) -> bool {
        self.wrong > self.correct
    }

    pub fn word(&self) -> WordPair {
        WordPair::new(self.source.clone(), self.target.clone())
    }
}

/// Per-word correct/wrong counts across sessions, keyed by word identity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TallyStore {
    #[serde(default)]
    pub words: BTreeMap<String, WordTally>,
}

impl TallyStore {
    pub fn record(&mut self, word: &WordPair, correct: bool) {
        let entry = self.words.entry(word.key()).or_insert_with(|| WordTally {
            source: word.source.clone(),
            target: word.target.clone(),
            ..Default::default()
        });
        if correct {
            entry.correct += 1;
        } else {
            entry.wrong += 1;
        }
    }

    pub fn get(&self, word: &WordPair) -> Option<&WordTally> {
        self.words.get(&word.key())
    }

    pub fn remove(&mut self, word: &WordPair) -> bool {
        self.words.remove(&word.key()).is_some()
    }

    /// Words answered wrong more often than right, most-missed first. Ties
    /// keep key order so the queue is stable.
    pub fn difficult_words(&self) -> Vec<WordPair> {
        let mut hard: Vec<&WordTally> = self.words.values().filter(|t| t.is_difficult()).collect();
        hard.sort_by_key(|t| std::cmp::Reverse(t.wrong - t.correct));
        hard.into_iter().map(WordTally::word).collect()
    }

    /// `difficult_words` limited to the words of `pool`, so a tally shared by
    /// several word lists only reviews the active one.
    pub fn difficult_words_in(&self, pool: &WordPool) -> Vec<WordPair> {
        let keys: HashSet<String> = pool.words().iter().map(WordPair::key).collect();
        self.difficult_words()
            .into_iter()
            .filter(|w| keys.contains(&w.key()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

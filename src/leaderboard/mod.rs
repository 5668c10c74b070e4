pub mod file_board;

use std::cmp::Ordering;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Weak};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GameResult;
use crate::player::PlayerProfile;
use crate::session::state::SessionState;

pub use file_board::FileLeaderboard;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: Uuid,
    pub name: String,
    pub score: f64,
    pub answered: u32,
    pub correct: u32,
    pub max_combo: u32,
    pub timestamp: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn from_session(player: &PlayerProfile, state: &SessionState, at: DateTime<Utc>) -> Self {
        Self {
            player_id: player.id,
            name: player.name.clone(),
            score: state.score,
            answered: state.answered,
            correct: state.correct,
            max_combo: state.max_combo,
            timestamp: at,
        }
    }

    /// Whole percent, 0 when nothing was answered.
    pub fn accuracy_percent(&self) -> u32 {
        if self.answered == 0 {
            0
        } else {
            (self.correct as f64 / self.answered as f64 * 100.0).round() as u32
        }
    }
}

/// Highest score first; earlier submissions win ties.
pub fn rank(mut entries: Vec<LeaderboardEntry>, n: usize) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.timestamp.cmp(&b.timestamp))
    });
    entries.truncate(n);
    entries
}

/// Live view of one day's top entries. Dropping it unsubscribes.
pub struct Subscription {
    day: NaiveDate,
    rx: Receiver<Vec<LeaderboardEntry>>,
    _alive: Arc<()>,
}

impl Subscription {
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Most recent pushed ranking, if any arrived since the last call.
    pub fn latest(&self) -> Option<Vec<LeaderboardEntry>> {
        self.rx.try_iter().last()
    }
}

pub(crate) struct Subscriber {
    pub day: NaiveDate,
    pub limit: usize,
    tx: Sender<Vec<LeaderboardEntry>>,
    alive: Weak<()>,
}

impl Subscriber {
    pub fn pair(day: NaiveDate, limit: usize) -> (Self, Subscription) {
        let (tx, rx) = mpsc::channel();
        let alive = Arc::new(());
        let sub = Self {
            day,
            limit,
            tx,
            alive: Arc::downgrade(&alive),
        };
        (
            sub,
            Subscription {
                day,
                rx,
                _alive: alive,
            },
        )
    }

    /// Whether the `Subscription` still exists, without pushing to it.
    pub fn is_alive(&self) -> bool {
        self.alive.strong_count() > 0
    }

    /// False once the receiving side is gone.
    pub fn push(&self, entries: Vec<LeaderboardEntry>) -> bool {
        self.tx.send(entries).is_ok()
    }
}

pub trait LeaderboardBackend {
    /// Record a player's entry for `day`, replacing any earlier one.
    fn submit(&mut self, day: NaiveDate, entry: LeaderboardEntry) -> GameResult<()>;

    fn top_n(&self, day: NaiveDate, n: usize) -> GameResult<Vec<LeaderboardEntry>>;

    /// Pushes the current top `n` immediately and again on every change.
    fn subscribe(&mut self, day: NaiveDate, n: usize) -> Subscription;

    fn daily_player_count(&self, day: NaiveDate) -> GameResult<usize>;

    /// Pick up changes made outside this process.
    fn poll(&mut self) {}
}

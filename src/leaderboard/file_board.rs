use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GameError, GameResult};
use crate::leaderboard::{LeaderboardBackend, LeaderboardEntry, Subscriber, Subscription, rank};

/// One file per day, entries keyed by player id.
#[derive(Debug, Default, Serialize, Deserialize)]
struct DailyBoard {
    #[serde(default)]
    entries: BTreeMap<String, LeaderboardEntry>,
}

/// Leaderboard kept as `<dir>/<YYYY-MM-DD>.json`. Several processes may
/// share the directory; `poll` notices their writes by modification time.
pub struct FileLeaderboard {
    dir: PathBuf,
    subscribers: Vec<Subscriber>,
    seen: HashMap<NaiveDate, Option<SystemTime>>,
}

impl FileLeaderboard {
    pub fn new(dir: PathBuf) -> GameResult<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            subscribers: Vec::new(),
            seen: HashMap::new(),
        })
    }

    fn day_path(&self, day: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", day.format("%Y-%m-%d")))
    }

    fn modified(&self, day: NaiveDate) -> Option<SystemTime> {
        fs::metadata(self.day_path(day))
            .and_then(|m| m.modified())
            .ok()
    }

    fn load_day(&self, day: NaiveDate) -> GameResult<DailyBoard> {
        let path = self.day_path(day);
        if !path.exists() {
            return Ok(DailyBoard::default());
        }
        let content = fs::read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(board) => Ok(board),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable leaderboard file; treating as empty");
                Ok(DailyBoard::default())
            }
        }
    }

    fn save_day(&self, day: NaiveDate, board: &DailyBoard) -> GameResult<()> {
        let path = self.day_path(day);
        let tmp_path = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(board)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Forget dropped subscriptions and the days only they were watching.
    fn prune(&mut self) {
        let before = self.subscribers.len();
        self.subscribers.retain(Subscriber::is_alive);
        let subscribers = &self.subscribers;
        self.seen
            .retain(|day, _| subscribers.iter().any(|s| s.day == *day));
        if self.subscribers.len() != before {
            debug!(
                dropped = before - self.subscribers.len(),
                "pruned leaderboard subscribers"
            );
        }
    }

    fn notify(&mut self, day: NaiveDate) {
        let board = match self.load_day(day) {
            Ok(board) => board,
            Err(e) => {
                warn!(%day, error = %e, "could not refresh leaderboard");
                return;
            }
        };
        let entries: Vec<LeaderboardEntry> = board.entries.into_values().collect();
        self.subscribers.retain(|sub| {
            sub.day != day || sub.push(rank(entries.clone(), sub.limit))
        });
        let modified = self.modified(day);
        self.seen.insert(day, modified);
    }
}

impl LeaderboardBackend for FileLeaderboard {
    fn submit(&mut self, day: NaiveDate, entry: LeaderboardEntry) -> GameResult<()> {
        let mut board = self.load_day(day)?;
        debug!(%day, player = %entry.player_id, score = entry.score, "leaderboard submit");
        board.entries.insert(entry.player_id.to_string(), entry);
        self.save_day(day, &board)
            .map_err(|e| GameError::Leaderboard(e.to_string()))?;
        self.notify(day);
        Ok(())
    }

    fn top_n(&self, day: NaiveDate, n: usize) -> GameResult<Vec<LeaderboardEntry>> {
        let board = self.load_day(day)?;
        Ok(rank(board.entries.into_values().collect(), n))
    }

    fn subscribe(&mut self, day: NaiveDate, n: usize) -> Subscription {
        self.prune();
        let (sub, handle) = Subscriber::pair(day, n);
        match self.top_n(day, n) {
            Ok(entries) => {
                sub.push(entries);
            }
            Err(e) => warn!(%day, error = %e, "initial leaderboard read failed"),
        }
        self.subscribers.push(sub);
        if !self.seen.contains_key(&day) {
            let modified = self.modified(day);
            self.seen.insert(day, modified);
        }
        handle
    }

    fn daily_player_count(&self, day: NaiveDate) -> GameResult<usize> {
        Ok(self.load_day(day)?.entries.len())
    }

    fn poll(&mut self) {
        self.prune();
        let mut days: Vec<NaiveDate> = self.subscribers.iter().map(|s| s.day).collect();
        days.sort_unstable();
        days.dedup();
        for day in days {
            let current = self.modified(day);
            if self.seen.get(&day).copied().flatten() != current {
                self.notify(day);
            }
        }
    }
}

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{info, warn};

use crate::error::GameError;
use crate::store::schema::{LatchData, PlayerData, Preferences, SessionSnapshot, TallyData};

const SESSION_FILE: &str = "session.json";
const PLAYER_FILE: &str = "player.json";
const TALLY_FILE: &str = "tally.json";
const PREFERENCES_FILE: &str = "preferences.json";
const LATCH_FILE: &str = "review_latch.json";

/// One JSON document per record under the user data directory.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("milim");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing or unreadable records fall back to defaults.
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(data) => data,
            Err(reason) => {
                let err = GameError::StorageRead {
                    name: name.to_string(),
                    reason,
                };
                warn!(%err, "using defaults");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        };
        write().map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            GameError::PersistenceWrite {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(())
    }

    /// Today's snapshot for `language`. A snapshot from another day or
    /// another word list is discarded and a fresh one returned.
    pub fn load_session(&self, today: NaiveDate, language: &str) -> SessionSnapshot {
        let snapshot: SessionSnapshot = self.load(SESSION_FILE);
        if snapshot.is_for(today, language) {
            return snapshot;
        }
        match (snapshot.date, snapshot.language.as_deref()) {
            (Some(stale), _) if stale != today => {
                info!(%stale, %today, "day rolled over; starting a fresh session");
            }
            (_, Some(other)) if other != language => {
                info!(from = other, to = language, "language changed; starting a fresh session");
            }
            _ => {}
        }
        SessionSnapshot::fresh(today, language)
    }

    pub fn save_session(&self, snapshot: &SessionSnapshot) -> Result<()> {
        self.save(SESSION_FILE, snapshot)
    }

    pub fn load_player(&self) -> PlayerData {
        self.load(PLAYER_FILE)
    }

    pub fn save_player(&self, data: &PlayerData) -> Result<()> {
        self.save(PLAYER_FILE, data)
    }

    pub fn load_tally(&self) -> TallyData {
        self.load(TALLY_FILE)
    }

    pub fn save_tally(&self, data: &TallyData) -> Result<()> {
        self.save(TALLY_FILE, data)
    }

    pub fn load_preferences(&self) -> Preferences {
        self.load(PREFERENCES_FILE)
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        self.save(PREFERENCES_FILE, prefs)
    }

    /// The latch only carries over within the same day and language.
    pub fn load_latch(&self, today: NaiveDate, language: &str) -> LatchData {
        let data: LatchData = self.load(LATCH_FILE);
        if data.date == Some(today) && data.language.as_deref() == Some(language) {
            data
        } else {
            LatchData::fresh(today, language)
        }
    }

    pub fn save_latch(&self, data: &LatchData) -> Result<()> {
        self.save(LATCH_FILE, data)
    }

    /// Drop today's game and latch; tally and player survive.
    pub fn reset_session(&self, today: NaiveDate, language: &str) -> Result<()> {
        self.save_session(&SessionSnapshot::fresh(today, language))?;
        self.save_latch(&LatchData::fresh(today, language))
    }
}

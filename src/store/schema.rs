use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::review::ReviewLatch;
use crate::engine::tally::TallyStore;
use crate::player::PlayerProfile;
use crate::session::state::SessionState;

pub const SCHEMA_VERSION: u32 = 1;

fn schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_true() -> bool {
    true
}

/// Today's game, stamped with the calendar day and the word list language
/// its indices refer to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default = "schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub state: SessionState,
    /// Score already sent to the leaderboard.
    #[serde(default)]
    pub submitted: bool,
}

impl SessionSnapshot {
    pub fn fresh(date: NaiveDate, language: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            date: Some(date),
            language: Some(language.to_string()),
            state: SessionState::default(),
            submitted: false,
        }
    }

    /// Unstamped snapshots match no language.
    pub fn is_for(&self, date: NaiveDate, language: &str) -> bool {
        self.schema_version == SCHEMA_VERSION
            && self.date == Some(date)
            && self.language.as_deref() == Some(language)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            date: None,
            language: None,
            state: SessionState::default(),
            submitted: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    #[serde(default)]
    pub profile: Option<PlayerProfile>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TallyData {
    #[serde(default = "schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub tally: TallyStore,
}

impl Default for TallyData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            tally: TallyStore::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Last language chosen in the UI; overrides the config default.
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            language: None,
        }
    }
}

/// Review latch for the day's game. Rolls over with the session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatchData {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub latch: ReviewLatch,
}

impl LatchData {
    pub fn fresh(date: NaiveDate, language: &str) -> Self {
        Self {
            date: Some(date),
            language: Some(language.to_string()),
            latch: ReviewLatch::default(),
        }
    }
}

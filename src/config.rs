use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Per-language knobs for the word list and speech.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LanguageConfig {
    pub code: &'static str,
    /// CSV column holding the source-language term.
    pub source_field: &'static str,
    pub tts_locale: &'static str,
    pub label: &'static str,
}

/// Column holding the fixed translation in every bundled list.
pub const TARGET_FIELD: &str = "Hebrew";

pub const LANGUAGES: &[LanguageConfig] = &[
    LanguageConfig {
        code: "en",
        source_field: "English",
        tts_locale: "en-US",
        label: "English → Hebrew",
    },
    LanguageConfig {
        code: "jp",
        source_field: "Japanese",
        tts_locale: "ja-JP",
        label: "日本語 → Hebrew",
    },
    LanguageConfig {
        code: "es",
        source_field: "Spanish",
        tts_locale: "es-ES",
        label: "Español → Hebrew",
    },
];

impl LanguageConfig {
    /// Unknown codes fall back to English.
    pub fn for_code(code: &str) -> &'static LanguageConfig {
        LANGUAGES
            .iter()
            .find(|l| l.code == code)
            .unwrap_or(&LANGUAGES[0])
    }

    pub fn codes() -> Vec<&'static str> {
        LANGUAGES.iter().map(|l| l.code).collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
    #[serde(default = "default_combo_weight")]
    pub combo_weight: f64,
    #[serde(default = "default_review_bonus")]
    pub review_bonus: f64,
    #[serde(default = "default_reveals_per_word")]
    pub reveals_per_word: u8,
    #[serde(default = "default_correct_dwell_ms")]
    pub correct_dwell_ms: u64,
    #[serde(default = "default_wrong_dwell_ms")]
    pub wrong_dwell_ms: u64,
}

fn default_base_rate() -> f64 {
    100.0
}
fn default_combo_weight() -> f64 {
    0.8
}
fn default_review_bonus() -> f64 {
    1000.0
}
fn default_reveals_per_word() -> u8 {
    3
}
fn default_correct_dwell_ms() -> u64 {
    700
}
fn default_wrong_dwell_ms() -> u64 {
    3000
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_rate: default_base_rate(),
            combo_weight: default_combo_weight(),
            review_bonus: default_review_bonus(),
            reveals_per_word: default_reveals_per_word(),
            correct_dwell_ms: default_correct_dwell_ms(),
            wrong_dwell_ms: default_wrong_dwell_ms(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Language of menus and messages (`en` or `he`).
    #[serde(default = "default_ui_locale")]
    pub ui_locale: String,
    #[serde(default = "default_review_threshold")]
    pub review_threshold: u32,
    /// Optional CSV URL overriding the bundled list for the active language.
    #[serde(default)]
    pub word_source_url: Option<String>,
    #[serde(default = "default_tts_rate")]
    pub tts_rate: f32,
    #[serde(default = "default_tts_pitch")]
    pub tts_pitch: f32,
    #[serde(default = "default_tts_volume")]
    pub tts_volume: f32,
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_language() -> String {
    "en".to_string()
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_ui_locale() -> String {
    "en".to_string()
}

pub const UI_LOCALES: &[&str] = &["en", "he"];
fn default_review_threshold() -> u32 {
    10
}
fn default_tts_rate() -> f32 {
    0.9
}
fn default_tts_pitch() -> f32 {
    1.0
}
fn default_tts_volume() -> f32 {
    1.0
}
fn default_leaderboard_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            theme: default_theme(),
            ui_locale: default_ui_locale(),
            review_threshold: default_review_threshold(),
            word_source_url: None,
            tts_rate: default_tts_rate(),
            tts_pitch: default_tts_pitch(),
            tts_volume: default_tts_volume(),
            leaderboard_size: default_leaderboard_size(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("milim")
            .join("config.toml")
    }

    pub fn language_config(&self) -> &'static LanguageConfig {
        LanguageConfig::for_code(&self.language)
    }

    /// Clamp numeric fields into playable ranges and reset unknown language codes.
    pub fn validate(&mut self) {
        if !LanguageConfig::codes().contains(&self.language.as_str()) {
            self.language = default_language();
        }
        if !UI_LOCALES.contains(&self.ui_locale.as_str()) {
            self.ui_locale = default_ui_locale();
        }
        self.review_threshold = self.review_threshold.clamp(1, 1000);
        self.leaderboard_size = self.leaderboard_size.clamp(1, 100);
        self.tts_rate = self.tts_rate.clamp(0.1, 10.0);
        self.tts_pitch = self.tts_pitch.clamp(0.0, 2.0);
        self.tts_volume = self.tts_volume.clamp(0.0, 1.0);

        let s = &mut self.scoring;
        if !(s.base_rate.is_finite() && s.base_rate >= 0.0) {
            s.base_rate = default_base_rate();
        }
        if !(s.combo_weight.is_finite() && s.combo_weight >= 0.0) {
            s.combo_weight = default_combo_weight();
        }
        if !(s.review_bonus.is_finite() && s.review_bonus >= 0.0) {
            s.review_bonus = default_review_bonus();
        }
        s.reveals_per_word = s.reveals_per_word.max(1);
        s.correct_dwell_ms = s.correct_dwell_ms.min(60_000);
        s.wrong_dwell_ms = s.wrong_dwell_ms.min(60_000);
    }
}

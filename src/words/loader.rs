use std::fs;
use std::path::PathBuf;

use icu_normalizer::ComposingNormalizerBorrowed;
use rust_embed::Embed;
use tracing::{debug, info, warn};

use crate::config::{LanguageConfig, TARGET_FIELD};
use crate::error::{GameError, GameResult};
use crate::words::cache::{self, DiskCache};
use crate::words::pool::WordPair;

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordAssets;

/// Anything that can produce the word list for a language.
pub trait WordSource {
    fn load_words(&self, language: &LanguageConfig) -> GameResult<Vec<WordPair>>;
}

/// Parse a headered CSV word list. Rows missing the source column or the
/// target column are dropped; surrounding whitespace is trimmed and text is
/// NFC-normalized so content identity is stable across inputs.
pub fn parse_word_csv(text: &str, language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    let source_col = headers.iter().position(|h| h == language.source_field);
    let target_col = headers.iter().position(|h| h == TARGET_FIELD);
    let (Some(source_col), Some(target_col)) = (source_col, target_col) else {
        return Err(GameError::LoadFailure {
            language: language.code.to_string(),
            reason: format!(
                "missing '{}' or '{}' column",
                language.source_field, TARGET_FIELD
            ),
        });
    };

    let nfc = ComposingNormalizerBorrowed::new_nfc();
    let mut words = Vec::new();
    let mut skipped = 0usize;
    for (row_idx, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(rec) => rec,
            Err(e) => {
                debug!(row = row_idx + 1, error = %e, "skipping unreadable word row");
                skipped += 1;
                continue;
            }
        };
        let source = record.get(source_col).unwrap_or("");
        let target = record.get(target_col).unwrap_or("");
        if source.is_empty() || target.is_empty() {
            skipped += 1;
            continue;
        }
        words.push(WordPair::new(nfc.normalize(source), nfc.normalize(target)));
    }

    if skipped > 0 {
        debug!(skipped, language = language.code, "dropped incomplete word rows");
    }
    Ok(words)
}

fn non_empty(words: Vec<WordPair>, language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
    if words.is_empty() {
        Err(GameError::EmptyWordList {
            language: language.code.to_string(),
        })
    } else {
        Ok(words)
    }
}

/// Word lists compiled into the binary, one `words.<code>.csv` per language.
pub struct BundledWords;

impl BundledWords {
    fn asset_name(code: &str) -> String {
        format!("words.{code}.csv")
    }

    pub fn available() -> Vec<String> {
        WordAssets::iter()
            .filter_map(|f| {
                f.strip_prefix("words.")
                    .and_then(|rest| rest.strip_suffix(".csv"))
                    .map(|code| code.to_string())
            })
            .collect()
    }
}

impl WordSource for BundledWords {
    fn load_words(&self, language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
        let file = WordAssets::get(&Self::asset_name(language.code))
            .or_else(|| WordAssets::get(&Self::asset_name("en")))
            .ok_or_else(|| GameError::LoadFailure {
                language: language.code.to_string(),
                reason: "no bundled word list".to_string(),
            })?;
        let text = std::str::from_utf8(file.data.as_ref()).map_err(|e| GameError::LoadFailure {
            language: language.code.to_string(),
            reason: e.to_string(),
        })?;
        non_empty(parse_word_csv(text, language)?, language)
    }
}

/// A CSV file supplied on the command line.
pub struct CsvFileSource {
    pub path: PathBuf,
}

impl WordSource for CsvFileSource {
    fn load_words(&self, language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
        let text = fs::read_to_string(&self.path).map_err(|e| GameError::LoadFailure {
            language: language.code.to_string(),
            reason: format!("{}: {e}", self.path.display()),
        })?;
        non_empty(parse_word_csv(&text, language)?, language)
    }
}

/// A CSV served over HTTP. Successful downloads are cached and the cache is
/// used when the network is unavailable.
pub struct RemoteWordSource {
    pub url: String,
    cache: Option<DiskCache>,
}

impl RemoteWordSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cache: DiskCache::new("words"),
        }
    }

    pub fn with_cache(url: impl Into<String>, cache: Option<DiskCache>) -> Self {
        Self {
            url: url.into(),
            cache,
        }
    }
}

impl WordSource for RemoteWordSource {
    fn load_words(&self, language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
        let text = match cache::fetch_url(&self.url) {
            Ok(body) => {
                if let Some(cache) = &self.cache
                    && !cache.put(&self.url, &body)
                {
                    warn!(url = %self.url, "could not cache downloaded word list");
                }
                body
            }
            Err(reason) => {
                warn!(url = %self.url, %reason, "word list download failed");
                self.cache
                    .as_ref()
                    .and_then(|c| c.get(&self.url))
                    .ok_or_else(|| GameError::LoadFailure {
                        language: language.code.to_string(),
                        reason,
                    })?
            }
        };
        non_empty(parse_word_csv(&text, language)?, language)
    }
}

/// Load through `source`, logging the outcome. Callers treat an error as
/// "no questions available".
pub fn load_with(source: &dyn WordSource, language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
    match source.load_words(language) {
        Ok(words) => {
            info!(language = language.code, count = words.len(), "word list loaded");
            Ok(words)
        }
        Err(e) => {
            warn!(language = language.code, error = %e, "word list unavailable");
            Err(e)
        }
    }
}

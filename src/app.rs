use std::path::PathBuf;
use std::time::Instant;

use chrono::{Local, NaiveDate, Utc};
use crossterm::event::KeyEvent;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rust_i18n::t;
use tracing::{info, warn};

use crate::config::{Config, LanguageConfig};
use crate::leaderboard::{FileLeaderboard, LeaderboardBackend, LeaderboardEntry, Subscription};
use crate::player::{Gender, MAX_NAME_CHARS, PlayerProfile};
use crate::session::machine::{
    Dispatch, FeedbackKind, GameSession, Phase, SessionEffect, SessionEvent, SessionSeed,
    SessionSettings,
};
use crate::session::round::Direction;
use crate::session::state::SessionState;
use crate::speech::{CommandSpeaker, Speaker, Voice};
use crate::store::json_store::JsonStore;
use crate::store::schema::{LatchData, PlayerData, Preferences, SessionSnapshot, TallyData};
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;
use crate::words::loader::{self, BundledWords, CsvFileSource, RemoteWordSource, WordSource};
use crate::words::pool::WordPool;

const PRAISE_VARIANTS: usize = 5;
const TRY_AGAIN_VARIANTS: usize = 4;
const TARGET_TTS_LOCALE: &str = "he-IL";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    PlayerSetup,
    Game,
    Summary,
    Leaderboard,
}

/// Command-line overrides applied on top of the config file.
#[derive(Clone, Debug, Default)]
pub struct AppOptions {
    pub language: Option<String>,
    pub words_path: Option<PathBuf>,
    pub review_threshold: Option<u32>,
    pub theme: Option<String>,
    pub reset: bool,
}

pub struct SetupForm {
    pub name: LineInput,
    pub gender: Option<Gender>,
    pub error: Option<String>,
}

impl SetupForm {
    fn for_player(player: Option<&PlayerProfile>) -> Self {
        Self {
            name: LineInput::new(player.map_or("", |p| p.name.as_str()), MAX_NAME_CHARS),
            gender: player.map(|p| p.gender),
            error: None,
        }
    }
}

/// Everything the app needs, injectable for tests.
pub struct AppParts {
    pub config: Config,
    pub store: Option<JsonStore>,
    pub leaderboard: Option<Box<dyn LeaderboardBackend>>,
    pub speaker: Box<dyn Speaker>,
    pub source: Box<dyn WordSource>,
    pub clock: fn() -> NaiveDate,
    pub rng: SmallRng,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub language: &'static LanguageConfig,
    pub session: GameSession,
    pub player: Option<PlayerProfile>,
    pub prefs: Preferences,
    pub today: NaiveDate,
    /// Encouragement or try-again text for the current dwell.
    pub message: Option<String>,
    pub load_error: Option<String>,
    pub setup: SetupForm,
    pub board_rows: Vec<LeaderboardEntry>,
    pub players_today: Option<usize>,
    pub should_quit: bool,
    pub bell_pending: bool,
    store: Option<JsonStore>,
    leaderboard: Option<Box<dyn LeaderboardBackend>>,
    board_sub: Option<Subscription>,
    speaker: Box<dyn Speaker>,
    source: Box<dyn WordSource>,
    clock: fn() -> NaiveDate,
    rng: SmallRng,
    return_screen: AppScreen,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let mut config = Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "config unreadable; using defaults");
            Config::default()
        });
        if let Some(theme) = &options.theme {
            config.theme = theme.clone();
        }
        if let Some(threshold) = options.review_threshold {
            config.review_threshold = threshold;
        }
        if let Some(language) = &options.language {
            config.language = language.clone();
        }
        config.validate();

        let store = JsonStore::new()
            .map_err(|e| warn!(error = %e, "data directory unavailable; progress will not be saved"))
            .ok();
        if let Some(store) = &store {
            // A language given on the command line replaces the remembered one.
            let mut prefs = store.load_preferences();
            if options.language.is_some() {
                prefs.language = Some(config.language.clone());
                if let Err(e) = store.save_preferences(&prefs) {
                    warn!(error = %e, "preferences not saved");
                }
            }
            let language =
                LanguageConfig::for_code(prefs.language.as_deref().unwrap_or(&config.language));
            if options.reset
                && let Err(e) = store.reset_session(local_today(), language.code)
            {
                warn!(error = %e, "could not reset today's session");
            }
        }

        let leaderboard = store.as_ref().and_then(|s| {
            FileLeaderboard::new(s.base_dir().join("leaderboard"))
                .map_err(|e| warn!(error = %e, "leaderboard unavailable"))
                .ok()
                .map(|lb| Box::new(lb) as Box<dyn LeaderboardBackend>)
        });

        let source: Box<dyn WordSource> = if let Some(path) = options.words_path.clone() {
            Box::new(CsvFileSource { path })
        } else if let Some(url) = config.word_source_url.clone() {
            Box::new(RemoteWordSource::new(url))
        } else {
            Box::new(BundledWords)
        };

        Self::with_parts(AppParts {
            config,
            store,
            leaderboard,
            speaker: Box::new(CommandSpeaker::default()),
            source,
            clock: local_today,
            rng: SmallRng::from_entropy(),
        })
    }

    pub fn with_parts(parts: AppParts) -> Self {
        let AppParts {
            config,
            store,
            leaderboard,
            speaker,
            source,
            clock,
            rng,
        } = parts;

        rust_i18n::set_locale(&config.ui_locale);
        let theme: &'static Theme =
            Box::leak(Box::new(Theme::load(&config.theme).unwrap_or_default()));
        let today = clock();

        let prefs = store
            .as_ref()
            .map(JsonStore::load_preferences)
            .unwrap_or_default();
        let language =
            LanguageConfig::for_code(prefs.language.as_deref().unwrap_or(&config.language));

        let (snapshot, tally, latch, player) = match &store {
            Some(s) => (
                s.load_session(today, language.code),
                s.load_tally(),
                s.load_latch(today, language.code),
                s.load_player(),
            ),
            None => (
                SessionSnapshot::fresh(today, language.code),
                TallyData::default(),
                LatchData::fresh(today, language.code),
                PlayerData::default(),
            ),
        };

        let session = GameSession::with_rng(
            SessionSettings::from_config(&config),
            SessionSeed {
                state: snapshot.state,
                tally: tally.tally,
                latch: latch.latch,
                submitted: snapshot.submitted,
            },
            SmallRng::from_entropy(),
        );

        let screen = if player.profile.is_some() {
            AppScreen::Game
        } else {
            AppScreen::PlayerSetup
        };

        let mut app = Self {
            screen,
            setup: SetupForm::for_player(player.profile.as_ref()),
            config,
            theme,
            language,
            session,
            player: player.profile,
            prefs,
            today,
            message: None,
            load_error: None,
            board_rows: Vec::new(),
            players_today: None,
            should_quit: false,
            bell_pending: false,
            store,
            leaderboard,
            board_sub: None,
            speaker,
            source,
            clock,
            rng,
            return_screen: AppScreen::Game,
        };
        app.subscribe_board();
        app.load_words();
        app
    }

    pub fn load_words(&mut self) {
        let loaded = loader::load_with(self.source.as_ref(), self.language).and_then(WordPool::new);
        match loaded {
            Ok(pool) => {
                self.load_error = None;
                self.dispatch(SessionEvent::WordsLoaded(pool));
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
                self.dispatch(SessionEvent::LoadFailed);
            }
        }
    }

    fn dispatch(&mut self, event: SessionEvent) -> Dispatch {
        let outcome = self.session.dispatch(event);
        self.apply_effects();
        outcome
    }

    fn apply_effects(&mut self) {
        for effect in self.session.drain_effects() {
            match effect {
                SessionEffect::PersistSession => self.save_session(),
                SessionEffect::PersistTally => self.save_tally(),
                SessionEffect::PersistLatch => self.save_latch(),
                SessionEffect::SubmitScore(state) => self.submit_score(&state),
                SessionEffect::Chime { .. } => {
                    if self.prefs.sound_enabled {
                        self.bell_pending = true;
                    }
                }
            }
        }
        if self.session.phase() == Phase::Finished && self.screen == AppScreen::Game {
            self.screen = AppScreen::Summary;
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.session.state().clone(),
            submitted: self.session.submitted(),
            ..SessionSnapshot::fresh(self.today, self.language.code)
        }
    }

    // Persistence failures are logged and otherwise ignored.
    fn save_session(&self) {
        if let Some(store) = &self.store
            && let Err(e) = store.save_session(&self.snapshot())
        {
            warn!(error = %e, "session not saved");
        }
    }

    fn save_tally(&self) {
        if let Some(store) = &self.store
            && let Err(e) = store.save_tally(&TallyData {
                tally: self.session.tally().clone(),
                ..Default::default()
            })
        {
            warn!(error = %e, "tally not saved");
        }
    }

    fn save_latch(&self) {
        if let Some(store) = &self.store
            && let Err(e) = store.save_latch(&LatchData {
                latch: self.session.latch(),
                ..LatchData::fresh(self.today, self.language.code)
            })
        {
            warn!(error = %e, "review latch not saved");
        }
    }

    fn save_preferences(&self) {
        if let Some(store) = &self.store
            && let Err(e) = store.save_preferences(&self.prefs)
        {
            warn!(error = %e, "preferences not saved");
        }
    }

    fn submit_score(&mut self, state: &SessionState) {
        let Some(player) = &self.player else {
            warn!("game finished without a player profile; score not submitted");
            return;
        };
        let entry = LeaderboardEntry::from_session(player, state, Utc::now());
        match self.leaderboard.as_mut() {
            Some(board) => match board.submit(self.today, entry) {
                Ok(()) => info!(score = state.score, "score submitted"),
                Err(e) => warn!(error = %e, "score not submitted"),
            },
            None => warn!("no leaderboard backend; score not submitted"),
        }
        self.refresh_player_count();
    }

    fn subscribe_board(&mut self) {
        let size = self.config.leaderboard_size;
        self.board_sub = self
            .leaderboard
            .as_mut()
            .map(|board| board.subscribe(self.today, size));
        self.board_rows.clear();
        self.pull_board();
        self.refresh_player_count();
    }

    fn pull_board(&mut self) {
        if let Some(rows) = self.board_sub.as_ref().and_then(Subscription::latest) {
            self.board_rows = rows;
        }
    }

    fn refresh_player_count(&mut self) {
        self.players_today = self
            .leaderboard
            .as_ref()
            .and_then(|board| board.daily_player_count(self.today).ok());
    }

    /// Fire due transitions, follow the calendar and refresh the board.
    pub fn tick(&mut self, now: Instant) {
        let today = (self.clock)();
        if today != self.today {
            info!(from = %self.today, to = %today, "new day; resetting session");
            self.today = today;
            self.message = None;
            self.dispatch(SessionEvent::RestartRequested);
            if self.screen == AppScreen::Summary {
                self.screen = AppScreen::Game;
            }
            self.subscribe_board();
        }

        if self.session.tick(now) == Dispatch::Applied {
            self.message = None;
            self.apply_effects();
        }

        if let Some(board) = self.leaderboard.as_mut() {
            board.poll();
        }
        let before = self.board_rows.len();
        self.pull_board();
        if self.board_rows.len() != before {
            self.refresh_player_count();
        }
    }

    pub fn answer(&mut self, position: usize) {
        let Some(text) = self
            .session
            .round()
            .and_then(|r| r.option_text(position))
            .map(str::to_string)
        else {
            return;
        };
        if self.dispatch(SessionEvent::AnswerSubmitted(text)) == Dispatch::Applied {
            self.message = self.feedback_message();
        }
    }

    fn feedback_message(&mut self) -> Option<String> {
        let gender = self.player.as_ref().map_or(Gender::Boy, |p| p.gender);
        let kind = self.session.feedback().map(|f| f.kind.clone())?;
        let key = match kind {
            FeedbackKind::Correct { .. } => format!(
                "praise.{}.m{}",
                gender.key(),
                self.rng.gen_range(0..PRAISE_VARIANTS)
            ),
            FeedbackKind::Wrong => format!(
                "try_again.{}.m{}",
                gender.key(),
                self.rng.gen_range(0..TRY_AGAIN_VARIANTS)
            ),
            FeedbackKind::DontKnow => return None,
        };
        Some(t!(key.as_str()).to_string())
    }

    pub fn dont_know(&mut self) {
        if self.dispatch(SessionEvent::DontKnow) == Dispatch::Applied {
            self.message = None;
        }
    }

    pub fn continue_dwell(&mut self) {
        if self.dispatch(SessionEvent::Continue) == Dispatch::Applied {
            self.message = None;
        }
    }

    pub fn reveal(&mut self) {
        self.dispatch(SessionEvent::ReviewReveal);
    }

    pub fn skip_review_word(&mut self) {
        self.dispatch(SessionEvent::ReviewSkipWord);
    }

    pub fn skip_review(&mut self) {
        self.dispatch(SessionEvent::ReviewSkipAll);
    }

    pub fn pause(&mut self) {
        self.message = None;
        if self.dispatch(SessionEvent::FinishRequested) == Dispatch::Applied {
            self.screen = AppScreen::Summary;
        }
    }

    pub fn resume(&mut self) {
        if self.session.phase() == Phase::Finished {
            return;
        }
        self.dispatch(SessionEvent::Resume);
        self.screen = AppScreen::Game;
    }

    pub fn restart(&mut self) {
        self.message = None;
        self.dispatch(SessionEvent::RestartRequested);
        self.screen = AppScreen::Game;
        if self.session.phase() == Phase::Loading {
            self.load_words();
        }
    }

    pub fn toggle_sound(&mut self) {
        self.prefs.sound_enabled = !self.prefs.sound_enabled;
        self.save_preferences();
    }

    /// Start today's game over on another word list. The tally is kept;
    /// review only draws words from the active list.
    pub fn switch_language(&mut self, code: &str) {
        let language = LanguageConfig::for_code(code);
        if language == self.language {
            if self.load_error.is_some() {
                self.load_words();
            }
            return;
        }
        info!(from = self.language.code, to = language.code, "switching language");
        self.language = language;
        self.prefs.language = Some(language.code.to_string());
        self.save_preferences();

        let seed = SessionSeed {
            tally: self.session.tally().clone(),
            ..Default::default()
        };
        self.session = GameSession::with_rng(
            SessionSettings::from_config(&self.config),
            seed,
            SmallRng::from_entropy(),
        );
        self.message = None;
        self.save_session();
        self.save_latch();
        if self.screen == AppScreen::Summary {
            self.screen = AppScreen::Game;
        }
        self.load_words();
    }

    /// Step to the next language in the built-in list.
    pub fn cycle_language(&mut self) {
        let codes = LanguageConfig::codes();
        let current = codes
            .iter()
            .position(|c| *c == self.language.code)
            .unwrap_or(0);
        let next = codes[(current + 1) % codes.len()];
        self.switch_language(next);
    }

    /// Read the current prompt (or review word) aloud in its own language.
    pub fn speak_prompt(&mut self) {
        if !self.prefs.sound_enabled {
            return;
        }
        let (text, locale) = match self.session.phase() {
            Phase::AdaptiveReview => match self.session.review().and_then(|r| r.current()) {
                Some(word) => (word.source.clone(), self.language.tts_locale),
                None => return,
            },
            _ => match self.session.round() {
                Some(round) => {
                    let locale = match round.direction {
                        Direction::Forward => self.language.tts_locale,
                        Direction::Reverse => TARGET_TTS_LOCALE,
                    };
                    (round.prompt.clone(), locale)
                }
                None => return,
            },
        };
        self.speaker.speak(
            &text,
            Voice {
                locale,
                rate: self.config.tts_rate,
                pitch: self.config.tts_pitch,
                volume: self.config.tts_volume,
            },
        );
    }

    pub fn open_leaderboard(&mut self) {
        if self.screen != AppScreen::Leaderboard {
            self.return_screen = self.screen;
            self.screen = AppScreen::Leaderboard;
            self.refresh_player_count();
        }
    }

    pub fn close_leaderboard(&mut self) {
        self.screen = self.return_screen;
    }

    pub fn setup_key(&mut self, key: KeyEvent) {
        match self.setup.name.handle(key) {
            InputResult::Submit => self.submit_setup(),
            InputResult::SwitchField => {
                self.setup.gender = Some(self.setup.gender.map_or(Gender::Boy, Gender::toggle));
            }
            InputResult::Cancel => {
                if self.player.is_some() {
                    self.screen = self.home_screen();
                } else {
                    self.should_quit = true;
                }
            }
            InputResult::Continue => {}
        }
    }

    pub fn submit_setup(&mut self) {
        let name = self.setup.name.value();
        let profile = self.setup.gender.and_then(|gender| match &self.player {
            Some(existing) => PlayerProfile::with_id(existing.id, &name, gender),
            None => PlayerProfile::new(&name, gender),
        });
        let Some(profile) = profile else {
            self.setup.error = Some(t!("setup.missing").to_string());
            return;
        };
        info!(player = %profile.id, "player profile saved");
        if let Some(store) = &self.store
            && let Err(e) = store.save_player(&PlayerData {
                profile: Some(profile.clone()),
            })
        {
            warn!(error = %e, "player profile not saved");
        }
        self.player = Some(profile);
        self.setup.error = None;
        self.screen = self.home_screen();
    }

    /// Where setup returns to: the summary once today's game is over.
    fn home_screen(&self) -> AppScreen {
        if self.session.phase() == Phase::Finished || self.session.is_paused() {
            AppScreen::Summary
        } else {
            AppScreen::Game
        }
    }

    pub fn edit_player(&mut self) {
        self.setup = SetupForm::for_player(self.player.as_ref());
        self.screen = AppScreen::PlayerSetup;
    }

    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }
}

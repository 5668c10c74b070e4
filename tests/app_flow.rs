use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use milim::app::{App, AppParts, AppScreen};
use milim::config::{Config, LanguageConfig};
use milim::error::{GameError, GameResult};
use milim::leaderboard::{FileLeaderboard, LeaderboardBackend};
use milim::player::Gender;
use milim::session::Phase;
use milim::speech::NullSpeaker;
use milim::store::JsonStore;
use milim::words::{WordPair, WordSource};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

struct FixedWords(usize);

impl WordSource for FixedWords {
    fn load_words(&self, _language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
        Ok((0..self.0)
            .map(|i| WordPair::new(format!("word{i}"), format!("מילה{i}")))
            .collect())
    }
}

struct BrokenSource;

impl WordSource for BrokenSource {
    fn load_words(&self, language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
        Err(GameError::LoadFailure {
            language: language.code.to_string(),
            reason: "offline".to_string(),
        })
    }
}

/// A different list per language: four English words, eight for any other.
struct ListPerLanguage;

impl WordSource for ListPerLanguage {
    fn load_words(&self, language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
        let count = if language.code == "en" { 4 } else { 8 };
        Ok((0..count)
            .map(|i| WordPair::new(format!("{}{i}", language.code), format!("מילה{i}")))
            .collect())
    }
}

/// Only the English list is unreachable.
struct EnglishOffline;

impl WordSource for EnglishOffline {
    fn load_words(&self, language: &LanguageConfig) -> GameResult<Vec<WordPair>> {
        if language.code == "en" {
            return BrokenSource.load_words(language);
        }
        FixedWords(5).load_words(language)
    }
}

fn fixed_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 10).unwrap()
}

static ROLLING_DAY: AtomicU32 = AtomicU32::new(1);

fn rolling_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, ROLLING_DAY.load(Ordering::SeqCst)).unwrap()
}

fn build(dir: &Path, clock: fn() -> NaiveDate, source: Box<dyn WordSource>) -> App {
    build_with(dir, Config::default(), clock, source)
}

fn build_with(
    dir: &Path,
    config: Config,
    clock: fn() -> NaiveDate,
    source: Box<dyn WordSource>,
) -> App {
    App::with_parts(AppParts {
        config,
        store: Some(JsonStore::with_base_dir(dir.join("data")).unwrap()),
        leaderboard: Some(Box::new(FileLeaderboard::new(dir.join("board")).unwrap())),
        speaker: Box::new(NullSpeaker),
        source,
        clock,
        rng: SmallRng::seed_from_u64(5),
    })
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn register(app: &mut App, name: &str, gender: Gender) {
    for ch in name.chars() {
        app.setup_key(key(KeyCode::Char(ch)));
    }
    app.setup_key(key(KeyCode::Tab));
    if gender == Gender::Girl {
        app.setup_key(key(KeyCode::Tab));
    }
    app.setup_key(key(KeyCode::Enter));
}

fn correct_position(app: &App) -> usize {
    app.session
        .round()
        .unwrap()
        .options
        .iter()
        .position(|o| o.is_correct)
        .unwrap()
}

fn wrong_position(app: &App) -> usize {
    app.session
        .round()
        .unwrap()
        .options
        .iter()
        .position(|o| !o.is_correct)
        .unwrap()
}

#[test]
fn first_run_asks_for_a_player() {
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), fixed_day, Box::new(FixedWords(5)));
    assert_eq!(app.screen, AppScreen::PlayerSetup);

    app.setup_key(key(KeyCode::Enter));
    assert!(app.setup.error.is_some());
    assert_eq!(app.screen, AppScreen::PlayerSetup);

    register(&mut app, "Noa", Gender::Girl);
    assert_eq!(app.screen, AppScreen::Game);
    let player = app.player.clone().unwrap();
    assert_eq!(player.name, "Noa");
    assert_eq!(player.gender, Gender::Girl);

    let again = build(dir.path(), fixed_day, Box::new(FixedWords(5)));
    assert_eq!(again.screen, AppScreen::Game);
    assert_eq!(again.player.as_ref().map(|p| p.id), Some(player.id));
}

#[test]
fn escape_on_first_setup_quits() {
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), fixed_day, Box::new(FixedWords(5)));
    app.setup_key(key(KeyCode::Esc));
    assert!(app.should_quit);
}

#[test]
fn answers_show_gendered_feedback_and_ring() {
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), fixed_day, Box::new(FixedWords(6)));
    register(&mut app, "Avi", Gender::Boy);

    app.answer(correct_position(&app));
    assert!(app.message.is_some());
    assert!(app.take_bell());
    assert!(!app.take_bell());
    app.continue_dwell();
    assert!(app.message.is_none());

    app.toggle_sound();
    app.answer(wrong_position(&app));
    assert!(app.message.is_some());
    assert!(!app.take_bell());
}

#[test]
fn progress_survives_a_restart_of_the_program() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = build(dir.path(), fixed_day, Box::new(FixedWords(8)));
        register(&mut app, "Dana", Gender::Girl);
        app.answer(correct_position(&app));
        app.continue_dwell();
        app.answer(correct_position(&app));
        app.toggle_sound();
    }
    let app = build(dir.path(), fixed_day, Box::new(FixedWords(8)));
    let state = app.session.state();
    assert_eq!(state.answered, 2);
    assert_eq!(state.score, 243.0);
    assert_eq!(state.used_indices.len(), 2);
    assert!(!app.prefs.sound_enabled);
    assert_eq!(app.session.phase(), Phase::Playing);
}

#[test]
fn finished_game_lands_on_the_leaderboard() {
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), fixed_day, Box::new(FixedWords(3)));
    register(&mut app, "Maya", Gender::Girl);

    while app.session.phase() == Phase::Playing {
        app.answer(correct_position(&app));
        app.continue_dwell();
    }
    assert_eq!(app.session.phase(), Phase::Finished);
    assert_eq!(app.screen, AppScreen::Summary);

    app.tick(Instant::now());
    assert_eq!(app.board_rows.len(), 1);
    assert_eq!(app.board_rows[0].name, "Maya");
    assert_eq!(app.board_rows[0].score, 486.0);
    assert_eq!(app.players_today, Some(1));

    let board = FileLeaderboard::new(dir.path().join("board")).unwrap();
    assert_eq!(board.top_n(fixed_day(), 10).unwrap().len(), 1);

    // Leaving and coming back does not submit a second time.
    app.resume();
    assert_eq!(app.screen, AppScreen::Summary);
    app.open_leaderboard();
    assert_eq!(app.screen, AppScreen::Leaderboard);
    app.close_leaderboard();
    assert_eq!(app.screen, AppScreen::Summary);

    app.restart();
    assert_eq!(app.screen, AppScreen::Game);
    assert_eq!(app.session.state().answered, 0);
}

#[test]
fn pause_and_resume() {
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), fixed_day, Box::new(FixedWords(6)));
    register(&mut app, "Tal", Gender::Boy);

    app.answer(wrong_position(&app));
    app.pause();
    assert_eq!(app.screen, AppScreen::Summary);
    assert!(app.session.is_paused());
    assert!(app.message.is_none());

    app.resume();
    assert_eq!(app.screen, AppScreen::Game);
    assert!(app.session.accepts_answers());
    assert_eq!(app.session.state().answered, 1);
}

#[test]
fn load_failure_keeps_the_game_waiting() {
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), fixed_day, Box::new(BrokenSource));
    register(&mut app, "Omer", Gender::Boy);

    assert_eq!(app.session.phase(), Phase::Loading);
    assert!(app.load_error.as_deref().unwrap().contains("offline"));
    app.answer(0);
    app.restart();
    assert_eq!(app.session.phase(), Phase::Loading);
    assert_eq!(app.session.state().answered, 0);
}

#[test]
fn a_new_day_starts_a_new_game() {
    ROLLING_DAY.store(1, Ordering::SeqCst);
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), rolling_day, Box::new(FixedWords(6)));
    register(&mut app, "Lior", Gender::Boy);
    app.answer(correct_position(&app));
    app.continue_dwell();
    assert_eq!(app.session.state().answered, 1);

    ROLLING_DAY.store(2, Ordering::SeqCst);
    app.tick(Instant::now());
    assert_eq!(app.today, rolling_day());
    assert_eq!(app.session.state().answered, 0);
    assert_eq!(app.session.phase(), Phase::Playing);

    let store = JsonStore::with_base_dir(dir.path().join("data")).unwrap();
    let snapshot = store.load_session(rolling_day(), "en");
    assert_eq!(snapshot.date, Some(rolling_day()));
    assert_eq!(snapshot.state.answered, 0);
}

#[test]
fn finished_game_in_one_language_does_not_block_another() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = build(dir.path(), fixed_day, Box::new(ListPerLanguage));
        register(&mut app, "Shira", Gender::Girl);
        while app.session.phase() == Phase::Playing {
            app.answer(correct_position(&app));
            app.continue_dwell();
        }
        assert_eq!(app.session.phase(), Phase::Finished);
    }

    let config = Config {
        language: "jp".to_string(),
        ..Config::default()
    };
    let app = build_with(dir.path(), config, fixed_day, Box::new(ListPerLanguage));
    assert_eq!(app.language.code, "jp");
    assert_eq!(app.session.phase(), Phase::Playing);
    assert_eq!(app.session.state().answered, 0);
    assert!(app.session.state().used_indices.is_empty());
    assert!(!app.session.submitted());
    assert_eq!(app.screen, AppScreen::Game);
}

#[test]
fn switching_language_starts_a_new_game_and_is_remembered() {
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), fixed_day, Box::new(ListPerLanguage));
    register(&mut app, "Yoav", Gender::Boy);
    app.answer(wrong_position(&app));
    app.continue_dwell();
    while app.session.phase() == Phase::Playing {
        app.answer(correct_position(&app));
        app.continue_dwell();
    }
    assert_eq!(app.screen, AppScreen::Summary);
    let tally_before = app.session.tally().clone();

    app.switch_language("es");
    assert_eq!(app.language.code, "es");
    assert_eq!(app.prefs.language.as_deref(), Some("es"));
    assert_eq!(app.screen, AppScreen::Game);
    assert_eq!(app.session.phase(), Phase::Playing);
    assert_eq!(app.session.state().answered, 0);
    assert_eq!(app.session.tally(), &tally_before);

    app.answer(correct_position(&app));
    app.continue_dwell();
    drop(app);

    let again = build(dir.path(), fixed_day, Box::new(ListPerLanguage));
    assert_eq!(again.language.code, "es");
    assert_eq!(again.session.state().answered, 1);
    assert_eq!(again.session.phase(), Phase::Playing);
}

#[test]
fn cycling_language_walks_the_built_in_list() {
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), fixed_day, Box::new(FixedWords(5)));
    register(&mut app, "Gal", Gender::Girl);
    let codes = LanguageConfig::codes();
    for expected in codes.iter().skip(1).chain(codes.first()) {
        app.cycle_language();
        assert_eq!(app.language.code, *expected);
        assert_eq!(app.session.phase(), Phase::Playing);
    }
}

#[test]
fn switching_language_recovers_from_a_failed_list() {
    let dir = TempDir::new().unwrap();
    let mut app = build(dir.path(), fixed_day, Box::new(EnglishOffline));
    register(&mut app, "Ori", Gender::Boy);
    assert_eq!(app.session.phase(), Phase::Loading);
    assert!(app.load_error.is_some());

    app.switch_language("en");
    assert_eq!(app.session.phase(), Phase::Loading);
    assert!(app.load_error.is_some());

    app.switch_language("jp");
    assert_eq!(app.session.phase(), Phase::Playing);
    assert!(app.load_error.is_none());
    assert!(app.session.round().is_some());
}

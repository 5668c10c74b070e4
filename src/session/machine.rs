use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::config::{Config, ScoringConfig};
use crate::engine::review::{ReviewLatch, ReviewMode, RevealStep};
use crate::engine::scoring::{self, AnswerOutcome};
use crate::engine::selector::{self, Selection};
use crate::engine::tally::TallyStore;
use crate::session::round::RoundQuestion;
use crate::session::state::SessionState;
use crate::session::timer::{DwellTimer, TransitionTicket};
use crate::words::pool::{WordPair, WordPool};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No word pool yet.
    Loading,
    Playing,
    /// Answer shown after "don't know"; options are locked.
    DontKnowReveal,
    AdaptiveReview,
    /// Every word used. Only reached from `Playing`.
    Finished,
}

#[derive(Clone, Debug)]
pub enum SessionEvent {
    WordsLoaded(WordPool),
    LoadFailed,
    AnswerSubmitted(String),
    DontKnow,
    DwellElapsed(TransitionTicket),
    /// End the current dwell early.
    Continue,
    ReviewReveal,
    ReviewSkipWord,
    ReviewSkipAll,
    RestartRequested,
    /// Pause for the summary screen. Not a game completion.
    FinishRequested,
    Resume,
}

/// Work the owner must carry out after a dispatch. The session itself
/// never touches storage or the network.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEffect {
    PersistSession,
    PersistTally,
    PersistLatch,
    /// Final state of a completed game, emitted once per game.
    SubmitScore(SessionState),
    Chime { correct: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    Ignored,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FeedbackKind {
    Correct { points: f64 },
    Wrong,
    DontKnow,
}

/// What the player sees while the current round dwells.
#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub selected: Option<String>,
    pub correct_text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSettings {
    pub review_threshold: u32,
    pub scoring: ScoringConfig,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            review_threshold: config.review_threshold,
            scoring: config.scoring.clone(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Persisted pieces a session resumes from.
#[derive(Clone, Debug, Default)]
pub struct SessionSeed {
    pub state: SessionState,
    pub tally: TallyStore,
    pub latch: ReviewLatch,
    /// Score for this state was already sent to the leaderboard.
    pub submitted: bool,
}

pub struct GameSession {
    settings: SessionSettings,
    phase: Phase,
    pool: Option<WordPool>,
    state: SessionState,
    tally: TallyStore,
    latch: ReviewLatch,
    review: Option<ReviewMode>,
    last_review_word: Option<WordPair>,
    round: Option<RoundQuestion>,
    feedback: Option<Feedback>,
    timer: DwellTimer,
    paused: bool,
    submitted: bool,
    rng: SmallRng,
    effects: Vec<SessionEffect>,
}

impl GameSession {
    pub fn new(settings: SessionSettings, seed: SessionSeed) -> Self {
        Self::with_rng(settings, seed, SmallRng::from_entropy())
    }

    pub fn with_rng(settings: SessionSettings, seed: SessionSeed, rng: SmallRng) -> Self {
        Self {
            settings,
            phase: Phase::Loading,
            pool: None,
            state: seed.state,
            tally: seed.tally,
            latch: seed.latch,
            review: None,
            last_review_word: None,
            round: None,
            feedback: None,
            timer: DwellTimer::default(),
            paused: false,
            submitted: seed.submitted,
            rng,
            effects: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tally(&self) -> &TallyStore {
        &self.tally
    }

    pub fn latch(&self) -> ReviewLatch {
        self.latch
    }

    pub fn pool(&self) -> Option<&WordPool> {
        self.pool.as_ref()
    }

    pub fn round(&self) -> Option<&RoundQuestion> {
        self.round.as_ref()
    }

    pub fn current_word(&self) -> Option<&WordPair> {
        let round = self.round.as_ref()?;
        self.pool.as_ref()?.get(round.word_index)
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn review(&self) -> Option<&ReviewMode> {
        self.review.as_ref()
    }

    /// Word whose review just completed, kept for display until the next
    /// review action.
    pub fn last_review_word(&self) -> Option<&WordPair> {
        self.last_review_word.as_ref()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Options accept input only in `Playing` with no transition pending.
    pub fn accepts_answers(&self) -> bool {
        self.phase == Phase::Playing && self.round.is_some() && !self.timer.is_pending()
    }

    pub fn pending_ticket(&self) -> Option<TransitionTicket> {
        self.timer.ticket()
    }

    pub fn dwell_remaining(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    pub fn drain_effects(&mut self) -> Vec<SessionEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Dispatch {
        self.dispatch_at(event, Instant::now())
    }

    /// Fire the pending transition if its dwell has elapsed.
    pub fn tick(&mut self, now: Instant) -> Dispatch {
        match self.timer.due(now) {
            Some(ticket) => self.dispatch_at(SessionEvent::DwellElapsed(ticket), now),
            None => Dispatch::Ignored,
        }
    }

    pub fn dispatch_at(&mut self, event: SessionEvent, now: Instant) -> Dispatch {
        match event {
            SessionEvent::WordsLoaded(pool) => self.on_words_loaded(pool),
            SessionEvent::LoadFailed => {
                debug!(phase = ?self.phase, "word load failed; staying put");
                Dispatch::Ignored
            }
            SessionEvent::AnswerSubmitted(text) => self.on_answer(&text, now),
            SessionEvent::DontKnow => self.on_dont_know(now),
            SessionEvent::DwellElapsed(ticket) => {
                if self.timer.take(ticket) {
                    self.on_dwell_elapsed();
                    Dispatch::Applied
                } else {
                    debug!(?ticket, "ignoring stale transition");
                    Dispatch::Ignored
                }
            }
            SessionEvent::Continue => match self.timer.ticket() {
                Some(ticket) => self.dispatch_at(SessionEvent::DwellElapsed(ticket), now),
                None => Dispatch::Ignored,
            },
            SessionEvent::ReviewReveal => self.on_review_reveal(),
            SessionEvent::ReviewSkipWord => self.on_review_skip_word(),
            SessionEvent::ReviewSkipAll => self.on_review_skip_all(),
            SessionEvent::RestartRequested => self.on_restart(),
            SessionEvent::FinishRequested => self.on_pause(),
            SessionEvent::Resume => self.on_resume(),
        }
    }

    fn on_words_loaded(&mut self, pool: WordPool) -> Dispatch {
        if self.phase != Phase::Loading {
            return Dispatch::Ignored;
        }
        self.state.clamp_to_pool(pool.len());
        info!(words = pool.len(), answered = self.state.answered, "session ready");
        self.pool = Some(pool);
        self.phase = Phase::Playing;
        self.next_step();
        Dispatch::Applied
    }

    fn on_answer(&mut self, selected: &str, now: Instant) -> Dispatch {
        if !self.accepts_answers() || self.paused {
            return Dispatch::Ignored;
        }
        let Some(round) = self.round.as_ref() else {
            return Dispatch::Ignored;
        };

        let (next, outcome) =
            scoring::apply_answer(&self.state, round, selected, &self.settings.scoring);
        let correct_text = round
            .correct_option()
            .map(|o| o.text.clone())
            .unwrap_or_default();
        let word = self
            .pool
            .as_ref()
            .and_then(|p| p.get(round.word_index))
            .cloned();

        self.state = next;
        if let Some(word) = word {
            self.tally.record(&word, outcome.is_correct());
            self.effects.push(SessionEffect::PersistTally);
        }

        let (kind, dwell_ms) = match outcome {
            AnswerOutcome::Correct { points } => (
                FeedbackKind::Correct { points },
                self.settings.scoring.correct_dwell_ms,
            ),
            AnswerOutcome::Wrong => (FeedbackKind::Wrong, self.settings.scoring.wrong_dwell_ms),
        };
        debug!(
            answered = self.state.answered,
            score = self.state.score,
            combo = self.state.combo,
            correct = outcome.is_correct(),
            "answer recorded"
        );
        self.feedback = Some(Feedback {
            kind,
            selected: Some(selected.to_string()),
            correct_text,
        });
        self.effects.push(SessionEffect::PersistSession);
        self.effects.push(SessionEffect::Chime {
            correct: outcome.is_correct(),
        });
        self.timer.schedule(now, Duration::from_millis(dwell_ms));
        Dispatch::Applied
    }

    fn on_dont_know(&mut self, now: Instant) -> Dispatch {
        if !self.accepts_answers() || self.paused {
            return Dispatch::Ignored;
        }
        let Some(round) = self.round.as_ref() else {
            return Dispatch::Ignored;
        };
        self.state = scoring::apply_dont_know(&self.state, round);
        self.feedback = Some(Feedback {
            kind: FeedbackKind::DontKnow,
            selected: None,
            correct_text: round
                .correct_option()
                .map(|o| o.text.clone())
                .unwrap_or_default(),
        });
        self.phase = Phase::DontKnowReveal;
        self.effects.push(SessionEffect::PersistSession);
        self.timer.schedule(
            now,
            Duration::from_millis(self.settings.scoring.wrong_dwell_ms),
        );
        Dispatch::Applied
    }

    fn on_dwell_elapsed(&mut self) {
        self.feedback = None;
        self.round = None;
        if self.phase == Phase::DontKnowReveal {
            self.phase = Phase::Playing;
        }
        if self.phase == Phase::Playing {
            self.next_step();
        }
    }

    /// From `Playing` with no round on screen: enter review if the threshold
    /// window calls for it, otherwise draw the next round.
    fn next_step(&mut self) {
        let threshold = self.settings.review_threshold;
        if self.latch.should_fire(self.state.answered, threshold) {
            self.latch.fire(self.state.answered, threshold);
            self.effects.push(SessionEffect::PersistLatch);
            let hard = self
                .pool
                .as_ref()
                .map(|pool| self.tally.difficult_words_in(pool))
                .unwrap_or_default();
            if let Some(mode) = ReviewMode::start(hard) {
                info!(
                    answered = self.state.answered,
                    words = mode.remaining(),
                    "entering adaptive review"
                );
                self.review = Some(mode);
                self.last_review_word = None;
                self.phase = Phase::AdaptiveReview;
                return;
            }
            debug!(answered = self.state.answered, "no difficult words to review");
        }
        self.advance();
    }

    fn advance(&mut self) {
        let Some(pool) = self.pool.as_ref() else {
            return;
        };
        match selector::select_next(pool, &self.state.used_indices, &mut self.rng) {
            Selection::Round(round) => {
                self.round = Some(round);
            }
            Selection::GameComplete => {
                self.round = None;
                self.phase = Phase::Finished;
                info!(
                    score = self.state.score,
                    answered = self.state.answered,
                    correct = self.state.correct,
                    "game complete"
                );
                if !self.submitted {
                    self.submitted = true;
                    self.effects
                        .push(SessionEffect::SubmitScore(self.state.clone()));
                    self.effects.push(SessionEffect::PersistSession);
                }
            }
        }
    }

    fn on_review_reveal(&mut self) -> Dispatch {
        if self.phase != Phase::AdaptiveReview || self.paused {
            return Dispatch::Ignored;
        }
        let reveals_per_word = self.settings.scoring.reveals_per_word;
        let Some(step) = self.review.as_mut().and_then(|m| m.reveal(reveals_per_word)) else {
            return Dispatch::Ignored;
        };

        self.state = scoring::apply_review_bonus(&self.state, &self.settings.scoring);
        self.effects.push(SessionEffect::PersistSession);
        match step {
            RevealStep::Revealed { .. } => {
                self.last_review_word = None;
            }
            RevealStep::Completed { word } => {
                self.retire_review_word(word);
            }
        }
        Dispatch::Applied
    }

    fn on_review_skip_word(&mut self) -> Dispatch {
        if self.phase != Phase::AdaptiveReview || self.paused {
            return Dispatch::Ignored;
        }
        match self.review.as_mut().and_then(ReviewMode::skip_word) {
            Some(word) => {
                self.retire_review_word(word);
                Dispatch::Applied
            }
            None => Dispatch::Ignored,
        }
    }

    fn retire_review_word(&mut self, word: WordPair) {
        self.tally.remove(&word);
        self.effects.push(SessionEffect::PersistTally);
        self.last_review_word = Some(word);
        if self.review.as_ref().is_none_or(ReviewMode::is_finished) {
            self.end_review();
        }
    }

    fn on_review_skip_all(&mut self) -> Dispatch {
        if self.phase != Phase::AdaptiveReview || self.paused {
            return Dispatch::Ignored;
        }
        info!(
            skipped = self.review.as_ref().map_or(0, ReviewMode::remaining),
            "adaptive review abandoned"
        );
        self.end_review();
        Dispatch::Applied
    }

    fn end_review(&mut self) {
        self.review = None;
        self.phase = Phase::Playing;
        self.advance();
    }

    fn on_restart(&mut self) -> Dispatch {
        self.timer.cancel();
        self.state = SessionState::default();
        self.latch.reset();
        self.review = None;
        self.last_review_word = None;
        self.round = None;
        self.feedback = None;
        self.paused = false;
        self.submitted = false;
        self.effects.push(SessionEffect::PersistSession);
        self.effects.push(SessionEffect::PersistLatch);
        info!("session restarted");
        if self.pool.is_some() {
            self.phase = Phase::Playing;
            self.advance();
        } else {
            self.phase = Phase::Loading;
        }
        Dispatch::Applied
    }

    fn on_pause(&mut self) -> Dispatch {
        if matches!(self.phase, Phase::Loading | Phase::Finished) || self.paused {
            return Dispatch::Ignored;
        }
        self.paused = true;
        if self.timer.cancel() || self.phase != Phase::AdaptiveReview {
            self.feedback = None;
            self.round = None;
        }
        if self.phase == Phase::DontKnowReveal {
            self.phase = Phase::Playing;
        }
        Dispatch::Applied
    }

    fn on_resume(&mut self) -> Dispatch {
        if !self.paused {
            return Dispatch::Ignored;
        }
        self.paused = false;
        if self.phase == Phase::Playing && self.round.is_none() {
            self.next_step();
        }
        Dispatch::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> WordPool {
        WordPool::new(
            (0..n)
                .map(|i| WordPair::new(format!("src{i}"), format!("tgt{i}")))
                .collect(),
        )
        .unwrap()
    }

    fn session(n: usize) -> GameSession {
        let mut s = GameSession::with_rng(
            SessionSettings::default(),
            SessionSeed::default(),
            SmallRng::seed_from_u64(11),
        );
        s.dispatch(SessionEvent::WordsLoaded(pool(n)));
        s
    }

    fn correct_text(s: &GameSession) -> String {
        s.round().unwrap().correct_option().unwrap().text.clone()
    }

    fn wrong_text(s: &GameSession) -> String {
        s.round()
            .unwrap()
            .options
            .iter()
            .find(|o| !o.is_correct)
            .unwrap()
            .text
            .clone()
    }

    fn finish_dwell(s: &mut GameSession) {
        let ticket = s.pending_ticket().unwrap();
        assert_eq!(s.dispatch(SessionEvent::DwellElapsed(ticket)), Dispatch::Applied);
    }

    #[test]
    fn test_starts_loading_until_words_arrive() {
        let mut s = GameSession::with_rng(
            SessionSettings::default(),
            SessionSeed::default(),
            SmallRng::seed_from_u64(1),
        );
        assert_eq!(s.phase(), Phase::Loading);
        assert_eq!(s.dispatch(SessionEvent::LoadFailed), Dispatch::Ignored);
        assert_eq!(s.phase(), Phase::Loading);
        s.dispatch(SessionEvent::WordsLoaded(pool(4)));
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.round().is_some());
    }

    #[test]
    fn test_second_answer_during_dwell_is_ignored() {
        let mut s = session(5);
        let text = correct_text(&s);
        assert_eq!(s.dispatch(SessionEvent::AnswerSubmitted(text.clone())), Dispatch::Applied);
        assert_eq!(s.dispatch(SessionEvent::AnswerSubmitted(text)), Dispatch::Ignored);
        assert_eq!(s.state().answered, 1);
        assert!(!s.accepts_answers());
    }

    #[test]
    fn test_dwell_lengths_depend_on_outcome() {
        let mut s = session(5);
        let t0 = Instant::now();
        s.dispatch_at(SessionEvent::AnswerSubmitted(correct_text(&s)), t0);
        assert_eq!(s.dwell_remaining(t0), Some(Duration::from_millis(700)));
        assert_eq!(s.tick(t0 + Duration::from_millis(699)), Dispatch::Ignored);
        assert_eq!(s.tick(t0 + Duration::from_millis(700)), Dispatch::Applied);

        let t1 = t0 + Duration::from_secs(1);
        s.dispatch_at(SessionEvent::AnswerSubmitted(wrong_text(&s)), t1);
        assert_eq!(s.dwell_remaining(t1), Some(Duration::from_millis(3000)));
    }

    #[test]
    fn test_wrong_answer_keeps_word_eligible() {
        let mut s = session(4);
        let idx = s.round().unwrap().word_index;
        s.dispatch(SessionEvent::AnswerSubmitted(wrong_text(&s)));
        assert_eq!(s.state().combo, 0);
        assert_eq!(s.state().answered, 1);
        assert_eq!(s.state().score, 0.0);
        assert!(!s.state().used_indices.contains(&idx));
        assert_eq!(s.feedback().unwrap().kind, FeedbackKind::Wrong);
        let word = s.current_word().unwrap().clone();
        assert_eq!(s.tally().get(&word).unwrap().wrong, 1);
        let effects = s.drain_effects();
        assert!(effects.contains(&SessionEffect::Chime { correct: false }));
        assert!(effects.contains(&SessionEffect::PersistSession));
    }

    #[test]
    fn test_dont_know_reveals_then_returns_to_playing() {
        let mut s = session(4);
        let idx = s.round().unwrap().word_index;
        let word = s.current_word().unwrap().clone();
        assert_eq!(s.dispatch(SessionEvent::DontKnow), Dispatch::Applied);
        assert_eq!(s.phase(), Phase::DontKnowReveal);
        assert!(!s.accepts_answers());
        assert_eq!(s.state().answered, 1);
        assert!(s.state().used_indices.contains(&idx));
        assert!(s.tally().get(&word).is_none());
        finish_dwell(&mut s);
        assert_eq!(s.phase(), Phase::Playing);
        assert_ne!(s.round().unwrap().word_index, idx);
    }

    #[test]
    fn test_restart_invalidates_pending_transition() {
        let mut s = session(5);
        s.dispatch(SessionEvent::AnswerSubmitted(correct_text(&s)));
        let stale = s.pending_ticket().unwrap();
        s.dispatch(SessionEvent::RestartRequested);
        assert_eq!(s.state(), &SessionState::default());
        assert_eq!(s.dispatch(SessionEvent::DwellElapsed(stale)), Dispatch::Ignored);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.accepts_answers());
    }

    #[test]
    fn test_pause_cancels_dwell_and_resume_draws_round() {
        let mut s = session(5);
        s.dispatch(SessionEvent::AnswerSubmitted(wrong_text(&s)));
        let stale = s.pending_ticket().unwrap();
        assert_eq!(s.dispatch(SessionEvent::FinishRequested), Dispatch::Applied);
        assert!(s.is_paused());
        assert!(s.round().is_none());
        assert_eq!(s.dispatch(SessionEvent::DwellElapsed(stale)), Dispatch::Ignored);
        assert_eq!(s.dispatch(SessionEvent::Resume), Dispatch::Applied);
        assert!(s.accepts_answers());
        assert!(!s.drain_effects().iter().any(|e| matches!(e, SessionEffect::SubmitScore(_))));
    }

    #[test]
    fn test_continue_skips_the_wait() {
        let mut s = session(5);
        s.dispatch(SessionEvent::AnswerSubmitted(wrong_text(&s)));
        assert_eq!(s.dispatch(SessionEvent::Continue), Dispatch::Applied);
        assert!(s.accepts_answers());
        assert_eq!(s.dispatch(SessionEvent::Continue), Dispatch::Ignored);
    }

    #[test]
    fn test_completion_submits_exactly_once() {
        let mut s = session(3);
        let mut submissions = 0;
        while s.phase() != Phase::Finished {
            s.dispatch(SessionEvent::AnswerSubmitted(correct_text(&s)));
            finish_dwell(&mut s);
            submissions += s
                .drain_effects()
                .iter()
                .filter(|e| matches!(e, SessionEffect::SubmitScore(_)))
                .count();
        }
        assert_eq!(submissions, 1);
        assert!(s.submitted());
        assert_eq!(s.dispatch(SessionEvent::Resume), Dispatch::Ignored);
        assert_eq!(s.dispatch(SessionEvent::FinishRequested), Dispatch::Ignored);
    }

    #[test]
    fn test_restored_finished_game_does_not_resubmit() {
        let seed = SessionSeed {
            state: SessionState {
                answered: 3,
                correct: 3,
                combo: 3,
                max_combo: 3,
                score: 486.0,
                used_indices: (0..3).collect(),
            },
            submitted: true,
            ..Default::default()
        };
        let mut s =
            GameSession::with_rng(SessionSettings::default(), seed, SmallRng::seed_from_u64(2));
        s.dispatch(SessionEvent::WordsLoaded(pool(3)));
        assert_eq!(s.phase(), Phase::Finished);
        assert!(s.drain_effects().iter().all(|e| !matches!(e, SessionEffect::SubmitScore(_))));
    }

    #[test]
    fn test_review_reveal_awards_flat_bonus() {
        let mut tally = TallyStore::default();
        let hard = WordPair::new("src0", "tgt0");
        tally.record(&hard, false);
        let seed = SessionSeed {
            tally,
            ..Default::default()
        };
        let settings = SessionSettings {
            review_threshold: 1,
            ..Default::default()
        };
        let mut s = GameSession::with_rng(settings, seed, SmallRng::seed_from_u64(3));
        s.dispatch(SessionEvent::WordsLoaded(pool(6)));
        s.dispatch(SessionEvent::DontKnow);
        finish_dwell(&mut s);
        assert_eq!(s.phase(), Phase::AdaptiveReview);
        assert_eq!(s.review().unwrap().current(), Some(&hard));
        assert_eq!(s.dispatch(SessionEvent::AnswerSubmitted("x".into())), Dispatch::Ignored);

        for _ in 0..3 {
            assert_eq!(s.dispatch(SessionEvent::ReviewReveal), Dispatch::Applied);
        }
        assert_eq!(s.state().score, 3000.0);
        assert_eq!(s.state().answered, 1);
        assert_eq!(s.state().correct, 0);
        assert!(s.tally().get(&hard).is_none());
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.last_review_word(), Some(&hard));
    }

    #[test]
    fn test_review_ignores_words_from_another_list() {
        let mut tally = TallyStore::default();
        for _ in 0..3 {
            tally.record(&WordPair::new("perro", "כלב"), false);
        }
        let seed = SessionSeed {
            tally,
            ..Default::default()
        };
        let settings = SessionSettings {
            review_threshold: 1,
            ..Default::default()
        };
        let mut s = GameSession::with_rng(settings, seed, SmallRng::seed_from_u64(5));
        s.dispatch(SessionEvent::WordsLoaded(pool(6)));
        s.dispatch(SessionEvent::DontKnow);
        finish_dwell(&mut s);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.review().is_none());
        assert!(s.round().is_some());
        assert_eq!(s.tally().len(), 1);
    }
}

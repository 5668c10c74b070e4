use crate::config::ScoringConfig;
use crate::session::round::RoundQuestion;
use crate::session::state::SessionState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnswerOutcome {
    Correct { points: f64 },
    Wrong,
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }
}

/// Points for a correct answer at the given (already incremented) combo:
/// a product term plus a linear combo term.
pub fn points_for_combo(combo: u32, scoring: &ScoringConfig) -> f64 {
    let combo = combo as f64;
    scoring.base_rate * combo * scoring.combo_weight + combo
}

pub fn apply_answer(
    state: &SessionState,
    round: &RoundQuestion,
    selected: &str,
    scoring: &ScoringConfig,
) -> (SessionState, AnswerOutcome) {
    let mut next = state.clone();
    next.answered += 1;

    if round.is_correct_text(selected) {
        next.combo += 1;
        let points = points_for_combo(next.combo, scoring);
        next.score += points;
        next.correct += 1;
        next.max_combo = next.max_combo.max(next.combo);
        next.used_indices.insert(round.word_index);
        (next, AnswerOutcome::Correct { points })
    } else {
        next.combo = 0;
        (next, AnswerOutcome::Wrong)
    }
}

/// "Don't know": counts as answered, breaks the combo and retires the word
/// without scoring it.
pub fn apply_dont_know(state: &SessionState, round: &RoundQuestion) -> SessionState {
    let mut next = state.clone();
    next.answered += 1;
    next.combo = 0;
    next.used_indices.insert(round.word_index);
    next
}

/// Flat review bonus, bypassing the combo formula.
pub fn apply_review_bonus(state: &SessionState, scoring: &ScoringConfig) -> SessionState {
    let mut next = state.clone();
    next.score += scoring.review_bonus;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::round::{AnswerOption, Direction};

    fn round(word_index: usize) -> RoundQuestion {
        RoundQuestion {
            word_index,
            prompt: "dog".to_string(),
            direction: Direction::Forward,
            options: vec![
                AnswerOption { text: "כלב".into(), is_correct: true },
                AnswerOption { text: "חתול".into(), is_correct: false },
                AnswerOption { text: "בית".into(), is_correct: false },
            ],
        }
    }

    #[test]
    fn test_points_follow_combo_formula() {
        let scoring = ScoringConfig::default();
        assert!((points_for_combo(1, &scoring) - 81.0).abs() < 1e-9);
        assert!((points_for_combo(2, &scoring) - 162.0).abs() < 1e-9);
        assert!((points_for_combo(3, &scoring) - 243.0).abs() < 1e-9);
    }

    #[test]
    fn test_three_correct_in_a_row_scores_486() {
        let scoring = ScoringConfig::default();
        let mut state = SessionState::default();
        for idx in 0..3 {
            let (next, outcome) = apply_answer(&state, &round(idx), "כלב", &scoring);
            assert!(outcome.is_correct());
            state = next;
        }
        assert!((state.score - 486.0).abs() < 1e-9);
        assert_eq!(state.answered, 3);
        assert_eq!(state.correct, 3);
        assert_eq!(state.max_combo, 3);
        assert_eq!(state.used_indices.len(), 3);
    }

    #[test]
    fn test_wrong_answer_resets_combo_only() {
        let scoring = ScoringConfig::default();
        let (state, _) = apply_answer(&SessionState::default(), &round(0), "כלב", &scoring);
        let (after, outcome) = apply_answer(&state, &round(1), "חתול", &scoring);
        assert_eq!(outcome, AnswerOutcome::Wrong);
        assert_eq!(after.combo, 0);
        assert_eq!(after.max_combo, 1);
        assert_eq!(after.score, state.score);
        assert_eq!(after.correct, 1);
        assert_eq!(after.answered, 2);
        assert!(!after.used_indices.contains(&1));
    }

    #[test]
    fn test_dont_know_marks_used_without_score() {
        let scoring = ScoringConfig::default();
        let (state, _) = apply_answer(&SessionState::default(), &round(0), "כלב", &scoring);
        let after = apply_dont_know(&state, &round(4));
        assert_eq!(after.answered, 2);
        assert_eq!(after.correct, 1);
        assert_eq!(after.combo, 0);
        assert_eq!(after.score, state.score);
        assert!(after.used_indices.contains(&4));
    }

    #[test]
    fn test_review_bonus_is_flat() {
        let scoring = ScoringConfig::default();
        let state = SessionState {
            combo: 5,
            max_combo: 5,
            ..Default::default()
        };
        let after = apply_review_bonus(&state, &scoring);
        assert_eq!(after.score, 1000.0);
        assert_eq!(after.combo, 5);
        assert_eq!(after.answered, 0);
    }
}

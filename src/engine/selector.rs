use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::session::round::{AnswerOption, Direction, RoundQuestion};
use crate::words::pool::WordPool;

pub const OPTION_COUNT: usize = 3;
const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Draws spent looking for distractors whose text differs from the answer
/// before accepting any distinct word.
const DISTINCT_TEXT_ATTEMPTS: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Round(RoundQuestion),
    GameComplete,
}

pub fn remaining_indices(pool_len: usize, used: &BTreeSet<usize>) -> Vec<usize> {
    (0..pool_len).filter(|i| !used.contains(i)).collect()
}

/// Pick the next question: a uniformly random unused word, a random
/// direction and two distractors, shuffled.
pub fn select_next<R: Rng>(
    pool: &WordPool,
    used: &BTreeSet<usize>,
    rng: &mut R,
) -> Selection {
    let remaining = remaining_indices(pool.len(), used);
    let Some(&word_index) = remaining.choose(rng) else {
        return Selection::GameComplete;
    };

    let direction = if rng.gen_bool(0.5) {
        Direction::Forward
    } else {
        Direction::Reverse
    };

    let words = pool.words();
    let word = &words[word_index];
    let answer = direction.answer_of(word);

    let distractors = pick_distractors(pool, word_index, direction, rng);

    let mut options: Vec<AnswerOption> = Vec::with_capacity(OPTION_COUNT);
    options.push(AnswerOption {
        text: answer.to_string(),
        is_correct: true,
    });
    for idx in distractors {
        options.push(AnswerOption {
            text: direction.answer_of(&words[idx]).to_string(),
            is_correct: false,
        });
    }
    options.shuffle(rng);

    Selection::Round(RoundQuestion {
        word_index,
        prompt: direction.prompt_of(word).to_string(),
        direction,
        options,
    })
}

/// Rejection-sample distinct indices other than `target`. Prefers words whose
/// displayed text differs from the answer and from each other; after
/// `DISTINCT_TEXT_ATTEMPTS` draws any distinct index is accepted. Relies on
/// the pool holding at least three words.
fn pick_distractors<R: Rng>(
    pool: &WordPool,
    target: usize,
    direction: Direction,
    rng: &mut R,
) -> Vec<usize> {
    let words = pool.words();
    let answer = direction.answer_of(&words[target]);
    let mut chosen: Vec<usize> = Vec::with_capacity(DISTRACTOR_COUNT);
    let mut attempts = 0usize;

    while chosen.len() < DISTRACTOR_COUNT {
        let idx = rng.gen_range(0..words.len());
        attempts += 1;
        if idx == target || chosen.contains(&idx) {
            continue;
        }
        if attempts <= DISTINCT_TEXT_ATTEMPTS {
            let text = direction.answer_of(&words[idx]);
            let clashes = text == answer
                || chosen
                    .iter()
                    .any(|&c| direction.answer_of(&words[c]) == text);
            if clashes {
                continue;
            }
        }
        chosen.push(idx);
    }
    chosen
}

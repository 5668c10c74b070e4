use crate::words::pool::WordPair;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Source-language prompt, target-language options.
    Forward,
    /// Target-language prompt, source-language options.
    Reverse,
}

impl Direction {
    pub fn prompt_of(self, word: &WordPair) -> &str {
        match self {
            Direction::Forward => &word.source,
            Direction::Reverse => &word.target,
        }
    }

    pub fn answer_of(self, word: &WordPair) -> &str {
        match self {
            Direction::Forward => &word.target,
            Direction::Reverse => &word.source,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// One multiple-choice question. Discarded once the answer is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundQuestion {
    pub word_index: usize,
    pub prompt: String,
    pub direction: Direction,
    pub options: Vec<AnswerOption>,
}

impl RoundQuestion {
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.is_correct)
    }

    pub fn is_correct_text(&self, text: &str) -> bool {
        self.correct_option().is_some_and(|o| o.text == text)
    }

    /// Option text by 0-based position, for numbered key input.
    pub fn option_text(&self, position: usize) -> Option<&str> {
        self.options.get(position).map(|o| o.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_picks_prompt_and_answer_sides() {
        let word = WordPair::new("sun", "שמש");
        assert_eq!(Direction::Forward.prompt_of(&word), "sun");
        assert_eq!(Direction::Forward.answer_of(&word), "שמש");
        assert_eq!(Direction::Reverse.prompt_of(&word), "שמש");
        assert_eq!(Direction::Reverse.answer_of(&word), "sun");
    }

    #[test]
    fn correct_text_matches_flagged_option_only() {
        let round = RoundQuestion {
            word_index: 0,
            prompt: "sun".to_string(),
            direction: Direction::Forward,
            options: vec![
                AnswerOption { text: "ירח".into(), is_correct: false },
                AnswerOption { text: "שמש".into(), is_correct: true },
                AnswerOption { text: "כוכב".into(), is_correct: false },
            ],
        };
        assert!(round.is_correct_text("שמש"));
        assert!(!round.is_correct_text("ירח"));
        assert_eq!(round.option_text(2), Some("כוכב"));
        assert_eq!(round.option_text(3), None);
    }
}

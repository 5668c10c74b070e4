pub mod machine;
pub mod round;
pub mod state;
pub mod timer;

pub use machine::{
    Dispatch, Feedback, FeedbackKind, GameSession, Phase, SessionEffect, SessionEvent, SessionSeed,
    SessionSettings,
};
pub use round::{AnswerOption, Direction, RoundQuestion};
pub use state::SessionState;
pub use timer::{DwellTimer, TransitionTicket};

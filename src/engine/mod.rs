pub mod review;
pub mod scoring;
pub mod selector;
pub mod tally;

pub use review::{ReviewLatch, ReviewMode, RevealStep};
pub use scoring::AnswerOutcome;
pub use selector::Selection;
pub use tally::TallyStore;

pub mod leaderboard_table;
pub mod player_setup;
pub mod progress_bar;
pub mod question_card;
pub mod review_card;
pub mod scoreboard;
pub mod summary;

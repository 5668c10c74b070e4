rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod leaderboard;
pub mod logging;
pub mod player;
pub mod session;
pub mod speech;
pub mod store;
pub mod ui;
pub mod words;

//! Dojo - A terminal quiz runner for certification practice
//!
//! Dojo loads authored question sets, normalizes them into a strict question
//! model, and runs timed or untimed attempts with scoring, per-category
//! results and a full answer review.

pub mod app;
pub mod config;
pub mod quiz;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use quiz::{QuizRun, QuizSettings};
pub use theme::Theme;

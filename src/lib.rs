//! Resume builder backend: ATS compatibility scoring, text enhancement,
//! plain-text preview and per-user resume storage behind a JSON API.

pub mod ats;
pub mod auth;
pub mod cli;
pub mod config;
pub mod enhance;
pub mod preview;
pub mod store;
pub mod types;
pub mod utils;
pub mod web;

pub use ats::{calculate_score, ScoreBand};
pub use config::ConfigManager;
pub use types::{ResumeData, ScoreReport};
pub use web::start_web_server;

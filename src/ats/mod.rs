// src/ats/mod.rs
//! ATS compatibility scoring.
//!
//! A resume is run through a fixed rubric of five weighted categories
//! (formatting, keywords, structure, content, length). Each category averages
//! its checks, the overall score is the weighted mean of the category
//! averages, and a list of prioritized recommendations is derived from the
//! displayed category scores.
//!
//! Scoring is pure and total: it never fails, performs no I/O and keeps no
//! state between calls, so it is cheap enough to run on every edit.

pub mod aggregate;
pub mod checks;
pub mod recommendations;
pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{ResumeData, ScoreReport};

pub use recommendations::{generate_recommendations, RECOMMENDATION_THRESHOLD};
pub use rules::{CategoryRule, Check, ATS_RULES};

/// Score a resume against the ATS rubric
pub fn calculate_score(data: &ResumeData) -> ScoreReport {
    let categories = aggregate::score_categories(&ATS_RULES, data);
    let overall_score = aggregate::overall_score(&categories);
    let recommendations = generate_recommendations(&categories, data);

    debug!(
        overall_score,
        recommendations = recommendations.len(),
        "Calculated ATS score"
    );

    ScoreReport {
        overall_score,
        categories,
        recommendations,
    }
}

/// Coarse label shown next to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsWork,
}

impl ScoreBand {
    pub const fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::NeedsWork,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::NeedsWork => "NEEDS WORK",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Your resume is very ATS-friendly",
            Self::Good => "Your resume needs some improvements",
            Self::NeedsWork => "Your resume needs significant improvements",
        }
    }
}

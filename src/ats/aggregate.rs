// src/ats/aggregate.rs
//! Category averaging and weighted overall score

use super::rules::CategoryRule;
use crate::types::{CategoryScore, CategoryScores, CheckScore, ResumeData};

/// Round half up for display. Scores are never negative so this matches
/// rounding half towards positive infinity.
pub fn display_round(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Run every check of a category and average them without weighting.
pub fn score_category(rule: &CategoryRule, data: &ResumeData) -> CategoryScore {
    let raw: Vec<f64> = rule.checks.iter().map(|check| (check.score)(data)).collect();
    let average = if raw.is_empty() {
        0.0
    } else {
        raw.iter().sum::<f64>() / raw.len() as f64
    };

    CategoryScore {
        category: rule.category,
        average,
        score: display_round(average),
        weight: rule.weight,
        checks: rule
            .checks
            .iter()
            .zip(&raw)
            .map(|(check, score)| CheckScore {
                name: check.name.to_string(),
                score: display_round(*score),
            })
            .collect(),
    }
}

pub fn score_categories(rules: &[CategoryRule], data: &ResumeData) -> CategoryScores {
    CategoryScores(rules.iter().map(|rule| score_category(rule, data)).collect())
}

/// Weighted mean of the unrounded category averages
pub fn overall_score(categories: &CategoryScores) -> u8 {
    let (weighted, total_weight) = categories
        .iter()
        .fold((0.0_f64, 0_u32), |(weighted, total), category| {
            (
                weighted + category.average * f64::from(category.weight),
                total + category.weight,
            )
        });

    if total_weight == 0 {
        return 0;
    }
    display_round(weighted / f64::from(total_weight))
}

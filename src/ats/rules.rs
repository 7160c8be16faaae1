// src/ats/rules.rs
//! Fixed rubric: ordered categories with their weights and checks

use super::checks;
use crate::types::{Category, ResumeData};

pub type CheckFn = fn(&ResumeData) -> f64;

#[derive(Clone, Copy)]
pub struct Check {
    pub name: &'static str,
    pub score: CheckFn,
}

#[derive(Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub weight: u32,
    pub checks: &'static [Check],
}

/// Categories in evaluation and display order. Weights sum to 100.
pub static ATS_RULES: [CategoryRule; 5] = [
    CategoryRule {
        category: Category::Formatting,
        weight: 15,
        checks: &[
            Check {
                name: "Simple formatting",
                score: checks::simple_formatting,
            },
            Check {
                name: "No graphics or images",
                score: checks::no_graphics,
            },
            Check {
                name: "Standard fonts",
                score: checks::standard_fonts,
            },
        ],
    },
    CategoryRule {
        category: Category::Keywords,
        weight: 25,
        checks: &[
            Check {
                name: "Job keywords present",
                score: checks::keyword_coverage,
            },
            Check {
                name: "Technical skills",
                score: checks::technical_skills,
            },
            Check {
                name: "Action verbs",
                score: checks::action_verbs,
            },
        ],
    },
    CategoryRule {
        category: Category::Structure,
        weight: 20,
        checks: &[
            Check {
                name: "Clear sections",
                score: checks::sections_present,
            },
            Check {
                name: "Contact info",
                score: checks::contact_info,
            },
            Check {
                name: "Proper formatting of entries",
                score: checks::entry_formatting,
            },
        ],
    },
    CategoryRule {
        category: Category::Content,
        weight: 25,
        checks: &[
            Check {
                name: "Bullet points used",
                score: checks::bullet_points,
            },
            Check {
                name: "Quantifiable achievements",
                score: checks::metrics,
            },
            Check {
                name: "Relevant experience",
                score: checks::relevant_experience,
            },
        ],
    },
    CategoryRule {
        category: Category::Length,
        weight: 15,
        checks: &[
            Check {
                name: "Appropriate length",
                score: checks::length_appropriateness,
            },
            Check {
                name: "No missing sections",
                score: checks::completeness,
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_hundred() {
        let total: u32 = ATS_RULES.iter().map(|rule| rule.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_every_category_has_checks() {
        assert!(ATS_RULES.iter().all(|rule| !rule.checks.is_empty()));
        let count: usize = ATS_RULES.iter().map(|rule| rule.checks.len()).sum();
        assert_eq!(count, 14);
    }
}

// src/ats/recommendations.rs
//! Prioritized improvement suggestions derived from category scores

use super::checks::split_len;
use crate::types::{Category, CategoryScores, Priority, Recommendation, ResumeData};

/// Displayed category score below which a category gets advice
pub const RECOMMENDATION_THRESHOLD: u8 = 80;

/// Word target used by the length advice
const TARGET_WORDS: usize = 300;

const FORMATTING_ADVICE: &str =
    "Use simple formatting with standard fonts. Avoid graphics, tables, and complex layouts.";
const KEYWORDS_ADVICE: &str =
    "Include more industry-specific keywords and technical terms relevant to your target job.";
const EMAIL_ADVICE: &str = "Add your email address at the top of your resume.";
const PHONE_ADVICE: &str = "Include your phone number for better ATS compatibility.";
const CONTENT_ADVICE: &str =
    "Use bullet points and include quantifiable achievements with numbers and percentages.";
const LENGTH_ADVICE: &str = "Add more content to your resume. Aim for at least 300 words.";
const SKILLS_ADVICE: &str = "Add relevant technical and soft skills that match job descriptions.";

fn below_threshold(categories: &CategoryScores, category: Category) -> bool {
    categories.score(category) < RECOMMENDATION_THRESHOLD
}

/// Words in the name plus experience descriptions.
///
/// Narrower than the count behind the length check; the two are kept apart.
pub fn narrative_word_count(data: &ResumeData) -> usize {
    split_len(&data.personal.full_name)
        + data
            .experience
            .iter()
            .map(|e| split_len(&e.description))
            .sum::<usize>()
}

pub fn generate_recommendations(
    categories: &CategoryScores,
    data: &ResumeData,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if below_threshold(categories, Category::Formatting) {
        recommendations.push(Recommendation::new(
            "Formatting",
            FORMATTING_ADVICE,
            Priority::High,
        ));
    }

    if below_threshold(categories, Category::Keywords) {
        recommendations.push(Recommendation::new(
            "Keywords",
            KEYWORDS_ADVICE,
            Priority::High,
        ));
    }

    if below_threshold(categories, Category::Structure) {
        if data.personal.email.is_empty() {
            recommendations.push(Recommendation::new(
                "Contact Info",
                EMAIL_ADVICE,
                Priority::Critical,
            ));
        }
        if data.personal.phone.is_empty() {
            recommendations.push(Recommendation::new(
                "Contact Info",
                PHONE_ADVICE,
                Priority::High,
            ));
        }
    }

    if below_threshold(categories, Category::Content) {
        recommendations.push(Recommendation::new(
            "Content",
            CONTENT_ADVICE,
            Priority::High,
        ));
    }

    if below_threshold(categories, Category::Length) && narrative_word_count(data) < TARGET_WORDS {
        recommendations.push(Recommendation::new(
            "Length",
            LENGTH_ADVICE,
            Priority::Medium,
        ));
    }

    if data.skills.is_empty() {
        recommendations.push(Recommendation::new(
            "Skills",
            SKILLS_ADVICE,
            Priority::Critical,
        ));
    }

    recommendations
}

// src/ats/checks.rs
//! Individual ATS checks. Every check is a pure function of the resume
//! returning a sub-score in `[0, 100]`.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::ResumeData;

const COMMON_KEYWORDS: [&str; 5] = ["experience", "skills", "education", "project", "achievement"];

const ACTION_VERBS: [&str; 15] = [
    "led",
    "managed",
    "developed",
    "designed",
    "implemented",
    "created",
    "improved",
    "increased",
    "reduced",
    "achieved",
    "built",
    "deployed",
    "enhanced",
    "optimized",
    "coordinated",
];

const RELEVANT_KEYWORDS: [&str; 7] = [
    "project",
    "led",
    "team",
    "responsibility",
    "achievement",
    "developed",
    "managed",
];

// ASCII-only case folding: the Kelvin sign must not match "kubernetes"
static TECH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)javascript|python|java|react|node|sql|aws|azure|docker|kubernetes|git|html|css")
        .expect("technology pattern is valid")
});

// A line starts after \n, a lone \r, or a Unicode line/paragraph separator
static BULLET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[\r\x{2028}\x{2029}])[-•*]\s").expect("bullet pattern is valid")
});

// ASCII digits only, a unicode \d would also count other scripts' numerals
static METRIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9]+(%|x|times|projects|years?|months?)?").expect("metric pattern is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

// ===== Text Helpers =====

/// All scored text of the resume joined by single spaces.
///
/// Contact details, dates, GPA and project technologies are not part of it.
/// Empty parts still contribute their separator.
pub fn full_text(data: &ResumeData) -> String {
    let experience = data
        .experience
        .iter()
        .map(|e| format!("{} {} {}", e.company, e.position, e.description))
        .collect::<Vec<_>>()
        .join(" ");
    let education = data
        .education
        .iter()
        .map(|e| format!("{} {}", e.institution, e.degree))
        .collect::<Vec<_>>()
        .join(" ");
    let projects = data
        .projects
        .iter()
        .map(|p| format!("{} {}", p.name, p.description))
        .collect::<Vec<_>>()
        .join(" ");

    [
        data.personal.full_name.as_str(),
        data.personal.title.as_str(),
        data.personal.summary.as_str(),
        experience.as_str(),
        education.as_str(),
        data.skills.join(" ").as_str(),
        projects.as_str(),
    ]
    .join(" ")
}

/// Number of pieces produced by splitting on whitespace runs.
///
/// Leading and trailing separators yield empty pieces that are counted, so
/// `""` is 1 and `" a "` is 3.
pub fn split_len(text: &str) -> usize {
    WHITESPACE_RUN.find_iter(text).count() + 1
}

fn experience_descriptions(data: &ResumeData) -> String {
    data.experience
        .iter()
        .map(|e| e.description.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn project_descriptions(data: &ResumeData) -> String {
    data.projects
        .iter()
        .map(|p| p.description.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn descriptions_text(data: &ResumeData) -> String {
    format!(
        "{} {}",
        experience_descriptions(data),
        project_descriptions(data)
    )
}

fn coverage(terms: &[&str], text: &str) -> f64 {
    let found = terms.iter().filter(|term| text.contains(*term)).count();
    (found as f64 / terms.len() as f64) * 100.0
}

fn floored(score: i32) -> f64 {
    f64::from(score.max(0))
}

// ===== Formatting =====

/// Plain text output carries no layout the parser could trip on.
pub fn simple_formatting(_data: &ResumeData) -> f64 {
    100.0
}

pub fn no_graphics(_data: &ResumeData) -> f64 {
    100.0
}

pub fn standard_fonts(_data: &ResumeData) -> f64 {
    100.0
}

// ===== Keywords =====

pub fn keyword_coverage(data: &ResumeData) -> f64 {
    coverage(&COMMON_KEYWORDS, &full_text(data).to_lowercase())
}

/// 100 when a technology name appears in the skills or experience text, 50 otherwise.
///
/// Skills presence does not gate the result: an empty skills list with a
/// technology named in an experience description still scores 100.
pub fn technical_skills(data: &ResumeData) -> f64 {
    let _skills_present = if data.skills.is_empty() { 0.0 } else { 100.0 };
    let text = format!("{} {}", data.skills.join(" "), experience_descriptions(data));

    if TECH_PATTERN.is_match(&text) {
        100.0
    } else {
        50.0
    }
}

/// Share of known action verbs found as substrings of the descriptions.
pub fn action_verbs(data: &ResumeData) -> f64 {
    coverage(&ACTION_VERBS, &descriptions_text(data).to_lowercase()).min(100.0)
}

// ===== Structure =====

pub fn sections_present(data: &ResumeData) -> f64 {
    let mut score = 100;
    if data.personal.full_name.is_empty() {
        score -= 25;
    }
    if data.experience.is_empty() {
        score -= 20;
    }
    if data.education.is_empty() {
        score -= 20;
    }
    if data.skills.is_empty() {
        score -= 20;
    }
    floored(score)
}

pub fn contact_info(data: &ResumeData) -> f64 {
    let personal = &data.personal;
    let missing = [&personal.email, &personal.phone, &personal.full_name]
        .iter()
        .filter(|field| field.is_empty())
        .count() as i32;
    floored(100 - 25 * missing)
}

/// Deducts 5 per experience or education entry with an empty required field.
pub fn entry_formatting(data: &ResumeData) -> f64 {
    let incomplete_experience = data
        .experience
        .iter()
        .filter(|e| e.company.is_empty() || e.position.is_empty() || e.duration.is_empty())
        .count();
    let incomplete_education = data
        .education
        .iter()
        .filter(|e| e.institution.is_empty() || e.degree.is_empty() || e.year.is_empty())
        .count();

    let penalty = (incomplete_experience + incomplete_education).saturating_mul(5);
    floored(100 - i32::try_from(penalty).unwrap_or(i32::MAX))
}

// ===== Content =====

pub fn bullet_points(data: &ResumeData) -> f64 {
    if BULLET_PATTERN.is_match(&descriptions_text(data).to_lowercase()) {
        100.0
    } else {
        70.0
    }
}

pub fn metrics(data: &ResumeData) -> f64 {
    let count = METRIC_PATTERN.find_iter(&descriptions_text(data)).count();
    ((count as f64 / 10.0) * 100.0).min(100.0)
}

pub fn relevant_experience(data: &ResumeData) -> f64 {
    if data.experience.is_empty() {
        return 0.0;
    }

    let text = data
        .experience
        .iter()
        .map(|e| format!("{} {}", e.description, e.position).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    coverage(&RELEVANT_KEYWORDS, &text)
}

// ===== Length =====

/// 300-600 words is ideal.
pub fn length_appropriateness(data: &ResumeData) -> f64 {
    match split_len(&full_text(data)) {
        300..=600 => 100.0,
        200..=800 => 85.0,
        n if n >= 100 => 70.0,
        _ => 50.0,
    }
}

pub fn completeness(data: &ResumeData) -> f64 {
    let mut score = 100;
    if data.personal.full_name.is_empty() {
        score -= 20;
    }
    if data.personal.email.is_empty() {
        score -= 15;
    }
    if data.experience.is_empty() {
        score -= 20;
    }
    if data.education.is_empty() {
        score -= 20;
    }
    if data.skills.is_empty() {
        score -= 20;
    }
    floored(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Education, Experience, Project};

    fn experience(description: &str) -> Experience {
        Experience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            duration: "2020 - 2023".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_split_len_counts_edge_pieces() {
        assert_eq!(split_len(""), 1);
        assert_eq!(split_len("one"), 1);
        assert_eq!(split_len("one two\n\tthree"), 3);
        assert_eq!(split_len(" a "), 3);
    }

    #[test]
    fn test_full_text_of_empty_resume_is_separators_only() {
        let text = full_text(&ResumeData::default());
        assert_eq!(text, "      ");
        assert_eq!(split_len(&text), 2);
    }

    #[test]
    fn test_full_text_excludes_contact_details() {
        let mut data = ResumeData::default();
        data.personal.email = "jane@example.com".to_string();
        data.personal.phone = "555-0100".to_string();
        data.education.push(Education {
            institution: "MIT".to_string(),
            degree: "BSc".to_string(),
            year: "2019".to_string(),
            gpa: "4.0".to_string(),
        });

        let text = full_text(&data);
        assert!(text.contains("MIT BSc"));
        assert!(!text.contains("jane@example.com"));
        assert!(!text.contains("2019"));
    }

    #[test]
    fn test_keyword_coverage() {
        let mut data = ResumeData::default();
        assert_eq!(keyword_coverage(&data), 0.0);

        data.personal.summary = "Broad EXPERIENCE and Skills, plus one project".to_string();
        assert_eq!(keyword_coverage(&data), 60.0);
    }

    #[test]
    fn test_technical_skills_scans_skills_and_experience() {
        let mut data = ResumeData::default();
        assert_eq!(technical_skills(&data), 50.0);

        data.skills = vec!["React".to_string(), "Node.js".to_string()];
        data.experience.push(experience("Sold insurance"));
        assert_eq!(technical_skills(&data), 100.0);

        data.skills = vec!["Negotiation".to_string()];
        assert_eq!(technical_skills(&data), 50.0);
    }

    #[test]
    fn test_technical_skills_ignores_empty_skills_list() {
        let mut data = ResumeData::default();
        data.experience.push(experience("Automated reports in Python"));
        assert_eq!(technical_skills(&data), 100.0);
    }

    #[test]
    fn test_action_verbs_substring_match() {
        let mut data = ResumeData::default();
        data.experience.push(experience("Led the team and BUILT tooling"));
        data.projects.push(Project {
            name: "p".to_string(),
            description: "Deployed it".to_string(),
            technologies: String::new(),
        });

        assert_eq!(action_verbs(&data), (3.0 / 15.0) * 100.0);
    }

    #[test]
    fn test_structure_checks_floor_at_zero() {
        let data = ResumeData::default();
        assert_eq!(sections_present(&data), 15.0);
        assert_eq!(contact_info(&data), 25.0);
        assert_eq!(completeness(&data), 5.0);

        let mut data = ResumeData::default();
        data.experience = vec![Experience::default(); 30];
        assert_eq!(entry_formatting(&data), 0.0);
    }

    #[test]
    fn test_entry_formatting_penalizes_incomplete_entries() {
        let mut data = ResumeData::default();
        data.experience.push(experience("x"));
        data.experience.push(Experience {
            duration: String::new(),
            ..experience("y")
        });
        data.education.push(Education {
            institution: "MIT".to_string(),
            ..Education::default()
        });

        assert_eq!(entry_formatting(&data), 90.0);
    }

    #[test]
    fn test_whitespace_only_name_counts_as_present() {
        let mut data = ResumeData::default();
        data.personal.full_name = " ".to_string();
        assert_eq!(sections_present(&data), 40.0);
    }

    #[test]
    fn test_bullet_points() {
        let mut data = ResumeData::default();
        data.experience.push(experience("Shipped features"));
        assert_eq!(bullet_points(&data), 70.0);

        data.experience[0].description = "Summary line\n• Shipped features".to_string();
        assert_eq!(bullet_points(&data), 100.0);

        data.experience[0].description = "- Shipped features".to_string();
        assert_eq!(bullet_points(&data), 100.0);
    }

    #[test]
    fn test_bullet_after_carriage_return_or_line_separator() {
        let mut data = ResumeData::default();
        data.experience.push(experience("Summary line\r- Shipped features"));
        assert_eq!(bullet_points(&data), 100.0);

        data.experience[0].description = "Summary line\u{2028}* Shipped features".to_string();
        assert_eq!(bullet_points(&data), 100.0);

        data.experience[0].description = "Summary line - Shipped features".to_string();
        assert_eq!(bullet_points(&data), 70.0);
    }

    #[test]
    fn test_technical_pattern_folds_ascii_case_only() {
        let mut data = ResumeData::default();
        data.skills = vec!["KUBERNETES".to_string()];
        assert_eq!(technical_skills(&data), 100.0);

        data.skills = vec!["\u{212A}ubernetes".to_string(), "\u{17F}ql".to_string()];
        assert_eq!(technical_skills(&data), 50.0);
    }

    #[test]
    fn test_bullet_marker_needs_line_start() {
        let mut data = ResumeData::default();
        data.projects.push(Project {
            description: "- only in a project".to_string(),
            ..Project::default()
        });
        // joined text starts with the separator, not the marker
        assert_eq!(bullet_points(&data), 70.0);
    }

    #[test]
    fn test_metrics_counts_number_tokens() {
        let mut data = ResumeData::default();
        data.experience
            .push(experience("Cut latency 40% across 3 services in 2 years, 10x faster"));
        assert_eq!(metrics(&data), 40.0);

        data.experience[0].description = "1 2 3 4 5 6 7 8 9 10 11 12".to_string();
        assert_eq!(metrics(&data), 100.0);
    }

    #[test]
    fn test_relevant_experience() {
        let mut data = ResumeData::default();
        assert_eq!(relevant_experience(&data), 0.0);

        data.experience.push(Experience {
            position: "Team Lead".to_string(),
            description: "Managed the project".to_string(),
            ..Experience::default()
        });
        assert_eq!(relevant_experience(&data), (3.0 / 7.0) * 100.0);
    }

    #[test]
    fn test_length_bands() {
        let mut data = ResumeData::default();
        assert_eq!(length_appropriateness(&data), 50.0);

        data.personal.full_name = "Jane".to_string();
        data.personal.title = "Engineer".to_string();
        data.personal.summary = vec!["word"; 448].join(" ");
        assert_eq!(length_appropriateness(&data), 100.0);

        data.personal.summary = vec!["word"; 700].join(" ");
        assert_eq!(length_appropriateness(&data), 85.0);

        data.personal.summary = vec!["word"; 1000].join(" ");
        assert_eq!(length_appropriateness(&data), 70.0);

        data.personal.summary = vec!["word"; 150].join(" ");
        assert_eq!(length_appropriateness(&data), 70.0);
    }
}

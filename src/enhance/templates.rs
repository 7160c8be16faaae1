// src/enhance/templates.rs
//! Offline enhancement from phrase templates

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use super::{EnhanceKind, TextEnhancer};
use crate::types::ResumeData;

const ACTION_VERBS: [&str; 20] = [
    "Led",
    "Managed",
    "Developed",
    "Designed",
    "Implemented",
    "Created",
    "Improved",
    "Increased",
    "Reduced",
    "Achieved",
    "Built",
    "Deployed",
    "Enhanced",
    "Optimized",
    "Coordinated",
    "Executed",
    "Spearheaded",
    "Pioneered",
    "Transformed",
    "Accelerated",
];

const METRIC_PHRASES: [&str; 9] = [
    "increased efficiency by %",
    "reduced costs by %",
    "improved performance by %",
    "achieved % success rate",
    "delivered % faster",
    "grew team by %",
    "processed % transactions",
    "served % users",
    "% ROI improvement",
];

const EXPERIENCE_FOLLOW_UP: &str = "• Collaborated with stakeholders to identify requirements and deliver solutions\n\
     • Documented processes and trained team members on best practices";

fn pick<'a, R: Rng>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn leading_skills(data: &ResumeData, count: usize, separator: &str) -> Option<String> {
    let joined = data
        .skills
        .iter()
        .take(count)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator);
    (!joined.is_empty()).then_some(joined)
}

/// Fill the template for `kind` with a random action verb and metric phrase
pub fn generate_enhanced_text<R: Rng>(kind: EnhanceKind, data: &ResumeData, rng: &mut R) -> String {
    let verb = pick(rng, &ACTION_VERBS);
    let metric = pick(rng, &METRIC_PHRASES);

    match kind {
        EnhanceKind::Summary => {
            let title = if data.personal.title.is_empty() {
                "professional"
            } else {
                data.personal.title.as_str()
            };
            let skills = leading_skills(data, 3, ", ")
                .unwrap_or_else(|| "technical expertise".to_string());

            format!(
                "{verb} {title} with proven expertise in {skills}. Dedicated to delivering \
                 high-impact solutions and driving organizational success through innovative \
                 problem-solving and strategic execution. Seeking to leverage comprehensive \
                 experience to contribute meaningfully to challenging projects."
            )
        }
        EnhanceKind::Experience => {
            let openers = [
                format!("{verb} cross-functional teams to design and implement solutions that {metric}"),
                format!("{verb} technical initiatives resulting in {metric}"),
                format!("{verb} project delivery ensuring {metric}"),
                format!("{verb} process improvements that delivered {metric}"),
                format!("{verb} development efforts achieving {metric}"),
            ];
            let opener = &openers[rng.gen_range(0..openers.len())];

            format!("• {opener}\n{EXPERIENCE_FOLLOW_UP}")
        }
        EnhanceKind::Project => {
            let skills = leading_skills(data, 2, " and ")
                .unwrap_or_else(|| "cutting-edge technologies".to_string());

            format!(
                "Developed an innovative solution using {skills} that {metric}. Implemented best \
                 practices in code quality and user experience, resulting in a robust and scalable \
                 application. Successfully demonstrated project outcomes and received positive \
                 feedback from stakeholders."
            )
        }
    }
}

/// Template enhancer holding its own random source
pub struct TemplateEnhancer {
    rng: Mutex<SmallRng>,
}

impl TemplateEnhancer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Deterministic picks, for tests and reproducible demos
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    pub fn generate(&self, kind: EnhanceKind, data: &ResumeData) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        generate_enhanced_text(kind, data, &mut *rng)
    }
}

impl Default for TemplateEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

#[rocket::async_trait]
impl TextEnhancer for TemplateEnhancer {
    async fn enhance(
        &self,
        kind: EnhanceKind,
        data: &ResumeData,
        _index: Option<usize>,
    ) -> Result<String> {
        Ok(self.generate(kind, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts_with_known_verb(text: &str) -> bool {
        ACTION_VERBS.iter().any(|verb| text.starts_with(verb))
    }

    #[test]
    fn test_summary_defaults() {
        let text = TemplateEnhancer::with_seed(7).generate(EnhanceKind::Summary, &ResumeData::default());
        assert!(starts_with_known_verb(&text));
        assert!(text.contains(" professional with proven expertise in technical expertise."));
    }

    #[test]
    fn test_summary_uses_title_and_three_skills() {
        let mut data = ResumeData::default();
        data.personal.title = "Data Engineer".to_string();
        data.skills = ["Rust", "SQL", "Kafka", "Spark"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let text = TemplateEnhancer::with_seed(1).generate(EnhanceKind::Summary, &data);
        assert!(text.contains("Data Engineer with proven expertise in Rust, SQL, Kafka."));
        assert!(!text.contains("Spark"));
    }

    #[test]
    fn test_experience_is_three_bullets() {
        let text =
            TemplateEnhancer::with_seed(3).generate(EnhanceKind::Experience, &ResumeData::default());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.starts_with("• ")));
        assert!(starts_with_known_verb(&lines[0][4..]));
        assert!(METRIC_PHRASES.iter().any(|m| lines[0].ends_with(m)));
    }

    #[test]
    fn test_project_joins_two_skills() {
        let mut data = ResumeData::default();
        data.skills = vec!["Rust".to_string(), "WebAssembly".to_string(), "Go".to_string()];

        let text = TemplateEnhancer::with_seed(9).generate(EnhanceKind::Project, &data);
        assert!(text.starts_with("Developed an innovative solution using Rust and WebAssembly that "));

        let text = TemplateEnhancer::with_seed(9).generate(EnhanceKind::Project, &ResumeData::default());
        assert!(text.contains("using cutting-edge technologies that"));
    }

    #[test]
    fn test_same_seed_same_text() {
        let data = ResumeData::default();
        let a = TemplateEnhancer::with_seed(42).generate(EnhanceKind::Experience, &data);
        let b = TemplateEnhancer::with_seed(42).generate(EnhanceKind::Experience, &data);
        assert_eq!(a, b);
    }
}

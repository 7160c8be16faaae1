// src/types/score_report.rs
//! ATS score report returned to the front end

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Formatting,
    Keywords,
    Structure,
    Content,
    Length,
}

impl Category {
    /// Key used in the serialized `categories` map
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Formatting => "formatting",
            Self::Keywords => "keywords",
            Self::Structure => "structure",
            Self::Content => "content",
            Self::Length => "length",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckScore {
    pub name: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    #[serde(skip)]
    pub category: Category,
    /// Unrounded mean of the check scores, used for the overall score
    #[serde(skip)]
    pub average: f64,
    pub score: u8,
    pub weight: u32,
    pub checks: Vec<CheckScore>,
}

/// Category scores in rule declaration order, serialized as a map keyed by category
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryScores(pub Vec<CategoryScore>);

impl CategoryScores {
    pub fn get(&self, category: Category) -> Option<&CategoryScore> {
        self.0.iter().find(|c| c.category == category)
    }

    /// Displayed score of a category, 0 when absent
    pub fn score(&self, category: Category) -> u8 {
        self.get(category).map(|c| c.score).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        self.0.iter()
    }
}

impl Serialize for CategoryScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(category.category.key(), category)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub suggestion: String,
    pub priority: Priority,
}

impl Recommendation {
    pub fn new(category: &str, suggestion: &str, priority: Priority) -> Self {
        Self {
            category: category.to_string(),
            suggestion: suggestion.to_string(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub overall_score: u8,
    pub categories: CategoryScores,
    pub recommendations: Vec<Recommendation>,
}

// src/types/resume_data.rs
//! Resume data model edited by the front end and consumed by the ATS scorer

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::enhance::EnhanceKind;

// ===== Resume Structure =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub personal: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub year: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: String,
}

// ===== Editable Fields =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Title,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceField {
    Company,
    Position,
    Duration,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationField {
    Institution,
    Degree,
    Year,
    Gpa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectField {
    Name,
    Description,
    Technologies,
}

impl PersonalInfo {
    fn field_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Title => &mut self.title,
            PersonalField::Summary => &mut self.summary,
        }
    }
}

impl Experience {
    fn field_mut(&mut self, field: ExperienceField) -> &mut String {
        match field {
            ExperienceField::Company => &mut self.company,
            ExperienceField::Position => &mut self.position,
            ExperienceField::Duration => &mut self.duration,
            ExperienceField::Description => &mut self.description,
        }
    }
}

impl Education {
    fn field_mut(&mut self, field: EducationField) -> &mut String {
        match field {
            EducationField::Institution => &mut self.institution,
            EducationField::Degree => &mut self.degree,
            EducationField::Year => &mut self.year,
            EducationField::Gpa => &mut self.gpa,
        }
    }
}

impl Project {
    fn field_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Name => &mut self.name,
            ProjectField::Description => &mut self.description,
            ProjectField::Technologies => &mut self.technologies,
        }
    }
}

// ===== Editor Operations =====

impl ResumeData {
    pub fn update_personal(&mut self, field: PersonalField, value: impl Into<String>) {
        *self.personal.field_mut(field) = value.into();
    }

    /// Append an empty experience entry and return its index
    pub fn add_experience(&mut self) -> usize {
        self.experience.push(Experience::default());
        self.experience.len() - 1
    }

    /// Append an empty education entry and return its index
    pub fn add_education(&mut self) -> usize {
        self.education.push(Education::default());
        self.education.len() - 1
    }

    /// Append an empty project entry and return its index
    pub fn add_project(&mut self) -> usize {
        self.projects.push(Project::default());
        self.projects.len() - 1
    }

    pub fn update_experience(
        &mut self,
        index: usize,
        field: ExperienceField,
        value: impl Into<String>,
    ) -> Result<()> {
        let entry = self
            .experience
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("Invalid experience index: {}", index))?;
        *entry.field_mut(field) = value.into();
        Ok(())
    }

    pub fn update_education(
        &mut self,
        index: usize,
        field: EducationField,
        value: impl Into<String>,
    ) -> Result<()> {
        let entry = self
            .education
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("Invalid education index: {}", index))?;
        *entry.field_mut(field) = value.into();
        Ok(())
    }

    pub fn update_project(
        &mut self,
        index: usize,
        field: ProjectField,
        value: impl Into<String>,
    ) -> Result<()> {
        let entry = self
            .projects
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("Invalid project index: {}", index))?;
        *entry.field_mut(field) = value.into();
        Ok(())
    }

    /// Replace skills with the comma/newline separated entries of the skills text box
    pub fn update_skills(&mut self, raw: &str) {
        self.skills = parse_skills(raw);
    }

    /// Write enhanced text back into the field it was generated for
    pub fn apply_enhancement(
        &mut self,
        kind: EnhanceKind,
        index: Option<usize>,
        text: impl Into<String>,
    ) -> Result<()> {
        match kind {
            EnhanceKind::Summary => {
                self.update_personal(PersonalField::Summary, text);
                Ok(())
            }
            EnhanceKind::Experience => {
                let index = index.ok_or_else(|| anyhow::anyhow!("Experience index required"))?;
                self.update_experience(index, ExperienceField::Description, text)
            }
            EnhanceKind::Project => {
                let index = index.ok_or_else(|| anyhow::anyhow!("Project index required"))?;
                self.update_project(index, ProjectField::Description, text)
            }
        }
    }
}

/// Split the skills text box on commas or newlines, trimming and dropping empty entries
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

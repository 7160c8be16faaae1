pub mod resume_data;
pub mod response;
pub mod score_report;

pub use resume_data::{
    parse_skills, Education, EducationField, Experience, ExperienceField, PersonalField,
    PersonalInfo, Project, ProjectField, ResumeData,
};
pub use score_report::{
    Category, CategoryScore, CategoryScores, CheckScore, Priority, Recommendation, ScoreReport,
};

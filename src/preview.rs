// src/preview.rs
//! Plain-text resume preview

use crate::types::ResumeData;

const RULE: &str = "----------------------------------------";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn push_section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push(RULE.to_string());
}

/// Join a heading with the right-hand detail shown next to it, when present
fn heading_with(heading: &str, detail: &str) -> String {
    if detail.is_empty() {
        heading.to_string()
    } else {
        format!("{} ({})", heading, detail)
    }
}

pub fn render_text(data: &ResumeData) -> String {
    let personal = &data.personal;
    let mut lines = vec![
        or_placeholder(&personal.full_name, "Your Name").to_string(),
        or_placeholder(&personal.title, "Professional Title").to_string(),
    ];

    let contact: Vec<&str> = [&personal.email, &personal.phone, &personal.location]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    if !contact.is_empty() {
        lines.push(contact.join(" | "));
    }

    if !personal.summary.is_empty() {
        push_section(&mut lines, "PROFESSIONAL SUMMARY");
        lines.push(personal.summary.clone());
    }

    if !data.experience.is_empty() {
        push_section(&mut lines, "WORK EXPERIENCE");
        for (idx, exp) in data.experience.iter().enumerate() {
            if idx > 0 {
                lines.push(String::new());
            }
            lines.push(heading_with(
                or_placeholder(&exp.position, "Position"),
                &exp.duration,
            ));
            if !exp.company.is_empty() {
                lines.push(exp.company.clone());
            }
            if !exp.description.is_empty() {
                lines.extend(exp.description.lines().map(str::to_string));
            }
        }
    }

    if !data.education.is_empty() {
        push_section(&mut lines, "EDUCATION");
        for edu in &data.education {
            lines.push(heading_with(or_placeholder(&edu.degree, "Degree"), &edu.year));
            if !edu.institution.is_empty() {
                lines.push(edu.institution.clone());
            }
            if !edu.gpa.is_empty() {
                lines.push(format!("GPA: {}", edu.gpa));
            }
        }
    }

    if !data.skills.is_empty() {
        push_section(&mut lines, "TECHNICAL SKILLS");
        lines.push(data.skills.join(", "));
    }

    if !data.projects.is_empty() {
        push_section(&mut lines, "PROJECTS");
        for proj in &data.projects {
            lines.push(or_placeholder(&proj.name, "Project Name").to_string());
            if !proj.technologies.is_empty() {
                lines.push(format!("Technologies: {}", proj.technologies));
            }
            if !proj.description.is_empty() {
                lines.push(proj.description.clone());
            }
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

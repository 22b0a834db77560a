//! Structured resume and job posting data model

use serde::{Deserialize, Serialize};

/// A job posting as supplied by the caller. Never mutated by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
}

/// Structured resume content. The scorer treats every field as read-only;
/// skills are deduplicated case-insensitively during matching but the
/// original casing and order are never altered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// One role on the resume. `bullets` may be empty but is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    pub institution: String,
}

/// A resume field searched independently during matching, in fixed
/// priority order: skills, experience bullets, summary, education.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeField {
    Skills,
    Experience,
    Summary,
    Education,
}

impl ResumeField {
    /// Matching priority, highest first.
    pub const PRIORITY: [ResumeField; 4] = [
        ResumeField::Skills,
        ResumeField::Experience,
        ResumeField::Summary,
        ResumeField::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeField::Skills => "skills",
            ResumeField::Experience => "experience",
            ResumeField::Summary => "summary",
            ResumeField::Education => "education",
        }
    }
}

impl ResumeContent {
    /// The title of the most recent role, taken from the first experience
    /// entry (resumes are ordered reverse-chronologically).
    pub fn latest_role_title(&self) -> Option<&str> {
        self.experience.first().map(|e| e.title.as_str())
    }

    pub fn has_summary(&self) -> bool {
        self.summary
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_deserializes_with_missing_optional_fields() {
        let json = r#"{
            "experience": [
                {"title": "Backend Engineer", "company": "Acme", "bullets": ["Built APIs"]}
            ],
            "skills": ["Rust", "PostgreSQL"]
        }"#;

        let resume: ResumeContent = serde_json::from_str(json).unwrap();
        assert!(resume.summary.is_none());
        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.skills.len(), 2);
        assert!(resume.education.is_empty());
    }

    #[test]
    fn test_experience_bullets_default_to_empty() {
        let json = r#"{"title": "Engineer", "company": "Acme"}"#;
        let entry: ExperienceEntry = serde_json::from_str(json).unwrap();
        assert!(entry.bullets.is_empty());
    }

    #[test]
    fn test_latest_role_title_is_first_entry() {
        let resume = ResumeContent {
            summary: None,
            experience: vec![
                ExperienceEntry {
                    title: "Staff Engineer".to_string(),
                    company: "Now".to_string(),
                    bullets: vec![],
                },
                ExperienceEntry {
                    title: "Junior Engineer".to_string(),
                    company: "Before".to_string(),
                    bullets: vec![],
                },
            ],
            skills: vec![],
            education: vec![],
        };
        assert_eq!(resume.latest_role_title(), Some("Staff Engineer"));
    }

    #[test]
    fn test_field_priority_order_and_names() {
        let names: Vec<&str> = ResumeField::PRIORITY.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, vec!["skills", "experience", "summary", "education"]);
    }

    #[test]
    fn test_blank_summary_counts_as_missing() {
        let resume = ResumeContent {
            summary: Some("   ".to_string()),
            experience: vec![],
            skills: vec![],
            education: vec![],
        };
        assert!(!resume.has_summary());
    }
}

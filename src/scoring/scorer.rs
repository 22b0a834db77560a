//! Sub-score computation: keyword coverage, title alignment, skills
//! alignment, and structural format compliance

use serde::Serialize;
use std::collections::HashSet;

use super::extractor::Keyword;
use super::lexicon::Lexicon;
use super::matcher::MatchResult;
use super::normalizer::Normalizer;
use super::resume::{ResumeContent, ResumeField};

pub const MIN_EXPERIENCE_ENTRIES: usize = 2;
pub const MIN_SKILLS: usize = 3;

pub const PENALTY_MISSING_SUMMARY: u32 = 10;
pub const PENALTY_FEW_EXPERIENCE_ENTRIES: u32 = 15;
pub const PENALTY_BULLETLESS_ENTRY: u32 = 10;
pub const PENALTY_BULLETLESS_CAP: u32 = 30;
pub const PENALTY_SPARSE_SKILLS: u32 = 15;
pub const PENALTY_MISSING_EDUCATION: u32 = 10;

/// The four partial scores, each an integer in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subscores {
    pub keyword_match: u8,
    pub title_match: u8,
    pub skills_match: u8,
    pub format_compliance: u8,
}

/// A violated structural rule, each with a fixed deduction and a fixed
/// remediation sentence for the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatIssue {
    MissingSummary,
    TooFewExperienceEntries,
    BulletlessEntries { count: usize },
    SparseSkills,
    MissingEducation,
}

impl FormatIssue {
    pub fn penalty(&self) -> u32 {
        match self {
            FormatIssue::MissingSummary => PENALTY_MISSING_SUMMARY,
            FormatIssue::TooFewExperienceEntries => PENALTY_FEW_EXPERIENCE_ENTRIES,
            FormatIssue::BulletlessEntries { count } => {
                (PENALTY_BULLETLESS_ENTRY * *count as u32).min(PENALTY_BULLETLESS_CAP)
            }
            FormatIssue::SparseSkills => PENALTY_SPARSE_SKILLS,
            FormatIssue::MissingEducation => PENALTY_MISSING_EDUCATION,
        }
    }

    pub fn remediation(&self) -> &'static str {
        match self {
            FormatIssue::MissingSummary => "Add a professional summary.",
            FormatIssue::TooFewExperienceEntries => {
                "List at least two roles in your experience section."
            }
            FormatIssue::BulletlessEntries { .. } => {
                "Describe every role with accomplishment bullets."
            }
            FormatIssue::SparseSkills => "List at least three skills in a dedicated skills section.",
            FormatIssue::MissingEducation => "Add an education section.",
        }
    }
}

/// Share of total keyword weight that was matched. An empty keyword set
/// asserts no requirement, so it scores 100.
pub fn keyword_match_score(keywords: &[Keyword], results: &[MatchResult]) -> u8 {
    let total: f64 = keywords.iter().map(|k| k.weight).sum();
    if total <= 0.0 {
        return 100;
    }
    let matched: f64 = keywords
        .iter()
        .zip(results)
        .filter(|(_, r)| r.matched)
        .map(|(k, _)| k.weight)
        .sum();
    to_score(matched / total)
}

/// Fraction of significant job-title tokens present in the resume's most
/// recent role title. An empty title asserts nothing and scores 100.
pub fn title_match_score(
    normalizer: &Normalizer,
    lexicon: &Lexicon,
    job_title: &str,
    resume: &ResumeContent,
) -> u8 {
    let significant: Vec<String> = normalizer
        .normalize(job_title)
        .into_iter()
        .filter(|t| !lexicon.is_stopword(t))
        .collect();
    if significant.is_empty() {
        return 100;
    }

    let role_tokens: HashSet<String> = resume
        .latest_role_title()
        .map(|title| normalizer.normalize(title).into_iter().collect())
        .unwrap_or_default();

    let present = significant
        .iter()
        .filter(|t| role_tokens.contains(*t))
        .count();
    to_score(present as f64 / significant.len() as f64)
}

/// Coverage of skill-dictionary-tagged keywords within the skills field.
/// Falls back to the keyword score when no keyword is skill-tagged, to
/// avoid an undefined ratio.
pub fn skills_match_score(
    lexicon: &Lexicon,
    keywords: &[Keyword],
    results: &[MatchResult],
    keyword_match: u8,
) -> u8 {
    let tagged: Vec<&MatchResult> = keywords
        .iter()
        .zip(results)
        .filter(|(k, _)| lexicon.is_skill_term(&k.term))
        .map(|(_, r)| r)
        .collect();
    if tagged.is_empty() {
        return keyword_match;
    }

    let in_skills = tagged
        .iter()
        .filter(|r| r.located_in.contains(&ResumeField::Skills))
        .count();
    to_score(in_skills as f64 / tagged.len() as f64)
}

/// Structural compliance: start at 100, deduct a fixed penalty per violated
/// rule, floor at 0. Returns the violated rules for the suggestion list.
pub fn format_compliance_score(resume: &ResumeContent) -> (u8, Vec<FormatIssue>) {
    let mut issues = Vec::new();

    if !resume.has_summary() {
        issues.push(FormatIssue::MissingSummary);
    }
    if resume.experience.len() < MIN_EXPERIENCE_ENTRIES {
        issues.push(FormatIssue::TooFewExperienceEntries);
    }
    let bulletless = resume
        .experience
        .iter()
        .filter(|e| e.bullets.is_empty())
        .count();
    if bulletless > 0 {
        issues.push(FormatIssue::BulletlessEntries { count: bulletless });
    }
    if resume.skills.len() < MIN_SKILLS {
        issues.push(FormatIssue::SparseSkills);
    }
    if resume.education.is_empty() {
        issues.push(FormatIssue::MissingEducation);
    }

    let deduction: u32 = issues.iter().map(FormatIssue::penalty).sum();
    let score = 100u32.saturating_sub(deduction) as u8;
    (score, issues)
}

fn to_score(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::super::extractor::SourceSpan;
    use super::super::matcher::FieldMatcher;
    use super::super::resume::{EducationEntry, ExperienceEntry};
    use super::*;

    fn keyword(term: &str, weight: f64) -> Keyword {
        Keyword {
            term: term.to_string(),
            weight,
            source: SourceSpan::Body,
            variants: Vec::new(),
        }
    }

    fn full_resume() -> ResumeContent {
        ResumeContent {
            summary: Some("Backend engineer".to_string()),
            experience: vec![
                ExperienceEntry {
                    title: "Senior Backend Engineer".to_string(),
                    company: "Acme".to_string(),
                    bullets: vec!["Built Python services".to_string()],
                },
                ExperienceEntry {
                    title: "Backend Engineer".to_string(),
                    company: "Beta".to_string(),
                    bullets: vec!["Operated PostgreSQL clusters".to_string()],
                },
            ],
            skills: vec![
                "Python".to_string(),
                "PostgreSQL".to_string(),
                "Docker".to_string(),
            ],
            education: vec![EducationEntry {
                degree: "BSc".to_string(),
                field: Some("Computer Science".to_string()),
                institution: "State University".to_string(),
            }],
        }
    }

    fn match_against(keywords: &[Keyword], resume: &ResumeContent) -> Vec<MatchResult> {
        let normalizer = Normalizer::new();
        let lexicon = Lexicon::new();
        FieldMatcher::new(&normalizer, &lexicon).match_keywords(keywords, resume)
    }

    #[test]
    fn test_keyword_score_is_weight_share_of_matches() {
        let keywords = vec![keyword("python", 3.0), keyword("terraform", 1.0)];
        let results = match_against(&keywords, &full_resume());
        assert_eq!(keyword_match_score(&keywords, &results), 75);
    }

    #[test]
    fn test_empty_keyword_set_scores_full() {
        assert_eq!(keyword_match_score(&[], &[]), 100);
    }

    #[test]
    fn test_title_score_full_on_exact_alignment() {
        let normalizer = Normalizer::new();
        let lexicon = Lexicon::new();
        let score =
            title_match_score(&normalizer, &lexicon, "Senior Backend Engineer", &full_resume());
        assert_eq!(score, 100);
    }

    #[test]
    fn test_title_score_proportional_to_token_overlap() {
        let normalizer = Normalizer::new();
        let lexicon = Lexicon::new();
        let score = title_match_score(
            &normalizer,
            &lexicon,
            "Senior Platform Engineer",
            &full_resume(),
        );
        // "senior" and "engineer" of three significant tokens
        assert_eq!(score, 67);
    }

    #[test]
    fn test_empty_title_scores_full() {
        let normalizer = Normalizer::new();
        let lexicon = Lexicon::new();
        assert_eq!(title_match_score(&normalizer, &lexicon, "", &full_resume()), 100);
        assert_eq!(
            title_match_score(&normalizer, &lexicon, "the and", &full_resume()),
            100
        );
    }

    #[test]
    fn test_skills_score_counts_skill_tagged_coverage() {
        let lexicon = Lexicon::new();
        // python and postgresql live in the skills list, kubernetes nowhere
        let keywords = vec![
            keyword("python", 2.0),
            keyword("kubernetes", 2.0),
            keyword("postgresql", 2.0),
        ];
        let results = match_against(&keywords, &full_resume());
        assert_eq!(skills_match_score(&lexicon, &keywords, &results, 0), 67);
    }

    #[test]
    fn test_skills_score_defaults_to_keyword_score_without_tagged_keywords() {
        let lexicon = Lexicon::new();
        let keywords = vec![keyword("synergy", 1.0)];
        let results = match_against(&keywords, &full_resume());
        assert_eq!(skills_match_score(&lexicon, &keywords, &results, 42), 42);
    }

    #[test]
    fn test_format_compliance_full_on_complete_resume() {
        let (score, issues) = format_compliance_score(&full_resume());
        assert_eq!(score, 100);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_missing_summary_costs_exactly_ten_points() {
        let mut resume = full_resume();
        resume.summary = None;
        let (score, issues) = format_compliance_score(&resume);
        assert_eq!(score, 90);
        assert_eq!(issues, vec![FormatIssue::MissingSummary]);
    }

    #[test]
    fn test_few_experience_entries_penalized() {
        let mut resume = full_resume();
        resume.experience.clear();
        let (score, issues) = format_compliance_score(&resume);
        assert!(score <= 85);
        assert!(issues.contains(&FormatIssue::TooFewExperienceEntries));
    }

    #[test]
    fn test_bulletless_entry_penalty_caps_at_thirty() {
        let mut resume = full_resume();
        for i in 0..4 {
            resume.experience.push(ExperienceEntry {
                title: format!("Role {i}"),
                company: "Acme".to_string(),
                bullets: vec![],
            });
        }
        let (score, issues) = format_compliance_score(&resume);
        assert!(issues.contains(&FormatIssue::BulletlessEntries { count: 4 }));
        // 100 - 30 (capped) = 70
        assert_eq!(score, 70);
    }

    #[test]
    fn test_format_penalties_accumulate_across_rules() {
        let resume = ResumeContent {
            summary: None,
            experience: vec![
                ExperienceEntry {
                    title: "Role".to_string(),
                    company: "Acme".to_string(),
                    bullets: vec![],
                };
                1
            ],
            skills: vec![],
            education: vec![],
        };
        let (score, _) = format_compliance_score(&resume);
        // 10 + 15 + 10 + 15 + 10 = 60 in penalties
        assert_eq!(score, 40);
    }
}

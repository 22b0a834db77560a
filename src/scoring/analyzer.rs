//! Scoring engine: wires the pipeline together and builds the report

use log::debug;
use serde::Serialize;
use strsim::jaro_winkler;

use super::extractor::{Keyword, KeywordExtractor, MAX_KEYWORDS};
use super::lexicon::Lexicon;
use super::matcher::FieldMatcher;
use super::normalizer::Normalizer;
use super::resume::{JobPosting, ResumeContent};
use super::scorer::{self, Subscores};
use super::weights::Weights;
use crate::config::Config;
use crate::error::Result;

/// The missing-keyword list is capped to keep the report focused.
pub const MAX_MISSING_REPORTED: usize = 15;
/// At most this many missing keywords turn into suggestions.
pub const MAX_KEYWORD_SUGGESTIONS: usize = 5;
/// Jaro-Winkler threshold above which a resume skill counts as a near miss
/// of a missing keyword, used for wording hints only.
pub const NEAR_MISS_SIMILARITY: f64 = 0.85;

/// The compatibility report returned to the caller. Serializes directly as
/// a response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsScore {
    pub overall: u8,
    pub subscores: Subscores,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Stateless scoring engine. Holds the lexicon and tuning knobs; every
/// `score` call is a pure function of its inputs.
pub struct ScoringEngine {
    normalizer: Normalizer,
    lexicon: Lexicon,
    weights: Weights,
    max_keywords: usize,
    max_missing: usize,
    max_keyword_suggestions: usize,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
            lexicon: Lexicon::new(),
            weights: Weights::default(),
            max_keywords: MAX_KEYWORDS,
            max_missing: MAX_MISSING_REPORTED,
            max_keyword_suggestions: MAX_KEYWORD_SUGGESTIONS,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            normalizer: Normalizer::new(),
            lexicon: Lexicon::new(),
            weights: config.scoring.weights(),
            max_keywords: config.extraction.max_keywords,
            max_missing: config.extraction.max_missing_keywords,
            max_keyword_suggestions: config.extraction.max_keyword_suggestions,
        }
    }

    /// Score a resume against a job posting. Total over well-typed input:
    /// degenerate inputs (empty description, empty resume) score through
    /// the default rules instead of failing.
    pub fn score(
        &self,
        resume: &ResumeContent,
        job_description: &str,
        job_title: &str,
    ) -> Result<AtsScore> {
        let extractor =
            KeywordExtractor::with_cap(&self.normalizer, &self.lexicon, self.max_keywords);
        let keywords = extractor.extract(job_title, job_description);
        debug!("extracted {} keywords from posting", keywords.len());

        let matcher = FieldMatcher::new(&self.normalizer, &self.lexicon);
        let results = matcher.match_keywords(&keywords, resume);

        let keyword_match = scorer::keyword_match_score(&keywords, &results);
        let title_match =
            scorer::title_match_score(&self.normalizer, &self.lexicon, job_title, resume);
        let skills_match =
            scorer::skills_match_score(&self.lexicon, &keywords, &results, keyword_match);
        let (format_compliance, format_issues) = scorer::format_compliance_score(resume);

        let subscores = Subscores {
            keyword_match,
            title_match,
            skills_match,
            format_compliance,
        };
        let overall = self.weights.overall(&subscores);

        let matched_keywords: Vec<String> = keywords
            .iter()
            .zip(&results)
            .filter(|(_, r)| r.matched)
            .map(|(k, _)| k.term.clone())
            .collect();
        let missing: Vec<&Keyword> = keywords
            .iter()
            .zip(&results)
            .filter(|(_, r)| !r.matched)
            .map(|(k, _)| k)
            .collect();
        let missing_keywords: Vec<String> = missing
            .iter()
            .take(self.max_missing)
            .map(|k| k.term.clone())
            .collect();

        let mut suggestions: Vec<String> = format_issues
            .iter()
            .map(|issue| issue.remediation().to_string())
            .collect();
        for keyword in missing.iter().take(self.max_keyword_suggestions) {
            suggestions.push(self.keyword_suggestion(keyword, resume));
        }

        Ok(AtsScore {
            overall,
            subscores,
            matched_keywords,
            missing_keywords,
            suggestions,
        })
    }

    /// Score a resume against a `JobPosting`.
    pub fn score_posting(&self, resume: &ResumeContent, posting: &JobPosting) -> Result<AtsScore> {
        self.score(resume, &posting.description, &posting.title)
    }

    /// Missing-keyword suggestion. When a listed skill is a near miss of
    /// the posting's wording, recommend adopting the exact wording; ATS
    /// filters match literally.
    fn keyword_suggestion(&self, keyword: &Keyword, resume: &ResumeContent) -> String {
        let near_miss = resume.skills.iter().find(|skill| {
            let normalized = self.normalizer.normalize(skill).join(" ");
            !normalized.is_empty()
                && normalized != keyword.term
                && jaro_winkler(&normalized, &keyword.term) >= NEAR_MISS_SIMILARITY
        });

        match near_miss {
            Some(skill) => format!(
                "Use the posting's exact wording \"{}\" instead of \"{}\".",
                keyword.term, skill
            ),
            None => format!("Consider adding experience with {}.", keyword.term),
        }
    }
}

/// Single entry point: score a resume against a job posting with the
/// default engine configuration.
pub fn score(resume: &ResumeContent, job_description: &str, job_title: &str) -> Result<AtsScore> {
    ScoringEngine::new().score(resume, job_description, job_title)
}
